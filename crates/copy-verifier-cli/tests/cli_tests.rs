use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::{tempdir, TempDir};

fn write_file(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// src/{a.txt: "hello", sub/b.txt: "world"}, dest/{a.txt: "hello", sub/b.txt: "different"}
fn example_trees() -> TempDir {
    let tmp = tempdir().unwrap();
    write_file(&tmp.path().join("src"), "a.txt", "hello");
    write_file(&tmp.path().join("src"), "sub/b.txt", "world");
    write_file(&tmp.path().join("dest"), "a.txt", "hello");
    write_file(&tmp.path().join("dest"), "sub/b.txt", "different");
    tmp
}

fn copy_verifier(cwd: &Path) -> Command {
    let mut cmd = Command::cargo_bin("copy-verifier").unwrap();
    cmd.current_dir(cwd)
        .env("NO_COLOR", "1")
        .env("TRACING_LEVEL", "off")
        .env_remove("LOG_FILE_PATH");
    cmd
}

#[test]
fn test_reports_missing_file_in_content_mode() {
    let tmp = example_trees();

    copy_verifier(tmp.path())
        .args(["verify", "-s", "src", "-d", "dest"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Missing files found:"))
        .stdout(predicate::str::contains(
            "Identifier: 486ea46224d1bb4fb680f34f7c9ad96a8f24ec88be73ea8e5a6c65260e9cb8a7",
        ))
        .stdout(predicate::str::contains("b.txt"))
        .stdout(predicate::str::contains("a.txt").not());
}

#[test]
fn test_name_mode_finds_nothing_missing() {
    let tmp = example_trees();

    copy_verifier(tmp.path())
        .args(["verify", "--source", "src", "--dest", "dest", "--use-names"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No missing files found."));
}

#[test]
fn test_second_destination_completes_the_copy() {
    let tmp = example_trees();
    write_file(&tmp.path().join("dest2"), "moved/b-copy.txt", "world");

    copy_verifier(tmp.path())
        .args(["verify", "-s", "src", "-d", "dest", "-d", "dest2", "--parallel"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No missing files found."));
}

#[test]
fn test_missing_destination_argument_is_fatal() {
    let tmp = example_trees();

    copy_verifier(tmp.path())
        .args(["verify", "-s", "src"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("destination directory is required"));
}

#[test]
fn test_unknown_algorithm_is_rejected() {
    let tmp = example_trees();

    copy_verifier(tmp.path())
        .args(["verify", "-s", "src", "-d", "dest", "--algorithm", "md5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("md5"));
}

#[test]
fn test_strict_fails_on_unavailable_directory() {
    let tmp = example_trees();
    write_file(&tmp.path().join("dest"), "sub/b.txt", "world");

    copy_verifier(tmp.path())
        .args(["verify", "-s", "src", "-d", "dest", "-d", "not_mounted"])
        .assert()
        .success()
        .stderr(predicate::str::contains("1 path(s) could not be identified"));

    copy_verifier(tmp.path())
        .args(["verify", "-s", "src", "-d", "dest", "-d", "not_mounted", "--strict"])
        .assert()
        .code(2);
}

#[test]
fn test_directories_from_config_file() {
    let tmp = example_trees();
    fs::write(
        tmp.path().join("CopyVerifier.toml"),
        "sources = [\"src\"]\ndestinations = [\"dest\"]\nuse_names = true\n",
    )
    .unwrap();

    copy_verifier(tmp.path())
        .arg("verify")
        .assert()
        .success()
        .stdout(predicate::str::contains("No missing files found."));

    copy_verifier(tmp.path())
        .arg("print-config")
        .assert()
        .success()
        .stdout(predicate::str::contains("use_names: true"));
}

#[test]
fn test_destinations_from_environment_list() {
    let tmp = example_trees();
    write_file(&tmp.path().join("dest2"), "moved/b-copy.txt", "world");

    copy_verifier(tmp.path())
        .env("COPY_VERIFIER_DESTINATIONS", "dest,dest2")
        .args(["verify", "-s", "src"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No missing files found."));

    // Flags still win over a list from the environment
    copy_verifier(tmp.path())
        .env("COPY_VERIFIER_SOURCES", "elsewhere")
        .args(["verify", "-s", "src", "-d", "dest"])
        .assert()
        .code(1);
}

#[test]
fn test_strict_outranks_missing_files() {
    let tmp = example_trees();

    copy_verifier(tmp.path())
        .args(["verify", "-s", "src", "-d", "dest", "-d", "not_mounted", "--strict"])
        .assert()
        .code(2)
        .stdout(predicate::str::contains("Missing files found:"));
}
