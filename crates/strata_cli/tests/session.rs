//! End-to-end sessions against the `strata` binary with piped stdin.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;

fn strata(dir: &tempfile::TempDir) -> Command {
    let settings = dir.path().join("settings.toml");
    fs::write(&settings, "typewriter_delay_ms = 0\n").unwrap();
    let mut cmd = Command::cargo_bin("strata").unwrap();
    cmd.current_dir(dir.path())
        .env("STRATA_SETTINGS", &settings)
        .env("STRATA_COMMANDS_FILE", dir.path().join("commands.cfg"))
        .env("NO_COLOR", "1")
        .env_remove("STRATA_LOG");
    cmd
}

#[test]
fn chained_commands_then_exit() {
    let dir = tempfile::tempdir().unwrap();
    strata(&dir)
        .write_stdin("echo hi && echo there\nexit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("\nhi\n"))
        .stdout(predicate::str::contains("\nthere\n"))
        .stdout(predicate::str::contains("Goodbye!"));
}

#[test]
fn end_of_input_exits_cleanly() {
    let dir = tempfile::tempdir().unwrap();
    strata(&dir)
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::contains("Welcome to the Strata Shell"))
        .stdout(predicate::str::contains("No "))
        .stdout(predicate::str::contains("Goodbye!"));
}

#[test]
fn aliases_from_the_commands_file_are_loaded() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("commands.cfg"), "hey=echo hello\n\n[broken]\nhelp = nothing\n").unwrap();
    strata(&dir)
        .write_stdin("hey world\nexit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Successfully loaded 0 custom command(s)."))
        .stdout(predicate::str::contains("- broken: line 3: missing 'command' key"))
        .stdout(predicate::str::contains("hello world"));
}

#[test]
fn version_flag() {
    Command::cargo_bin("strata")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("0.1.0"));
}
