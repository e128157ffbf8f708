#![allow(clippy::unwrap_used)]
// CLI smoke tests.

use assert_cmd::Command;
use predicates::prelude::*;

fn backlot() -> Command {
    let mut cmd = Command::cargo_bin("backlot").unwrap();
    // Isolate from any real config or environment on the host.
    cmd.env("HOME", "/nonexistent")
        .env_remove("XDG_CONFIG_HOME")
        .env_remove("BACKLOT_PROFILE")
        .env_remove("BACKLOT_API_URL")
        .env_remove("BACKLOT_TOKEN");
    cmd
}

#[test]
fn help_lists_resource_commands() {
    backlot()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("brands"))
        .stdout(predicate::str::contains("equipment"))
        .stdout(predicate::str::contains("articles"))
        .stdout(predicate::str::contains("staff"));
}

#[test]
fn version_flag_works() {
    backlot()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("backlot"));
}

#[test]
fn no_arguments_shows_usage() {
    backlot()
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn list_subcommand_help_shows_paging_flags() {
    backlot()
        .args(["brands", "list", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--page"))
        .stdout(predicate::str::contains("--limit"))
        .stdout(predicate::str::contains("--search"));
}

#[test]
fn commands_fail_cleanly_without_configuration() {
    backlot()
        .args(["brands", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("config"));
}

#[test]
fn config_path_prints_a_location() {
    backlot()
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}
