use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn menu_exit_returns_success() {
    let mut cmd = Command::cargo_bin("yt-transcripts").unwrap();
    cmd.write_stdin("4\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "=== YouTube Transcript Downloader ===",
        ))
        .stdout(predicate::str::contains(
            "Thank you for using YouTube Transcript Downloader!",
        ));
}

#[test]
fn invalid_menu_entries_reprompt_until_valid() {
    let mut cmd = Command::cargo_bin("yt-transcripts").unwrap();
    cmd.write_stdin("9\nabc\n4\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Please enter a number between 1 and 4.",
        ));
}

#[test]
fn help_lists_global_switches() {
    let mut cmd = Command::cargo_bin("yt-transcripts").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--verbose"))
        .stdout(predicate::str::contains("--quiet"));
}
