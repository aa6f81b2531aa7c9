use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn selene() -> Command {
    let mut cmd = Command::cargo_bin("selene").unwrap();
    cmd.env_remove("SELENE_LOG");
    cmd
}

fn write_source(dir: &TempDir, content: &str) -> std::path::PathBuf {
    let path = dir.path().join("main.sel");
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn prints_every_token_until_end_of_stream() {
    let dir = TempDir::new().unwrap();
    let path = write_source(&dir, "greeting = \"hello\"\ncount = 1 + 41\n");

    selene()
        .arg(&path)
        .arg("--lexer")
        .assert()
        .success()
        .stdout(
            "Identifier \"greeting\"\n\
             Assign \"=\"\n\
             StringLiteral \"hello\"\n\
             Newline \"\\n\"\n\
             Identifier \"count\"\n\
             Assign \"=\"\n\
             Integer \"1\"\n\
             Plus \"+\"\n\
             Integer \"41\"\n\
             Newline \"\\n\"\n",
        );
}

#[test]
fn empty_file_prints_nothing() {
    let dir = TempDir::new().unwrap();
    let path = write_source(&dir, "");

    selene()
        .arg(&path)
        .arg("--lexer")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn unexpected_character_fails_with_position() {
    let dir = TempDir::new().unwrap();
    let path = write_source(&dir, "x = 1\ny = !");

    selene()
        .arg(&path)
        .arg("--lexer")
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("Integer \"1\""))
        .stderr(predicate::str::contains(
            "unexpected character '!' at 2:5 (offset 10)",
        ));
}

#[test]
fn unterminated_string_is_an_unexpected_quote() {
    let dir = TempDir::new().unwrap();
    let path = write_source(&dir, "'abc");

    selene()
        .arg(&path)
        .arg("--lexer")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unexpected character '\\'' at 1:1"));
}

#[test]
fn keep_going_reports_and_continues() {
    let dir = TempDir::new().unwrap();
    let path = write_source(&dir, "a ! b");

    selene()
        .arg(&path)
        .args(["--lexer", "--keep-going"])
        .assert()
        .failure()
        .stdout("Identifier \"a\"\nIdentifier \"b\"\n")
        .stderr(predicate::str::contains("1 unexpected character(s)"));
}

#[test]
fn missing_file_fails() {
    let dir = TempDir::new().unwrap();

    selene()
        .arg(dir.path().join("nope.sel"))
        .arg("--lexer")
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot read"));
}

#[test]
fn verbose_logs_go_to_stderr() {
    let dir = TempDir::new().unwrap();
    let path = write_source(&dir, "a");

    selene()
        .arg(&path)
        .args(["--lexer", "--verbose"])
        .assert()
        .success()
        .stdout("Identifier \"a\"\n")
        .stderr(predicate::str::contains("read source"));
}

#[test]
fn version_flag() {
    selene()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}
