use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn celengan(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("celengan").expect("binary exists");
    cmd.env("CELENGAN_SCRIPT", "1")
        .env("CELENGAN_HOME", home.path())
        .env("NO_COLOR", "1");
    cmd
}

#[test]
fn deposit_shows_up_in_listing() {
    let home = TempDir::new().expect("temp home");
    celengan(&home)
        .write_stdin("new Laptop 1000000\ndeposit @1 500000\nlist\nexit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Jar `Laptop` created"))
        .stdout(predicate::str::contains("Rp 1,000,000"))
        .stdout(predicate::str::contains("50%"))
        .stdout(predicate::str::contains("not yet complete"));

    assert!(home.path().join("jars").join("Laptop.json").is_file());
}

#[test]
fn jars_survive_between_runs() {
    let home = TempDir::new().expect("temp home");
    celengan(&home)
        .write_stdin("new \"Dana Darurat\" 200\ndeposit \"Dana Darurat\" 250\n")
        .assert()
        .success();

    celengan(&home)
        .write_stdin("show @1\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Dana Darurat"))
        .stdout(predicate::str::contains("100%"))
        .stdout(predicate::str::contains("0 days"));
}

#[test]
fn duplicate_names_are_rejected() {
    let home = TempDir::new().expect("temp home");
    celengan(&home)
        .write_stdin("new Motor 10\nnew Motor 20\nshow Motor\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"))
        .stdout(predicate::str::contains("Rp 10"));
}

#[test]
fn unknown_command_gets_a_suggestion() {
    let home = TempDir::new().expect("temp home");
    celengan(&home)
        .write_stdin("lsit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Unknown command `lsit`"))
        .stdout(predicate::str::contains("Did you mean `list`?"));
}

#[test]
fn empty_listing_warns() {
    let home = TempDir::new().expect("temp home");
    celengan(&home)
        .write_stdin("list\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("No savings jars yet."));
}

#[test]
fn delete_in_script_mode_needs_no_prompt() {
    let home = TempDir::new().expect("temp home");
    celengan(&home)
        .write_stdin("new Trip 10\ndelete Trip\nlist\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Jar `Trip` deleted."))
        .stdout(predicate::str::contains("No savings jars yet."));

    assert!(!home.path().join("jars").join("Trip.json").exists());
}

#[test]
fn help_lists_commands() {
    let home = TempDir::new().expect("temp home");
    celengan(&home)
        .write_stdin("help\nhelp deposit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Available commands"))
        .stdout(predicate::str::contains("withdraw"))
        .stdout(predicate::str::contains("deposit <jar> <amount>"));
}

#[test]
fn config_changes_currency_symbol() {
    let home = TempDir::new().expect("temp home");
    celengan(&home)
        .write_stdin("config currency_symbol IDR\nnew Sepeda 1500\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("IDR 1,500"));

    assert!(home.path().join("config").join("config.json").is_file());
}

#[test]
fn info_prints_once_in_script_mode() {
    let home = TempDir::new().expect("temp home");
    celengan(&home)
        .write_stdin("new A 10\ndeposit A 10\ninfo\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Completed: 1"))
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}
