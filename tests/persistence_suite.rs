mod common;

use std::fs;

use celengan::{
    core::{metrics, Completion},
    errors::JarError,
    storage::JarStorage,
};
use chrono::Duration;
use regex::Regex;
use serde_json::Value;

use common::setup_store;

#[test]
fn laptop_goal_persists_across_store_instances() {
    let (store, storage, clock, _temp) = setup_store();

    store.create("Laptop", 1_000_000).expect("create jar");
    clock.advance(Duration::days(2));
    store.deposit("Laptop", 500_000).expect("first deposit");
    clock.advance(Duration::days(5) + Duration::hours(3));
    store.deposit("Laptop", 600_000).expect("second deposit");

    let reopened = celengan::core::JarStore::new(Box::new(storage.clone()));
    let jar = reopened.read("Laptop").expect("read after reopen");
    assert_eq!(jar.current, 1_100_000);
    assert_eq!(metrics::progress_percent(&jar), 100);
    assert!(metrics::is_complete(&jar));
    assert_eq!(
        metrics::days_to_completion(&jar),
        Completion::Completed { days: 7 }
    );
}

#[test]
fn record_file_holds_the_four_fields() {
    let (store, storage, _clock, _temp) = setup_store();
    store.create("Dana Darurat", 5_000_000).expect("create jar");

    let path = storage.record_path("Dana Darurat");
    assert_eq!(
        path.file_name().and_then(|name| name.to_str()),
        Some("Dana Darurat.json")
    );
    let raw = fs::read_to_string(&path).expect("read record file");
    let value: Value = serde_json::from_str(&raw).expect("record is json");
    let object = value.as_object().expect("record is an object");

    let mut keys: Vec<_> = object.keys().map(String::as_str).collect();
    keys.sort();
    assert_eq!(keys, vec!["created_at", "current", "target", "updated_at"]);
    assert_eq!(object["target"], 5_000_000);
    assert_eq!(object["current"], 0);

    let stamp = Regex::new(r"^\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2}$").expect("regex");
    for field in ["created_at", "updated_at"] {
        let text = object[field].as_str().expect("timestamp is a string");
        assert!(stamp.is_match(text), "{field} = {text}");
    }
}

#[test]
fn hand_written_records_load() {
    let (store, storage, _clock, _temp) = setup_store();
    fs::write(
        storage.record_path("Motor"),
        r#"{"target": 1000, "current": 1200, "created_at": "2025-07-01 10:00:00", "updated_at": "2025-07-03 09:59:59"}"#,
    )
    .expect("write legacy record");

    let jar = store.read("Motor").expect("read hand written record");
    assert_eq!(jar.name, "Motor");
    assert_eq!(
        metrics::days_to_completion(&jar),
        Completion::Completed { days: 1 }
    );
}

#[test]
fn malformed_timestamps_degrade_and_are_repaired_on_write() {
    let (store, storage, _clock, _temp) = setup_store();
    fs::write(
        storage.record_path("Odd"),
        r#"{"target": 10, "current": 10, "created_at": "kemarin", "updated_at": "-"}"#,
    )
    .expect("write record");

    let jar = store.read("Odd").expect("read record");
    assert_eq!(metrics::days_to_completion(&jar), Completion::Malformed);

    // the prior created_at is kept verbatim; only updated_at is restamped
    let written = store.write("Odd", &jar).expect("write record");
    assert_eq!(written.created_at, "kemarin");
    assert_eq!(written.updated_at, "2025-08-01 09:00:00");
    assert_eq!(metrics::days_to_completion(&written), Completion::Malformed);
}

#[test]
fn list_ignores_foreign_and_staging_files() {
    let (store, storage, _clock, _temp) = setup_store();
    store.create("Bike", 1).expect("create bike");
    store.create("Amp", 1).expect("create amp");
    fs::write(storage.root().join("notes.txt"), "hello").expect("write txt");
    fs::write(storage.root().join("Half.json.tmp"), "{").expect("write tmp");
    fs::create_dir_all(storage.root().join("nested.json")).expect("create dir");
    fs::write(storage.root().join(".backup.json"), "{}").expect("write hidden");
    fs::write(
        storage.root().join("Motor .json"),
        r#"{"target": 1, "current": 0}"#,
    )
    .expect("write padded name");

    assert_eq!(store.list().expect("list"), vec!["Amp", "Bike"]);
    let names: Vec<_> = store
        .overview()
        .expect("overview skips unaddressable files")
        .into_iter()
        .map(|row| row.jar.name)
        .collect();
    assert_eq!(names, vec!["Amp", "Bike"]);
}

#[test]
fn failed_write_leaves_previous_record_intact() {
    let (store, storage, _clock, _temp) = setup_store();
    store.create("Reliable", 100).expect("create jar");
    store.deposit("Reliable", 40).expect("deposit");
    let path = storage.record_path("Reliable");
    let original = fs::read_to_string(&path).expect("read original");

    // A directory at the staging path makes the temporary file impossible to create.
    let mut tmp = path.clone();
    tmp.set_extension("json.tmp");
    fs::create_dir_all(&tmp).expect("block staging path");

    let result = store.deposit("Reliable", 60);
    assert!(matches!(result, Err(JarError::Storage(_))));
    assert_eq!(fs::read_to_string(&path).expect("read after failure"), original);
    assert_eq!(store.read("Reliable").expect("read").current, 40);
}

#[test]
fn rename_moves_the_file() {
    let (store, storage, clock, _temp) = setup_store();
    store.create("Old", 10).expect("create");
    clock.advance(Duration::minutes(5));

    let jar = store.rename("Old", "New").expect("rename");
    assert_eq!(jar.updated_at, "2025-08-01 09:05:00");
    assert!(!storage.record_path("Old").exists());
    assert!(storage.record_path("New").exists());
    assert_eq!(store.read("New").expect("read").created_at, "2025-08-01 09:00:00");
}

#[test]
fn delete_removes_the_file_and_reports_missing() {
    let (store, storage, _clock, _temp) = setup_store();
    store.create("Gone", 10).expect("create");
    store.delete("Gone").expect("delete");
    assert!(!storage.record_path("Gone").exists());

    assert!(store.delete("Gone").expect_err("second delete").is_not_found());
    assert!(store.read("Gone").expect_err("read deleted").is_not_found());
}

#[test]
fn corrupt_file_is_a_storage_error() {
    let (store, storage, _clock, _temp) = setup_store();
    fs::write(storage.record_path("Broken"), "{\"target\": ").expect("write");

    let err = store.read("Broken").expect_err("corrupt read");
    assert!(matches!(err, JarError::Storage(_)));
    assert!(store.overview().is_err());
    assert!(storage.contains("Broken").expect("contains"));
}

#[test]
fn withdraw_never_goes_negative_on_disk() {
    let (store, storage, _clock, _temp) = setup_store();
    store.create("Motor", 5_000_000).expect("create");
    store.deposit("Motor", 100_000).expect("deposit");
    store.withdraw("Motor", 2_000_000).expect("withdraw");

    let raw = fs::read_to_string(storage.record_path("Motor")).expect("read");
    let value: Value = serde_json::from_str(&raw).expect("json");
    assert_eq!(value["current"], 0);
}
