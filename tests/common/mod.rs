use celengan::{
    core::{JarStore, ManualClock},
    storage::JsonFileStorage,
};
use chrono::{NaiveDate, NaiveDateTime};
use tempfile::TempDir;

pub fn start_time() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 8, 1)
        .expect("valid date")
        .and_hms_opt(9, 0, 0)
        .expect("valid time")
}

/// Creates a file-backed store in a fresh temporary directory driven by a manual clock.
pub fn setup_store() -> (JarStore, JsonFileStorage, ManualClock, TempDir) {
    let temp = TempDir::new().expect("create temp dir");
    let storage = JsonFileStorage::new(temp.path().join("jars")).expect("create json storage");
    let clock = ManualClock::new(start_time());
    let store = JarStore::with_clock(Box::new(storage.clone()), Box::new(clock.clone()));
    (store, storage, clock, temp)
}
