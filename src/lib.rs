#![doc(test(attr(deny(warnings))))]

//! Celengan tracks personal savings jars: named goals with a target amount and a
//! running balance, each persisted as its own JSON record.

pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod errors;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup debug log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::debug!("Celengan tracing initialized.");
    });
}
