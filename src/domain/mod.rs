//! Pure domain models. No I/O, no CLI, no storage.

pub mod jar;

pub use jar::*;
