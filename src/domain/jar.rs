use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::errors::{JarError, Result};

/// Wall-clock format used for `created_at` and `updated_at`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A savings jar: a named goal with a target and the amount saved so far.
///
/// The name is the storage key and is not serialized with the record.
/// Timestamps are kept as their persisted text so that a hand-edited or
/// corrupted value still loads; [`SavingsJar::created_time`] and
/// [`SavingsJar::updated_time`] parse on demand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavingsJar {
    #[serde(skip)]
    pub name: String,
    pub target: u64,
    pub current: u64,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

impl SavingsJar {
    /// Builds an empty jar stamped with `now` for both timestamps.
    pub fn new(name: impl Into<String>, target: u64, now: NaiveDateTime) -> Self {
        let stamp = format_timestamp(now);
        Self {
            name: name.into(),
            target,
            current: 0,
            created_at: stamp.clone(),
            updated_at: stamp,
        }
    }

    pub fn created_time(&self) -> Option<NaiveDateTime> {
        parse_timestamp(&self.created_at)
    }

    pub fn updated_time(&self) -> Option<NaiveDateTime> {
        parse_timestamp(&self.updated_at)
    }

    /// Adds `amount` to the balance, saturating at `u64::MAX`.
    pub fn deposit(&mut self, amount: u64) {
        self.current = self.current.saturating_add(amount);
    }

    /// Removes `amount` from the balance, clamping at zero.
    pub fn withdraw(&mut self, amount: u64) {
        self.current = self.current.saturating_sub(amount);
    }

    /// Amount still missing to reach the target; zero once reached.
    pub fn remaining(&self) -> u64 {
        self.target.saturating_sub(self.current)
    }
}

pub fn format_timestamp(value: NaiveDateTime) -> String {
    value.format(TIMESTAMP_FORMAT).to_string()
}

pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value.trim(), TIMESTAMP_FORMAT).ok()
}

/// Validates and normalizes a jar name so it maps onto exactly one storage key.
pub fn normalize_name(raw: &str) -> Result<String> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(JarError::InvalidInput("jar name must not be empty".into()));
    }
    if name.starts_with('.') {
        return Err(JarError::InvalidInput(format!(
            "jar name `{}` must not start with `.`",
            name
        )));
    }
    if name
        .chars()
        .any(|c| c == '/' || c == '\\' || c.is_control())
    {
        return Err(JarError::InvalidInput(format!(
            "jar name `{}` contains a path separator or control character",
            name
        )));
    }
    if is_index_selector(name) {
        return Err(JarError::InvalidInput(format!(
            "jar name `{}` is reserved for selecting a jar by number",
            name
        )));
    }
    Ok(name.to_string())
}

/// True for `@N`, which the shell reads as the N-th listed jar.
pub fn is_index_selector(value: &str) -> bool {
    value
        .strip_prefix('@')
        .is_some_and(|digits| !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()))
}

/// Parses a user-supplied amount as a non-negative integer.
///
/// Accepts `_` and `,` as digit group separators (`1,000,000`).
pub fn parse_amount(input: &str) -> Result<u64> {
    let trimmed = input.trim();
    if trimmed.starts_with('-') {
        return Err(JarError::InvalidInput(format!(
            "amount `{}` must not be negative",
            trimmed
        )));
    }
    let digits: String = trimmed.chars().filter(|c| !matches!(c, '_' | ',')).collect();
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(JarError::InvalidInput(format!(
            "amount `{}` is not a whole number",
            trimmed
        )));
    }
    digits
        .parse::<u64>()
        .map_err(|_| JarError::InvalidInput(format!("amount `{}` is too large", trimmed)))
}
