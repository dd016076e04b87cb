//! Pure functions deriving display state from a [`SavingsJar`].

use std::fmt;

use crate::domain::SavingsJar;

const SECONDS_PER_DAY: i64 = 86_400;

/// Outcome of [`days_to_completion`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// The balance has not reached the target yet.
    Pending,
    /// The jar is complete but one of its timestamps does not parse.
    Malformed,
    /// Whole days between creation and the update that completed the jar.
    Completed { days: i64 },
}

impl fmt::Display for Completion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Completion::Pending => f.write_str("not yet complete"),
            Completion::Malformed => f.write_str("-"),
            Completion::Completed { days: 1 } => f.write_str("1 day"),
            Completion::Completed { days } => write!(f, "{} days", days),
        }
    }
}

pub fn is_complete(jar: &SavingsJar) -> bool {
    jar.current >= jar.target
}

/// Progress towards the target as a whole percentage in `0..=100`.
///
/// A zero target reports 0.
pub fn progress_percent(jar: &SavingsJar) -> u8 {
    if jar.target == 0 {
        return 0;
    }
    let percent = u128::from(jar.current) * 100 / u128::from(jar.target);
    // min(100) keeps the value inside u8
    percent.min(100) as u8
}

/// Whole-day span between `created_at` and `updated_at` for a completed jar.
///
/// The span is floored, so a negative difference caused by clock skew rounds
/// away from zero. Never fails: unparseable timestamps yield
/// [`Completion::Malformed`].
pub fn days_to_completion(jar: &SavingsJar) -> Completion {
    if !is_complete(jar) {
        return Completion::Pending;
    }
    match (jar.created_time(), jar.updated_time()) {
        (Some(created), Some(updated)) => {
            let seconds = (updated - created).num_seconds();
            Completion::Completed {
                days: seconds.div_euclid(SECONDS_PER_DAY),
            }
        }
        _ => Completion::Malformed,
    }
}
