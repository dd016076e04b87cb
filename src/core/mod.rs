//! Savings-jar lifecycle and derived metrics.
//!
//! Depends on the domain model and the [`JarStorage`](crate::storage::JarStorage)
//! abstraction only. No terminal I/O.

pub mod cancel;
pub mod clock;
pub mod jar_store;
pub mod metrics;

pub use cancel::CancellationToken;
pub use clock::{Clock, ManualClock, SystemClock};
pub use jar_store::{JarOverview, JarStore};
pub use metrics::Completion;
