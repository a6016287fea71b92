//! Shared test doubles for the Search Tracker.

mod clock;
mod notifier;

pub use clock::FixedClock;
pub use notifier::{FailingNotifier, RecordingNotifier};
