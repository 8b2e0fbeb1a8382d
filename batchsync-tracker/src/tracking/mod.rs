//! Job tracking
//!
//! Follows one run from submission to a terminal status:
//! - `fetcher`: pulls log pages head-first and follows forward tokens
//! - `cursor`: remembers what has already been delivered
//! - `sink`: where tracking output goes
//! - `tracker`: the polling state machine tying them together

mod cursor;
mod fetcher;
mod sink;
mod tracker;

pub use cursor::TrackingCursor;
pub use fetcher::{LogBatch, LogFetcher};
pub use sink::TrackerSink;
pub use tracker::{JobTracker, TrackingOutcome};
