//! Position in a log stream

use batchsync_core::domain::log::LogEvent;

/// What part of a log stream has been delivered
///
/// Holds the newest delivered timestamp and how many events carrying
/// exactly that timestamp were delivered. Log stores treat a start time as
/// inclusive, so the next fetch starts at `timestamp` and the first
/// `delivered_at_timestamp` events at that instant are dropped as repeats.
/// Events sharing a timestamp are thus neither skipped nor duplicated.
///
/// Only moves forward.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrackingCursor {
    timestamp: i64,
    delivered_at_timestamp: usize,
}

impl TrackingCursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start time for the next fetch
    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    pub fn delivered_at_timestamp(&self) -> usize {
        self.delivered_at_timestamp
    }

    /// Filters a head-first batch fetched from [`Self::timestamp`] down to
    /// the events not yet delivered, and advances past them
    pub fn admit(&mut self, events: Vec<LogEvent>) -> Vec<LogEvent> {
        let mut repeats = self.delivered_at_timestamp;
        let mut fresh = Vec::with_capacity(events.len());

        for event in events {
            if event.timestamp < self.timestamp {
                continue;
            }

            if event.timestamp == self.timestamp {
                if repeats > 0 {
                    repeats -= 1;
                    continue;
                }
                self.delivered_at_timestamp += 1;
            } else {
                self.timestamp = event.timestamp;
                self.delivered_at_timestamp = 1;
                repeats = 0;
            }

            fresh.push(event);
        }

        fresh
    }
}
