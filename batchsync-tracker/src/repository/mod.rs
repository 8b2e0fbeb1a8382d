//! Repository layer
//!
//! Repositories are the narrow interfaces the reconciler and the tracker
//! use to reach the remote services. They carry no business logic.
//!
//! All repositories are trait-based so that tests can substitute
//! in-memory fakes; the HTTP clients implement them directly.

mod jobs;
mod logs;

pub use jobs::JobRepository;
pub use logs::LogRepository;
