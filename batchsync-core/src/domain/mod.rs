//! Core domain types
//!
//! These types mirror the records owned by the remote job execution service
//! and log store. They are shared between the HTTP client (which moves them
//! over the wire) and the tracker (which reasons about them).

pub mod job;
pub mod job_definition;
pub mod log;
