//! Data Transfer Objects for the remote services
//!
//! Request and response bodies of the job execution service and the log
//! store, in their camelCase JSON wire shape. Domain records embedded in
//! responses (job definitions, job runs, log events) reuse the domain types.

pub mod job;
pub mod job_definition;
pub mod log;
