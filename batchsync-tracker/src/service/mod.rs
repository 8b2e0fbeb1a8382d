//! Service layer
//!
//! Services hold the business logic that sits on top of the repositories:
//! bringing a remote job definition in line with a local declaration, and
//! submitting runs against the result.

mod reconciler;
mod submission;

pub use reconciler::DefinitionReconciler;
pub use submission::submit_job;
