//! Batchsync Core
//!
//! Core types and pure logic shared by the batchsync crates.
//!
//! This crate contains:
//! - Domain types: job definitions, job runs, log events
//! - DTOs: request/response shapes of the job execution and log store services
//! - Definition equivalence: the tolerant structural comparison used by reconciliation

pub mod domain;
pub mod dto;
pub mod equivalence;
