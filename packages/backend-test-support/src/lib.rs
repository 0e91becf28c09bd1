//! Shared helpers for the Tycoon backend test suites: idempotent logging
//! setup and problem-details assertions.

pub mod logging;
pub mod problem_details;
