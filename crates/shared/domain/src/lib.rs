//! # Domain Models
//!
//! Pure data for the breakpoint rewriter with minimal dependencies (`serde`, `bitflags`).
//! Keep it lean: no I/O and no CSS handling, just values and simple helpers.

pub mod breakpoints;
pub mod config;
pub mod constants;
