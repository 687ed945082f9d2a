//! Structured logging facility for lineset
//!
//! This module provides a canonical logging facility with:
//! - Single initialization point via `init(profile)`
//! - Structured logging macros (`log_op_start!`, `log_op_end!`, `log_op_error!`)
//! - Boundary ownership: `compare`, `apply` and the aligned-diff bridge own
//!   start/end events, everything below them logs at debug level only
//! - Test capture mode for deterministic assertions
//!
//! Line contents never appear in clear; wrap them in
//! [`Sensitive`](lineset_core_types::Sensitive) before logging.
//!
//! # Usage
//!
//! ```rust
//! use lineset_core::logging_facility::{init, Profile};
//!
//! // Initialize once at application startup
//! init(Profile::Development);
//! ```

pub mod init;
pub mod macros;
pub mod test_capture;

pub use init::{init, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};
