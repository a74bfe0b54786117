//! Error types for the gatekeep library.
//!
//! This crate provides the foundation error types used throughout the gatekeep workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use gatekeep_error::{GatekeepResult, TransportError};
//!
//! fn send_reply() -> GatekeepResult<()> {
//!     Err(TransportError::new("connection reset"))?
//! }
//!
//! assert!(send_reply().is_err());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod challenge;
mod config;
mod error;
mod member;
mod transport;

pub use challenge::{ChallengeError, ChallengeErrorKind};
pub use config::ConfigError;
pub use error::{GatekeepError, GatekeepErrorKind, GatekeepResult};
pub use member::{MemberError, MemberErrorKind};
pub use transport::TransportError;
