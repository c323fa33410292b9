//! # turtlecraft-error
//!
//! Unified error handling for turtlecraft.
//!
//! ## Design Philosophy
//!
//! - **ErrorKind**: Know what went wrong (e.g., UnknownAgent, OutOfRange)
//! - **Error Context**: Which command and which argument caused it
//! - **Error Source**: Wrap underlying errors without leaking raw types
//!
//! ## Usage
//!
//! ```rust
//! use turtlecraft_error::{Error, ErrorKind};
//!
//! fn example() -> Result<(), Error> {
//!     Err(Error::new(ErrorKind::UnknownAgent, "'bob' is not a turtle")
//!         .with_operation("validator::parse")
//!         .with_context("command", "move")
//!         .with_context("argument", "bob"))
//! }
//! ```
//!
//! ## Principles
//!
//! - All fallible functions return `Result<T, turtlecraft_error::Error>`
//! - External errors are wrapped with `set_source(err)`
//! - Validation errors are recoverable: the interpreter reports them and
//!   moves on to the next line

mod error;
mod kind;

pub use error::Error;
pub use kind::ErrorKind;

/// Result type alias using turtlecraft Error
pub type Result<T> = std::result::Result<T, Error>;
