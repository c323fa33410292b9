//! turtlecraft error types
//!
//! Re-exports turtlecraft-error and provides interpreter-specific conveniences.

pub use turtlecraft_error::{Error, ErrorKind, Result};

// =============================================================================
// Validation error constructors
// =============================================================================

const VALIDATE: &str = "validator::parse";

/// A command that takes arguments was given none
pub fn missing_arguments(command: &str) -> Error {
    Error::new(ErrorKind::MissingArguments, "arguments needed")
        .with_operation(VALIDATE)
        .with_context("command", command)
}

/// Wrong number of arguments; `args` is the argument text as typed
pub fn arity_mismatch(command: &str, expected: usize, args: &str) -> Error {
    let message = if expected == 1 {
        format!("too many args: '{}'", args)
    } else {
        format!("wrong #args: '{}'", args)
    };
    Error::new(ErrorKind::ArityMismatch, message)
        .with_operation(VALIDATE)
        .with_context("command", command)
        .with_context("expected", expected.to_string())
}

/// The named turtle has not been created
pub fn unknown_agent(command: &str, name: &str) -> Error {
    Error::new(ErrorKind::UnknownAgent, format!("'{}' is not a turtle", name))
        .with_operation(VALIDATE)
        .with_context("command", command)
        .with_context("argument", name)
}

/// The argument does not parse as a finite real number
pub fn invalid_number(command: &str, value: &str) -> Error {
    Error::new(ErrorKind::InvalidNumber, format!("'{}' is not a real number", value))
        .with_operation(VALIDATE)
        .with_context("command", command)
        .with_context("argument", value)
}

/// An angle outside [0, 360)
pub fn out_of_range(command: &str, value: &str) -> Error {
    Error::new(ErrorKind::OutOfRange, format!("'{}' should be in [0,360)", value))
        .with_operation(VALIDATE)
        .with_context("command", command)
        .with_context("argument", value)
}

/// A pen state or colour that is not in the fixed set; `what` names the set
pub fn invalid_enum(command: &str, value: &str, what: &str) -> Error {
    Error::new(ErrorKind::InvalidEnum, format!("'{}' is not a known {}", value, what))
        .with_operation(VALIDATE)
        .with_context("command", command)
        .with_context("argument", value)
}

/// First token is not a command
pub fn unknown_command(command: &str) -> Error {
    Error::new(ErrorKind::UnknownCommand, "unknown command")
        .with_operation(VALIDATE)
        .with_context("command", command)
}

// =============================================================================
// Other constructors
// =============================================================================

/// Invalid session configuration for `field`
pub fn config_invalid(field: &'static str, message: impl Into<String>) -> Error {
    Error::config_invalid(message).with_context("field", field)
}

/// The transcript could not be written
pub fn output_failed(err: std::io::Error) -> Error {
    Error::from(err).with_operation("interpreter::write")
}

/// The line printed on the transcript for a rejected command:
/// `*** Unknown syntax for '<command>': <reason>`
pub fn syntax_error_line(err: &Error) -> String {
    let command = err.context_value("command").unwrap_or_default();
    format!("*** Unknown syntax for '{}': {}", command, err.message())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_syntax_error_line() {
        let err = unknown_agent("move", "bob");
        assert_eq!(syntax_error_line(&err), "*** Unknown syntax for 'move': 'bob' is not a turtle");

        let err = missing_arguments("pen");
        assert_eq!(syntax_error_line(&err), "*** Unknown syntax for 'pen': arguments needed");
    }

    #[test]
    fn test_arity_messages() {
        assert_eq!(arity_mismatch("turtle", 1, "a b").message(), "too many args: 'a b'");
        assert_eq!(arity_mismatch("move", 2, "bob").message(), "wrong #args: 'bob'");
        assert_eq!(arity_mismatch("status", 0, "now").kind(), ErrorKind::ArityMismatch);
    }

    #[test]
    fn test_validation_errors_are_tagged() {
        for err in [
            missing_arguments("move"),
            unknown_agent("left", "x"),
            invalid_number("move", "abc"),
            out_of_range("right", "360"),
            invalid_enum("colour", "teal", "colour"),
            unknown_command("jump"),
        ] {
            assert!(err.is_validation());
            assert_eq!(err.operation(), "validator::parse");
        }
    }
}
