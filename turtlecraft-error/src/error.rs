//! The main Error type for turtlecraft

use crate::ErrorKind;
use std::fmt;

/// The unified error type for all turtlecraft operations.
///
/// This error type provides:
/// - `kind`: What type of error occurred
/// - `message`: Human-readable description
/// - `operation`: What operation caused the error
/// - `context`: Key-value pairs for debugging
/// - `source`: The underlying error (if any)
///
/// # Example
///
/// ```rust
/// use turtlecraft_error::{Error, ErrorKind};
///
/// let err = Error::new(ErrorKind::OutOfRange, "'400' should be in [0,360)")
///     .with_operation("validator::parse")
///     .with_context("command", "left")
///     .with_context("argument", "400");
///
/// assert_eq!(err.kind(), ErrorKind::OutOfRange);
/// assert_eq!(err.context_value("command"), Some("left"));
/// ```
pub struct Error {
    kind: ErrorKind,
    message: String,
    operation: &'static str,
    context: Vec<(&'static str, String)>,
    source: Option<anyhow::Error>,
}

impl Error {
    /// Create a new error with the given kind and message
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            operation: "",
            context: Vec::new(),
            source: None,
        }
    }

    // =========================================================================
    // Getters
    // =========================================================================

    /// Get the error kind
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the operation that caused this error
    pub fn operation(&self) -> &'static str {
        self.operation
    }

    /// Get the context key-value pairs
    pub fn context(&self) -> &[(&'static str, String)] {
        &self.context
    }

    /// Look up the first context value recorded under `key`
    pub fn context_value(&self, key: &str) -> Option<&str> {
        self.context
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Get the source error (if any)
    pub fn source_ref(&self) -> Option<&anyhow::Error> {
        self.source.as_ref()
    }

    /// Check if this error is a recoverable command validation error
    pub fn is_validation(&self) -> bool {
        self.kind.is_validation()
    }

    // =========================================================================
    // Builders (chainable)
    // =========================================================================

    /// Set the operation that caused this error.
    ///
    /// If an operation was already set, the previous one is moved to context
    /// as "called" to preserve the call chain.
    pub fn with_operation(mut self, operation: &'static str) -> Self {
        if !self.operation.is_empty() {
            self.context.push(("called", self.operation.to_string()));
        }
        self.operation = operation;
        self
    }

    /// Add context to the error
    pub fn with_context(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.context.push((key, value.into()));
        self
    }

    /// Set the source error.
    ///
    /// # Panics (debug only)
    /// Panics in debug mode if source was already set.
    pub fn set_source(mut self, source: impl Into<anyhow::Error>) -> Self {
        debug_assert!(self.source.is_none(), "source error already set");
        self.source = Some(source.into());
        self
    }
}

// =============================================================================
// Display - compact, single-line format for logs
// =============================================================================

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        if !self.operation.is_empty() {
            write!(f, " at {}", self.operation)?;
        }

        if !self.context.is_empty() {
            write!(f, ", context {{ ")?;
            for (i, (key, value)) in self.context.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}: {}", key, value)?;
            }
            write!(f, " }}")?;
        }

        if !self.message.is_empty() {
            write!(f, " => {}", self.message)?;
        }

        Ok(())
    }
}

// =============================================================================
// Debug - verbose, multi-line format for debugging
// =============================================================================

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} at {}", self.kind, self.operation)?;

        if !self.message.is_empty() {
            writeln!(f)?;
            writeln!(f, "    Message: {}", self.message)?;
        }

        if !self.context.is_empty() {
            writeln!(f)?;
            writeln!(f, "    Context:")?;
            for (key, value) in &self.context {
                writeln!(f, "        {}: {}", key, value)?;
            }
        }

        if let Some(source) = &self.source {
            writeln!(f)?;
            writeln!(f, "    Source: {:?}", source)?;
        }

        Ok(())
    }
}

// =============================================================================
// std::error::Error implementation
// =============================================================================

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source.as_ref().map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

// =============================================================================
// Convenient From implementations (be careful not to leak raw errors!)
// =============================================================================

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        let kind = match err.kind() {
            std::io::ErrorKind::NotFound => ErrorKind::FileNotFound,
            std::io::ErrorKind::PermissionDenied => ErrorKind::PermissionDenied,
            _ => ErrorKind::IoFailed,
        };
        Error::new(kind, err.to_string())
            .with_operation("io")
            .set_source(err)
    }
}

// =============================================================================
// Convenience constructors
// =============================================================================

impl Error {
    /// Create an Unexpected error
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unexpected, message)
    }

    /// Create a ConfigInvalid error
    pub fn config_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ConfigInvalid, message)
    }

    /// Create a FileNotFound error for a named path
    pub fn file_not_found(path: impl Into<String>) -> Self {
        let path = path.into();
        Self::new(ErrorKind::FileNotFound, format!("file {} not found", path))
            .with_context("path", path)
    }

    /// Create a SerializationFailed error
    pub fn serialization_failed(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::SerializationFailed, message)
    }

    /// Create a SurfaceClosed error
    pub fn surface_closed(surface: impl Into<String>) -> Self {
        let surface = surface.into();
        Self::new(ErrorKind::SurfaceClosed, format!("surface '{}' closed", surface))
            .with_context("surface", surface)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = Error::new(ErrorKind::UnknownAgent, "'bob' is not a turtle");
        assert_eq!(err.kind(), ErrorKind::UnknownAgent);
        assert_eq!(err.message(), "'bob' is not a turtle");
        assert!(err.is_validation());
    }

    #[test]
    fn test_error_with_context() {
        let err = Error::new(ErrorKind::InvalidNumber, "'abc' is not a real number")
            .with_operation("validator::parse")
            .with_context("command", "move")
            .with_context("argument", "abc");

        assert_eq!(err.operation(), "validator::parse");
        assert_eq!(err.context().len(), 2);
        assert_eq!(err.context()[0], ("command", "move".to_string()));
        assert_eq!(err.context_value("argument"), Some("abc"));
        assert_eq!(err.context_value("missing"), None);
    }

    #[test]
    fn test_operation_chaining() {
        let err = Error::new(ErrorKind::IoFailed, "write failed")
            .with_operation("svg::write")
            .with_operation("cli::finish");

        assert_eq!(err.operation(), "cli::finish");
        assert_eq!(err.context().len(), 1);
        assert_eq!(err.context()[0], ("called", "svg::write".to_string()));
    }

    #[test]
    fn test_display() {
        let err = Error::new(ErrorKind::OutOfRange, "'400' should be in [0,360)")
            .with_operation("validator::parse")
            .with_context("command", "left");

        let display = format!("{}", err);
        assert!(display.contains("OutOfRange"));
        assert!(display.contains("validator::parse"));
        assert!(display.contains("command: left"));
        assert!(display.ends_with("=> '400' should be in [0,360)"));
    }

    #[test]
    fn test_io_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err: Error = io_err.into();
        assert_eq!(err.kind(), ErrorKind::FileNotFound);
        assert_eq!(err.operation(), "io");
        assert!(err.source_ref().is_some());
        assert!(!err.is_validation());
    }

    #[test]
    fn test_convenience_constructors() {
        let err = Error::file_not_found("squares.tt");
        assert_eq!(err.kind(), ErrorKind::FileNotFound);
        assert!(err.message().contains("squares.tt"));

        let err = Error::config_invalid("speed 30 is outside 0..=25");
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);

        let err = Error::surface_closed("display");
        assert_eq!(err.context_value("surface"), Some("display"));
    }
}
