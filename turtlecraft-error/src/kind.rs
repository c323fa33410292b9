//! Error kinds for turtlecraft operations

use std::fmt;

/// The kind of error that occurred.
///
/// Validation kinds are produced by the command validator and never end a
/// session. Startup kinds are reported before an interpreter exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    // =========================================================================
    // General errors
    // =========================================================================
    /// An unexpected error occurred - catch-all for unhandled cases
    Unexpected,

    /// Invalid configuration or parameters
    ConfigInvalid,

    // =========================================================================
    // Command validation errors
    // =========================================================================
    /// A command that needs arguments was given none
    MissingArguments,

    /// Wrong number of arguments for the command
    ArityMismatch,

    /// The named turtle has not been created
    UnknownAgent,

    /// Argument is not a real number
    InvalidNumber,

    /// Angle outside [0, 360)
    OutOfRange,

    /// Pen state or colour not in the fixed set
    InvalidEnum,

    /// First token is not a known command
    UnknownCommand,

    // =========================================================================
    // IO errors
    // =========================================================================
    /// File not found
    FileNotFound,

    /// Permission denied
    PermissionDenied,

    /// IO operation failed
    IoFailed,

    /// Serialization of a drawing or recording failed
    SerializationFailed,

    /// The drawing surface went away
    SurfaceClosed,
}

impl ErrorKind {
    /// Returns the error kind as a static string
    pub fn as_str(&self) -> &'static str {
        match self {
            // General
            ErrorKind::Unexpected => "Unexpected",
            ErrorKind::ConfigInvalid => "ConfigInvalid",

            // Validation
            ErrorKind::MissingArguments => "MissingArguments",
            ErrorKind::ArityMismatch => "ArityMismatch",
            ErrorKind::UnknownAgent => "UnknownAgent",
            ErrorKind::InvalidNumber => "InvalidNumber",
            ErrorKind::OutOfRange => "OutOfRange",
            ErrorKind::InvalidEnum => "InvalidEnum",
            ErrorKind::UnknownCommand => "UnknownCommand",

            // IO
            ErrorKind::FileNotFound => "FileNotFound",
            ErrorKind::PermissionDenied => "PermissionDenied",
            ErrorKind::IoFailed => "IoFailed",
            ErrorKind::SerializationFailed => "SerializationFailed",
            ErrorKind::SurfaceClosed => "SurfaceClosed",
        }
    }

    /// Check if this error comes from command validation.
    ///
    /// These are reported on the transcript and the session carries on.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ErrorKind::MissingArguments
                | ErrorKind::ArityMismatch
                | ErrorKind::UnknownAgent
                | ErrorKind::InvalidNumber
                | ErrorKind::OutOfRange
                | ErrorKind::InvalidEnum
                | ErrorKind::UnknownCommand
        )
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
