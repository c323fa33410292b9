//! # Commands
//!
//! The command set of the turtle language and the validator that turns one
//! line of text into a typed [`Operation`].
//!
//! ## Validation order
//! 1. missing arguments, for commands that take some but got none
//! 2. argument count
//! 3. turtle existence
//! 4. number format
//! 5. angle range, pen state and palette membership
//!
//! The first failing check decides the error. Validation never touches the
//! session; it only asks an [`AgentLookup`] whether a name exists.

use crate::error::{self, Result};
use crate::geometry::FULL_TURN;
use crate::palette::{Colour, PenState};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::str::FromStr;
use strum::{AsRefStr, EnumIter, EnumString};

/// First token of a line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, EnumIter, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum CommandKind {
    Turtle,
    Move,
    Left,
    Right,
    Pen,
    Colour,
    Status,
    Bye,
}

impl CommandKind {
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        <Self as FromStr>::from_str(s).ok()
    }

    pub fn as_str(&self) -> &str {
        self.as_ref()
    }

    /// Exact number of arguments the command takes
    pub fn arity(&self) -> usize {
        match self {
            CommandKind::Turtle => 1,
            CommandKind::Move
            | CommandKind::Left
            | CommandKind::Right
            | CommandKind::Pen
            | CommandKind::Colour => 2,
            CommandKind::Status | CommandKind::Bye => 0,
        }
    }

    /// Whether the first argument must name an existing turtle
    pub fn targets_agent(&self) -> bool {
        self.arity() == 2
    }
}

impl std::fmt::Display for CommandKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated command
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum Operation {
    /// Create a turtle, or reset an existing one
    Turtle { name: String },

    /// Move forward along the heading; negative distances move backwards
    Move { name: String, distance: f64 },

    /// Turn anticlockwise, degrees in [0, 360)
    Left { name: String, degrees: f64 },

    /// Turn clockwise, degrees in [0, 360)
    Right { name: String, degrees: f64 },

    Pen { name: String, state: PenState },

    Colour { name: String, colour: Colour },

    /// Report every turtle in creation order
    Status,

    /// End the session
    Bye,
}

impl Operation {
    pub fn kind(&self) -> CommandKind {
        match self {
            Operation::Turtle { .. } => CommandKind::Turtle,
            Operation::Move { .. } => CommandKind::Move,
            Operation::Left { .. } => CommandKind::Left,
            Operation::Right { .. } => CommandKind::Right,
            Operation::Pen { .. } => CommandKind::Pen,
            Operation::Colour { .. } => CommandKind::Colour,
            Operation::Status => CommandKind::Status,
            Operation::Bye => CommandKind::Bye,
        }
    }

    /// Name of the turtle the operation acts on, if any
    pub fn agent(&self) -> Option<&str> {
        match self {
            Operation::Turtle { name }
            | Operation::Move { name, .. }
            | Operation::Left { name, .. }
            | Operation::Right { name, .. }
            | Operation::Pen { name, .. }
            | Operation::Colour { name, .. } => Some(name),
            Operation::Status | Operation::Bye => None,
        }
    }

    /// Whether the interpreter stops after this operation
    pub fn is_terminal(&self) -> bool {
        matches!(self, Operation::Bye)
    }
}

// ============================================================================
// Agent lookup
// ============================================================================

/// Answers whether a turtle with the given name exists
pub trait AgentLookup {
    fn contains_agent(&self, name: &str) -> bool;
}

impl AgentLookup for HashSet<String> {
    fn contains_agent(&self, name: &str) -> bool {
        self.contains(name)
    }
}

impl AgentLookup for BTreeSet<String> {
    fn contains_agent(&self, name: &str) -> bool {
        self.contains(name)
    }
}

impl<T: AsRef<str>> AgentLookup for [T] {
    fn contains_agent(&self, name: &str) -> bool {
        self.iter().any(|n| n.as_ref() == name)
    }
}

impl<T: AsRef<str>> AgentLookup for Vec<T> {
    fn contains_agent(&self, name: &str) -> bool {
        self.as_slice().contains_agent(name)
    }
}

// ============================================================================
// Validator
// ============================================================================

/// Validate one line against the command set.
///
/// Tokens are separated by any run of whitespace; matching is case-sensitive.
/// A line with no tokens is reported as missing arguments for an empty
/// command; the interpreter skips blank lines before getting here.
pub fn parse_line<L: AgentLookup + ?Sized>(line: &str, agents: &L) -> Result<Operation> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let Some((&command, args)) = tokens.split_first() else {
        return Err(error::missing_arguments(""));
    };
    let kind = CommandKind::from_str(command).ok_or_else(|| error::unknown_command(command))?;

    let arity = kind.arity();
    if arity > 0 && args.is_empty() {
        return Err(error::missing_arguments(command));
    }
    if args.len() != arity {
        return Err(error::arity_mismatch(command, arity, &args.join(" ")));
    }
    if kind.targets_agent() && !agents.contains_agent(args[0]) {
        return Err(error::unknown_agent(command, args[0]));
    }

    let op = match kind {
        CommandKind::Turtle => Operation::Turtle { name: args[0].to_string() },
        CommandKind::Move => Operation::Move {
            name: args[0].to_string(),
            distance: parse_number(command, args[1])?,
        },
        CommandKind::Left => Operation::Left {
            name: args[0].to_string(),
            degrees: parse_angle(command, args[1])?,
        },
        CommandKind::Right => Operation::Right {
            name: args[0].to_string(),
            degrees: parse_angle(command, args[1])?,
        },
        CommandKind::Pen => Operation::Pen {
            name: args[0].to_string(),
            state: PenState::from_str(args[1])
                .ok_or_else(|| error::invalid_enum(command, args[1], "pen state"))?,
        },
        CommandKind::Colour => Operation::Colour {
            name: args[0].to_string(),
            colour: Colour::from_str(args[1]).ok_or_else(|| error::invalid_enum(command, args[1], "colour"))?,
        },
        CommandKind::Status => Operation::Status,
        CommandKind::Bye => Operation::Bye,
    };
    Ok(op)
}

/// A finite real number
fn parse_number(command: &str, token: &str) -> Result<f64> {
    token
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| error::invalid_number(command, token))
}

/// A finite real number in [0, 360)
fn parse_angle(command: &str, token: &str) -> Result<f64> {
    let degrees = parse_number(command, token)?;
    if (0.0..FULL_TURN).contains(&degrees) {
        Ok(degrees)
    } else {
        Err(error::out_of_range(command, token))
    }
}
