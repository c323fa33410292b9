//! # turtlecraft core
//!
//! An interpreter for a small line-oriented turtle graphics language.
//!
//! ## Core Concepts
//! - **Turtles**: named agents with a position, heading, pen and colour
//! - **Commands**: `turtle`, `move`, `left`, `right`, `pen`, `colour`, `status`, `bye`
//! - **Validator**: turns a line of text into a typed [`Operation`] or a descriptive error
//! - **Interpreter**: applies operations in order and keeps an execution trace
//! - **Renderer**: splits each drawn move into paced segments for a [`Surface`]

pub mod agent;
pub mod command;
pub mod config;
pub mod error;
pub mod geometry;
pub mod input;
pub mod interpreter;
pub mod palette;
pub mod render;
pub mod session;

pub use agent::Agent;
pub use command::{parse_line, AgentLookup, CommandKind, Operation};
pub use config::SessionConfig;
pub use error::{Error, ErrorKind, Result};
pub use geometry::{Line, Point, RotationConvention, Turn};
pub use input::{load_program, PromptedLines};
pub use interpreter::{ExecutionStep, ExitReason, Interpreter, ShutdownToken, PROMPT};
pub use palette::{Colour, PenState};
pub use render::{
    AnimatedSink, ChannelSurface, Clock, DisplayMessage, DrawEvent, DrawSink, ManualClock, Recording,
    RecordingSurface, Renderer, Surface, SvgSurface, SystemClock, TextSink,
};
pub use session::Session;
