//! # Turtle
//!
//! One named turtle: where it is, which way it faces, and how it draws.

use crate::config::SessionConfig;
use crate::error::Result;
use crate::geometry::{Line, Point, RotationConvention, Turn};
use crate::palette::{Colour, PenState};
use crate::render::DrawSink;
use std::fmt;

/// A turtle's state
#[derive(Debug, Clone, PartialEq)]
pub struct Agent {
    name: String,
    position: Point,
    heading: f64,
    pen_down: bool,
    colour: Colour,
    convention: RotationConvention,
}

impl Agent {
    /// A fresh turtle placed according to the session configuration
    pub fn new(name: impl Into<String>, config: &SessionConfig) -> Self {
        Self {
            name: name.into(),
            position: config.origin,
            heading: config.start_heading(),
            pen_down: true,
            colour: Colour::default(),
            convention: config.convention,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn position(&self) -> Point {
        self.position
    }

    /// Heading in degrees, always in [0, 360)
    pub fn heading(&self) -> f64 {
        self.heading
    }

    pub fn pen_down(&self) -> bool {
        self.pen_down
    }

    pub fn pen_state(&self) -> PenState {
        PenState::from_down(self.pen_down)
    }

    pub fn colour(&self) -> Colour {
        self.colour
    }

    pub fn convention(&self) -> RotationConvention {
        self.convention
    }

    /// Turn anticlockwise (as seen) by `degrees`
    pub fn left(&mut self, degrees: f64) {
        self.heading = self.convention.rotate(self.heading, Turn::Left, degrees);
    }

    /// Turn clockwise (as seen) by `degrees`
    pub fn right(&mut self, degrees: f64) {
        self.heading = self.convention.rotate(self.heading, Turn::Right, degrees);
    }

    /// Where a move of `distance` would end
    pub fn destination(&self, distance: f64) -> Point {
        self.position.project(self.heading, distance)
    }

    /// Move `distance` units along the current heading.
    ///
    /// With the pen down the line goes through `sink` first. The position is
    /// updated whether or not anything was drawn, and even if the sink failed.
    /// Returns the sink's transcript notice, if any.
    pub fn advance(&mut self, distance: f64, sink: &mut dyn DrawSink) -> Result<Option<String>> {
        let to = self.destination(distance);
        let drawn = if self.pen_down {
            sink.draw_line(&Line::new(self.position, to, self.colour))
        } else {
            Ok(None)
        };
        self.position = to;
        drawn
    }

    pub fn pen(&mut self, state: PenState) {
        self.pen_down = state.is_down();
    }

    pub fn set_colour(&mut self, colour: Colour) {
        self.colour = colour;
    }
}

/// `(   x,    y) | heading° | PEN  | colour`, the body of a status line
impl fmt::Display for Agent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({:>7.2}, {:>7.2}) | {:>6.2}° | {:^4} | {}",
            self.position.x,
            self.position.y,
            self.heading,
            self.pen_state().label(),
            self.colour
        )
    }
}
