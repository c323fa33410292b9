//! # Geometry
//!
//! Points, lines and the rotation convention shared by turtles and renderers.

use crate::palette::Colour;
use serde::{Deserialize, Serialize};

/// Degrees in a full turn
pub const FULL_TURN: f64 = 360.0;

/// A point on the drawing plane
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance_to(&self, other: &Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// The point `distance` units away along `heading` degrees
    pub fn project(&self, heading: f64, distance: f64) -> Point {
        let (sin, cos) = heading.to_radians().sin_cos();
        Point::new(self.x + distance * cos, self.y + distance * sin)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// A straight line drawn by one logical move
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub from: Point,
    pub to: Point,
    pub colour: Colour,
}

impl Line {
    pub fn new(from: Point, to: Point, colour: Colour) -> Self {
        Self { from, to, colour }
    }

    pub fn length(&self) -> f64 {
        self.from.distance_to(&self.to)
    }

    /// `(dx, dy)` from start to end
    pub fn delta(&self) -> (f64, f64) {
        (self.to.x - self.from.x, self.to.y - self.from.y)
    }
}

/// Direction of a turn command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Turn {
    Left,
    Right,
}

/// How `left` and `right` map onto the sign of a heading change.
///
/// On a screen the y axis points down, so an anticlockwise `left` has to
/// subtract from the heading to look anticlockwise. On a Cartesian plane
/// `left` adds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RotationConvention {
    /// y grows downward (canvas coordinates)
    Screen,
    /// y grows upward (mathematical coordinates)
    Cartesian,
}

impl RotationConvention {
    /// Apply a turn of `degrees` to `heading`, returning a heading in [0, 360)
    pub fn rotate(self, heading: f64, turn: Turn, degrees: f64) -> f64 {
        let signed = match (self, turn) {
            (RotationConvention::Cartesian, Turn::Left) | (RotationConvention::Screen, Turn::Right) => degrees,
            (RotationConvention::Cartesian, Turn::Right) | (RotationConvention::Screen, Turn::Left) => -degrees,
        };
        normalize_heading(heading + signed)
    }
}

/// Reduce any finite angle into [0, 360).
///
/// `rem_euclid` can round up to exactly 360 for tiny negative inputs; that
/// case is folded back to 0.
pub fn normalize_heading(degrees: f64) -> f64 {
    let h = degrees.rem_euclid(FULL_TURN);
    if h >= FULL_TURN {
        0.0
    } else {
        h
    }
}
