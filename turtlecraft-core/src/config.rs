//! # Session Configuration
//!
//! Where new turtles start, which way they turn, and how fast they draw.

use crate::error::{self, Result};
use crate::geometry::{normalize_heading, Point, RotationConvention};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Highest accepted speed
pub const MAX_SPEED: u8 = 25;

/// Speed used when none is given
pub const DEFAULT_SPEED: u8 = 3;

/// Pause between drawn segments when none is given
pub const DEFAULT_DELAY_MS: u64 = 50;

/// Default canvas width and height
pub const DEFAULT_CANVAS: (u32, u32) = (600, 600);

/// Heading of a fresh turtle on a Cartesian plane ("north")
pub const CARTESIAN_NORTH: f64 = 90.0;

/// Heading of a fresh turtle on a screen canvas ("north" with y pointing down)
pub const SCREEN_NORTH: f64 = 270.0;

/// Configuration shared by every turtle in one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Start position of new turtles
    pub origin: Point,
    /// Start heading of new turtles, in degrees
    pub heading: f64,
    /// Sign convention for `left`/`right`
    pub convention: RotationConvention,
    /// Animation speed, 0 (instant) to 25
    pub speed: u8,
    /// Pause after each drawn segment, in milliseconds
    pub delay_ms: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::text_mode()
    }
}

impl SessionConfig {
    /// Text-only session: turtles start at the origin facing up the y axis
    pub fn text_mode() -> Self {
        Self {
            origin: Point::ORIGIN,
            heading: CARTESIAN_NORTH,
            convention: RotationConvention::Cartesian,
            speed: DEFAULT_SPEED,
            delay_ms: DEFAULT_DELAY_MS,
        }
    }

    /// Canvas session: turtles start at the canvas centre facing the top edge
    pub fn screen(width: u32, height: u32) -> Self {
        Self {
            origin: Point::new(f64::from(width) / 2.0, f64::from(height) / 2.0),
            heading: SCREEN_NORTH,
            convention: RotationConvention::Screen,
            speed: DEFAULT_SPEED,
            delay_ms: DEFAULT_DELAY_MS,
        }
    }

    pub fn with_speed(mut self, speed: u8) -> Self {
        self.speed = speed;
        self
    }

    pub fn with_delay_ms(mut self, delay_ms: u64) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    pub fn with_origin(mut self, origin: Point) -> Self {
        self.origin = origin;
        self
    }

    pub fn with_heading(mut self, heading: f64) -> Self {
        self.heading = heading;
        self
    }

    pub fn with_convention(mut self, convention: RotationConvention) -> Self {
        self.convention = convention;
        self
    }

    /// Pause between segments
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    /// Start heading reduced into [0, 360)
    pub fn start_heading(&self) -> f64 {
        normalize_heading(self.heading)
    }

    /// Check the configuration before a session is built from it
    pub fn validate(&self) -> Result<()> {
        if self.speed > MAX_SPEED {
            return Err(error::config_invalid(
                "speed",
                format!("speed {} is outside 0..={}", self.speed, MAX_SPEED),
            ));
        }
        if !self.origin.is_finite() {
            return Err(error::config_invalid("origin", "start position must be finite"));
        }
        if !self.heading.is_finite() {
            return Err(error::config_invalid("heading", "start heading must be finite"));
        }
        Ok(())
    }
}
