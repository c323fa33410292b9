//! # Animated Segment Renderer
//!
//! Turns one logical move into a paced series of draw events.
//!
//! ## Design
//! - [`Surface`] is the drawing target (SVG canvas, recording, channel to a display task)
//! - [`Clock`] paces the animation; tests use [`ManualClock`] and never sleep
//! - [`Renderer`] owns the speed/delay model and the segment decomposition
//! - [`DrawSink`] is what a turtle draws through: [`TextSink`] reports moves as
//!   text, [`AnimatedSink`] renders them onto a surface. One is chosen per session.

pub mod channel;
pub mod recording;
pub mod svg;

pub use channel::{pump, ChannelSurface, DisplayMessage};
pub use recording::{Recording, RecordingSurface};
pub use svg::SvgSurface;

use crate::config::SessionConfig;
use crate::error::Result;
use crate::geometry::{Line, Point};
use crate::palette::Colour;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{trace, warn};

/// Growth factor of segment length per speed step
const SPEED_GROWTH: f64 = 1.1;

/// Segment counts above this are logged as a warning before drawing
pub const LARGE_SEGMENT_COUNT: usize = 100_000;

// ============================================================================
// Surface
// ============================================================================

/// One sub-segment handed to a surface
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DrawEvent {
    pub from: Point,
    pub to: Point,
    pub colour: Colour,
}

impl DrawEvent {
    pub fn new(from: Point, to: Point, colour: Colour) -> Self {
        Self { from, to, colour }
    }
}

/// A drawing target
pub trait Surface: Send {
    /// Draw one straight segment
    fn draw_segment(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, colour: Colour) -> Result<()>;

    /// Flush what has been drawn so far
    fn present(&mut self) -> Result<()> {
        Ok(())
    }

    fn draw_event(&mut self, event: &DrawEvent) -> Result<()> {
        self.draw_segment(event.from.x, event.from.y, event.to.x, event.to.y, event.colour)
    }
}

// ============================================================================
// Clock
// ============================================================================

/// Paces an animation
pub trait Clock: Send {
    fn pause(&mut self, duration: Duration);
}

/// Sleeps the current thread
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn pause(&mut self, duration: Duration) {
        if !duration.is_zero() {
            std::thread::sleep(duration);
        }
    }
}

#[derive(Debug, Default)]
struct ClockState {
    elapsed: Duration,
    pauses: usize,
}

/// Records pauses instead of sleeping. Clones share the same record.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    state: Arc<Mutex<ClockState>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total time the renderer asked to pause
    pub fn elapsed(&self) -> Duration {
        self.state.lock().elapsed
    }

    /// Number of pauses requested
    pub fn pauses(&self) -> usize {
        self.state.lock().pauses
    }
}

impl Clock for ManualClock {
    fn pause(&mut self, duration: Duration) {
        let mut state = self.state.lock();
        state.elapsed += duration;
        state.pauses += 1;
    }
}

// ============================================================================
// Renderer
// ============================================================================

/// Speed/delay model for animated lines
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Renderer {
    speed: u8,
    delay: Duration,
}

impl Renderer {
    pub fn new(speed: u8, delay: Duration) -> Self {
        Self { speed, delay }
    }

    pub fn from_config(config: &SessionConfig) -> Self {
        Self::new(config.speed, config.delay())
    }

    pub fn speed(&self) -> u8 {
        self.speed
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Number of sub-segments for a line of `length` at `speed`.
    ///
    /// Speed 0 draws in one go; otherwise segments get longer as speed grows:
    /// `1 + floor(length / (2 * 1.1^speed * speed))`.
    ///
    /// The count is unbounded: `move bob 1e12` at speed 3 is over 10^11
    /// segments, and an infinite length saturates to `usize::MAX`.
    /// [`Renderer::segments`] is lazy, but surfaces that keep every segment
    /// grow with it.
    pub fn segment_count(speed: u8, length: f64) -> usize {
        if speed == 0 {
            return 1;
        }
        let speed = f64::from(speed);
        let step = 2.0 * SPEED_GROWTH.powf(speed) * speed;
        let whole = (length.abs() / step).floor();
        // `as` saturates, and NaN becomes 0
        1usize.saturating_add(whole as usize)
    }

    /// Sub-segments of `line`, in drawing order
    pub fn segments(&self, line: &Line) -> impl Iterator<Item = DrawEvent> {
        let line = *line;
        let n = Self::segment_count(self.speed, line.length());
        let (dx, dy) = line.delta();
        let (step_x, step_y) = (dx / n as f64, dy / n as f64);
        let at = move |k: usize| {
            if k == n {
                line.to
            } else {
                Point::new(line.from.x + step_x * k as f64, line.from.y + step_y * k as f64)
            }
        };
        (0..n).map(move |i| DrawEvent::new(at(i), at(i + 1), line.colour))
    }

    /// Draw `line` onto `surface`, pausing after every segment unless speed is 0.
    ///
    /// Returns the number of segments drawn.
    pub fn render<S, C>(&self, line: &Line, surface: &mut S, clock: &mut C) -> Result<usize>
    where
        S: Surface + ?Sized,
        C: Clock + ?Sized,
    {
        let n = Self::segment_count(self.speed, line.length());
        if n > LARGE_SEGMENT_COUNT {
            warn!(segments = n, speed = self.speed, length = line.length(), "very long line");
        }
        let mut drawn = 0;
        for event in self.segments(line) {
            trace!(?event, "segment");
            surface.draw_event(&event)?;
            surface.present()?;
            drawn += 1;
            if self.speed > 0 {
                clock.pause(self.delay);
            }
        }
        Ok(drawn)
    }
}

// ============================================================================
// Draw sinks
// ============================================================================

/// What a turtle draws through when its pen is down
pub trait DrawSink: Send {
    /// Draw one logical move.
    ///
    /// Returns a line for the transcript when the sink reports in text.
    fn draw_line(&mut self, line: &Line) -> Result<Option<String>>;
}

/// Reports each move as `drew from (x1, y1) to (x2, y2)`
#[derive(Debug, Clone, Copy, Default)]
pub struct TextSink;

impl DrawSink for TextSink {
    fn draw_line(&mut self, line: &Line) -> Result<Option<String>> {
        Ok(Some(format!(
            "    drew from ({:.2}, {:.2}) to ({:.2}, {:.2})",
            line.from.x, line.from.y, line.to.x, line.to.y
        )))
    }
}

/// Renders moves onto a surface with the speed/delay model
pub struct AnimatedSink<S, C> {
    renderer: Renderer,
    surface: S,
    clock: C,
}

impl<S: Surface, C: Clock> AnimatedSink<S, C> {
    pub fn new(renderer: Renderer, surface: S, clock: C) -> Self {
        Self { renderer, surface, clock }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }
}

impl<S: Surface, C: Clock> DrawSink for AnimatedSink<S, C> {
    fn draw_line(&mut self, line: &Line) -> Result<Option<String>> {
        self.renderer.render(line, &mut self.surface, &mut self.clock)?;
        Ok(None)
    }
}
