//! Channel surface: hands draw events to a display task.
//!
//! The interpreter runs on a blocking thread and owns the sending half; a
//! display task on the async runtime drains the receiving half with [`pump`].
//! Dropping the interpreter closes the channel and ends the pump.

use super::{DrawEvent, Surface};
use crate::error::{Error, Result};
use crate::geometry::Point;
use crate::palette::Colour;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use tracing::debug;

/// Messages from the interpreter to the display task
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DisplayMessage {
    Segment(DrawEvent),
    Present,
}

/// Sends draw events over an unbounded channel
#[derive(Debug, Clone)]
pub struct ChannelSurface {
    tx: UnboundedSender<DisplayMessage>,
}

impl ChannelSurface {
    pub fn new(tx: UnboundedSender<DisplayMessage>) -> Self {
        Self { tx }
    }

    fn send(&self, message: DisplayMessage) -> Result<()> {
        self.tx
            .send(message)
            .map_err(|_| Error::surface_closed("display").with_operation("channel::send"))
    }
}

impl Surface for ChannelSurface {
    fn draw_segment(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, colour: Colour) -> Result<()> {
        self.send(DisplayMessage::Segment(DrawEvent::new(
            Point::new(x1, y1),
            Point::new(x2, y2),
            colour,
        )))
    }

    fn present(&mut self) -> Result<()> {
        self.send(DisplayMessage::Present)
    }
}

/// Drain `rx` into every surface until the sending side is dropped.
///
/// Returns the number of segments received.
pub async fn pump(mut rx: UnboundedReceiver<DisplayMessage>, surfaces: &mut [&mut dyn Surface]) -> Result<usize> {
    let mut segments = 0;
    while let Some(message) = rx.recv().await {
        match message {
            DisplayMessage::Segment(event) => {
                segments += 1;
                for surface in surfaces.iter_mut() {
                    surface.draw_event(&event)?;
                }
            }
            DisplayMessage::Present => {
                for surface in surfaces.iter_mut() {
                    surface.present()?;
                }
            }
        }
    }
    debug!(segments, "display channel closed");
    Ok(segments)
}
