//! Recording surface and replayable draw logs

use super::{DrawEvent, Surface};
use crate::config::SessionConfig;
use crate::error::{Error, Result};
use crate::geometry::Point;
use crate::palette::Colour;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

#[derive(Debug, Default)]
struct Log {
    events: Vec<DrawEvent>,
    presents: usize,
}

/// Keeps every draw event in order. Clones share the same log, so a test can
/// keep a handle while the interpreter owns the surface.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    log: Arc<Mutex<Log>>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the events drawn so far
    pub fn events(&self) -> Vec<DrawEvent> {
        self.log.lock().events.clone()
    }

    /// Number of `present` calls
    pub fn presents(&self) -> usize {
        self.log.lock().presents
    }

    /// Package the events with the configuration that produced them
    pub fn to_recording(&self, config: &SessionConfig) -> Recording {
        Recording {
            config: config.clone(),
            events: self.events(),
        }
    }
}

impl Surface for RecordingSurface {
    fn draw_segment(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, colour: Colour) -> Result<()> {
        self.log
            .lock()
            .events
            .push(DrawEvent::new(Point::new(x1, y1), Point::new(x2, y2), colour));
        Ok(())
    }

    fn present(&mut self) -> Result<()> {
        self.log.lock().presents += 1;
        Ok(())
    }
}

/// A draw log that can be saved and replayed onto any surface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recording {
    pub config: SessionConfig,
    pub events: Vec<DrawEvent>,
}

impl Recording {
    /// Fails on events with a non-finite coordinate, which JSON cannot
    /// carry and would not read back.
    pub fn to_json(&self) -> Result<String> {
        if let Some(i) = self.events.iter().position(|e| !(e.from.is_finite() && e.to.is_finite())) {
            return Err(Error::serialization_failed("draw event has a non-finite coordinate")
                .with_operation("recording::to_json")
                .with_context("event", i.to_string()));
        }
        serde_json::to_string_pretty(self).map_err(|e| {
            Error::serialization_failed(e.to_string())
                .with_operation("recording::to_json")
                .set_source(e)
        })
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| {
            Error::serialization_failed(e.to_string())
                .with_operation("recording::from_json")
                .set_source(e)
        })
    }

    pub fn write_json(&self, path: &Path) -> Result<()> {
        let json = self.to_json()?;
        std::fs::write(path, json).map_err(|e| {
            Error::from(e)
                .with_operation("recording::write_json")
                .with_context("path", path.display().to_string())
        })
    }

    pub fn read_json(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            Error::from(e)
                .with_operation("recording::read_json")
                .with_context("path", path.display().to_string())
        })?;
        Self::from_json(&json)
    }

    /// Draw every recorded event onto `surface`, presenting once at the end
    pub fn replay<S: Surface + ?Sized>(&self, surface: &mut S) -> Result<usize> {
        for event in &self.events {
            surface.draw_event(event)?;
        }
        surface.present()?;
        Ok(self.events.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RecordingSurface {
        let mut surface = RecordingSurface::new();
        surface.draw_segment(0.0, 0.0, 0.0, 10.0, Colour::Red).unwrap();
        surface.draw_segment(0.0, 10.0, 5.0, 10.0, Colour::Blue).unwrap();
        surface.present().unwrap();
        surface
    }

    #[test]
    fn test_clones_share_the_log() {
        let surface = sample();
        let handle = surface.clone();
        let mut owner = surface;
        owner.draw_segment(5.0, 10.0, 5.0, 0.0, Colour::Gold).unwrap();

        assert_eq!(handle.events().len(), 3);
        assert_eq!(handle.presents(), 1);
        assert_eq!(handle.events()[2].colour, Colour::Gold);
    }

    #[test]
    fn test_replay_reproduces_events() {
        let recording = sample().to_recording(&SessionConfig::text_mode());
        let mut target = RecordingSurface::new();

        let n = recording.replay(&mut target).unwrap();

        assert_eq!(n, 2);
        assert_eq!(target.events(), recording.events);
        assert_eq!(target.presents(), 1);
    }

    #[test]
    fn test_json_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("drawing.json");
        let recording = sample().to_recording(&SessionConfig::screen(600, 600).with_speed(9));

        recording.write_json(&path).unwrap();
        let loaded = Recording::read_json(&path).unwrap();

        assert_eq!(loaded, recording);
    }

    #[test]
    fn test_non_finite_event_is_not_written() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("drawing.json");
        let mut surface = sample();
        surface.draw_segment(5.0, 10.0, f64::INFINITY, 10.0, Colour::Red).unwrap();
        let recording = surface.to_recording(&SessionConfig::text_mode());

        let err = recording.write_json(&path).unwrap_err();

        assert_eq!(err.kind(), crate::error::ErrorKind::SerializationFailed);
        assert_eq!(err.context_value("event"), Some("2"));
        assert!(!path.exists());
    }

    #[test]
    fn test_bad_json_is_a_serialization_error() {
        let err = Recording::from_json("{ not json").unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::SerializationFailed);
    }
}
