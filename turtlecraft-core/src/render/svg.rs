//! SVG canvas surface
//!
//! Collects segments and writes them out as one SVG document. The view box
//! grows to cover turtles that wander off the canvas.

use super::{DrawEvent, Surface};
use crate::error::{Error, Result};
use crate::geometry::Point;
use crate::palette::Colour;
use std::fmt::Write as _;
use std::path::Path;

/// Width of drawn lines
pub const STROKE_WIDTH: f64 = 1.6;

/// An in-memory SVG canvas
#[derive(Debug, Clone)]
pub struct SvgSurface {
    width: u32,
    height: u32,
    segments: Vec<DrawEvent>,
    frames: usize,
}

impl SvgSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            segments: Vec::new(),
            frames: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Number of times the canvas was presented
    pub fn frames(&self) -> usize {
        self.frames
    }

    /// `(min_x, min_y, width, height)` covering the canvas and every segment
    pub fn view_box(&self) -> (f64, f64, f64, f64) {
        let (mut min_x, mut min_y) = (0.0_f64, 0.0_f64);
        let (mut max_x, mut max_y) = (f64::from(self.width), f64::from(self.height));
        for segment in &self.segments {
            for p in [segment.from, segment.to] {
                min_x = min_x.min(p.x);
                min_y = min_y.min(p.y);
                max_x = max_x.max(p.x);
                max_y = max_y.max(p.y);
            }
        }
        (min_x, min_y, max_x - min_x, max_y - min_y)
    }

    /// Render the canvas as an SVG document
    pub fn to_svg(&self) -> String {
        let (x, y, w, h) = self.view_box();
        let mut out = String::new();
        // writing into a String cannot fail
        let _ = writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="{:.2} {:.2} {:.2} {:.2}">"#,
            w.ceil(),
            h.ceil(),
            x,
            y,
            w,
            h
        );
        let _ = writeln!(
            out,
            r#"  <rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="white"/>"#,
            x, y, w, h
        );
        for segment in &self.segments {
            let _ = writeln!(
                out,
                r#"  <line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="{}" stroke-width="{}" stroke-linecap="round"/>"#,
                segment.from.x, segment.from.y, segment.to.x, segment.to.y, segment.colour, STROKE_WIDTH
            );
        }
        out.push_str("</svg>\n");
        out
    }

    pub fn write_to(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_svg()).map_err(|e| {
            Error::from(e)
                .with_operation("svg::write_to")
                .with_context("path", path.display().to_string())
        })
    }
}

impl Surface for SvgSurface {
    fn draw_segment(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, colour: Colour) -> Result<()> {
        self.segments
            .push(DrawEvent::new(Point::new(x1, y1), Point::new(x2, y2), colour));
        Ok(())
    }

    fn present(&mut self) -> Result<()> {
        self.frames += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_canvas() {
        let svg = SvgSurface::new(600, 400);
        assert!(svg.is_empty());
        assert_eq!(svg.view_box(), (0.0, 0.0, 600.0, 400.0));
        let doc = svg.to_svg();
        assert!(doc.starts_with("<svg"));
        assert!(doc.trim_end().ends_with("</svg>"));
        assert!(!doc.contains("<line"));
    }

    #[test]
    fn test_lines_are_written_with_palette_names() {
        let mut svg = SvgSurface::new(600, 600);
        svg.draw_segment(300.0, 300.0, 300.0, 250.0, Colour::Firebrick).unwrap();
        svg.present().unwrap();

        let doc = svg.to_svg();
        assert_eq!(svg.len(), 1);
        assert_eq!(svg.frames(), 1);
        assert!(doc.contains(r#"<line x1="300.00" y1="300.00" x2="300.00" y2="250.00" stroke="firebrick""#));
    }

    #[test]
    fn test_view_box_follows_stray_turtles() {
        let mut svg = SvgSurface::new(100, 100);
        svg.draw_segment(50.0, 50.0, -20.0, 150.0, Colour::Black).unwrap();
        assert_eq!(svg.view_box(), (-20.0, 0.0, 120.0, 150.0));
    }

    #[test]
    fn test_write_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.svg");
        let mut svg = SvgSurface::new(10, 10);
        svg.draw_segment(0.0, 0.0, 10.0, 10.0, Colour::Blue).unwrap();

        svg.write_to(&path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("stroke=\"blue\""));
    }
}
