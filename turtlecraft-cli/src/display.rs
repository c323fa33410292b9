//! Display task: drains draw events from the interpreter and writes the
//! requested canvas files once the interpreter is done.

use std::path::{Path, PathBuf};
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::info;
use turtlecraft_core::render::pump;
use turtlecraft_core::{DisplayMessage, Recording, RecordingSurface, Result, SessionConfig, Surface, SvgSurface};

/// Where to write the finished drawing
#[derive(Debug, Clone, Default)]
pub struct Outputs {
    pub svg: Option<PathBuf>,
    pub record: Option<PathBuf>,
}

impl Outputs {
    pub fn any(&self) -> bool {
        self.svg.is_some() || self.record.is_some()
    }
}

/// Run until the interpreter drops its end of the channel.
///
/// Returns the number of segments drawn.
pub async fn run_display(
    rx: UnboundedReceiver<DisplayMessage>,
    width: u32,
    height: u32,
    config: SessionConfig,
    outputs: Outputs,
) -> Result<usize> {
    let mut svg = SvgSurface::new(width, height);
    let mut recording = RecordingSurface::new();
    let segments = {
        let mut surfaces: [&mut dyn Surface; 2] = [&mut svg, &mut recording];
        pump(rx, &mut surfaces).await?
    };

    if let Some(path) = &outputs.svg {
        svg.write_to(path)?;
        info!(path = %path.display(), segments, "wrote svg");
    }
    if let Some(path) = &outputs.record {
        recording.to_recording(&config).write_json(path)?;
        info!(path = %path.display(), segments, "wrote recording");
    }
    Ok(segments)
}

/// Draw a saved recording onto a `width` by `height` canvas and write it as
/// SVG. Returns the number of segments replayed.
pub fn replay_to_svg(recording: &Path, svg: &Path, width: u32, height: u32) -> Result<usize> {
    let recording = Recording::read_json(recording)?;
    let mut surface = SvgSurface::new(width, height);
    let segments = recording.replay(&mut surface)?;
    surface.write_to(svg)?;
    info!(path = %svg.display(), segments, "wrote svg from recording");
    Ok(segments)
}
