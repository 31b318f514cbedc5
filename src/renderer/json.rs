//! JSON Lines backend: one serialized frame per line

use std::io::Write;

use super::{FrameSnapshot, Renderer};

/// Writes each frame as a JSON object on its own line.
///
/// Drawing is best effort. The first write failure is logged and the
/// renderer goes quiet; the simulation keeps running.
pub struct JsonLinesRenderer<W: Write> {
    out: W,
    frames: u64,
    failed: bool,
}

impl<W: Write> JsonLinesRenderer<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            frames: 0,
            failed: false,
        }
    }

    /// Frames written so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_frame(&mut self, frame: &FrameSnapshot) -> Result<(), std::io::Error> {
        serde_json::to_writer(&mut self.out, frame)?;
        self.out.write_all(b"\n")?;
        self.out.flush()
    }
}

impl<W: Write> Renderer for JsonLinesRenderer<W> {
    fn draw(&mut self, frame: &FrameSnapshot) {
        if self.failed {
            return;
        }
        match self.write_frame(frame) {
            Ok(()) => self.frames += 1,
            Err(e) => {
                log::warn!("Frame output failed, disabling renderer: {}", e);
                self.failed = true;
            }
        }
    }
}
