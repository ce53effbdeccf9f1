use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::FrameNumber;
use crate::foundation::error::{SplitreelError, SplitreelResult};
use crate::render::canvas::FrameRGBA;

/// Writes every captured frame as `frame_NNNNN.png` into one directory.
///
/// Frame numbers past [`FrameNumber::MAX_LABEL`] saturate, so the last file is overwritten
/// rather than the name growing a digit.
#[derive(Debug)]
pub struct PngSequenceSink {
    dir: PathBuf,
    cfg: Option<SinkConfig>,
    written: u64,
}

impl PngSequenceSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            cfg: None,
            written: 0,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Frames written since the last `begin`.
    pub fn written(&self) -> u64 {
        self.written
    }

    /// File a frame number is written to.
    pub fn frame_path(&self, number: FrameNumber) -> PathBuf {
        self.dir.join(format!("frame_{}.png", number.label()))
    }
}

impl FrameSink for PngSequenceSink {
    fn begin(&mut self, cfg: SinkConfig) -> SplitreelResult<()> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("create output dir '{}'", self.dir.display()))?;
        self.cfg = Some(cfg);
        self.written = 0;
        Ok(())
    }

    fn push_frame(&mut self, number: FrameNumber, frame: &FrameRGBA) -> SplitreelResult<()> {
        let Some(cfg) = self.cfg else {
            return Err(SplitreelError::sink("push_frame called before begin"));
        };
        if frame.width != cfg.width || frame.height != cfg.height {
            return Err(SplitreelError::sink(format!(
                "frame {number} is {}x{}, sink expects {}x{}",
                frame.width, frame.height, cfg.width, cfg.height
            )));
        }

        let path = self.frame_path(number);
        let straight;
        let data = if frame.premultiplied {
            straight = unpremultiply(&frame.data);
            &straight
        } else {
            &frame.data
        };
        image::save_buffer_with_format(
            &path,
            data,
            frame.width,
            frame.height,
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .with_context(|| format!("write png '{}'", path.display()))?;
        self.written += 1;
        Ok(())
    }

    fn end(&mut self) -> SplitreelResult<()> {
        tracing::debug!(frames = self.written, dir = %self.dir.display(), "png sequence closed");
        self.cfg = None;
        Ok(())
    }
}

fn unpremultiply(data: &[u8]) -> Vec<u8> {
    let mut out = data.to_vec();
    for px in out.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        if a == 0 || a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/encode/png_sequence.rs"]
mod tests;
