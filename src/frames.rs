//! Narrow "save frame" boundary between the bitmap buffer and the filesystem.

use std::fs;
use std::path::{Path, PathBuf};

use image::RgbImage;
use tracing::debug;

use crate::error::Result;

/// Receives one completed frame at a time. The buffer never touches the
/// filesystem directly.
pub trait FrameSink {
    fn save(&mut self, image: &RgbImage) -> Result<()>;
}

/// Writes frames as zero-padded PNGs into a run-local directory.
pub struct DirFrameSink {
    dir: PathBuf,
    current_frame: u32,
}

impl DirFrameSink {
    /// Create `frames_<unix-seconds>` under `parent` and write frames there.
    pub fn create(parent: &Path) -> Result<Self> {
        let dir = parent.join(format!("frames_{}", chrono::Utc::now().timestamp()));
        Self::with_dir(dir)
    }

    /// Write frames into an explicit directory, creating it if needed.
    pub fn with_dir(dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
            current_frame: 0,
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn frames_written(&self) -> u32 {
        self.current_frame
    }
}

impl FrameSink for DirFrameSink {
    fn save(&mut self, image: &RgbImage) -> Result<()> {
        let path = self.dir.join(format!("frame_{:05}.png", self.current_frame));
        image.save(&path)?;
        self.current_frame += 1;
        debug!(path = %path.display(), "saved frame");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frames_are_numbered_sequentially() {
        let tmp = tempfile::tempdir().unwrap();
        let mut sink = DirFrameSink::with_dir(tmp.path().join("frames")).unwrap();
        let img = RgbImage::new(7, 7);

        sink.save(&img).unwrap();
        sink.save(&img).unwrap();

        assert_eq!(sink.frames_written(), 2);
        assert!(sink.dir().join("frame_00000.png").exists());
        assert!(sink.dir().join("frame_00001.png").exists());
    }
}
