use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{error::Result, image::Frame, ppm::encode_ppm};

use super::FrameSink;

pub struct PpmSequenceMuxer {
    directory: PathBuf,
    frames_written: usize,
}

impl PpmSequenceMuxer {
    pub fn create(directory: impl AsRef<Path>) -> Result<Self> {
        fs::create_dir_all(&directory)?;

        Ok(Self {
            directory: directory.as_ref().to_path_buf(),
            frames_written: 0,
        })
    }

    fn frame_path(&self, index: usize, channels: usize) -> PathBuf {
        let extension = if channels == 1 { "pgm" } else { "ppm" };

        self.directory.join(format!("frame_{index:05}.{extension}"))
    }
}

impl FrameSink for PpmSequenceMuxer {
    fn show(&mut self, frame: &Frame) -> Result<()> {
        let bytes = encode_ppm(frame)?;
        fs::write(self.frame_path(self.frames_written, frame.channels), bytes)?;
        self.frames_written += 1;

        Ok(())
    }
}
