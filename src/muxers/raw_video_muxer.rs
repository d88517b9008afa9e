use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use crate::{error::Result, image::Frame};

use super::FrameSink;

pub struct RawVideoMuxer {
    writer: BufWriter<File>,
}

impl RawVideoMuxer {
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self {
            writer: BufWriter::new(File::create(path)?),
        })
    }
}

impl FrameSink for RawVideoMuxer {
    fn show(&mut self, frame: &Frame) -> Result<()> {
        self.writer.write_all(frame.samples())?;

        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;

        Ok(())
    }
}
