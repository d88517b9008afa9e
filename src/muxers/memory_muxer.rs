use crate::{error::Result, image::Frame};

use super::FrameSink;

#[derive(Debug, Default)]
pub struct MemoryMuxer {
    frames: Vec<Frame>,
}

impl MemoryMuxer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn into_frames(self) -> Vec<Frame> {
        self.frames
    }
}

impl FrameSink for MemoryMuxer {
    fn show(&mut self, frame: &Frame) -> Result<()> {
        self.frames.push(frame.clone());

        Ok(())
    }
}
