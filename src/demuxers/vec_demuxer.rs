use std::collections::VecDeque;

use crate::{
    error::Result,
    image::{Frame, Resolution},
    stream::FrameSource,
};

pub struct VecDemuxer {
    resolution: Resolution,
    frames: VecDeque<Frame>,
}

impl VecDemuxer {
    pub fn new(resolution: Resolution, frames: Vec<Frame>) -> Self {
        Self {
            resolution,
            frames: frames.into(),
        }
    }
}

impl FrameSource for VecDemuxer {
    fn get_next_frame(&mut self) -> Result<Option<Frame>> {
        Ok(self.frames.pop_front())
    }

    fn get_resolution(&self) -> Resolution {
        self.resolution
    }
}
