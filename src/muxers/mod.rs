use crate::{error::Result, image::Frame};

pub mod memory_muxer;
pub mod ppm_sequence_muxer;
pub mod raw_video_muxer;

pub use memory_muxer::MemoryMuxer;
pub use ppm_sequence_muxer::PpmSequenceMuxer;
pub use raw_video_muxer::RawVideoMuxer;

pub trait FrameSink {
    fn show(&mut self, frame: &Frame) -> Result<()>;

    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}
