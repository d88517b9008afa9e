pub mod reader;
pub mod writer;

pub use reader::{FrameReader, FrameUnit, ReaderState};
pub use writer::FrameWriter;
