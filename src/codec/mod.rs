pub mod decode;
pub mod encode;
pub mod motion_vectors;
pub mod payload;
pub mod prediction;
pub mod residual;

pub use decode::VideoDecoder;
pub use encode::{EncodedVideo, VideoEncoder};
pub use payload::{CompressionLevel, DeflatePayloadCodec, PayloadCodec};
pub use prediction::{FrameBuilder, Prediction};
