use std::io::{Read, Write};

use flate2::{read::ZlibDecoder, write::ZlibEncoder, Compression};

use crate::{
    binary::{stuffing, Bits},
    error::{Result, VideoError},
    image::{Frame, Resolution},
};

/// Implementations own the sentinel that closes every unit in the container and must guarantee
/// that no encoded payload, nor a payload followed by the sentinel, contains it anywhere except at
/// the very end.
pub trait PayloadCodec {
    fn sentinel(&self) -> &Bits;
    fn encode(&self, frame: &Frame) -> Result<Bits>;
    fn decode(&self, bits: &Bits, resolution: Resolution, channels: usize) -> Result<Frame>;
}

#[derive(Clone, Copy, Debug, Default)]
pub enum CompressionLevel {
    None,
    #[default]
    Best,
    Fast,
}

impl CompressionLevel {
    pub fn to_flate2(&self) -> Compression {
        match self {
            CompressionLevel::None => Compression::none(),
            CompressionLevel::Best => Compression::best(),
            CompressionLevel::Fast => Compression::fast(),
        }
    }
}

pub struct DeflatePayloadCodec {
    compression_level: CompressionLevel,
    sentinel: Bits,
}

impl DeflatePayloadCodec {
    pub fn new(compression_level: CompressionLevel) -> Self {
        Self {
            compression_level,
            sentinel: stuffing::flag(),
        }
    }
}

impl Default for DeflatePayloadCodec {
    fn default() -> Self {
        Self::new(CompressionLevel::default())
    }
}

impl PayloadCodec for DeflatePayloadCodec {
    fn sentinel(&self) -> &Bits {
        &self.sentinel
    }

    fn encode(&self, frame: &Frame) -> Result<Bits> {
        let mut encoder = ZlibEncoder::new(Vec::new(), self.compression_level.to_flate2());
        encoder.write_all(frame.samples())?;
        let compressed = encoder.finish()?;

        Ok(stuffing::stuff(&Bits::from_bytes(&compressed)))
    }

    fn decode(&self, bits: &Bits, resolution: Resolution, channels: usize) -> Result<Frame> {
        let unstuffed = stuffing::unstuff(bits)?;
        if unstuffed.len() % 8 != 0 {
            return Err(VideoError::Payload(format!(
                "payload of {} bits is not byte aligned",
                unstuffed.len()
            )));
        }

        let expected = resolution.number_of_pixels() * channels;
        let mut samples = Vec::with_capacity(expected);
        ZlibDecoder::new(unstuffed.to_bytes().as_slice())
            .read_to_end(&mut samples)
            .map_err(|e| VideoError::Payload(format!("inflate failed: {e}")))?;

        if samples.len() != expected {
            return Err(VideoError::Payload(format!(
                "expected {} samples for {}x{}x{}, inflated {}",
                expected,
                resolution.width,
                resolution.height,
                channels,
                samples.len()
            )));
        }

        Ok(Frame::from_parts(resolution, channels, samples))
    }
}
