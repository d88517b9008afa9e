use std::{fs, path::Path, time::Instant};

use log::{debug, info};

use crate::{
    binary::Bits,
    codec::{
        motion_vectors::encode_signed,
        payload::{DeflatePayloadCodec, PayloadCodec},
        prediction::FrameBuilder,
    },
    config::{CompensationMode, VideoConfig},
    container::FrameWriter,
    error::Result,
    invalid_argument,
    motion::{BlockMatcher, ExhaustiveBlockMatcher},
    stream::FrameSource,
};

#[derive(Debug, Clone)]
pub struct EncodedVideo {
    pub bits: Bits,
    pub frames: usize,
    pub motion_units: usize,
}

impl EncodedVideo {
    pub fn write_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        fs::write(path, self.bits.to_bytes())?;

        Ok(())
    }
}

pub struct VideoEncoder {
    config: VideoConfig,
    codec: Box<dyn PayloadCodec>,
    matcher: Box<dyn BlockMatcher>,
}

impl VideoEncoder {
    pub fn new(
        config: VideoConfig,
        codec: Box<dyn PayloadCodec>,
        matcher: Box<dyn BlockMatcher>,
    ) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            config,
            codec,
            matcher,
        })
    }

    pub fn with_defaults(config: VideoConfig) -> Result<Self> {
        Self::new(
            config,
            Box::new(DeflatePayloadCodec::default()),
            Box::new(ExhaustiveBlockMatcher),
        )
    }

    pub fn encode(
        &self,
        source: &mut dyn FrameSource,
        max_frames: Option<usize>,
    ) -> Result<EncodedVideo> {
        if source.get_resolution() != self.config.resolution {
            return Err(invalid_argument!(
                "source is {}x{}, video is configured for {}x{}",
                source.get_resolution().width,
                source.get_resolution().height,
                self.config.resolution.width,
                self.config.resolution.height
            ));
        }

        info!(
            "encoding {}x{} video, mode {}",
            self.config.resolution.width,
            self.config.resolution.height,
            self.config.mode.name()
        );

        let mut builder = FrameBuilder::new(self.config);
        let mut writer = FrameWriter::new(
            self.codec.sentinel().clone(),
            self.config.motion_payload_bits(),
        );

        while max_frames.map_or(true, |max| writer.frames_written() < max) {
            let Some(frame) = source.get_next_frame()? else {
                break;
            };
            let started = Instant::now();

            let prediction = builder.build(&frame, self.matcher.as_ref())?;
            let payload = self.codec.encode(&prediction.payload)?;
            let motion = match (prediction.motion, self.config.mode) {
                (Some(field), CompensationMode::BlockMatching { search_radius }) => {
                    Some(encode_signed(&field, search_radius)?)
                }
                _ => None,
            };
            writer.write_frame(&payload, motion.as_ref())?;

            debug!(
                "encoded frame {} into {} payload bits{} in {:?}",
                writer.frames_written(),
                payload.len(),
                motion
                    .as_ref()
                    .map(|bits| format!(" + {} motion bits", bits.len()))
                    .unwrap_or_default(),
                started.elapsed()
            );
        }

        let frames = writer.frames_written();
        let motion_units = writer.motion_units_written();
        let bits = writer.finish();
        info!("encoded {frames} frames into {} bits", bits.len());

        Ok(EncodedVideo {
            bits,
            frames,
            motion_units,
        })
    }

    pub fn encode_to_file(
        &self,
        source: &mut dyn FrameSource,
        max_frames: Option<usize>,
        path: impl AsRef<Path>,
    ) -> Result<EncodedVideo> {
        let encoded = self.encode(source, max_frames)?;
        encoded.write_to_file(path)?;

        Ok(encoded)
    }
}
