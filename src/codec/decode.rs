use std::{fs, path::Path, time::Instant};

use log::debug;

use crate::{
    binary::Bits,
    codec::{
        motion_vectors::decode_signed,
        payload::{DeflatePayloadCodec, PayloadCodec},
        prediction::FrameBuilder,
    },
    config::{CompensationMode, VideoConfig},
    container::FrameReader,
    error::Result,
    image::{Frame, Resolution},
    stream::FrameSource,
};

pub struct VideoDecoder {
    config: VideoConfig,
    codec: Box<dyn PayloadCodec>,
    reader: FrameReader,
    builder: FrameBuilder,
    frames_decoded: usize,
    failed: bool,
}

impl VideoDecoder {
    pub fn new(config: VideoConfig, codec: Box<dyn PayloadCodec>, bits: Bits) -> Result<Self> {
        config.validate()?;
        let reader = FrameReader::new(
            bits,
            codec.sentinel().clone(),
            config.motion_payload_bits(),
        );

        Ok(Self {
            config,
            codec,
            reader,
            builder: FrameBuilder::new(config),
            frames_decoded: 0,
            failed: false,
        })
    }

    pub fn with_defaults(config: VideoConfig, bits: Bits) -> Result<Self> {
        Self::new(config, Box::new(DeflatePayloadCodec::default()), bits)
    }

    pub fn from_file(
        config: VideoConfig,
        codec: Box<dyn PayloadCodec>,
        path: impl AsRef<Path>,
    ) -> Result<Self> {
        let bytes = fs::read(path)?;

        Self::new(config, codec, Bits::from_bytes(&bytes))
    }

    pub fn frames_decoded(&self) -> usize {
        self.frames_decoded
    }

    pub fn next_frame(&mut self) -> Result<Option<Frame>> {
        if self.failed {
            return Ok(None);
        }

        let result = self.decode_next();
        self.failed = result.is_err();

        result
    }

    fn decode_next(&mut self) -> Result<Option<Frame>> {
        let Some(unit) = self.reader.next_unit()? else {
            return Ok(None);
        };
        let started = Instant::now();

        let payload = self
            .codec
            .decode(&unit.payload, self.config.resolution, self.config.channels)?;
        let motion = match (&unit.motion, self.config.mode) {
            (Some(bits), CompensationMode::BlockMatching { search_radius }) => Some(decode_signed(
                bits,
                search_radius,
                self.config.block_rows(),
                self.config.block_cols(),
            )?),
            _ => None,
        };
        let frame = self.builder.reconstruct(payload, motion.as_ref())?;
        self.frames_decoded += 1;

        debug!(
            "decoded frame {} from {} payload bits in {:?}",
            unit.index,
            unit.payload.len(),
            started.elapsed()
        );

        Ok(Some(frame))
    }
}

impl FrameSource for VideoDecoder {
    fn get_next_frame(&mut self) -> Result<Option<Frame>> {
        self.next_frame()
    }

    fn get_resolution(&self) -> Resolution {
        self.config.resolution
    }
}
