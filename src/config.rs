use std::str::FromStr;

use crate::{
    codec::motion_vectors::bit_width_for_radius,
    error::{Result, VideoError},
    image::Resolution,
    invalid_argument,
};

pub const DEFAULT_BLOCK_SIZE: usize = 8;
pub const DEFAULT_CLIP: u8 = 100;
pub const DEFAULT_SEARCH_RADIUS: u32 = 7;
pub const DEFAULT_CHANNELS: usize = 3;
pub const MAX_CLIP: u8 = 127;
const MAX_MOTION_BIT_WIDTH: u8 = 16;

/// How each frame after the first is predicted. Never written to the stream, writer and reader
/// have to agree on it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompensationMode {
    None,
    FrameDifference,
    BlockMatching { search_radius: u32 },
}

impl CompensationMode {
    pub fn name(&self) -> &'static str {
        match self {
            CompensationMode::None => "none",
            CompensationMode::FrameDifference => "frame_difference",
            CompensationMode::BlockMatching { .. } => "block_matching",
        }
    }
}

impl FromStr for CompensationMode {
    type Err = VideoError;

    fn from_str(name: &str) -> Result<Self> {
        match name {
            "none" => Ok(CompensationMode::None),
            "frame_difference" => Ok(CompensationMode::FrameDifference),
            "block_matching" => Ok(CompensationMode::BlockMatching {
                search_radius: DEFAULT_SEARCH_RADIUS,
            }),
            other => Err(invalid_argument!("unrecognized compensation mode {other:?}")),
        }
    }
}

impl Default for CompensationMode {
    fn default() -> Self {
        Self::None
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VideoConfig {
    pub resolution: Resolution,
    pub channels: usize,
    pub block_size: usize,
    pub clip: u8,
    pub mode: CompensationMode,
}

impl VideoConfig {
    pub fn block_rows(&self) -> usize {
        self.resolution.height / self.block_size
    }

    pub fn block_cols(&self) -> usize {
        self.resolution.width / self.block_size
    }

    pub fn motion_bit_width(&self) -> Option<u8> {
        match self.mode {
            CompensationMode::BlockMatching { search_radius } => {
                Some(bit_width_for_radius(search_radius))
            }
            _ => None,
        }
    }

    pub fn motion_payload_bits(&self) -> Option<usize> {
        self.motion_bit_width()
            .map(|width| self.block_rows() * self.block_cols() * 2 * width as usize)
    }

    pub fn validate(&self) -> Result<()> {
        if self.resolution.width == 0 || self.resolution.height == 0 {
            return Err(invalid_argument!(
                "frame dimensions must be positive, got {}x{}",
                self.resolution.width,
                self.resolution.height
            ));
        }

        if self.channels != 1 && self.channels != 3 {
            return Err(invalid_argument!(
                "frames must have 1 or 3 channels, got {}",
                self.channels
            ));
        }

        if self.block_size == 0 {
            return Err(invalid_argument!("block size must be positive"));
        }

        if self.clip > MAX_CLIP {
            return Err(invalid_argument!(
                "clip value {} is above {}",
                self.clip,
                MAX_CLIP
            ));
        }

        if let CompensationMode::BlockMatching { search_radius } = self.mode {
            let bit_width = bit_width_for_radius(search_radius);
            if bit_width > MAX_MOTION_BIT_WIDTH {
                return Err(invalid_argument!(
                    "search radius {search_radius} needs {bit_width} bits per component, at most {MAX_MOTION_BIT_WIDTH} supported"
                ));
            }

            if self.resolution.width % self.block_size != 0
                || self.resolution.height % self.block_size != 0
            {
                return Err(invalid_argument!(
                    "block matching needs {}x{} to be a multiple of the {} pixel block size",
                    self.resolution.width,
                    self.resolution.height,
                    self.block_size
                ));
            }
        }

        Ok(())
    }
}

#[derive(Clone, Debug, Default)]
pub struct PartialVideoConfig {
    resolution: Option<Resolution>,
    channels: Option<usize>,
    block_size: Option<usize>,
    clip: Option<u8>,
    mode: Option<CompensationMode>,
    search_radius: Option<u32>,
}

impl PartialVideoConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn resolution(mut self, resolution: Resolution) -> Self {
        self.resolution = Some(resolution);
        self
    }

    pub fn channels(mut self, channels: usize) -> Self {
        self.channels = Some(channels);
        self
    }

    pub fn block_size(mut self, block_size: usize) -> Self {
        self.block_size = Some(block_size);
        self
    }

    pub fn clip(mut self, clip: u8) -> Self {
        self.clip = Some(clip);
        self
    }

    pub fn mode(mut self, mode: CompensationMode) -> Self {
        if let CompensationMode::BlockMatching { search_radius } = mode {
            self.search_radius = Some(search_radius);
        }
        self.mode = Some(mode);
        self
    }

    pub fn apply_keyword_args(mut self, args: &str) -> Result<Self> {
        for pair in args.split(';').map(str::trim).filter(|pair| !pair.is_empty()) {
            let (key, value) = pair
                .split_once('=')
                .ok_or_else(|| invalid_argument!("option {pair:?} is not of the form key=value"))?;
            let value = value.trim();

            match key.trim() {
                "mode" => self.mode = Some(value.parse()?),
                "clip" => self.clip = Some(parse_number(key, value)?),
                "radius" => self.search_radius = Some(parse_number(key, value)?),
                "block" => self.block_size = Some(parse_number(key, value)?),
                "channels" => self.channels = Some(parse_number(key, value)?),
                other => return Err(invalid_argument!("unrecognized option {other:?}")),
            }
        }

        Ok(self)
    }

    pub fn build(self) -> Result<VideoConfig> {
        let resolution = self
            .resolution
            .ok_or_else(|| invalid_argument!("frame size was not given"))?;
        // `radius=` may come before or after `mode=`
        let mode = match self.mode.unwrap_or_default() {
            CompensationMode::BlockMatching { search_radius } => CompensationMode::BlockMatching {
                search_radius: self.search_radius.unwrap_or(search_radius),
            },
            mode => mode,
        };

        let config = VideoConfig {
            resolution,
            channels: self.channels.unwrap_or(DEFAULT_CHANNELS),
            block_size: self.block_size.unwrap_or(DEFAULT_BLOCK_SIZE),
            clip: self.clip.unwrap_or(DEFAULT_CLIP),
            mode,
        };
        config.validate()?;

        Ok(config)
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .parse::<T>()
        .map_err(|_e| invalid_argument!("{key} is not a valid number: {value:?}"))
}
