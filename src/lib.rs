pub mod binary;
pub mod cli;
pub mod codec;
pub mod config;
pub mod container;
pub mod demuxers;
pub mod error;
pub mod filters;
pub mod image;
pub mod logging;
pub mod motion;
pub mod muxers;
pub mod player;
pub mod ppm;
pub mod stream;

pub use codec::{EncodedVideo, VideoDecoder, VideoEncoder};
pub use config::{CompensationMode, PartialVideoConfig, VideoConfig};
pub use error::{PlaybackError, Result, VideoError};
pub use image::{Frame, Resolution};
pub use player::{Emission, PlaybackReport, Player};
