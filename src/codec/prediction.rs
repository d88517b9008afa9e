use crate::{
    codec::residual::{add_residual, subtract_residual, Residual},
    config::{CompensationMode, VideoConfig},
    error::Result,
    image::Frame,
    invalid_argument,
    motion::{warp, BlockMatcher, MotionField},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prediction {
    pub payload: Frame,
    pub motion: Option<MotionField>,
}

pub struct FrameBuilder {
    config: VideoConfig,
    previous: Option<Frame>,
}

impl FrameBuilder {
    pub fn new(config: VideoConfig) -> Self {
        Self {
            config,
            previous: None,
        }
    }

    pub fn previous(&self) -> Option<&Frame> {
        self.previous.as_ref()
    }

    pub fn expects_motion(&self) -> bool {
        self.previous.is_some()
            && matches!(self.config.mode, CompensationMode::BlockMatching { .. })
    }

    pub fn build(&mut self, current: &Frame, matcher: &dyn BlockMatcher) -> Result<Prediction> {
        self.check_shape(current)?;

        let prediction = match (&self.previous, self.config.mode) {
            (None, _) | (_, CompensationMode::None) => Prediction {
                payload: current.clone(),
                motion: None,
            },
            (Some(previous), CompensationMode::FrameDifference) => Prediction {
                payload: Residual::difference(current, previous)?
                    .clip_and_offset(self.config.clip),
                motion: None,
            },
            (Some(previous), CompensationMode::BlockMatching { search_radius }) => {
                let (field, residual) =
                    matcher.block_match(previous, current, self.config.block_size, search_radius)?;

                Prediction {
                    payload: residual.clip_and_offset(self.config.clip),
                    motion: Some(field),
                }
            }
        };

        // Keep the decoder's view of the frame as reference, not the source.
        self.reconstruct(prediction.payload.clone(), prediction.motion.as_ref())?;

        Ok(prediction)
    }

    pub fn reconstruct(&mut self, payload: Frame, motion: Option<&MotionField>) -> Result<Frame> {
        self.check_shape(&payload)?;

        let frame = match (&self.previous, self.config.mode) {
            (None, _) | (_, CompensationMode::None) => {
                if motion.is_some() {
                    return Err(invalid_argument!("motion field given for an unpredicted frame"));
                }

                payload
            }
            (Some(previous), CompensationMode::FrameDifference) => {
                if motion.is_some() {
                    return Err(invalid_argument!("motion field given in frame difference mode"));
                }

                add_residual(previous, &Residual::from_offset_frame(&payload, self.config.clip))?
            }
            (Some(previous), CompensationMode::BlockMatching { .. }) => {
                let field = motion.ok_or_else(|| {
                    invalid_argument!("block matched frame is missing its motion field")
                })?;
                if field.rows != self.config.block_rows()
                    || field.cols != self.config.block_cols()
                {
                    return Err(invalid_argument!(
                        "motion field is {}x{}, expected {}x{}",
                        field.rows,
                        field.cols,
                        self.config.block_rows(),
                        self.config.block_cols()
                    ));
                }

                let warped = warp(previous, field, self.config.block_size)?;
                subtract_residual(
                    &warped,
                    &Residual::from_offset_frame(&payload, self.config.clip),
                )?
            }
        };

        if self.config.mode != CompensationMode::None {
            self.previous = Some(frame.clone());
        }

        Ok(frame)
    }

    fn check_shape(&self, frame: &Frame) -> Result<()> {
        if frame.resolution != self.config.resolution || frame.channels != self.config.channels {
            return Err(invalid_argument!(
                "frame is {}x{}x{}, video is configured for {}x{}x{}",
                frame.width(),
                frame.height(),
                frame.channels,
                self.config.resolution.width,
                self.config.resolution.height,
                self.config.channels
            ));
        }

        Ok(())
    }
}
