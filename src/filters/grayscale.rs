use crate::{error::Result, image::Frame, invalid_argument};

use super::Filter;

const LUMA_WEIGHTS: [f32; 3] = [0.299, 0.587, 0.114];

pub struct GrayScaleFilter;

impl GrayScaleFilter {
    fn convert_to_grayscale(&self, frame: &Frame) -> Frame {
        let samples = frame
            .samples()
            .chunks_exact(3)
            .map(|rgb| {
                let luma: f32 = rgb
                    .iter()
                    .zip(LUMA_WEIGHTS)
                    .map(|(&sample, weight)| sample as f32 * weight)
                    .sum();

                luma.round().clamp(0., 255.) as u8
            })
            .collect();

        Frame::from_parts(frame.resolution, 1, samples)
    }
}

impl Filter for GrayScaleFilter {
    fn filter_frame(&self, frame: Frame) -> Result<Frame> {
        match frame.channels {
            1 => Ok(frame),
            3 => Ok(self.convert_to_grayscale(&frame)),
            channels => Err(invalid_argument!(
                "cannot convert {channels} channel frame to grayscale"
            )),
        }
    }
}
