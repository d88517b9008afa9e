//! Values outside `[-clip, clip]` are saturated before offsetting. That clamp is irreversible and
//! is the expected quality loss of the difference modes, never reported as an error.

use crate::{
    error::Result,
    image::{Frame, Resolution},
    invalid_argument,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Residual {
    pub resolution: Resolution,
    pub channels: usize,
    values: Vec<i16>,
}

impl Residual {
    pub fn new(resolution: Resolution, channels: usize, values: Vec<i16>) -> Result<Self> {
        if values.len() != resolution.number_of_pixels() * channels {
            return Err(invalid_argument!(
                "residual for {}x{}x{} needs {} values, got {}",
                resolution.width,
                resolution.height,
                channels,
                resolution.number_of_pixels() * channels,
                values.len()
            ));
        }

        Ok(Self {
            resolution,
            channels,
            values,
        })
    }

    pub fn difference(minuend: &Frame, subtrahend: &Frame) -> Result<Self> {
        check_same_shape(minuend, subtrahend)?;

        let values = minuend
            .samples()
            .iter()
            .zip(subtrahend.samples())
            .map(|(a, b)| *a as i16 - *b as i16)
            .collect();

        Ok(Self {
            resolution: minuend.resolution,
            channels: minuend.channels,
            values,
        })
    }

    pub fn values(&self) -> &[i16] {
        &self.values
    }

    pub fn is_zero(&self) -> bool {
        self.values.iter().all(|value| *value == 0)
    }

    pub fn clip_and_offset(&self, clip: u8) -> Frame {
        let clip = clip as i16;
        let samples = self
            .values
            .iter()
            .map(|value| ((*value).clamp(-clip, clip) + clip) as u8)
            .collect();

        Frame::from_parts(self.resolution, self.channels, samples)
    }

    pub fn from_offset_frame(payload: &Frame, clip: u8) -> Self {
        let values = payload
            .samples()
            .iter()
            .map(|sample| *sample as i16 - clip as i16)
            .collect();

        Self {
            resolution: payload.resolution,
            channels: payload.channels,
            values,
        }
    }
}

pub fn add_residual(base: &Frame, residual: &Residual) -> Result<Frame> {
    combine(base, residual, |sample, value| sample + value)
}

pub fn subtract_residual(base: &Frame, residual: &Residual) -> Result<Frame> {
    combine(base, residual, |sample, value| sample - value)
}

fn combine(base: &Frame, residual: &Residual, op: fn(i16, i16) -> i16) -> Result<Frame> {
    if base.resolution != residual.resolution || base.channels != residual.channels {
        return Err(invalid_argument!(
            "residual shape {:?}x{} does not match frame shape {:?}x{}",
            residual.resolution,
            residual.channels,
            base.resolution,
            base.channels
        ));
    }

    let samples = base
        .samples()
        .iter()
        .zip(residual.values())
        .map(|(sample, value)| op(*sample as i16, *value).clamp(0, u8::MAX as i16) as u8)
        .collect();

    Ok(Frame::from_parts(base.resolution, base.channels, samples))
}

pub(crate) fn check_same_shape(a: &Frame, b: &Frame) -> Result<()> {
    if !a.has_same_shape(b) {
        return Err(invalid_argument!(
            "frame shapes differ: {:?}x{} vs {:?}x{}",
            a.resolution,
            a.channels,
            b.resolution,
            b.channels
        ));
    }

    Ok(())
}
