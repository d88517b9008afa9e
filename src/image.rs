use crate::{error::Result, invalid_argument};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub width: usize,
    pub height: usize,
}

impl Resolution {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    pub fn number_of_pixels(&self) -> usize {
        self.width * self.height
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub resolution: Resolution,
    pub channels: usize,
    samples: Vec<u8>,
}

impl Frame {
    pub fn new(resolution: Resolution, channels: usize, samples: Vec<u8>) -> Result<Self> {
        let expected = resolution.number_of_pixels() * channels;
        if samples.len() != expected {
            return Err(invalid_argument!(
                "tried building {}x{}x{} frame, but got {} samples",
                resolution.width,
                resolution.height,
                channels,
                samples.len()
            ));
        }

        Ok(Self {
            resolution,
            channels,
            samples,
        })
    }

    pub fn filled(resolution: Resolution, channels: usize, value: u8) -> Self {
        Self {
            resolution,
            channels,
            samples: vec![value; resolution.number_of_pixels() * channels],
        }
    }

    pub(crate) fn from_parts(resolution: Resolution, channels: usize, samples: Vec<u8>) -> Self {
        debug_assert_eq!(samples.len(), resolution.number_of_pixels() * channels);

        Self {
            resolution,
            channels,
            samples,
        }
    }

    pub fn width(&self) -> usize {
        self.resolution.width
    }

    pub fn height(&self) -> usize {
        self.resolution.height
    }

    pub fn index(&self, row: usize, col: usize, channel: usize) -> usize {
        (row * self.resolution.width + col) * self.channels + channel
    }

    pub fn sample(&self, row: usize, col: usize, channel: usize) -> u8 {
        self.samples[self.index(row, col, channel)]
    }

    pub fn set_sample(&mut self, row: usize, col: usize, channel: usize, value: u8) {
        let index = self.index(row, col, channel);
        self.samples[index] = value;
    }

    pub fn samples(&self) -> &[u8] {
        &self.samples
    }

    pub fn samples_mut(&mut self) -> &mut [u8] {
        &mut self.samples
    }

    pub fn has_same_shape(&self, other: &Frame) -> bool {
        self.resolution == other.resolution && self.channels == other.channels
    }
}
