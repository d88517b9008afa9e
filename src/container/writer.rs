use crate::{binary::Bits, error::Result, invalid_argument};

pub struct FrameWriter {
    sentinel: Bits,
    motion_payload_bits: Option<usize>,
    output: Bits,
    frames_written: usize,
    motion_units_written: usize,
}

impl FrameWriter {
    pub fn new(sentinel: Bits, motion_payload_bits: Option<usize>) -> Self {
        Self {
            sentinel,
            motion_payload_bits,
            output: Bits::empty(),
            frames_written: 0,
            motion_units_written: 0,
        }
    }

    pub fn frames_written(&self) -> usize {
        self.frames_written
    }

    pub fn motion_units_written(&self) -> usize {
        self.motion_units_written
    }

    pub fn write_frame(&mut self, payload: &Bits, motion: Option<&Bits>) -> Result<()> {
        let expects_motion = self.frames_written > 0 && self.motion_payload_bits.is_some();

        match (expects_motion, motion) {
            (false, Some(_)) => {
                return Err(invalid_argument!(
                    "frame {} cannot carry a motion unit",
                    self.frames_written
                ));
            }
            (true, None) => {
                return Err(invalid_argument!(
                    "frame {} needs a motion unit",
                    self.frames_written
                ));
            }
            (true, Some(motion)) if Some(motion.len()) != self.motion_payload_bits => {
                return Err(invalid_argument!(
                    "motion unit of frame {} is {} bits, expected {:?}",
                    self.frames_written,
                    motion.len(),
                    self.motion_payload_bits
                ));
            }
            _ => {}
        }

        self.output.extend(payload);
        self.output.extend(&self.sentinel);

        if let Some(motion) = motion {
            self.output.extend(motion);
            self.output.extend(&self.sentinel);
            self.motion_units_written += 1;
        }

        self.frames_written += 1;

        Ok(())
    }

    pub fn finish(self) -> Bits {
        self.output
    }
}
