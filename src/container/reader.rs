use log::warn;

use crate::{
    binary::{BitReader, Bits},
    error::{Result, VideoError},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReaderState {
    AwaitFramePayload,
    AwaitMotionPayload,
    Done,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameUnit {
    pub index: usize,
    pub payload: Bits,
    pub motion: Option<Bits>,
}

/// The grammar is not in the stream: whether a frame is followed by a fixed length motion unit
/// depends only on the frame index and on `motion_payload_bits`.
pub struct FrameReader {
    bits: Bits,
    offset: usize,
    sentinel: Bits,
    motion_payload_bits: Option<usize>,
    state: ReaderState,
    pending: Option<Bits>,
    frames_read: usize,
}

impl FrameReader {
    pub fn new(bits: Bits, sentinel: Bits, motion_payload_bits: Option<usize>) -> Self {
        Self {
            bits,
            offset: 0,
            sentinel,
            motion_payload_bits,
            state: ReaderState::AwaitFramePayload,
            pending: None,
            frames_read: 0,
        }
    }

    pub fn state(&self) -> ReaderState {
        self.state
    }

    pub fn read_unit(&mut self) -> Result<Bits> {
        let mut reader = self.cursor();
        let unit = reader
            .read_until(&self.sentinel)
            .ok_or(VideoError::EndOfStream)?;
        self.offset = reader.offset;

        Ok(unit)
    }

    pub fn next_unit(&mut self) -> Result<Option<FrameUnit>> {
        let result = self.advance();
        if result.is_err() {
            self.state = ReaderState::Done;
        }

        result
    }

    fn advance(&mut self) -> Result<Option<FrameUnit>> {
        loop {
            match self.state {
                ReaderState::Done => return Ok(None),
                ReaderState::AwaitFramePayload => {
                    let payload = match self.read_unit() {
                        Ok(payload) => payload,
                        Err(e) if e.is_end_of_stream() => {
                            self.state = ReaderState::Done;
                            return Ok(None);
                        }
                        Err(e) => return Err(e),
                    };

                    if self.frames_read > 0 && self.motion_payload_bits.is_some() {
                        self.state = ReaderState::AwaitMotionPayload;
                        self.pending = Some(payload);
                        continue;
                    }

                    return Ok(Some(self.emit(payload, None)));
                }
                ReaderState::AwaitMotionPayload => {
                    let motion = self.read_motion_unit()?;
                    let payload = self.pending.take().unwrap_or_default();
                    self.state = ReaderState::AwaitFramePayload;

                    return Ok(Some(self.emit(payload, Some(motion))));
                }
            }
        }
    }

    fn read_motion_unit(&mut self) -> Result<Bits> {
        let needed = self.motion_payload_bits.unwrap_or(0);
        let mut reader = self.cursor();
        let available = reader.number_of_bits_left();
        let motion = reader
            .read_bits(needed)
            .ok_or(VideoError::Truncated { needed, available })?;

        let available = reader.number_of_bits_left();
        let stray = reader
            .read_until(&self.sentinel)
            .ok_or(VideoError::Truncated {
                needed: self.sentinel.len(),
                available,
            })?;
        if !stray.is_empty() {
            warn!(
                "discarding {} bits between motion unit of frame {} and its sentinel",
                stray.len(),
                self.frames_read
            );
        }
        self.offset = reader.offset;

        Ok(motion)
    }

    fn emit(&mut self, payload: Bits, motion: Option<Bits>) -> FrameUnit {
        let unit = FrameUnit {
            index: self.frames_read,
            payload,
            motion,
        };
        self.frames_read += 1;

        unit
    }

    fn cursor(&self) -> BitReader<'_> {
        let mut reader = BitReader::new(&self.bits);
        reader.offset = self.offset;

        reader
    }
}
