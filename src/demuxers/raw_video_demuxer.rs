use std::{
    fs::File,
    io::{BufReader, Read},
    path::Path,
};

use crate::{
    error::Result,
    image::{Frame, Resolution},
    invalid_argument,
    stream::FrameSource,
};

pub struct RawVideoDemuxer {
    reader: BufReader<File>,
    resolution: Resolution,
    channels: usize,
    frames_read: usize,
}

impl RawVideoDemuxer {
    pub fn open(path: impl AsRef<Path>, resolution: Resolution, channels: usize) -> Result<Self> {
        if resolution.number_of_pixels() == 0 || channels == 0 {
            return Err(invalid_argument!(
                "raw video frames must not be empty, got {}x{}x{channels}",
                resolution.width,
                resolution.height
            ));
        }

        Ok(Self {
            reader: BufReader::new(File::open(path)?),
            resolution,
            channels,
            frames_read: 0,
        })
    }

    fn frame_size(&self) -> usize {
        self.resolution.number_of_pixels() * self.channels
    }
}

impl FrameSource for RawVideoDemuxer {
    fn get_next_frame(&mut self) -> Result<Option<Frame>> {
        let frame_size = self.frame_size();
        let mut samples = Vec::with_capacity(frame_size);
        (&mut self.reader)
            .take(frame_size as u64)
            .read_to_end(&mut samples)?;

        match samples.len() {
            0 => Ok(None),
            n if n < frame_size => Err(invalid_argument!(
                "raw video ends with a partial frame: {n} of {frame_size} bytes after {} frames",
                self.frames_read
            )),
            _ => {
                self.frames_read += 1;
                Frame::new(self.resolution, self.channels, samples).map(Some)
            }
        }
    }

    fn get_resolution(&self) -> Resolution {
        self.resolution
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn splits_file_into_frames() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("video.rgb");
        fs::write(&path, (0..24).collect::<Vec<u8>>()).unwrap();

        let mut demuxer = RawVideoDemuxer::open(&path, Resolution::new(2, 2), 3).unwrap();

        assert_eq!(demuxer.get_next_frame().unwrap().unwrap().samples()[0], 0);
        assert_eq!(demuxer.get_next_frame().unwrap().unwrap().samples()[0], 12);
        assert!(demuxer.get_next_frame().unwrap().is_none());
    }

    #[test]
    fn partial_trailing_frame_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("video.gray");
        fs::write(&path, [0u8; 6]).unwrap();

        let mut demuxer = RawVideoDemuxer::open(&path, Resolution::new(2, 2), 1).unwrap();

        assert!(demuxer.get_next_frame().unwrap().is_some());
        assert!(demuxer.get_next_frame().is_err());
    }
}
