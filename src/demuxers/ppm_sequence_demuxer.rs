use std::{
    collections::VecDeque,
    fs,
    path::{Path, PathBuf},
};

use log::debug;

use crate::{
    error::{Result, VideoError},
    image::{Frame, Resolution},
    invalid_argument,
    ppm::{decode_ppm, is_ppm_by_extension},
    stream::FrameSource,
};

pub struct PpmSequenceDemuxer {
    paths: VecDeque<PathBuf>,
    first: Option<Frame>,
    resolution: Resolution,
    channels: usize,
}

impl PpmSequenceDemuxer {
    pub fn open(directory: impl AsRef<Path>) -> Result<Self> {
        let directory = directory.as_ref();
        let mut paths = fs::read_dir(directory)?
            .map(|entry| entry.map(|entry| entry.path()))
            .collect::<std::io::Result<Vec<_>>>()?;
        paths.retain(|path| path.is_file() && is_ppm_by_extension(path));
        paths.sort();

        let mut paths = VecDeque::from(paths);
        let Some(first_path) = paths.pop_front() else {
            return Err(invalid_argument!(
                "no .ppm or .pgm images found in {}",
                directory.display()
            ));
        };
        let first = read_frame(&first_path)?;
        debug!(
            "found {} images of {}x{} in {}",
            paths.len() + 1,
            first.width(),
            first.height(),
            directory.display()
        );

        Ok(Self {
            paths,
            resolution: first.resolution,
            channels: first.channels,
            first: Some(first),
        })
    }

    pub fn channels(&self) -> usize {
        self.channels
    }
}

impl FrameSource for PpmSequenceDemuxer {
    fn get_next_frame(&mut self) -> Result<Option<Frame>> {
        if let Some(first) = self.first.take() {
            return Ok(Some(first));
        }

        let Some(path) = self.paths.pop_front() else {
            return Ok(None);
        };
        let frame = read_frame(&path)?;
        if frame.resolution != self.resolution || frame.channels != self.channels {
            return Err(VideoError::Ppm(format!(
                "{} is {}x{}x{}, expected {}x{}x{}",
                path.display(),
                frame.width(),
                frame.height(),
                frame.channels,
                self.resolution.width,
                self.resolution.height,
                self.channels
            )));
        }

        Ok(Some(frame))
    }

    fn get_resolution(&self) -> Resolution {
        self.resolution
    }
}

fn read_frame(path: &Path) -> Result<Frame> {
    decode_ppm(&fs::read(path)?).map_err(|e| match e {
        VideoError::Ppm(message) => VideoError::Ppm(format!("{}: {message}", path.display())),
        e => e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ppm::encode_ppm;

    fn write(dir: &Path, name: &str, frame: &Frame) {
        fs::write(dir.join(name), encode_ppm(frame).unwrap()).unwrap();
    }

    #[test]
    fn reads_images_in_name_order() {
        let dir = tempfile::tempdir().unwrap();
        let resolution = Resolution::new(2, 2);
        write(dir.path(), "b.ppm", &Frame::filled(resolution, 3, 2));
        write(dir.path(), "a.ppm", &Frame::filled(resolution, 3, 1));
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let mut demuxer = PpmSequenceDemuxer::open(dir.path()).unwrap();

        assert_eq!(demuxer.get_resolution(), resolution);
        assert_eq!(demuxer.channels(), 3);
        assert_eq!(demuxer.get_next_frame().unwrap().unwrap().samples()[0], 1);
        assert_eq!(demuxer.get_next_frame().unwrap().unwrap().samples()[0], 2);
        assert!(demuxer.get_next_frame().unwrap().is_none());
    }

    #[test]
    fn rejects_mismatched_images() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "0.ppm", &Frame::filled(Resolution::new(2, 2), 3, 0));
        write(dir.path(), "1.ppm", &Frame::filled(Resolution::new(4, 2), 3, 0));

        let mut demuxer = PpmSequenceDemuxer::open(dir.path()).unwrap();

        assert!(demuxer.get_next_frame().unwrap().is_some());
        assert!(matches!(demuxer.get_next_frame(), Err(VideoError::Ppm(_))));
    }

    #[test]
    fn empty_directory_is_rejected() {
        let dir = tempfile::tempdir().unwrap();

        assert!(matches!(
            PpmSequenceDemuxer::open(dir.path()),
            Err(VideoError::InvalidArgument(_))
        ));
    }
}
