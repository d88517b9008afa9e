use std::time::Instant;

use log::{info, warn};

use crate::{
    error::{PlaybackError, VideoError},
    image::Frame,
    muxers::FrameSink,
    stream::FrameSource,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Emission {
    #[default]
    Immediate,
    Buffered,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackReport {
    pub frames_decoded: usize,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Player {
    emission: Emission,
}

impl Player {
    pub fn new(emission: Emission) -> Self {
        Self { emission }
    }

    pub fn play(
        &self,
        source: &mut dyn FrameSource,
        sink: &mut dyn FrameSink,
    ) -> Result<PlaybackReport, PlaybackError> {
        let started = Instant::now();
        let mut shown = 0;
        let mut buffer: Vec<Frame> = Vec::new();

        let outcome = loop {
            match source.get_next_frame() {
                Ok(Some(frame)) => match self.emission {
                    Emission::Immediate => {
                        if let Err(e) = sink.show(&frame) {
                            break Err(e);
                        }
                        shown += 1;
                    }
                    Emission::Buffered => buffer.push(frame),
                },
                Ok(None) => break Ok(()),
                Err(e) => break Err(e),
            }
        };

        for frame in &buffer {
            sink.show(frame).map_err(|source| PlaybackError {
                frames_recovered: shown,
                source,
            })?;
            shown += 1;
        }

        match outcome {
            Ok(()) => {
                sink.finish().map_err(|source| PlaybackError {
                    frames_recovered: shown,
                    source,
                })?;
                info!("played {shown} frames in {:?}", started.elapsed());

                Ok(PlaybackReport {
                    frames_decoded: shown,
                })
            }
            Err(source) => {
                if let Err(e) = sink.finish() {
                    warn!("sink failed to finish after aborted playback: {e}");
                }

                Err(aborted(shown, source))
            }
        }
    }
}

fn aborted(frames_recovered: usize, source: VideoError) -> PlaybackError {
    warn!("playback aborted after {frames_recovered} frames: {source}");

    PlaybackError {
        frames_recovered,
        source,
    }
}
