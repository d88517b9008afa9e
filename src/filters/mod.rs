use crate::{
    error::Result,
    image::{Frame, Resolution},
    stream::FrameSource,
};

pub mod grayscale;

pub use grayscale::GrayScaleFilter;

pub trait Filter {
    fn filter_frame(&self, frame: Frame) -> Result<Frame>;
}

pub struct FilteredSource<S, F> {
    source: S,
    filter: F,
}

impl<S: FrameSource, F: Filter> FilteredSource<S, F> {
    pub fn new(source: S, filter: F) -> Self {
        Self { source, filter }
    }
}

impl<S: FrameSource, F: Filter> FrameSource for FilteredSource<S, F> {
    fn get_next_frame(&mut self) -> Result<Option<Frame>> {
        self.source
            .get_next_frame()?
            .map(|frame| self.filter.filter_frame(frame))
            .transpose()
    }

    fn get_resolution(&self) -> Resolution {
        self.source.get_resolution()
    }
}
