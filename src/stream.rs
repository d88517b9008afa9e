use crate::{
    error::Result,
    image::{Frame, Resolution},
};

pub trait FrameSource {
    fn get_next_frame(&mut self) -> Result<Option<Frame>>;
    fn get_resolution(&self) -> Resolution;
}

impl<S: FrameSource + ?Sized> FrameSource for Box<S> {
    fn get_next_frame(&mut self) -> Result<Option<Frame>> {
        (**self).get_next_frame()
    }

    fn get_resolution(&self) -> Resolution {
        (**self).get_resolution()
    }
}
