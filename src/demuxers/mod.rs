pub mod ppm_sequence_demuxer;
pub mod raw_video_demuxer;
pub mod vec_demuxer;

pub use ppm_sequence_demuxer::PpmSequenceDemuxer;
pub use raw_video_demuxer::RawVideoDemuxer;
pub use vec_demuxer::VecDemuxer;
