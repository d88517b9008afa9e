use mcvideo::{
    binary::Bits,
    config::{PartialVideoConfig, VideoConfig},
    demuxers::VecDemuxer,
    error::VideoError,
    image::{Frame, Resolution},
    muxers::MemoryMuxer,
    player::{Emission, Player},
    VideoDecoder, VideoEncoder,
};

fn block_matching_config() -> VideoConfig {
    PartialVideoConfig::new()
        .resolution(Resolution::new(16, 16))
        .channels(1)
        .apply_keyword_args("mode=block_matching;radius=7")
        .unwrap()
        .build()
        .unwrap()
}

fn frames() -> Vec<Frame> {
    (0..3u8)
        .map(|seed| {
            let samples = (0..256u32)
                .map(|i| (70 + (i * 37 + u32::from(seed) * 3) % 90) as u8)
                .collect();
            Frame::new(Resolution::new(16, 16), 1, samples).unwrap()
        })
        .collect()
}

fn encoded() -> Bits {
    let config = block_matching_config();
    let mut source = VecDemuxer::new(config.resolution, frames());

    VideoEncoder::with_defaults(config)
        .unwrap()
        .encode(&mut source, None)
        .unwrap()
        .bits
}

fn without_last(bits: &Bits, count: usize) -> Bits {
    bits.slice(0..bits.len() - count)
}

#[test]
fn cut_motion_unit_aborts_with_recovered_frame_count() {
    let config = block_matching_config();
    let full = encoded();
    // drop the closing sentinel and half of the last 32 bit motion unit
    let truncated = without_last(&full, 8 + 16);

    for emission in [Emission::Immediate, Emission::Buffered] {
        let mut decoder = VideoDecoder::with_defaults(config, truncated.clone()).unwrap();
        let mut sink = MemoryMuxer::new();

        let error = Player::new(emission)
            .play(&mut decoder, &mut sink)
            .unwrap_err();

        assert_eq!(error.frames_recovered, 2);
        assert!(matches!(
            error.source,
            VideoError::Truncated {
                needed: 32,
                available: 16
            }
        ));
        assert_eq!(sink.frames(), &frames()[..2]);
    }
}

#[test]
fn missing_motion_sentinel_is_truncation() {
    let config = block_matching_config();
    let truncated = without_last(&encoded(), 8);
    let mut decoder = VideoDecoder::with_defaults(config, truncated).unwrap();

    assert!(decoder.next_frame().unwrap().is_some());
    assert!(decoder.next_frame().unwrap().is_some());
    assert!(matches!(
        decoder.next_frame(),
        Err(VideoError::Truncated { .. })
    ));
    // no resuming after a fatal error
    assert!(decoder.next_frame().unwrap().is_none());
    assert_eq!(decoder.frames_decoded(), 2);
}

#[test]
fn unterminated_frame_payload_ends_the_stream() {
    let config = block_matching_config();
    let full = encoded();
    let mut full_decoder = VideoDecoder::with_defaults(config, full.clone()).unwrap();
    while full_decoder.next_frame().unwrap().is_some() {}
    assert_eq!(full_decoder.frames_decoded(), 3);

    // remove the last motion unit, its sentinel and the sentinel closing the last payload
    let truncated = without_last(&full, 8 + 32 + 8);
    let mut decoder = VideoDecoder::with_defaults(config, truncated).unwrap();
    let mut sink = MemoryMuxer::new();

    let report = Player::default().play(&mut decoder, &mut sink).unwrap();

    assert_eq!(report.frames_decoded, 2);
    assert_eq!(sink.frames(), &frames()[..2]);
}

#[test]
fn corrupt_payload_is_fatal() {
    let config = PartialVideoConfig::new()
        .resolution(Resolution::new(4, 4))
        .channels(1)
        .build()
        .unwrap();
    let stream: Bits = "1010_0111_1110".parse().unwrap();
    let mut decoder = VideoDecoder::with_defaults(config, stream).unwrap();
    let mut sink = MemoryMuxer::new();

    let error = Player::default().play(&mut decoder, &mut sink).unwrap_err();

    assert_eq!(error.frames_recovered, 0);
    assert!(matches!(error.source, VideoError::Payload(_)));
}
