use mcvideo::{
    binary::Bits,
    codec::{motion_vectors::bit_width_for_radius, DeflatePayloadCodec, PayloadCodec},
    config::{CompensationMode, PartialVideoConfig, VideoConfig},
    container::FrameReader,
    demuxers::VecDemuxer,
    image::{Frame, Resolution},
    muxers::MemoryMuxer,
    player::{Emission, Player},
    VideoDecoder, VideoEncoder,
};

fn config(size: usize, channels: usize, clip: u8, mode: CompensationMode) -> VideoConfig {
    PartialVideoConfig::new()
        .resolution(Resolution::new(size, size))
        .channels(channels)
        .clip(clip)
        .mode(mode)
        .build()
        .unwrap()
}

/// Samples within 60..=154, so differences never reach the default clip.
fn textured(size: usize, channels: usize, seed: usize) -> Frame {
    let samples = (0..size * size * channels)
        .map(|i| {
            let pixel = i / channels;
            let (row, col) = (pixel / size, pixel % size);
            (60 + (41 * row + 29 * col + 11 * (i % channels)) % 80 + seed * 5) as u8
        })
        .collect();

    Frame::new(Resolution::new(size, size), channels, samples).unwrap()
}

fn encode(config: VideoConfig, frames: &[Frame]) -> Bits {
    let mut source = VecDemuxer::new(config.resolution, frames.to_vec());

    VideoEncoder::with_defaults(config)
        .unwrap()
        .encode(&mut source, None)
        .unwrap()
        .bits
}

fn decode_all(config: VideoConfig, bits: Bits) -> Vec<Frame> {
    let mut decoder = VideoDecoder::with_defaults(config, bits).unwrap();
    let mut sink = MemoryMuxer::new();

    let report = Player::default().play(&mut decoder, &mut sink).unwrap();
    assert_eq!(report.frames_decoded, sink.frames().len());

    sink.into_frames()
}

#[test]
fn none_mode_reproduces_every_frame() {
    let config = config(12, 3, 100, CompensationMode::None);
    let frames: Vec<Frame> = (0..3).map(|seed| textured(12, 3, seed)).collect();

    assert_eq!(decode_all(config, encode(config, &frames)), frames);
}

#[test]
fn frame_difference_within_clip_is_exact() {
    let config = config(16, 1, 100, CompensationMode::FrameDifference);
    let first = Frame::filled(Resolution::new(16, 16), 1, 60);
    let mut second = textured(16, 1, 0);
    second.set_sample(0, 0, 0, 130);
    let frames = vec![first, second, textured(16, 1, 3)];

    assert_eq!(decode_all(config, encode(config, &frames)), frames);
}

#[test]
fn frame_difference_saturates_by_the_excess_over_clip() {
    let resolution = Resolution::new(16, 16);
    let config = config(16, 1, 100, CompensationMode::FrameDifference);
    let first = Frame::filled(resolution, 1, 50);
    let mut second = first.clone();
    for row in 4..12 {
        for col in 0..8 {
            second.set_sample(row, col, 0, 200);
        }
    }
    let frames = vec![first, second.clone(), second.clone()];

    let decoded = decode_all(config, encode(config, &frames));

    for row in 0..16 {
        for col in 0..16 {
            let inside = (4..12).contains(&row) && col < 8;
            let expected = if inside { 200 - 50 } else { 50 };
            assert_eq!(decoded[1].sample(row, col, 0), expected);
        }
    }
    // the encoder predicted from the saturated reconstruction, so the next frame catches up
    assert_eq!(decoded[2], second);
}

#[test]
fn identical_frames_need_no_motion_and_no_residual() {
    let radius = 7;
    let config = config(16, 1, 100, CompensationMode::BlockMatching { search_radius: radius });
    assert_eq!(bit_width_for_radius(radius), 4);
    assert_eq!((config.block_rows(), config.block_cols()), (2, 2));
    assert_eq!(config.motion_payload_bits(), Some(2 * 2 * 2 * 4));

    let frame = textured(16, 1, 1);
    let frames = vec![frame.clone(), frame];
    let bits = encode(config, &frames);

    let codec = DeflatePayloadCodec::default();
    let mut reader = FrameReader::new(
        bits.clone(),
        codec.sentinel().clone(),
        config.motion_payload_bits(),
    );
    reader.next_unit().unwrap().unwrap();
    let second = reader.next_unit().unwrap().unwrap();
    assert!(reader.next_unit().unwrap().is_none());

    // every vector is (0, 0), stored shifted by the radius
    let zero_field: Bits = "0111".repeat(8).parse().unwrap();
    assert_eq!(second.motion, Some(zero_field));
    let residual = codec
        .decode(&second.payload, config.resolution, config.channels)
        .unwrap();
    assert!(residual.samples().iter().all(|&sample| sample == config.clip));

    assert_eq!(decode_all(config, bits), frames);
}

#[test]
fn block_matching_reproduces_moving_content() {
    let config = config(32, 3, 100, CompensationMode::BlockMatching { search_radius: 3 });
    let frames: Vec<Frame> = (0..4).map(|seed| textured(32, 3, seed)).collect();

    assert_eq!(decode_all(config, encode(config, &frames)), frames);
}

#[test]
fn block_matching_writes_one_motion_unit_per_predicted_frame() {
    let config = config(16, 1, 100, CompensationMode::BlockMatching { search_radius: 7 });
    let frames: Vec<Frame> = (0..5).map(|seed| textured(16, 1, seed)).collect();
    let mut source = VecDemuxer::new(config.resolution, frames);

    let encoded = VideoEncoder::with_defaults(config)
        .unwrap()
        .encode(&mut source, None)
        .unwrap();

    assert_eq!(encoded.frames, 5);
    assert_eq!(encoded.motion_units, 4);

    let codec = DeflatePayloadCodec::default();
    let mut reader = FrameReader::new(encoded.bits, codec.sentinel().clone(), Some(32));
    let mut with_motion = Vec::new();
    while let Some(unit) = reader.next_unit().unwrap() {
        with_motion.push(unit.motion.is_some());
    }
    assert_eq!(with_motion, [false, true, true, true, true]);
}

#[test]
fn every_mode_ends_cleanly_after_the_last_frame() {
    for mode in [
        CompensationMode::None,
        CompensationMode::FrameDifference,
        CompensationMode::BlockMatching { search_radius: 2 },
    ] {
        let config = config(16, 1, 100, mode);
        let frames: Vec<Frame> = (0..3).map(|seed| textured(16, 1, seed)).collect();
        let mut decoder = VideoDecoder::with_defaults(config, encode(config, &frames)).unwrap();

        for _ in 0..3 {
            assert!(decoder.next_frame().unwrap().is_some());
        }
        for _ in 0..3 {
            assert!(decoder.next_frame().unwrap().is_none(), "mode {}", mode.name());
        }
        assert_eq!(decoder.frames_decoded(), 3);
    }
}

#[test]
fn empty_stream_has_no_frames() {
    let config = config(16, 1, 100, CompensationMode::BlockMatching { search_radius: 7 });

    assert!(decode_all(config, Bits::empty()).is_empty());
    assert!(decode_all(config, encode(config, &[])).is_empty());
}

#[test]
fn buffered_playback_emits_the_same_frames() {
    let config = config(16, 1, 100, CompensationMode::FrameDifference);
    let frames: Vec<Frame> = (0..3).map(|seed| textured(16, 1, seed)).collect();
    let bits = encode(config, &frames);

    let mut decoder = VideoDecoder::with_defaults(config, bits).unwrap();
    let mut sink = MemoryMuxer::new();
    Player::new(Emission::Buffered)
        .play(&mut decoder, &mut sink)
        .unwrap();

    assert_eq!(sink.into_frames(), frames);
}

#[test]
fn max_frames_limits_the_encoder() {
    let config = config(16, 1, 100, CompensationMode::None);
    let frames: Vec<Frame> = (0..4).map(|seed| textured(16, 1, seed)).collect();
    let mut source = VecDemuxer::new(config.resolution, frames.clone());

    let encoded = VideoEncoder::with_defaults(config)
        .unwrap()
        .encode(&mut source, Some(2))
        .unwrap();

    assert_eq!(encoded.frames, 2);
    assert_eq!(decode_all(config, encoded.bits), frames[..2].to_vec());
}
