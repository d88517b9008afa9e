use std::fs;

use mcvideo::{
    cli::{parse_args, run},
    codec::DeflatePayloadCodec,
    config::{CompensationMode, PartialVideoConfig},
    demuxers::{PpmSequenceDemuxer, RawVideoDemuxer, VecDemuxer},
    filters::{Filter, GrayScaleFilter},
    image::{Frame, Resolution},
    muxers::{FrameSink, MemoryMuxer, PpmSequenceMuxer},
    player::Player,
    stream::FrameSource,
    VideoDecoder, VideoEncoder,
};

fn moving_frames(resolution: Resolution, count: usize) -> Vec<Frame> {
    (0..count)
        .map(|k| {
            let mut frame = Frame::filled(resolution, 3, 90);
            for row in 0..resolution.height {
                for col in 0..resolution.width {
                    let x = (col + 2 * k) % resolution.width;
                    frame.set_sample(row, col, 0, (80 + (x * 7 + row * 3) % 60) as u8);
                    frame.set_sample(row, col, 2, (100 + (row * 5) % 40) as u8);
                }
            }
            frame
        })
        .collect()
}

fn args(parts: &[&str]) -> Vec<String> {
    std::iter::once("mcvideo")
        .chain(parts.iter().copied())
        .map(str::to_string)
        .collect()
}

#[test]
fn stream_survives_byte_padding_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("video.mcv");
    let resolution = Resolution::new(24, 16);
    let frames = moving_frames(resolution, 4);
    let config = PartialVideoConfig::new()
        .resolution(resolution)
        .mode(CompensationMode::BlockMatching { search_radius: 4 })
        .build()
        .unwrap();

    let encoded = VideoEncoder::with_defaults(config)
        .unwrap()
        .encode_to_file(&mut VecDemuxer::new(resolution, frames.clone()), None, &path)
        .unwrap();
    assert_eq!(
        fs::metadata(&path).unwrap().len() as usize,
        encoded.bits.len().div_ceil(8)
    );

    let mut decoder =
        VideoDecoder::from_file(config, Box::new(DeflatePayloadCodec::default()), &path).unwrap();
    let mut sink = MemoryMuxer::new();
    let report = Player::default().play(&mut decoder, &mut sink).unwrap();

    assert_eq!(report.frames_decoded, 4);
    assert_eq!(sink.into_frames(), frames);
}

#[test]
fn cli_encodes_a_ppm_folder_and_plays_it_back() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("input");
    let video = dir.path().join("video.mcv");
    let output = dir.path().join("output");
    let resolution = Resolution::new(16, 16);
    let frames = moving_frames(resolution, 3);

    let mut muxer = PpmSequenceMuxer::create(&input).unwrap();
    for frame in &frames {
        muxer.show(frame).unwrap();
    }

    let opts = "mode=frame_difference;clip=100";
    run(parse_args(args(&[
        "encode",
        input.to_str().unwrap(),
        video.to_str().unwrap(),
        "--opts",
        opts,
    ]))
    .unwrap())
    .unwrap();
    run(parse_args(args(&[
        "play",
        video.to_str().unwrap(),
        output.to_str().unwrap(),
        "--size",
        "16x16",
        "--opts",
        opts,
        "--buffered",
    ]))
    .unwrap())
    .unwrap();

    let mut played = PpmSequenceDemuxer::open(&output).unwrap();
    for frame in &frames {
        assert_eq!(played.get_next_frame().unwrap().as_ref(), Some(frame));
    }
    assert!(played.get_next_frame().unwrap().is_none());
}

#[test]
fn cli_grayscale_raw_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("input.rgb");
    let video = dir.path().join("video.mcv");
    let output = dir.path().join("output.gray");
    let resolution = Resolution::new(16, 8);
    let frames = moving_frames(resolution, 2);
    let raw: Vec<u8> = frames
        .iter()
        .flat_map(|frame| frame.samples().to_vec())
        .collect();
    fs::write(&input, raw).unwrap();

    let opts = "mode=block_matching;radius=3";
    run(parse_args(args(&[
        "encode",
        input.to_str().unwrap(),
        video.to_str().unwrap(),
        "--size",
        "16x8",
        "--gray",
        "--opts",
        opts,
    ]))
    .unwrap())
    .unwrap();
    run(parse_args(args(&[
        "play",
        video.to_str().unwrap(),
        output.to_str().unwrap(),
        "--size",
        "16x8",
        "--gray",
        "--opts",
        opts,
    ]))
    .unwrap())
    .unwrap();

    let mut played = RawVideoDemuxer::open(&output, resolution, 1).unwrap();
    for frame in frames {
        let gray = GrayScaleFilter.filter_frame(frame).unwrap();
        assert_eq!(played.get_next_frame().unwrap(), Some(gray));
    }
    assert!(played.get_next_frame().unwrap().is_none());
}

#[test]
fn cli_rejects_raw_input_without_size() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("input.rgb");
    fs::write(&input, [0u8; 12]).unwrap();

    let result = run(parse_args(args(&[
        "encode",
        input.to_str().unwrap(),
        dir.path().join("out.mcv").to_str().unwrap(),
    ]))
    .unwrap());

    assert!(result.is_err());
}
