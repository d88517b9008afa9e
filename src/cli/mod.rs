use std::{collections::HashMap, path::Path};

use log::info;
use thiserror::Error;

use crate::{
    codec::{DeflatePayloadCodec, VideoDecoder, VideoEncoder},
    config::{PartialVideoConfig, VideoConfig},
    demuxers::{PpmSequenceDemuxer, RawVideoDemuxer},
    error::{PlaybackError, VideoError},
    filters::{FilteredSource, GrayScaleFilter},
    image::Resolution,
    muxers::{FrameSink, PpmSequenceMuxer, RawVideoMuxer},
    player::{Emission, Player},
    stream::FrameSource,
};

#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ArgumentParseError(String);

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Arguments(#[from] ArgumentParseError),
    #[error(transparent)]
    Video(#[from] VideoError),
    #[error(transparent)]
    Playback(#[from] PlaybackError),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Subcommand {
    Encode,
    Play,
}

#[derive(Debug, PartialEq, Eq)]
pub enum McvideoArguments {
    Help(String),
    Version,
    Command {
        subcommand: Subcommand,
        input_file: String,
        output_file: String,
        keyword_args: HashMap<String, String>,
    },
}

impl McvideoArguments {
    pub fn is_verbose(&self) -> bool {
        match self {
            McvideoArguments::Command { keyword_args, .. } => keyword_args.contains_key("verbose"),
            _ => false,
        }
    }
}

const SWITCHES: [&str; 7] = ["help", "h", "version", "v", "buffered", "gray", "verbose"];

/**
 * mcvideo encode frames/ out.mcv --opts "mode=block_matching;radius=7"
 * mcvideo play out.mcv decoded/ --size 640x480 --opts "mode=block_matching;radius=7"
 */
pub fn parse_args(
    args: impl IntoIterator<Item = String>,
) -> Result<McvideoArguments, ArgumentParseError> {
    let mut args = args.into_iter();
    let mut unprefixed_args: Vec<String> = Vec::new();
    let mut keyword_args: HashMap<String, String> = HashMap::new();

    let _current_exe = args.next();

    while let Some(arg) = args.next() {
        let flag = if let Some(flag) = arg.strip_prefix("--") {
            flag.to_string()
        } else if let Some(flag) = arg.strip_prefix('-').filter(|flag| !flag.is_empty()) {
            flag.to_string()
        } else {
            unprefixed_args.push(arg);
            continue;
        };

        let value = if SWITCHES.contains(&flag.as_str()) {
            String::new()
        } else {
            args.next()
                .ok_or_else(|| ArgumentParseError(format!("--{flag} requires an argument")))?
        };

        keyword_args.insert(flag, value);
    }

    if keyword_args.contains_key("help") || keyword_args.contains_key("h") {
        return Ok(McvideoArguments::Help(
            unprefixed_args.first().cloned().unwrap_or_default(),
        ));
    }

    if keyword_args.contains_key("version") || keyword_args.contains_key("v") {
        return Ok(McvideoArguments::Version);
    }

    if unprefixed_args.is_empty() {
        return Ok(McvideoArguments::Help(String::new()));
    }

    let subcommand = match unprefixed_args.remove(0).as_str() {
        "encode" => Subcommand::Encode,
        "play" => Subcommand::Play,
        "help" => {
            return Ok(McvideoArguments::Help(
                unprefixed_args.first().cloned().unwrap_or_default(),
            ))
        }
        other => return Err(ArgumentParseError(format!("Unknown command {other:?}"))),
    };

    let [input_file, output_file]: [String; 2] = unprefixed_args.try_into().map_err(
        |unprefixed_args: Vec<String>| {
            ArgumentParseError(format!(
                "Expected exactly 2 unprefixed arguments, input and output, found {} instead",
                unprefixed_args.len()
            ))
        },
    )?;

    Ok(McvideoArguments::Command {
        subcommand,
        input_file,
        output_file,
        keyword_args,
    })
}

pub fn run(arguments: McvideoArguments) -> Result<(), CliError> {
    match arguments {
        McvideoArguments::Help(subject) => print_help(&subject),
        McvideoArguments::Version => print_version(),
        McvideoArguments::Command {
            subcommand: Subcommand::Encode,
            input_file,
            output_file,
            keyword_args,
        } => encode(&input_file, &output_file, &keyword_args)?,
        McvideoArguments::Command {
            subcommand: Subcommand::Play,
            input_file,
            output_file,
            keyword_args,
        } => play(&input_file, &output_file, &keyword_args)?,
    }

    Ok(())
}

fn encode(
    input_file: &str,
    output_file: &str,
    keyword_args: &HashMap<String, String>,
) -> Result<(), CliError> {
    let gray = keyword_args.contains_key("gray");
    let size = keyword_args.get("size").map(|size| parse_size(size)).transpose()?;
    let max_frames = keyword_args
        .get("frames")
        .map(|frames| {
            frames
                .parse::<usize>()
                .map_err(|_e| ArgumentParseError(format!("--frames {frames:?} is not a number")))
        })
        .transpose()?;
    let partial = partial_config(keyword_args)?;

    let (source, source_channels): (Box<dyn FrameSource>, usize) =
        if Path::new(input_file).is_dir() {
            let demuxer = PpmSequenceDemuxer::open(input_file)?;
            if size.is_some_and(|size| size != demuxer.get_resolution()) {
                return Err(ArgumentParseError(format!(
                    "--size does not match the images in {input_file}"
                ))
                .into());
            }
            let channels = demuxer.channels();

            (Box::new(demuxer) as Box<dyn FrameSource>, channels)
        } else {
            let size = size.ok_or_else(|| {
                ArgumentParseError("--size is required for raw video input".to_string())
            })?;
            let channels = partial.clone().resolution(size).build()?.channels;

            let demuxer = RawVideoDemuxer::open(input_file, size, channels)?;

            (Box::new(demuxer) as Box<dyn FrameSource>, channels)
        };

    let channels = if gray { 1 } else { source_channels };
    let config = partial
        .resolution(source.get_resolution())
        .channels(channels)
        .build()?;
    let encoder = VideoEncoder::with_defaults(config)?;

    let encoded = if gray {
        let mut source = FilteredSource::new(source, GrayScaleFilter);
        encoder.encode_to_file(&mut source, max_frames, output_file)?
    } else {
        let mut source = source;
        encoder.encode_to_file(source.as_mut(), max_frames, output_file)?
    };

    println!(
        "encoded {} frames into {} bytes ({})",
        encoded.frames,
        encoded.bits.len().div_ceil(8),
        describe(&config)
    );

    Ok(())
}

fn play(
    input_file: &str,
    output_file: &str,
    keyword_args: &HashMap<String, String>,
) -> Result<(), CliError> {
    let size = keyword_args
        .get("size")
        .ok_or_else(|| ArgumentParseError("--size is required to play a video".to_string()))
        .and_then(|size| parse_size(size))?;
    let mut partial = partial_config(keyword_args)?.resolution(size);
    if keyword_args.contains_key("gray") {
        partial = partial.channels(1);
    }
    let config = partial.build()?;
    let emission = if keyword_args.contains_key("buffered") {
        Emission::Buffered
    } else {
        Emission::Immediate
    };

    let mut decoder =
        VideoDecoder::from_file(config, Box::new(DeflatePayloadCodec::default()), input_file)?;
    let mut sink: Box<dyn FrameSink> = if Path::new(output_file).extension().is_some() {
        Box::new(RawVideoMuxer::create(output_file)?)
    } else {
        Box::new(PpmSequenceMuxer::create(output_file)?)
    };
    info!("playing {input_file} ({}) into {output_file}", describe(&config));

    let report = Player::new(emission).play(&mut decoder, sink.as_mut())?;
    println!("decoded {} frames", report.frames_decoded);

    Ok(())
}

fn partial_config(
    keyword_args: &HashMap<String, String>,
) -> Result<PartialVideoConfig, VideoError> {
    match keyword_args.get("opts") {
        Some(opts) => PartialVideoConfig::new().apply_keyword_args(opts),
        None => Ok(PartialVideoConfig::new()),
    }
}

fn parse_size(size: &str) -> Result<Resolution, ArgumentParseError> {
    let error = || ArgumentParseError(format!("--size {size:?} is not of the form WIDTHxHEIGHT"));
    let (width, height) = size.split_once(['x', 'X']).ok_or_else(error)?;

    Ok(Resolution::new(
        width.trim().parse().map_err(|_e| error())?,
        height.trim().parse().map_err(|_e| error())?,
    ))
}

fn describe(config: &VideoConfig) -> String {
    format!(
        "{}x{}x{}, mode {}, clip {}, block {}",
        config.resolution.width,
        config.resolution.height,
        config.channels,
        config.mode.name(),
        config.clip,
        config.block_size
    )
}

fn print_help(subject: &str) {
    match subject {
        "encode" => println!(
            "mcvideo encode <input> <output.mcv> [--size WxH] [--frames N] [--opts OPTIONS] [--gray]\n\n\
             <input> is a directory of .ppm/.pgm images (read in name order) or a raw video file,\n\
             which needs --size. --gray stores a single luma channel."
        ),
        "play" => println!(
            "mcvideo play <input.mcv> <output> --size WxH [--opts OPTIONS] [--buffered] [--gray]\n\n\
             <output> with an extension is written as raw video, otherwise as a directory of\n\
             frame_NNNNN.ppm (or .pgm for one channel) images. The options must be the ones the video was encoded with."
        ),
        _ => println!(
            "mcvideo {}\n\n\
             usage:\n\
             \x20 mcvideo encode <input> <output.mcv> [flags]\n\
             \x20 mcvideo play <input.mcv> <output> --size WxH [flags]\n\
             \x20 mcvideo help <command>\n\n\
             OPTIONS is a list like \"mode=block_matching;clip=100;radius=7;block=8;channels=3\",\n\
             mode is one of none, frame_difference, block_matching.\n\
             --verbose logs every frame.",
            env!("CARGO_PKG_VERSION")
        ),
    }
}

fn print_version() {
    println!("{}", env!("CARGO_PKG_VERSION"));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(line: &str) -> Vec<String> {
        std::iter::once("mcvideo")
            .chain(line.split_whitespace())
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn no_arguments_prints_help() {
        assert_eq!(
            parse_args(args("")).unwrap(),
            McvideoArguments::Help(String::new())
        );
        assert_eq!(
            parse_args(args("help play")).unwrap(),
            McvideoArguments::Help("play".to_string())
        );
        assert_eq!(parse_args(args("-v")).unwrap(), McvideoArguments::Version);
    }

    #[test]
    fn parses_play_command() {
        let parsed =
            parse_args(args("play in.mcv out --size 16x8 --buffered --opts mode=none --verbose"))
                .unwrap();

        assert!(parsed.is_verbose());
        let McvideoArguments::Command {
            subcommand,
            input_file,
            output_file,
            keyword_args,
        } = parsed
        else {
            panic!("expected a command");
        };
        assert_eq!(subcommand, Subcommand::Play);
        assert_eq!((input_file.as_str(), output_file.as_str()), ("in.mcv", "out"));
        assert_eq!(keyword_args["size"], "16x8");
        assert_eq!(keyword_args["opts"], "mode=none");
        assert!(keyword_args.contains_key("buffered"));
    }

    #[test]
    fn rejects_bad_invocations() {
        assert!(parse_args(args("encode only_input")).is_err());
        assert!(parse_args(args("transcode a b")).is_err());
        assert!(parse_args(args("play a b --size")).is_err());
    }

    #[test]
    fn parses_sizes() {
        assert_eq!(parse_size("640x480").unwrap(), Resolution::new(640, 480));
        assert_eq!(parse_size("16X8").unwrap(), Resolution::new(16, 8));
        assert!(parse_size("640").is_err());
        assert!(parse_size("ax8").is_err());
    }
}
