use std::path::Path;

use crate::{
    binary::byte_reader::ByteReader,
    error::{Result, VideoError},
    image::{Frame, Resolution},
};

macro_rules! ppm_read_bytes {
    ($read_value:expr, $msg:expr) => {
        match $read_value {
            Some(value) => value,
            None => {
                return Err(VideoError::Ppm(format!(
                    "PPM stream ended unexpectedly: {}",
                    $msg
                )));
            }
        }
    };
}

const PPM_SIGNATURE: &[u8] = b"P6";
const PGM_SIGNATURE: &[u8] = b"P5";
const MAX_SUPPORTED_MAXVAL: u32 = 255;

pub fn decode_ppm(bytes: &[u8]) -> Result<Frame> {
    let mut reader = ByteReader::new(bytes);
    let signature = ppm_read_bytes!(reader.read_ppm_symbol(), "expected magic number");

    let channels = match signature {
        PPM_SIGNATURE => 3,
        PGM_SIGNATURE => 1,
        _ => {
            return Err(VideoError::Ppm(
                "file does not look like a binary PPM/PGM file (magic number missing)".to_string(),
            ))
        }
    };

    let width = read_ascii_integer(&mut reader, "width")?;
    let height = read_ascii_integer(&mut reader, "height")?;
    let max_color_value = read_ascii_integer(&mut reader, "maxval")?;

    if width == 0 || height == 0 {
        return Err(VideoError::Ppm(format!(
            "image must not be empty, found {width}x{height}"
        )));
    }

    if max_color_value == 0 || max_color_value > MAX_SUPPORTED_MAXVAL {
        return Err(VideoError::Ppm(format!(
            "unsupported maxval, expected value between 1 and {MAX_SUPPORTED_MAXVAL}, found {max_color_value}"
        )));
    }

    let resolution = Resolution::new(width as usize, height as usize);
    let expected_sample_count = resolution.number_of_pixels() * channels;
    reader.skip_single_whitespace();
    let samples = ppm_read_bytes!(
        reader.read_bytes(expected_sample_count),
        format!(
            "expected {} sample bytes for {}x{} file, only found {}",
            expected_sample_count,
            width,
            height,
            reader.number_of_bytes_left()
        )
    );

    let samples = if max_color_value == MAX_SUPPORTED_MAXVAL {
        samples.to_vec()
    } else {
        samples
            .iter()
            .map(|&sample| rescale(sample, max_color_value))
            .collect()
    };

    Frame::new(resolution, channels, samples)
}

pub fn encode_ppm(frame: &Frame) -> Result<Vec<u8>> {
    let signature = match frame.channels {
        3 => "P6",
        1 => "P5",
        channels => {
            return Err(VideoError::Ppm(format!(
                "cannot store {channels} channel frame as PPM"
            )))
        }
    };

    let header = format!(
        "{signature}\n{} {}\n{MAX_SUPPORTED_MAXVAL}\n",
        frame.width(),
        frame.height()
    );
    let mut bytes = Vec::with_capacity(header.len() + frame.samples().len());
    bytes.extend_from_slice(header.as_bytes());
    bytes.extend_from_slice(frame.samples());

    Ok(bytes)
}

pub fn is_ppm_by_extension(path: impl AsRef<Path>) -> bool {
    path.as_ref()
        .extension()
        .and_then(|extension| extension.to_str())
        .is_some_and(|extension| {
            ["ppm", "pgm"]
                .iter()
                .any(|known| extension.eq_ignore_ascii_case(known))
        })
}

fn rescale(sample: u8, max_color_value: u32) -> u8 {
    let sample = u32::from(sample).min(max_color_value);

    ((sample * 255 + max_color_value / 2) / max_color_value) as u8
}

fn read_ascii_integer(reader: &mut ByteReader, field_name: &str) -> Result<u32> {
    let bytes = ppm_read_bytes!(reader.read_ppm_symbol(), format!("expected {field_name}"));
    let number = std::str::from_utf8(bytes)
        .map_err(|_e| VideoError::Ppm(format!("{field_name} is not valid utf8")))?
        .parse::<u32>()
        .map_err(|_e| VideoError::Ppm(format!("{field_name} is not a valid unsigned integer")))?;

    Ok(number)
}
