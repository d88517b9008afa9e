//! Blocks are scanned row major, `dx` before `dy`, every component written as a `bit_width` bit
//! unsigned number, msb first. Packing knows nothing about signs: callers move vectors into the
//! non-negative range by adding the search radius first ([`encode_signed`] does that).

use crate::{
    binary::{BitReader, Bits},
    error::{Result, VideoError},
    invalid_argument,
    motion::{MotionField, MotionVector},
};

pub fn bit_width_for_radius(search_radius: u32) -> u8 {
    let number_of_values = 2 * search_radius as u64 + 1;

    (u64::BITS - (number_of_values - 1).leading_zeros()) as u8
}

pub fn encoded_len(rows: usize, cols: usize, bit_width: u8) -> usize {
    rows * cols * 2 * bit_width as usize
}

pub fn encode_motion_vectors(field: &MotionField, bit_width: u8) -> Result<Bits> {
    if bit_width > 32 {
        return Err(invalid_argument!("bit width {bit_width} is above 32"));
    }

    let max_value: u64 = (1u64 << bit_width) - 1;
    let mut bits = Bits::with_capacity(encoded_len(field.rows, field.cols, bit_width));

    for vector in field.vectors() {
        for component in [vector.dx, vector.dy] {
            if component < 0 || component as u64 > max_value {
                return Err(invalid_argument!(
                    "motion component {component} does not fit in {bit_width} unsigned bits"
                ));
            }

            bits.push_uint(component as u32, bit_width);
        }
    }

    Ok(bits)
}

pub fn decode_motion_vectors(
    bits: &Bits,
    bit_width: u8,
    rows: usize,
    cols: usize,
) -> Result<MotionField> {
    if bit_width > 32 {
        return Err(invalid_argument!("bit width {bit_width} is above 32"));
    }

    let needed = encoded_len(rows, cols, bit_width);
    if bits.len() != needed {
        return Err(VideoError::Truncated {
            needed,
            available: bits.len(),
        });
    }

    let mut reader = BitReader::new(bits);
    let mut vectors = Vec::with_capacity(rows * cols);

    for _ in 0..rows * cols {
        let dx = read_component(&mut reader, bit_width)?;
        let dy = read_component(&mut reader, bit_width)?;
        vectors.push(MotionVector::new(dx, dy));
    }

    MotionField::new(rows, cols, vectors)
}

pub fn encode_signed(field: &MotionField, search_radius: u32) -> Result<Bits> {
    encode_motion_vectors(
        &field.shifted(search_radius as i32),
        bit_width_for_radius(search_radius),
    )
}

pub fn decode_signed(
    bits: &Bits,
    search_radius: u32,
    rows: usize,
    cols: usize,
) -> Result<MotionField> {
    let field = decode_motion_vectors(bits, bit_width_for_radius(search_radius), rows, cols)?;

    Ok(field.shifted(-(search_radius as i32)))
}

fn read_component(reader: &mut BitReader, bit_width: u8) -> Result<i32> {
    let available = reader.number_of_bits_left();
    let value = reader.read_uint(bit_width).ok_or(VideoError::Truncated {
        needed: bit_width as usize,
        available,
    })?;

    i32::try_from(value)
        .map_err(|_e| invalid_argument!("motion component {value} does not fit an i32"))
}
