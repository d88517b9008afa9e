//! HDLC style bit stuffing: a `0` goes in after every run of five `1`s, so stuffed data never holds
//! six `1`s in a row and the flag `01111110` can mark unit ends.

use crate::error::{Result, VideoError};

use super::bits::{Bit, Bits};

pub const MAX_ONES_RUN: usize = 5;

pub fn flag() -> Bits {
    let mut flag = Bits::with_capacity(8);
    flag.push_uint(0b0111_1110, 8);

    flag
}

pub fn stuff(bits: &Bits) -> Bits {
    let mut stuffed = Bits::with_capacity(bits.len() + bits.len() / MAX_ONES_RUN);
    let mut ones_run = 0;

    for bit in bits.iter() {
        stuffed.push(bit);

        match bit {
            Bit::One => {
                ones_run += 1;
                if ones_run == MAX_ONES_RUN {
                    stuffed.push_zero();
                    ones_run = 0;
                }
            }
            Bit::Zero => ones_run = 0,
        }
    }

    stuffed
}

pub fn unstuff(bits: &Bits) -> Result<Bits> {
    let mut unstuffed = Bits::with_capacity(bits.len());
    let mut ones_run = 0;
    let mut iter = bits.iter();

    while let Some(bit) = iter.next() {
        unstuffed.push(bit);

        match bit {
            Bit::One => {
                ones_run += 1;
                if ones_run == MAX_ONES_RUN {
                    match iter.next() {
                        Some(Bit::Zero) | None => ones_run = 0,
                        Some(Bit::One) => {
                            return Err(VideoError::Payload(format!(
                                "more than {MAX_ONES_RUN} consecutive ones in stuffed data"
                            )));
                        }
                    }
                }
            }
            Bit::Zero => ones_run = 0,
        }
    }

    Ok(unstuffed)
}
