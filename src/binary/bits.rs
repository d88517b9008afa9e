use std::{fmt::Debug, ops::Range, str::FromStr};

use crate::error::VideoError;

#[derive(Clone, Default, PartialEq, Eq)]
pub struct Bits {
    bits: Vec<Bit>,
}

impl Debug for Bits {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.bits.iter().map(char::from).collect::<String>())
    }
}

impl Bits {
    pub fn new(bits: Vec<Bit>) -> Bits {
        Bits { bits }
    }

    pub fn empty() -> Bits {
        Bits { bits: vec![] }
    }

    pub fn with_capacity(capacity: usize) -> Bits {
        Bits {
            bits: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, bit: Bit) {
        self.bits.push(bit);
    }

    pub fn push_zero(&mut self) {
        self.bits.push(Bit::Zero);
    }

    pub fn push_one(&mut self) {
        self.bits.push(Bit::One);
    }

    /// Appends the low `width` bits of `value`, msb first. Bits above `width` are ignored, callers
    /// check range beforehand.
    pub fn push_uint(&mut self, value: u32, width: u8) {
        for shift in (0..width).rev() {
            if (value >> shift) & 1 == 0 {
                self.push_zero();
            } else {
                self.push_one();
            }
        }
    }

    pub fn push_byte(&mut self, byte: u8) {
        self.push_uint(byte as u32, 8);
    }

    pub fn push_bytes(&mut self, bytes: &[u8]) {
        for byte in bytes {
            self.push_byte(*byte);
        }
    }

    pub fn extend(&mut self, other: &Self) {
        self.bits.extend_from_slice(&other.bits);
    }

    pub fn get(&self, index: usize) -> Option<Bit> {
        self.bits.get(index).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = Bit> + '_ {
        self.bits.iter().copied()
    }

    pub fn slice(&self, range: Range<usize>) -> Bits {
        Bits::new(self.bits[range].to_vec())
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn find(&self, pattern: &Bits, from: usize) -> Option<usize> {
        if pattern.is_empty() || from > self.bits.len() {
            return None;
        }

        self.bits[from..]
            .windows(pattern.len())
            .position(|window| window == pattern.bits.as_slice())
            .map(|position| position + from)
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut result: Vec<u8> = Vec::with_capacity(self.bits.len().div_ceil(8));

        for byte_bits in self.bits.chunks(8) {
            let mut current_byte: u8 = 0;

            for bit in byte_bits {
                current_byte <<= 1;
                if let Bit::One = *bit {
                    current_byte |= 1;
                }
            }

            current_byte <<= 8 - byte_bits.len();
            result.push(current_byte);
        }

        result
    }

    pub fn from_bytes(bytes: &[u8]) -> Bits {
        let mut bits = Bits::with_capacity(bytes.len() * 8);
        bits.push_bytes(bytes);

        bits
    }
}

impl FromStr for Bits {
    type Err = VideoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.chars()
            .filter(|chr| *chr != '_')
            .map(Bit::try_from)
            .collect::<Result<Vec<Bit>, _>>()
            .map(Bits::new)
    }
}

impl From<Bit> for char {
    fn from(bit: Bit) -> Self {
        match bit {
            Bit::Zero => '0',
            Bit::One => '1',
        }
    }
}

impl From<&Bit> for char {
    fn from(bit: &Bit) -> Self {
        char::from(*bit)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Bit {
    Zero,
    One,
}

impl TryFrom<char> for Bit {
    type Error = VideoError;

    fn try_from(chr: char) -> Result<Self, Self::Error> {
        match chr {
            '0' => Ok(Self::Zero),
            '1' => Ok(Self::One),
            _ => Err(VideoError::InvalidArgument(format!(
                "tried converting invalid char {chr:?} to a bit"
            ))),
        }
    }
}
