pub mod bit_reader;
pub mod bits;
pub mod byte_reader;
pub mod stuffing;

pub use bit_reader::BitReader;
pub use bits::{Bit, Bits};
