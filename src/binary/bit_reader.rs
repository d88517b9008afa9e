use super::bits::Bits;

pub struct BitReader<'a> {
    bits: &'a Bits,
    pub offset: usize,
}

impl<'a> BitReader<'a> {
    pub fn new(bits: &'a Bits) -> Self {
        Self { bits, offset: 0 }
    }

    pub fn is_finished(&self) -> bool {
        self.number_of_bits_left() == 0
    }

    pub fn number_of_bits_left(&self) -> usize {
        self.bits.len().saturating_sub(self.offset)
    }

    pub fn read_bits(&mut self, size: usize) -> Option<Bits> {
        if size > self.number_of_bits_left() {
            return None;
        }

        let result = self.bits.slice(self.offset..self.offset + size);
        self.offset += size;

        Some(result)
    }

    pub fn read_uint(&mut self, width: u8) -> Option<u32> {
        if width as usize > self.number_of_bits_left() {
            return None;
        }

        let mut value: u32 = 0;
        for index in self.offset..self.offset + width as usize {
            value <<= 1;
            if let Some(super::bits::Bit::One) = self.bits.get(index) {
                value |= 1;
            }
        }
        self.offset += width as usize;

        Some(value)
    }

    pub fn read_until(&mut self, delimiter: &Bits) -> Option<Bits> {
        let start_index = self.offset;
        let delimiter_index = self.bits.find(delimiter, start_index)?;
        self.offset = delimiter_index + delimiter.len();

        Some(self.bits.slice(start_index..delimiter_index))
    }
}
