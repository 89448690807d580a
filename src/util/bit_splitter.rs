/// A structure for easily splitting a big-endian opcode word
/// into the fields the instruction set is written in terms of:
/// four nibbles, a 12-bit address, an 8-bit constant and so on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitSplitter(u8, u8);

impl BitSplitter {
    pub fn from_u16(value: u16) -> BitSplitter {
        let [high, low] = value.to_be_bytes();
        BitSplitter(high, low)
    }

    /// Left-shift the high byte 8 bits,
    /// then take bitwise or with the low byte.
    pub fn as_u16(&self) -> u16 {
        u16::from_be_bytes([self.0, self.1])
    }

    /// The four nibbles, most significant first.
    pub fn nibbles(&self) -> (u8, u8, u8, u8) {
        (self.0 >> 4, self.0 & 0x0F, self.1 >> 4, self.1 & 0x0F)
    }

    /// `NNN`
    pub fn addr(&self) -> u16 {
        self.as_u16() & 0x0FFF
    }

    /// `NN`
    pub fn byte(&self) -> u8 {
        self.1
    }

    /// `N`
    pub fn low_nibble(&self) -> u8 {
        self.1 & 0x0F
    }

    /// `X`, the second nibble.
    pub fn x(&self) -> u8 {
        self.0 & 0x0F
    }

    /// `Y`, the third nibble.
    pub fn y(&self) -> u8 {
        self.1 >> 4
    }
}
