/// A structure for splitting an opcode word into the
/// operand fields used by the instruction set.
///
/// - X: bits 11-8, a register index
/// - Y: bits 7-4, a register index
/// - N: bits 3-0, a 4-bit constant
/// - NN: bits 7-0, an 8-bit constant
/// - NNN: bits 11-0, an address
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitSplitter(u16);

impl BitSplitter {

    pub fn from_u16(value: u16) -> BitSplitter {
        BitSplitter(value)
    }

    /// Combine two bytes as a big-endian word,
    /// the way they are laid out in memory.
    pub fn new(left: u8, right: u8) -> BitSplitter {
        BitSplitter(((left as u16) << 8) | right as u16)
    }

    pub fn as_u16(&self) -> u16 {
        self.0
    }

    /// All four nibbles, most significant first.
    pub fn as_four_u8(&self) -> (u8, u8, u8, u8) {
        (self.nibble(0), self.nibble(1), self.nibble(2), self.nibble(3))
    }

    /// The nibble at position `idx`, counted from the most significant end.
    fn nibble(&self, idx: u8) -> u8 {
        ((self.0 >> (12 - 4 * idx as u16)) & 0xF) as u8
    }

    pub fn x(&self) -> u8 {
        self.nibble(1)
    }

    pub fn y(&self) -> u8 {
        self.nibble(2)
    }

    pub fn n(&self) -> u8 {
        self.nibble(3)
    }

    pub fn nn(&self) -> u8 {
        self.0 as u8
    }

    pub fn nnn(&self) -> u16 {
        self.0 & 0x0FFF
    }
}
