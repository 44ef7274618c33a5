//! The built-in hexadecimal digit sprites.

/// Where the font is copied to, inside the reserved interpreter area.
pub const FONT_START: u16 = 0x050;

/// Each glyph is 8 pixels wide and 5 rows tall.
pub const GLYPH_SIZE: u16 = 5;

pub const FONT: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];

/// Address of the glyph for a hex digit. Only the low nibble of `digit` is used.
pub fn glyph_addr(digit: u8) -> u16 {
    FONT_START + GLYPH_SIZE * (digit & 0xF) as u16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn font_fits_in_reserved_area() {
        assert!(FONT_START as usize + FONT.len() <= 0x200);
        assert_eq!(FONT.len(), 16 * GLYPH_SIZE as usize);
    }

    #[test]
    fn glyphs_are_contiguous() {
        assert_eq!(glyph_addr(0), FONT_START);
        assert_eq!(glyph_addr(1), FONT_START + 5);
        assert_eq!(glyph_addr(0xF), FONT_START + 75);
        assert_eq!(glyph_addr(0x1F), glyph_addr(0xF));
    }
}
