//! 7x7 pixel masks for the characters the tree and pot can produce.
//!
//! Each mask is 7 rows of 7 bits, most significant bit leftmost. Unknown
//! characters degrade to the blank mask with a warning so generation keeps
//! going.

use tracing::warn;

/// Pixel edge length of one glyph cell.
pub const BITMAP_SIZE: u32 = 7;

const BLANK: [u8; 7] = [0; 7];

const AMPERSAND: [u8; 7] = [
    0b0100000, 0b0111100, 0b1111111, 0b1111100, 0b0111111, 0b0001101, 0b0000101,
];

const PIPE: [u8; 7] = [
    0b0011000, 0b0001100, 0b0001100, 0b0011000, 0b0011000, 0b0011000, 0b0111110,
];

const SLASH: [u8; 7] = [
    0b0000011, 0b0000110, 0b0001100, 0b0011000, 0b1110000, 0b1100000, 0b1100000,
];

const BACKSLASH: [u8; 7] = [
    0b1100000, 0b1100000, 0b0110000, 0b0011100, 0b0000111, 0b0000111, 0b0000111,
];

const UNDERSCORE: [u8; 7] = [0, 0, 0, 0, 0, 0, 0b1111111];

const TILDE: [u8; 7] = [
    0b0000000, 0b0000000, 0b0100000, 0b1010001, 0b1101001, 0b0000110, 0b0000000,
];

const PAREN_LEFT: [u8; 7] = [
    0b0000111, 0b0011100, 0b0110000, 0b0100000, 0b0100000, 0b0011100, 0b0000111,
];

const PAREN_RIGHT: [u8; 7] = [
    0b1110000, 0b0011100, 0b0000110, 0b0000010, 0b0000010, 0b0011100, 0b1110000,
];

const DOT: [u8; 7] = [
    0b0000000, 0b0000000, 0b0001000, 0b0011100, 0b0001000, 0b0000000, 0b0000000,
];

/// Look up the pixel mask for `ch`.
pub fn mask(ch: char) -> [u8; 7] {
    match ch {
        '&' => AMPERSAND,
        '|' => PIPE,
        '/' => SLASH,
        '\\' => BACKSLASH,
        '_' => UNDERSCORE,
        '~' => TILDE,
        '(' => PAREN_LEFT,
        ')' => PAREN_RIGHT,
        '.' => DOT,
        ' ' => BLANK,
        _ => {
            warn!(glyph = %ch, "no bitmap for glyph, rendering blank");
            BLANK
        }
    }
}

/// Whether pixel `(x, y)` of the mask is set, `x` running left to right.
pub fn bit(mask: &[u8; 7], x: u32, y: u32) -> bool {
    (mask[y as usize] >> (6 - x)) & 1 == 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn underscore_fills_only_bottom_row() {
        let m = mask('_');
        for y in 0..6 {
            for x in 0..7 {
                assert!(!bit(&m, x, y));
            }
        }
        for x in 0..7 {
            assert!(bit(&m, x, 6));
        }
    }

    #[test]
    fn unknown_glyph_is_blank() {
        assert_eq!(mask('?'), BLANK);
        assert_eq!(mask('z'), BLANK);
    }

    #[test]
    fn leaf_glyph_has_pixels() {
        assert_ne!(mask('&'), BLANK);
    }

    #[test]
    fn pot_art_characters_all_have_masks() {
        for ch in "_./~\\()".chars() {
            assert_ne!(mask(ch), BLANK, "glyph {ch:?} should have a mask");
        }
    }
}
