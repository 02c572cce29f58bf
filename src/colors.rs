/// Fixed palette used for bark, foliage and the pot base.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum ColorType {
    Brown,
    Green,
    BrightGreen,
    Yellow,
    White,
}

impl ColorType {
    /// RGB triple for this palette entry.
    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            ColorType::Brown => (150, 100, 0),
            ColorType::Green => (0, 200, 0),
            ColorType::BrightGreen => (0, 255, 0),
            ColorType::Yellow => (255, 255, 0),
            ColorType::White => (255, 255, 255),
        }
    }
}

/// Wrap `text` in a truecolor foreground escape, resetting to white afterwards
/// (not a full attribute reset).
pub fn colored(text: &str, color: ColorType) -> String {
    let (r, g, b) = color.rgb();
    format!("\x1b[38;2;{};{};{}m{}\x1b[38;2;255;255;255m", r, g, b, text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_format_is_truecolor_with_white_reset() {
        assert_eq!(
            colored("&", ColorType::BrightGreen),
            "\x1b[38;2;0;255;0m&\x1b[38;2;255;255;255m"
        );
    }

    #[test]
    fn palette_values() {
        assert_eq!(ColorType::Brown.rgb(), (150, 100, 0));
        assert_eq!(ColorType::White.rgb(), (255, 255, 255));
    }
}
