use crate::buffer::{Geometry, ScreenBuffer, WindowType};
use crate::colors::{colored, ColorType};
use crate::error::Result;

/// Character canvas backed by one linear cell store. Each cell holds a single
/// glyph, pre-wrapped in its color escape at write time.
pub struct TextBuffer {
    geo: Geometry,
    cells: Vec<String>,
}

impl TextBuffer {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            geo: Geometry::new(width, height),
            cells: vec![" ".to_string(); (width * height) as usize],
        }
    }

    /// Stamp already-resolved store coordinates. Shared with the bitmap
    /// backend, which validates through the same [`Geometry::locate`].
    pub(crate) fn stamp(&mut self, abs_row: i32, start_col: i32, text: &str, style: Option<ColorType>) {
        for (index, ch) in text.chars().enumerate() {
            let cell = (abs_row * self.geo.width + start_col + index as i32) as usize;
            self.cells[cell] = match style {
                Some(color) => colored(&ch.to_string(), color),
                None => ch.to_string(),
            };
        }
    }

    /// Re-stamp the interior row separators and join the store. Calling this
    /// more than once rewrites the same positions harmlessly.
    pub(crate) fn to_string_frame(&mut self) -> String {
        for row in 1..self.geo.height - 1 {
            self.cells[(row * self.geo.width) as usize] = "\n".to_string();
        }
        self.cells.concat()
    }
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new(139, 30)
    }
}

impl ScreenBuffer for TextBuffer {
    fn geometry(&self) -> Geometry {
        self.geo
    }

    fn write(&mut self, window: WindowType, row: i32, col: i32, text: &str, style: Option<ColorType>) {
        if let Some((abs_row, start_col)) = self.geo.locate(window, row, col, text.chars().count()) {
            self.stamp(abs_row, start_col, text, style);
        }
    }

    fn export(&mut self) -> Result<String> {
        Ok(self.to_string_frame())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_replaces_interior_row_starts_with_newlines() {
        let mut buf = TextBuffer::new(10, 6);
        let out = buf.export().unwrap();
        assert_eq!(out.chars().count(), 10 * 6);
        assert_eq!(out.chars().filter(|&c| c == '\n').count(), 4);
    }

    #[test]
    fn styled_write_lands_in_store() {
        let mut buf = TextBuffer::new(10, 6);
        buf.write(WindowType::Tree, 0, 3, "|", Some(ColorType::Brown));
        let out = buf.export().unwrap();
        assert!(out.contains("\x1b[38;2;150;100;0m|\x1b[38;2;255;255;255m"));
    }

    #[test]
    fn dropped_write_leaves_store_untouched() {
        let mut buf = TextBuffer::new(10, 6);
        buf.write(WindowType::Tree, 0, 10, "x", None);
        buf.write(WindowType::Tree, 99, 0, "x", None);
        let out = buf.export().unwrap();
        assert!(!out.contains('x'));

        // later writes in the same run still land
        buf.write(WindowType::Tree, 0, 5, "y", None);
        assert!(buf.export().unwrap().contains('y'));
    }

    #[test]
    fn export_twice_is_stable() {
        let mut buf = TextBuffer::new(10, 6);
        buf.write(WindowType::Tree, 1, 4, "&", Some(ColorType::Green));
        let first = buf.export().unwrap();
        let second = buf.export().unwrap();
        assert_eq!(first, second);
    }
}
