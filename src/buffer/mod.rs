//! Cell-buffer abstraction shared by the text and bitmap backends.
//!
//! Both backends address cells through the same window-relative coordinate
//! system: the `Base` window is the bottom four rows (the pot), the `Tree`
//! window is everything above it. Writes that would leave the backing store
//! are logged and dropped whole so generation keeps going when randomness
//! walks a branch off-canvas.

mod bitmap;
mod text;

pub use bitmap::BitmapBuffer;
pub use text::TextBuffer;

use tracing::warn;

use crate::colors::ColorType;
use crate::error::Result;

/// Rows reserved for the pot at the bottom of the canvas.
pub const BASE_HEIGHT: i32 = 4;

/// Named vertical region of the canvas.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum WindowType {
    Tree,
    Base,
}

/// Canvas dimensions plus the window-to-store coordinate mapping.
#[derive(Clone, Copy, Debug)]
pub struct Geometry {
    pub width: i32,
    pub height: i32,
}

impl Geometry {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Vertical offset of a window's band within the store.
    pub fn window_offset(&self, window: WindowType) -> i32 {
        match window {
            WindowType::Tree => 0,
            WindowType::Base => self.max_height(WindowType::Tree),
        }
    }

    /// Row count of a window's band.
    pub fn max_height(&self, window: WindowType) -> i32 {
        match window {
            WindowType::Base => BASE_HEIGHT,
            WindowType::Tree => self.height - BASE_HEIGHT,
        }
    }

    /// Resolve a window-relative write to `(absolute row, start column)`,
    /// centering `Base` writes horizontally. Returns `None` (after logging)
    /// when any part of the text would land outside the store.
    pub fn locate(&self, window: WindowType, row: i32, col: i32, len: usize) -> Option<(i32, i32)> {
        let len = len as i32;

        let start_col = match window {
            WindowType::Base => col + (self.width - len) / 2,
            WindowType::Tree => col,
        };

        if row < 0 || row >= self.max_height(window) {
            warn!(row, window = ?window, "row outside window band, write dropped");
            return None;
        }
        if start_col < 0 || start_col + len > self.width {
            warn!(
                col = start_col,
                len,
                width = self.width,
                "column range exceeds screen width, write dropped"
            );
            return None;
        }

        Some((self.window_offset(window) + row, start_col))
    }
}

/// Common contract of the text and bitmap canvases.
pub trait ScreenBuffer {
    fn geometry(&self) -> Geometry;

    /// Write `text` at a window-relative position, stamped with `style`.
    /// Out-of-bounds writes are dropped whole.
    fn write(&mut self, window: WindowType, row: i32, col: i32, text: &str, style: Option<ColorType>);

    /// Linearize the canvas into one string. The bitmap backend additionally
    /// emits one PNG frame per call.
    fn export(&mut self) -> Result<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_band_sits_below_tree_band() {
        let geo = Geometry::new(139, 30);
        assert_eq!(geo.max_height(WindowType::Tree), 26);
        assert_eq!(geo.max_height(WindowType::Base), 4);
        assert_eq!(geo.window_offset(WindowType::Tree), 0);
        assert_eq!(geo.window_offset(WindowType::Base), 26);
        assert_eq!(
            geo.max_height(WindowType::Tree) + geo.max_height(WindowType::Base),
            geo.height
        );
    }

    #[test]
    fn base_writes_are_centered() {
        let geo = Geometry::new(100, 30);
        let (row, col) = geo.locate(WindowType::Base, 0, 0, 10).unwrap();
        assert_eq!(row, 26);
        assert_eq!(col, 45);
    }

    #[test]
    fn out_of_range_writes_resolve_to_none() {
        let geo = Geometry::new(100, 30);
        assert!(geo.locate(WindowType::Tree, -1, 0, 1).is_none());
        assert!(geo.locate(WindowType::Tree, 26, 0, 1).is_none());
        assert!(geo.locate(WindowType::Tree, 0, 100, 1).is_none());
        assert!(geo.locate(WindowType::Tree, 0, -1, 1).is_none());
        assert!(geo.locate(WindowType::Tree, 0, 99, 2).is_none());
    }

    #[test]
    fn write_ending_at_last_column_is_kept() {
        let geo = Geometry::new(100, 30);
        assert_eq!(geo.locate(WindowType::Tree, 0, 99, 1), Some((0, 99)));
    }
}
