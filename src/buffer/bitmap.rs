use image::{Rgb, RgbImage};

use crate::buffer::{Geometry, ScreenBuffer, TextBuffer, WindowType};
use crate::colors::ColorType;
use crate::error::Result;
use crate::frames::FrameSink;
use crate::glyphs::{self, BITMAP_SIZE};

/// Pixel canvas where every cell is a 7x7 glyph block. Keeps the same
/// character store as [`TextBuffer`] so exports stay comparable across
/// backends; each export additionally pushes one PNG frame to the sink.
pub struct BitmapBuffer<S: FrameSink> {
    cells: TextBuffer,
    image: RgbImage,
    sink: S,
}

impl<S: FrameSink> BitmapBuffer<S> {
    pub fn new(width: i32, height: i32, sink: S) -> Self {
        Self {
            cells: TextBuffer::new(width, height),
            image: RgbImage::new(width as u32 * BITMAP_SIZE, height as u32 * BITMAP_SIZE),
            sink,
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    fn paint_glyph(&mut self, cell_x: i32, cell_y: i32, ch: char, style: Option<ColorType>) {
        let mask = glyphs::mask(ch);
        let (r, g, b) = style.unwrap_or(ColorType::White).rgb();

        for yy in 0..BITMAP_SIZE {
            for xx in 0..BITMAP_SIZE {
                let px = cell_x as u32 * BITMAP_SIZE + xx;
                let py = cell_y as u32 * BITMAP_SIZE + yy;
                let pixel = if glyphs::bit(&mask, xx, yy) {
                    Rgb([r, g, b])
                } else {
                    Rgb([0, 0, 0])
                };
                self.image.put_pixel(px, py, pixel);
            }
        }
    }
}

impl<S: FrameSink> ScreenBuffer for BitmapBuffer<S> {
    fn geometry(&self) -> Geometry {
        self.cells.geometry()
    }

    fn write(&mut self, window: WindowType, row: i32, col: i32, text: &str, style: Option<ColorType>) {
        let located = self
            .geometry()
            .locate(window, row, col, text.chars().count());

        if let Some((abs_row, start_col)) = located {
            self.cells.stamp(abs_row, start_col, text, style);
            for (index, ch) in text.chars().enumerate() {
                self.paint_glyph(start_col + index as i32, abs_row, ch, style);
            }
        }
    }

    fn export(&mut self) -> Result<String> {
        self.sink.save(&self.image)?;
        Ok(self.cells.to_string_frame())
    }
}
