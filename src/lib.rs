//! Procedural bonsai tree generation.
//!
//! A seeded stochastic growth algorithm walks branches across a cell canvas,
//! writing colored glyphs. The canvas renders either as an ANSI truecolor
//! string ([`TextBuffer`]) or as a sequence of PNG frames where each cell is
//! a 7x7 pixel glyph ([`BitmapBuffer`]).

pub mod bonsai;
pub mod buffer;
pub mod colors;
pub mod config;
pub mod error;
pub mod frames;
pub mod glyphs;

pub use bonsai::Bonsai;
pub use buffer::{BitmapBuffer, ScreenBuffer, TextBuffer, WindowType};
pub use colors::ColorType;
pub use config::{BonsaiConfig, BranchType, Counters};
pub use error::{Error, Result};
pub use frames::{DirFrameSink, FrameSink};
