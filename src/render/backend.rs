//! Collaborator traits for text measurement and glyph art.
//!
//! The engine owns layout and composition but never touches font files or
//! emoji atlases itself: hosts inject a [`TextEngine`] for shaping and a
//! [`GlyphSource`] for emoji rasters. Both are object-safe so orchestrators
//! can hold them behind `dyn`.

use crate::foundation::error::VignetteResult;
use crate::foundation::raster::{RasterBuf, Rgba8};

/// Identity of a sized font face held by the text engine.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FontRef {
    /// Family key as the host registered it.
    pub family: String,
    /// Pixel size.
    pub size_px: u32,
}

impl FontRef {
    /// Build a font reference.
    pub fn new(family: impl Into<String>, size_px: u32) -> Self {
        Self { family: family.into(), size_px }
    }
}

/// Result of a greedy fit measurement.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MeasuredRun {
    /// How many leading code points fit.
    pub chars: usize,
    /// Pixel width of the fitted prefix.
    pub width_px: u32,
}

/// Text measurement and rasterization, implemented by the host.
///
/// Implementations must be deterministic for a given `(font, text)` pair
/// within one pass, and `measure` must be monotonic: at a fixed width a
/// larger size never fits more characters, and at a fixed size a larger
/// width never fits fewer. The adaptive size search relies on both.
pub trait TextEngine {
    /// Greedily measure how many leading code points of `text` fit within
    /// `max_width` pixels. `u32::MAX` means unbounded, in which case the
    /// whole of `text` must fit and `width_px` is its full advance.
    fn measure(&self, font: &FontRef, text: &str, max_width: u32) -> VignetteResult<MeasuredRun>;

    /// Vertical advance between consecutive baselines of `font`.
    fn line_height(&self, font: &FontRef) -> VignetteResult<u32>;

    /// Rasterize `text` into a premultiplied buffer filled with `color`.
    fn rasterize(&self, font: &FontRef, text: &str, color: Rgba8) -> VignetteResult<RasterBuf>;
}

/// Emoji glyph art lookup, implemented by the asset side.
pub trait GlyphSource {
    /// The raster for an emoji sequence, or `None` when no art exists for
    /// it. `size_px` is the size the layout wants; sources holding
    /// pre-scaled art may ignore it.
    fn glyph_lookup(&self, emoji: &str, size_px: u32) -> Option<&RasterBuf>;
}
