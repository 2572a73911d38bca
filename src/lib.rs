//! Vignette is a dialogue scene composition engine for visual-novel frames.
//!
//! It turns a scene component list plus dialogue text into pixels: rich-text
//! segmentation with bracket highlighting and inline emoji, adaptive line
//! layout that picks the largest font size fitting the dialogue box, and a
//! replayable static layer cache so unchanged scenery is composed once per
//! scene instead of once per frame.
//!
//! # Pipeline overview
//!
//! 1. **Segment**: dialogue text + emoji ranges -> styled spans
//!    ([`find_bracket_spans`], [`build_segments`])
//! 2. **Fit**: greedy wrapping under a binary-search size fitter
//!    ([`fit_block`])
//! 3. **Distribute**: spans split across the committed lines
//!    ([`distribute`])
//! 4. **Compose**: scene components back to front with static layer
//!    build/replay, then repeatable content passes over the retained base
//!    scene ([`SceneContext`])
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **No IO**: fonts and image decoding stay with the host behind
//!   [`TextEngine`] and [`GlyphSource`]; prepared rasters are front-loaded
//!   in [`SceneAssets`].
//! - **Total layout**: malformed UTF-8, unmatched brackets, and bad emoji
//!   ranges degrade (1-byte fallback, no span, dropped range) instead of
//!   failing; only a missing capability at the minimum font size is an
//!   error.
//! - **Premultiplied RGBA8** end-to-end: every buffer is a [`RasterBuf`].
#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![allow(missing_docs_in_private_items)]

mod foundation;
mod render;
mod scene;
mod text;

pub use foundation::error::{VignetteError, VignetteResult};
pub use foundation::raster::{Canvas, PremulRgba8, RasterBuf, Rgba8};
pub use render::backend::{FontRef, GlyphSource, MeasuredRun, TextEngine};
pub use render::text::{
    RichTextLayout, draw_plain_block, draw_plate_runs, draw_rich_text, segment_and_layout,
};
pub use scene::assets::{SceneAssets, emoji_key};
pub use scene::cache::LayerCache;
pub use scene::compose::SceneContext;
pub use scene::model::{
    AlignX, AlignY, Anchor, ComponentKind, FillMode, PasteMode, PlateRun, PlateStyle,
    SceneComponent, StyleConfig, parse_components,
};
pub use scene::region::{
    ContentRegions, PixelRect, aligned_origin, anchored_origin, fit_rect, plan_regions,
};
pub use text::brackets::{BracketSpan, find_bracket_spans};
pub use text::distribute::{Line, distribute};
pub use text::scan::{chars_to_bytes, count_codepoints, next_codepoint};
pub use text::segment::{EmojiRange, TextSpan, build_segments};
pub use text::wrap::{BlockFit, break_lines, fit_block};
