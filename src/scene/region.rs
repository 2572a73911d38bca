//! Placement math: anchoring, alignment, scale fitting, and the content
//! region planner.

use crate::foundation::raster::Canvas;
use crate::scene::model::{AlignX, AlignY, Anchor, FillMode, PasteMode, StyleConfig};

/// Integer pixel rectangle. Origins may be negative (clipped at blit time);
/// sizes are unsigned.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PixelRect {
    /// Left edge.
    pub x: i32,
    /// Top edge.
    pub y: i32,
    /// Width in pixels.
    pub w: u32,
    /// Height in pixels.
    pub h: u32,
}

impl PixelRect {
    /// Build a rectangle.
    pub const fn new(x: i32, y: i32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }
}

/// Top-left origin for an item of `item_w` x `item_h` anchored within the
/// canvas, with `offset` applied after anchoring.
pub fn anchored_origin(
    anchor: Anchor,
    offset: (i32, i32),
    bounds: Canvas,
    item_w: u32,
    item_h: u32,
) -> (i32, i32) {
    let x = match anchor.x {
        AlignX::Left => 0,
        AlignX::Center => (i64::from(bounds.width) - i64::from(item_w)) / 2,
        AlignX::Right => i64::from(bounds.width) - i64::from(item_w),
    };
    let y = match anchor.y {
        AlignY::Top => 0,
        AlignY::Middle => (i64::from(bounds.height) - i64::from(item_h)) / 2,
        AlignY::Bottom => i64::from(bounds.height) - i64::from(item_h),
    };
    ((x + i64::from(offset.0)) as i32, (y + i64::from(offset.1)) as i32)
}

/// Top-left origin for an item aligned inside `region`.
pub fn aligned_origin(
    region: PixelRect,
    item_w: u32,
    item_h: u32,
    align: AlignX,
    valign: AlignY,
) -> (i32, i32) {
    let x = match align {
        AlignX::Left => i64::from(region.x),
        AlignX::Center => i64::from(region.x) + (i64::from(region.w) - i64::from(item_w)) / 2,
        AlignX::Right => i64::from(region.x) + i64::from(region.w) - i64::from(item_w),
    };
    let y = match valign {
        AlignY::Top => i64::from(region.y),
        AlignY::Middle => i64::from(region.y) + (i64::from(region.h) - i64::from(item_h)) / 2,
        AlignY::Bottom => i64::from(region.y) + i64::from(region.h) - i64::from(item_h),
    };
    (x as i32, y as i32)
}

/// Target size for scaling a `src_w` x `src_h` raster into a
/// `dst_w` x `dst_h` box under `mode`, preserving aspect ratio.
///
/// The engine never resamples; hosts use this to pre-scale assets. A zero
/// source dimension is returned unchanged.
pub fn fit_rect(src_w: u32, src_h: u32, dst_w: u32, dst_h: u32, mode: FillMode) -> (u32, u32) {
    if src_w == 0 || src_h == 0 {
        return (src_w, src_h);
    }
    let (sw, sh) = (src_w as f32, src_h as f32);
    match mode {
        FillMode::Width => {
            let scale = dst_w as f32 / sw;
            (dst_w, (sh * scale) as u32)
        }
        FillMode::Height => {
            let scale = dst_h as f32 / sh;
            ((sw * scale) as u32, dst_h)
        }
        FillMode::Fit => {
            let scale = (dst_w as f32 / sw).min(dst_h as f32 / sh);
            ((sw * scale) as u32, (sh * scale) as u32)
        }
    }
}

/// Planned placement for one content pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ContentRegions {
    /// Where dialogue text is laid out.
    pub text: PixelRect,
    /// Where the inline paste image is aligned.
    pub image: PixelRect,
}

/// Plan the text and image regions for a content pass.
///
/// With both present and the paste image not allowed its own region
/// ([`PasteMode::Off`]), the text box is split: the image takes the right
/// 70% when the visible text is short (under 20 code points), 50%
/// otherwise. An image alone takes over the whole text box unless the mode
/// pins it to its own region ([`PasteMode::Always`]).
pub fn plan_regions(
    has_text: bool,
    has_image: bool,
    style: &StyleConfig,
    visible_chars: usize,
) -> ContentRegions {
    let mut text = style.text_box;
    let mut image = style.paste_region;

    if has_image && has_text {
        if style.paste_mode == PasteMode::Off {
            let image_ratio = if visible_chars < 20 { 0.7f32 } else { 0.5 };
            let text_w = (style.text_box.w as f32 * (1.0 - image_ratio)) as u32;
            text.w = text_w;
            image = PixelRect::new(
                style.text_box.x + text_w as i32,
                style.text_box.y,
                style.text_box.w - text_w,
                style.text_box.h,
            );
        }
    } else if has_image && style.paste_mode != PasteMode::Always {
        image = style.text_box;
    }

    ContentRegions { text, image }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/region.rs"]
mod tests;
