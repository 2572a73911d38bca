//! Text drawing passes: the dialogue box, plain blocks, and plate runs.

use crate::foundation::error::VignetteResult;
use crate::foundation::raster::{RasterBuf, Rgba8};
use crate::render::backend::{FontRef, GlyphSource, TextEngine};
use crate::scene::model::{AlignX, AlignY, PlateRun, PlateStyle, StyleConfig};
use crate::scene::region::PixelRect;
use crate::text::brackets::find_bracket_spans;
use crate::text::distribute::{Line, distribute};
use crate::text::segment::{EmojiRange, TextSpan, build_segments};
use crate::text::wrap;

/// Emoji are drawn at this fraction of the line height, vertically centered
/// on the line.
const EMOJI_LINE_FRACTION: f32 = 0.9;

/// Extra spacing between plain block lines, as a fraction of line height.
const BLOCK_LINE_SPACING: f32 = 0.15;

/// A fitted rich-text layout ready to draw.
#[derive(Clone, Debug)]
pub struct RichTextLayout {
    /// Chosen font size in pixels.
    pub size_px: u32,
    /// Line height at the chosen size.
    pub line_height: u32,
    /// Total vertical slots, wrapped empty lines included.
    pub slots: usize,
    /// Non-empty lines with their clipped spans.
    pub lines: Vec<Line>,
    /// True when even the minimum font size overflowed the height budget.
    pub overflow: bool,
}

/// Segment `text`, pick the largest fitting font size for `region`, and
/// split the spans across the wrapped lines.
///
/// This is the full dialogue layout path: bracket matching, emoji-aware
/// segmentation, greedy wrapping under the binary-search size fitter, and
/// span distribution. Returned spans are byte ranges of `text`.
#[tracing::instrument(skip_all, fields(text_len = text.len()))]
pub fn segment_and_layout(
    engine: &dyn TextEngine,
    text: &str,
    emoji: &[EmojiRange],
    style: &StyleConfig,
    region: PixelRect,
) -> VignetteResult<RichTextLayout> {
    let brackets = find_bracket_spans(text);
    let mut spans =
        build_segments(text, &brackets, emoji, style.text_color, style.bracket_color);
    let fit = wrap::fit_block(
        engine,
        &style.font_family,
        text,
        region.w,
        region.h,
        style.min_font_size,
        style.font_size,
    )?;
    let lines = distribute(&mut spans, &fit.lines);
    tracing::debug!(size = fit.size_px, slots = fit.lines.len(), overflow = fit.overflow, "dialogue fitted");
    Ok(RichTextLayout {
        size_px: fit.size_px,
        line_height: fit.line_height,
        slots: fit.lines.len(),
        lines,
        overflow: fit.overflow,
    })
}

/// Draw dialogue text into `region` on `canvas`: shadow pass first, then
/// styled spans, with emoji art vertically centered on each line.
pub fn draw_rich_text(
    canvas: &mut RasterBuf,
    engine: &dyn TextEngine,
    glyphs: &dyn GlyphSource,
    text: &str,
    emoji: &[EmojiRange],
    style: &StyleConfig,
    region: PixelRect,
) -> VignetteResult<()> {
    let layout = segment_and_layout(engine, text, emoji, style, region)?;
    let font = FontRef::new(&style.font_family, layout.size_px);
    let emoji_size = (layout.line_height as f32 * EMOJI_LINE_FRACTION) as u32;

    // Vertical block placement counts every slot, including lines that
    // wrapped to empty.
    let block_height = layout.slots as i64 * i64::from(layout.line_height);
    let base_y = match style.text_valign {
        AlignY::Top => i64::from(region.y),
        AlignY::Middle => i64::from(region.y) + (i64::from(region.h) - block_height) / 2,
        AlignY::Bottom => i64::from(region.y) + i64::from(region.h) - block_height,
    };

    for line in &layout.lines {
        let y = (base_y + line.slot as i64 * i64::from(layout.line_height)) as i32;
        let width = line_width(engine, glyphs, &font, text, &line.spans, emoji_size)?;
        let mut x = match style.text_align {
            AlignX::Left => i64::from(region.x),
            AlignX::Center => i64::from(region.x) + (i64::from(region.w) - i64::from(width)) / 2,
            AlignX::Right => i64::from(region.x) + i64::from(region.w) - i64::from(width),
        } as i32;

        for span in &line.spans {
            let run = &text[span.start..span.end];
            if run.is_empty() {
                continue;
            }
            if span.is_emoji {
                x += draw_emoji(
                    canvas,
                    engine,
                    glyphs,
                    &font,
                    run,
                    (x, y),
                    layout.line_height,
                    emoji_size,
                    span.color,
                )?;
            } else {
                if style.shadow_offset != (0, 0) {
                    let shadow = engine.rasterize(&font, run, style.shadow_color)?;
                    canvas.blit_over(&shadow, x + style.shadow_offset.0, y + style.shadow_offset.1);
                }
                let raster = engine.rasterize(&font, run, span.color)?;
                canvas.blit_over(&raster, x, y);
                x += raster.width() as i32;
            }
        }
    }
    Ok(())
}

/// Pixel width of one line, mirroring the draw pass: text spans by
/// measurement, emoji by their art width, missing art by the text fallback.
fn line_width(
    engine: &dyn TextEngine,
    glyphs: &dyn GlyphSource,
    font: &FontRef,
    text: &str,
    spans: &[TextSpan],
    emoji_size: u32,
) -> VignetteResult<u32> {
    let mut width = 0u32;
    for span in spans {
        let run = &text[span.start..span.end];
        let advance = if span.is_emoji {
            match glyphs.glyph_lookup(run, emoji_size) {
                Some(glyph) => glyph.width(),
                None => engine.measure(font, run, u32::MAX)?.width_px,
            }
        } else {
            engine.measure(font, run, u32::MAX)?.width_px
        };
        width = width.saturating_add(advance);
    }
    Ok(width)
}

/// Draw one emoji span, returning the horizontal advance.
#[allow(clippy::too_many_arguments)]
fn draw_emoji(
    canvas: &mut RasterBuf,
    engine: &dyn TextEngine,
    glyphs: &dyn GlyphSource,
    font: &FontRef,
    run: &str,
    (x, y): (i32, i32),
    line_height: u32,
    emoji_size: u32,
    fallback_color: Rgba8,
) -> VignetteResult<i32> {
    if let Some(glyph) = glyphs.glyph_lookup(run, emoji_size) {
        let top = y + (line_height as i32 - emoji_size as i32) / 2;
        canvas.blit_over(glyph, x, top);
        Ok(glyph.width() as i32)
    } else {
        // No art for this sequence: draw the raw bytes as text instead.
        tracing::warn!(emoji = run, "emoji art missing, rasterizing raw text");
        let raster = engine.rasterize(font, run, fallback_color)?;
        canvas.blit_over(&raster, x, y);
        Ok(raster.width() as i32)
    }
}

/// Render a plain wrapped text block into its own raster.
///
/// Lines are spaced at 115% of the line height. A `max_width` of zero draws
/// one unwrapped line at its natural width; otherwise the block is exactly
/// `max_width` wide and overlong lines clip.
pub fn draw_plain_block(
    engine: &dyn TextEngine,
    font: &FontRef,
    text: &str,
    color: Rgba8,
    shadow: Option<(Rgba8, (i32, i32))>,
    max_width: u32,
) -> VignetteResult<RasterBuf> {
    let wrap_width = if max_width == 0 { u32::MAX } else { max_width };
    let lines = wrap::break_lines(engine, font, text, wrap_width)?;
    let line_height = engine.line_height(font)?;
    let spacing = (line_height as f32 * BLOCK_LINE_SPACING) as u32;

    let mut width = max_width;
    if width == 0 {
        for &(start, end) in &lines {
            let run = engine.measure(font, &text[start..end], u32::MAX)?;
            width = width.max(run.width_px);
        }
    }
    let count = lines.len() as u32;
    let height = count * line_height + count.saturating_sub(1) * spacing;
    let mut block = RasterBuf::new(width, height);

    for (i, &(start, end)) in lines.iter().enumerate() {
        let run = &text[start..end];
        let y = (i as u32 * (line_height + spacing)) as i32;
        if let Some((shadow_color, (dx, dy))) = shadow {
            let raster = engine.rasterize(font, run, shadow_color)?;
            block.blit_over(&raster, dx, y + dy);
        }
        let raster = engine.rasterize(font, run, color)?;
        block.blit_over(&raster, 0, y);
    }
    Ok(block)
}

/// Draw styled text runs onto a name plate along a shared baseline.
///
/// Runs sit left to right starting at `center_x - max_run_size / 2`, each
/// bottom-aligned to the baseline at `plate_height * baseline`, with a
/// small dark drop shadow. A run the engine cannot render is skipped, not
/// fatal.
pub fn draw_plate_runs(
    plate: &mut RasterBuf,
    engine: &dyn TextEngine,
    family: &str,
    runs: &[PlateRun],
    style: &PlateStyle,
) -> VignetteResult<()> {
    if runs.is_empty() {
        return Ok(());
    }
    let max_size = runs.iter().map(|run| run.size_px).max().unwrap_or(0);
    let baseline_y = (plate.height() as f32 * style.baseline) as i32;
    let mut x = style.center_x - max_size as i32 / 2;

    for run in runs {
        if run.text.is_empty() {
            continue;
        }
        if let Err(err) = draw_plate_run(plate, engine, family, run, style, baseline_y, &mut x) {
            tracing::warn!(text = run.text.as_str(), %err, "skipping plate run");
        }
    }
    Ok(())
}

fn draw_plate_run(
    plate: &mut RasterBuf,
    engine: &dyn TextEngine,
    family: &str,
    run: &PlateRun,
    style: &PlateStyle,
    baseline_y: i32,
    x: &mut i32,
) -> VignetteResult<()> {
    let font = FontRef::new(family, run.size_px);
    let top = baseline_y - engine.line_height(&font)? as i32;
    let shadow = engine.rasterize(&font, &run.text, Rgba8::BLACK)?;
    plate.blit_over(&shadow, *x + style.shadow_px, top + style.shadow_px);
    let raster = engine.rasterize(&font, &run.text, run.color)?;
    plate.blit_over(&raster, *x, top);
    *x += engine.measure(&font, &run.text, u32::MAX)?.width_px as i32;
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/text.rs"]
mod tests;
