use super::*;
use crate::foundation::error::VignetteError;
use crate::render::backend::MeasuredRun;

const WHITE: [u8; 4] = [255, 255, 255, 255];
const RED: [u8; 4] = [255, 0, 0, 255];
const GREEN: [u8; 4] = [0, 255, 0, 255];
const BLACK: [u8; 4] = [0, 0, 0, 255];
const CLEAR: [u8; 4] = [0, 0, 0, 0];

/// Every code point is `size_px` wide and the line height equals `size_px`,
/// so pixel positions in assertions are easy to derive by hand.
struct BlockEngine;

impl TextEngine for BlockEngine {
    fn measure(&self, font: &FontRef, text: &str, max_width: u32) -> VignetteResult<MeasuredRun> {
        let total = text.chars().count();
        let fit = if max_width == u32::MAX {
            total
        } else {
            ((max_width / font.size_px) as usize).min(total)
        };
        Ok(MeasuredRun { chars: fit, width_px: fit as u32 * font.size_px })
    }

    fn line_height(&self, font: &FontRef) -> VignetteResult<u32> {
        Ok(font.size_px)
    }

    fn rasterize(&self, font: &FontRef, text: &str, color: Rgba8) -> VignetteResult<RasterBuf> {
        let mut buf = RasterBuf::new(text.chars().count() as u32 * font.size_px, font.size_px);
        buf.fill(color);
        Ok(buf)
    }
}

/// Refuses every request, for the degraded paths.
struct FailEngine;

impl TextEngine for FailEngine {
    fn measure(&self, _: &FontRef, _: &str, _: u32) -> VignetteResult<MeasuredRun> {
        Err(VignetteError::layout("no fonts"))
    }

    fn line_height(&self, _: &FontRef) -> VignetteResult<u32> {
        Err(VignetteError::layout("no fonts"))
    }

    fn rasterize(&self, _: &FontRef, _: &str, _: Rgba8) -> VignetteResult<RasterBuf> {
        Err(VignetteError::layout("no fonts"))
    }
}

struct GlyphStub {
    art: RasterBuf,
}

impl GlyphSource for GlyphStub {
    fn glyph_lookup(&self, emoji: &str, _size_px: u32) -> Option<&RasterBuf> {
        (emoji == "😀").then_some(&self.art)
    }
}

struct NoGlyphs;

impl GlyphSource for NoGlyphs {
    fn glyph_lookup(&self, _emoji: &str, _size_px: u32) -> Option<&RasterBuf> {
        None
    }
}

fn solid(width: u32, height: u32, color: Rgba8) -> RasterBuf {
    let mut buf = RasterBuf::new(width, height);
    buf.fill(color);
    buf
}

fn style() -> StyleConfig {
    StyleConfig { font_size: 10, min_font_size: 5, ..StyleConfig::default() }
}

#[test]
fn layout_picks_size_and_distributes_spans() {
    let layout = segment_and_layout(
        &BlockEngine,
        "[hi] ok",
        &[],
        &style(),
        PixelRect::new(0, 0, 70, 10),
    )
    .unwrap();

    assert_eq!(layout.size_px, 10);
    assert_eq!(layout.line_height, 10);
    assert_eq!(layout.slots, 1);
    assert!(!layout.overflow);

    let spans = &layout.lines[0].spans;
    assert_eq!(spans.len(), 2);
    assert_eq!((spans[0].start, spans[0].end), (0, 4));
    assert_eq!(spans[0].color, style().bracket_color);
    assert_eq!((spans[1].start, spans[1].end), (4, 7));
    assert_eq!(spans[1].color, style().text_color);
}

#[test]
fn short_region_drops_to_a_smaller_size() {
    // 7 chars in a 40x10 box: size 10 wraps to two lines (20px, too tall),
    // so the fitter walks down until one line fits. Only size 5 packs all
    // seven chars into the 40px width.
    let layout = segment_and_layout(
        &BlockEngine,
        "abcdefg",
        &[],
        &style(),
        PixelRect::new(0, 0, 40, 10),
    )
    .unwrap();
    assert_eq!(layout.size_px, 5);
    assert_eq!(layout.slots, 1);
    assert!(!layout.overflow);
}

#[test]
fn emoji_is_centered_and_advances_by_glyph_width() {
    let glyphs = GlyphStub { art: solid(9, 9, Rgba8::rgb(0, 255, 0)) };
    let mut canvas = RasterBuf::new(100, 20);
    draw_rich_text(
        &mut canvas,
        &BlockEngine,
        &glyphs,
        "a😀b",
        &[EmojiRange { start: 1, end: 5, glyph: "😀".into() }],
        &style(),
        PixelRect::new(0, 0, 100, 20),
    )
    .unwrap();

    // "a" occupies x 0..10.
    assert_eq!(canvas.pixel(5, 5), WHITE);
    // Glyph art (9x9, centered on the 10px line) occupies x 10..19, y 0..9.
    assert_eq!(canvas.pixel(12, 4), GREEN);
    // Advance is the glyph's native width, so "b" starts at x 19.
    assert_eq!(canvas.pixel(19, 5), WHITE);
    assert_eq!(canvas.pixel(28, 5), WHITE);
    assert_eq!(canvas.pixel(29, 5), CLEAR);
}

#[test]
fn missing_glyph_renders_the_raw_text() {
    let mut canvas = RasterBuf::new(100, 20);
    draw_rich_text(
        &mut canvas,
        &BlockEngine,
        &NoGlyphs,
        "a😀b",
        &[EmojiRange { start: 1, end: 5, glyph: "😀".into() }],
        &style(),
        PixelRect::new(0, 0, 100, 20),
    )
    .unwrap();

    // The emoji bytes rasterize as one ordinary 10px glyph at x 10..20,
    // followed by "b" at x 20..30.
    assert_eq!(canvas.pixel(15, 5), WHITE);
    assert_eq!(canvas.pixel(25, 5), WHITE);
    assert_eq!(canvas.pixel(30, 5), CLEAR);
}

#[test]
fn centered_line_counts_the_emoji_fallback_width() {
    let mut centered = style();
    centered.text_align = AlignX::Center;
    let mut canvas = RasterBuf::new(60, 10);
    draw_rich_text(
        &mut canvas,
        &BlockEngine,
        &NoGlyphs,
        "a\u{1f44d}\u{1f3fd}b",
        &[EmojiRange { start: 1, end: 9, glyph: "\u{1f44d}\u{1f3fd}".into() }],
        &centered,
        PixelRect::new(0, 0, 60, 10),
    )
    .unwrap();

    // With no art the sequence draws as two 10px code points; centering
    // counts that same 20px advance, so the 40px line sits at x 10..50.
    assert_eq!(canvas.pixel(9, 5), CLEAR);
    assert_eq!(canvas.pixel(10, 5), WHITE);
    assert_eq!(canvas.pixel(49, 5), WHITE);
    assert_eq!(canvas.pixel(50, 5), CLEAR);
}

#[test]
fn center_alignment_offsets_each_line() {
    let mut centered = style();
    centered.text_align = AlignX::Center;
    let mut canvas = RasterBuf::new(100, 10);
    draw_rich_text(
        &mut canvas,
        &BlockEngine,
        &NoGlyphs,
        "ab",
        &[],
        &centered,
        PixelRect::new(0, 0, 100, 10),
    )
    .unwrap();

    assert_eq!(canvas.pixel(39, 5), CLEAR);
    assert_eq!(canvas.pixel(40, 5), WHITE);
    assert_eq!(canvas.pixel(59, 5), WHITE);
    assert_eq!(canvas.pixel(60, 5), CLEAR);
}

#[test]
fn bottom_valign_counts_every_slot() {
    let mut bottom = style();
    bottom.text_valign = AlignY::Bottom;
    let mut canvas = RasterBuf::new(40, 30);
    draw_rich_text(
        &mut canvas,
        &BlockEngine,
        &NoGlyphs,
        "abcdefg",
        &[],
        &bottom,
        PixelRect::new(0, 0, 40, 30),
    )
    .unwrap();

    // Two 10px lines sit at the bottom of the 30px box.
    assert_eq!(canvas.pixel(0, 5), CLEAR);
    assert_eq!(canvas.pixel(0, 15), WHITE);
    assert_eq!(canvas.pixel(0, 25), WHITE);
}

#[test]
fn shadow_draws_under_the_text() {
    let mut shadowed = style();
    shadowed.shadow_offset = (2, 2);
    shadowed.shadow_color = Rgba8::rgb(255, 0, 0);
    let mut canvas = RasterBuf::new(100, 20);
    draw_rich_text(
        &mut canvas,
        &BlockEngine,
        &NoGlyphs,
        "a",
        &[],
        &shadowed,
        PixelRect::new(0, 0, 100, 20),
    )
    .unwrap();

    // Text covers the shadow except on the offset fringe.
    assert_eq!(canvas.pixel(5, 5), WHITE);
    assert_eq!(canvas.pixel(11, 11), RED);
}

#[test]
fn plain_block_spaces_lines_and_sizes_itself() {
    let font = FontRef::new("f", 10);
    let block =
        draw_plain_block(&BlockEngine, &font, "abcd", Rgba8::WHITE, None, 20).unwrap();

    // Two 10px lines with a 1px gap (15% of the line height, truncated).
    assert_eq!((block.width(), block.height()), (20, 21));
    assert_eq!(block.pixel(0, 5), WHITE);
    assert_eq!(block.pixel(0, 10), CLEAR);
    assert_eq!(block.pixel(0, 11), WHITE);
    assert_eq!(block.pixel(19, 20), WHITE);
}

#[test]
fn zero_max_width_draws_one_natural_line() {
    let font = FontRef::new("f", 10);
    let block =
        draw_plain_block(&BlockEngine, &font, "abc", Rgba8::WHITE, None, 0).unwrap();
    assert_eq!((block.width(), block.height()), (30, 10));
    assert_eq!(block.pixel(29, 9), WHITE);
}

#[test]
fn plate_runs_share_a_baseline() {
    let mut plate = solid(200, 100, Rgba8::rgb(0, 0, 255));
    let plate_style = PlateStyle { center_x: 100, baseline: 0.5, shadow_px: 2 };
    let runs = [
        PlateRun { text: "ab".into(), size_px: 20, color: Rgba8::rgb(255, 0, 0) },
        PlateRun { text: "c".into(), size_px: 10, color: Rgba8::rgb(0, 255, 0) },
    ];
    draw_plate_runs(&mut plate, &BlockEngine, "f", &runs, &plate_style).unwrap();

    // First run: 40x20 at (90, 30); second: 10x10 at (130, 40). Both
    // bottoms rest on the baseline at y 50.
    assert_eq!(plate.pixel(91, 31), RED);
    assert_eq!(plate.pixel(129, 49), RED);
    assert_eq!(plate.pixel(135, 45), GREEN);
    assert_eq!(plate.pixel(139, 49), GREEN);
    // The drop shadow peeks out below the baseline.
    assert_eq!(plate.pixel(121, 51), BLACK);
    // Untouched plate pixels keep their color.
    assert_eq!(plate.pixel(50, 50), [0, 0, 255, 255]);
}

#[test]
fn unrenderable_plate_runs_are_skipped() {
    let mut plate = solid(200, 100, Rgba8::rgb(0, 0, 255));
    let plate_style = PlateStyle::default();
    let runs = [PlateRun { text: "ab".into(), size_px: 20, color: Rgba8::WHITE }];
    draw_plate_runs(&mut plate, &FailEngine, "f", &runs, &plate_style).unwrap();
    assert_eq!(plate.pixel(100, 50), [0, 0, 255, 255]);
}

#[test]
fn empty_runs_are_a_noop() {
    let mut plate = solid(10, 10, Rgba8::rgb(0, 0, 255));
    draw_plate_runs(&mut plate, &BlockEngine, "f", &[], &PlateStyle::default()).unwrap();
    assert_eq!(plate.pixel(5, 5), [0, 0, 255, 255]);
}
