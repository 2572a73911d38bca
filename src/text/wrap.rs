//! Greedy line breaking and adaptive font-size fitting.

use crate::foundation::error::{VignetteError, VignetteResult};
use crate::render::backend::{FontRef, TextEngine};
use crate::text::scan::chars_to_bytes;

/// Outcome of the adaptive size search: the chosen size and the committed
/// line ranges at that size.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockFit {
    /// Chosen font size in pixels.
    pub size_px: u32,
    /// Wrapped line byte ranges `[start, end)` in document order.
    pub lines: Vec<(usize, usize)>,
    /// Line height reported by the engine at the chosen size.
    pub line_height: u32,
    /// True when even the minimum size overflows the height budget; the
    /// layout is still usable, just taller than asked for.
    pub overflow: bool,
}

/// Break `text` into greedy lines no wider than `max_width` pixels.
///
/// Each returned range `[start, end)` is a byte range of `text` on a
/// character boundary. When nothing fits at all (a width narrower than the
/// first character), the whole text is returned as a single overflowing
/// line rather than failing.
pub fn break_lines(
    engine: &dyn TextEngine,
    font: &FontRef,
    text: &str,
    max_width: u32,
) -> VignetteResult<Vec<(usize, usize)>> {
    let bytes = text.as_bytes();
    let mut lines = Vec::new();
    let mut start = 0;
    while start < bytes.len() {
        let run = engine.measure(font, &text[start..], max_width)?;
        if run.chars == 0 {
            break;
        }
        let advance = chars_to_bytes(bytes, start, run.chars);
        if advance == 0 {
            break;
        }
        lines.push((start, start + advance));
        start += advance;
    }
    if lines.is_empty() && !bytes.is_empty() {
        lines.push((0, bytes.len()));
    }
    Ok(lines)
}

/// Pick the largest font size in `[min_size, max_size]` whose wrapped block
/// fits within `max_height`, by binary search.
///
/// A size the engine cannot measure at is treated as too large and the
/// search continues downward. When no size fits the height budget the block
/// is laid out at `min_size` with [`BlockFit::overflow`] set; only a
/// minimum-size measurement failure is an error.
pub fn fit_block(
    engine: &dyn TextEngine,
    family: &str,
    text: &str,
    max_width: u32,
    max_height: u32,
    min_size: u32,
    max_size: u32,
) -> VignetteResult<BlockFit> {
    if min_size == 0 {
        return Err(VignetteError::validation("minimum font size must be non-zero"));
    }

    let mut lo = min_size;
    let mut hi = max_size.max(min_size);
    let mut best: Option<BlockFit> = None;

    while lo <= hi {
        let mid = lo + (hi - lo) / 2;
        let font = FontRef::new(family, mid);
        match measure_at(engine, &font, text, max_width) {
            Ok((lines, line_height)) => {
                let block_height = lines.len() as u64 * u64::from(line_height);
                if block_height <= u64::from(max_height) {
                    best = Some(BlockFit { size_px: mid, lines, line_height, overflow: false });
                    lo = mid + 1;
                } else {
                    hi = mid - 1;
                }
            }
            Err(err) => {
                tracing::debug!(size = mid, %err, "size unavailable, searching lower");
                hi = mid - 1;
            }
        }
    }

    match best {
        Some(fit) => {
            tracing::debug!(size = fit.size_px, lines = fit.lines.len(), "block fitted");
            Ok(fit)
        }
        None => {
            // Nothing met the budget; lay out at the floor size anyway.
            let font = FontRef::new(family, min_size);
            let (lines, line_height) =
                measure_at(engine, &font, text, max_width).map_err(|err| {
                    VignetteError::layout(format!(
                        "no layout possible: minimum size {min_size}px failed: {err}"
                    ))
                })?;
            tracing::debug!(size = min_size, lines = lines.len(), "block overflows at minimum size");
            Ok(BlockFit { size_px: min_size, lines, line_height, overflow: true })
        }
    }
}

fn measure_at(
    engine: &dyn TextEngine,
    font: &FontRef,
    text: &str,
    max_width: u32,
) -> VignetteResult<(Vec<(usize, usize)>, u32)> {
    let lines = break_lines(engine, font, text, max_width)?;
    let line_height = engine.line_height(font)?;
    Ok((lines, line_height))
}

#[cfg(test)]
#[path = "../../tests/unit/text/wrap.rs"]
mod tests;
