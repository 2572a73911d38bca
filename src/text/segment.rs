//! Styled span construction.
//!
//! Folds bracket regions and caller-supplied emoji ranges into an ordered
//! span sequence covering the whole text. Emoji win over brackets where they
//! intersect; everything not claimed by either is filled with base-styled
//! spans so that rendering never skips a byte.

use crate::foundation::raster::Rgba8;
use crate::text::brackets::BracketSpan;

/// A styled byte range of the dialogue text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TextSpan {
    /// Byte offset of the first byte.
    pub start: usize,
    /// Byte offset one past the last byte.
    pub end: usize,
    /// Fill color for this range.
    pub color: Rgba8,
    /// Emoji spans draw glyph art instead of rasterized text.
    pub is_emoji: bool,
}

/// A caller-supplied emoji position with its resolved glyph text.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct EmojiRange {
    /// Byte offset of the first byte of the emoji sequence.
    pub start: usize,
    /// Byte offset one past the emoji sequence.
    pub end: usize,
    /// The emoji text itself (normally equal to the bytes at `start..end`).
    #[serde(default)]
    pub glyph: String,
}

/// Build the ordered span sequence for `text`.
///
/// `brackets` come from [`find_bracket_spans`]; `emoji` ranges are supplied
/// by the caller. Malformed emoji ranges (out of bounds, inverted, not on a
/// character boundary, or overlapping an earlier range) are dropped rather
/// than failing: the result always covers `[0, text.len())` with
/// non-overlapping spans in ascending order.
///
/// [`find_bracket_spans`]: crate::text::brackets::find_bracket_spans
pub fn build_segments(
    text: &str,
    brackets: &[BracketSpan],
    emoji: &[EmojiRange],
    base_color: Rgba8,
    bracket_color: Rgba8,
) -> Vec<TextSpan> {
    let len = text.len();

    let mut kept: Vec<(usize, usize)> = Vec::new();
    let mut sorted: Vec<&EmojiRange> = emoji.iter().collect();
    sorted.sort_by_key(|range| range.start);
    for range in sorted {
        let valid = range.start < range.end
            && range.end <= len
            && text.is_char_boundary(range.start)
            && text.is_char_boundary(range.end)
            && kept.last().is_none_or(|&(_, prev_end)| range.start >= prev_end);
        if valid {
            kept.push((range.start, range.end));
        } else {
            tracing::warn!(start = range.start, end = range.end, "dropping malformed emoji range");
        }
    }

    let mut spans: Vec<TextSpan> = Vec::new();

    // Bracket pieces, clipped around every intersecting emoji range.
    for bracket in brackets {
        let mut cursor = bracket.start;
        for &(emoji_start, emoji_end) in &kept {
            if emoji_end <= bracket.start || emoji_start >= bracket.end {
                continue;
            }
            if emoji_start > cursor {
                spans.push(TextSpan { start: cursor, end: emoji_start, color: bracket_color, is_emoji: false });
            }
            cursor = cursor.max(emoji_end);
        }
        if cursor < bracket.end {
            spans.push(TextSpan { start: cursor, end: bracket.end, color: bracket_color, is_emoji: false });
        }
    }

    for &(start, end) in &kept {
        spans.push(TextSpan { start, end, color: base_color, is_emoji: true });
    }

    spans.sort_by_key(|span| span.start);

    // Gap-fill with base-styled spans so the sequence covers [0, len).
    let mut covered = Vec::with_capacity(spans.len() * 2);
    let mut cursor = 0;
    for mut span in spans {
        if span.start < cursor {
            // Overlapping caller input: clamp rather than double-draw.
            if span.end <= cursor {
                continue;
            }
            span.start = cursor;
        }
        if span.start > cursor {
            covered.push(TextSpan { start: cursor, end: span.start, color: base_color, is_emoji: false });
        }
        cursor = span.end;
        covered.push(span);
    }
    if cursor < len {
        covered.push(TextSpan { start: cursor, end: len, color: base_color, is_emoji: false });
    }
    covered
}

#[cfg(test)]
#[path = "../../tests/unit/text/segment.rs"]
mod tests;
