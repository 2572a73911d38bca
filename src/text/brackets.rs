//! Bracket and quote matching for dialogue highlighting.
//!
//! Matched delimiter regions (the delimiters and everything between them)
//! are rendered in an accent color. Matching is forgiving: unmatched
//! delimiters produce no span rather than an error, and a closer may skip
//! over non-matching open delimiters to find its partner.

use std::collections::HashMap;

use crate::text::scan::next_codepoint;

/// Opening/closing delimiter pairs. Symmetric pairs (same glyph both sides)
/// alternate open/close by occurrence order.
const PAIRS: &[(char, char)] = &[
    ('"', '"'),
    ('[', ']'),
    ('<', '>'),
    ('【', '】'),
    ('〔', '〕'),
    ('「', '」'),
    ('『', '』'),
    ('〖', '〗'),
    ('《', '》'),
    ('〈', '〉'),
    ('\u{201C}', '\u{201D}'), // typographic double quotes
];

/// A matched delimiter region `[start, end)` in byte offsets, delimiters
/// included.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BracketSpan {
    /// Byte offset of the opening delimiter.
    pub start: usize,
    /// Byte offset one past the closing delimiter.
    pub end: usize,
}

#[derive(Clone, Copy, Debug)]
struct Occurrence {
    offset: usize,
    len: usize,
    glyph: char,
    opening: bool,
}

fn closer_for(c: char) -> Option<char> {
    PAIRS.iter().find(|(open, _)| *open == c).map(|(_, close)| *close)
}

fn is_closer(c: char) -> bool {
    PAIRS.iter().any(|(_, close)| *close == c)
}

/// Find every matched delimiter region in `text`, sorted by start, with
/// overlapping or adjacent regions merged.
pub fn find_bracket_spans(text: &str) -> Vec<BracketSpan> {
    let bytes = text.as_bytes();

    // Pass 1: classify delimiter occurrences. Symmetric glyphs toggle
    // between opening and closing per occurrence.
    let mut occurrences = Vec::new();
    let mut symmetric_open: HashMap<char, bool> = HashMap::new();
    let mut offset = 0;
    while offset < bytes.len() {
        let (cp, len) = next_codepoint(bytes, offset);
        if let Some(glyph) = char::from_u32(cp) {
            if let Some(close) = closer_for(glyph) {
                let opening = if close == glyph {
                    let open = symmetric_open.entry(glyph).or_insert(false);
                    *open = !*open;
                    *open
                } else {
                    true
                };
                occurrences.push(Occurrence { offset, len, glyph, opening });
            } else if is_closer(glyph) {
                occurrences.push(Occurrence { offset, len, glyph, opening: false });
            }
        }
        offset += len;
    }

    // Pass 2: stack matching. A closer pops until it finds an opener it
    // pairs with; skipped openers are restored for later closers.
    let mut stack: Vec<Occurrence> = Vec::new();
    let mut spans = Vec::new();
    for occ in &occurrences {
        if occ.opening {
            stack.push(*occ);
            continue;
        }
        let mut skipped = Vec::new();
        while let Some(top) = stack.pop() {
            if closer_for(top.glyph) == Some(occ.glyph) {
                spans.push(BracketSpan { start: top.offset, end: occ.offset + occ.len });
                break;
            }
            skipped.push(top);
        }
        while let Some(top) = skipped.pop() {
            stack.push(top);
        }
    }

    // Pass 3: sort and merge overlapping or adjacent regions.
    spans.sort_by_key(|span| span.start);
    let mut merged: Vec<BracketSpan> = Vec::new();
    for span in spans {
        match merged.last_mut() {
            Some(last) if span.start <= last.end => last.end = last.end.max(span.end),
            _ => merged.push(span),
        }
    }
    merged
}

#[cfg(test)]
#[path = "../../tests/unit/text/brackets.rs"]
mod tests;
