//! Span distribution across committed lines.

use crate::text::segment::TextSpan;

/// One laid-out line: the spans clipped to its byte range, in document
/// order. Lines that end up empty are dropped from the result but keep
/// their vertical slot, so `slot` indexes the full wrapped sequence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Line {
    /// Index into the wrapped line ranges (empty lines included).
    pub slot: usize,
    /// Spans overlapping this line, clipped to its range.
    pub spans: Vec<TextSpan>,
}

/// Split `spans` across the wrapped `lines`.
///
/// A span crossing a line boundary is emitted clipped on the earlier line
/// and its `start` advanced in place past the boundary, so the remainder
/// flows onto the following lines. Both inputs must be sorted by `start`;
/// every byte covered by both a span and a line appears in exactly one
/// output span.
pub fn distribute(spans: &mut [TextSpan], lines: &[(usize, usize)]) -> Vec<Line> {
    let mut out = Vec::new();
    let mut index = 0;

    for (slot, &(line_start, line_end)) in lines.iter().enumerate() {
        let mut line_spans = Vec::new();
        while index < spans.len() {
            let span = spans[index];
            if span.end <= line_start {
                index += 1;
                continue;
            }
            if span.start >= line_end {
                break;
            }
            let clip_start = span.start.max(line_start);
            let clip_end = span.end.min(line_end);
            if clip_start < clip_end {
                line_spans.push(TextSpan { start: clip_start, end: clip_end, ..span });
            }
            if span.end <= line_end {
                index += 1;
            } else {
                // Remainder continues on the next line.
                spans[index].start = line_end;
                break;
            }
        }
        if !line_spans.is_empty() {
            out.push(Line { slot, spans: line_spans });
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/text/distribute.rs"]
mod tests;
