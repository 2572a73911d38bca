use super::*;
use crate::text::brackets::find_bracket_spans;

const BASE: Rgba8 = Rgba8::WHITE;
const ACCENT: Rgba8 = Rgba8::rgb(0xef, 0x4f, 0x54);

fn emoji(start: usize, end: usize) -> EmojiRange {
    EmojiRange { start, end, glyph: String::new() }
}

fn build(text: &str, emoji: &[EmojiRange]) -> Vec<TextSpan> {
    build_segments(text, &find_bracket_spans(text), emoji, BASE, ACCENT)
}

fn assert_covers(spans: &[TextSpan], len: usize) {
    let mut cursor = 0;
    for span in spans {
        assert_eq!(span.start, cursor, "gap or overlap at byte {cursor}");
        assert!(span.start < span.end, "empty span at byte {cursor}");
        cursor = span.end;
    }
    assert_eq!(cursor, len, "coverage stops short of the end");
}

#[test]
fn plain_text_is_one_base_span() {
    let spans = build("hello", &[]);
    assert_eq!(spans.len(), 1);
    assert_eq!((spans[0].start, spans[0].end), (0, 5));
    assert_eq!(spans[0].color, BASE);
    assert!(!spans[0].is_emoji);
}

#[test]
fn empty_text_yields_no_spans() {
    assert!(build("", &[]).is_empty());
}

#[test]
fn emoji_inside_bracket_takes_precedence() {
    // "[😀]": the bracket span is clipped around the emoji.
    let spans = build("[😀]", &[emoji(1, 5)]);
    assert_eq!(spans.len(), 3);
    assert_eq!((spans[0].start, spans[0].end, spans[0].is_emoji), (0, 1, false));
    assert_eq!(spans[0].color, ACCENT);
    assert_eq!((spans[1].start, spans[1].end, spans[1].is_emoji), (1, 5, true));
    assert_eq!(spans[1].color, BASE);
    assert_eq!((spans[2].start, spans[2].end, spans[2].is_emoji), (5, 6, false));
    assert_eq!(spans[2].color, ACCENT);
    assert_covers(&spans, 6);
}

#[test]
fn bracket_region_takes_accent_color() {
    let text = "say [hi] now";
    let spans = build(text, &[]);
    assert_covers(&spans, text.len());
    let accented: Vec<_> = spans.iter().filter(|s| s.color == ACCENT).collect();
    assert_eq!(accented.len(), 1);
    assert_eq!((accented[0].start, accented[0].end), (4, 8));
}

#[test]
fn emoji_overlapping_bracket_edge_is_clipped_out() {
    // Emoji range straddles the opening delimiter; the bracket keeps only
    // the part after the emoji.
    let text = "ab[cd]ef";
    let spans = build(text, &[emoji(1, 4)]);
    let expect = [
        (0, 1, BASE, false),
        (1, 4, BASE, true),
        (4, 6, ACCENT, false),
        (6, 8, BASE, false),
    ];
    assert_eq!(spans.len(), expect.len());
    for (span, &(start, end, color, is_emoji)) in spans.iter().zip(expect.iter()) {
        assert_eq!((span.start, span.end, span.color, span.is_emoji), (start, end, color, is_emoji));
    }
    assert_covers(&spans, text.len());
}

#[test]
fn malformed_emoji_ranges_are_dropped() {
    let text = "a中b";
    let bad = [
        emoji(0, 9),  // past the end
        emoji(3, 2),  // inverted
        emoji(2, 4),  // splits the 3-byte character
        emoji(2, 2),  // empty
    ];
    let spans = build(text, &bad);
    assert_covers(&spans, text.len());
    assert!(spans.iter().all(|s| !s.is_emoji));
}

#[test]
fn overlapping_emoji_keeps_first() {
    let text = "abcdef";
    let spans = build(text, &[emoji(1, 4), emoji(3, 5)]);
    assert_covers(&spans, text.len());
    let flagged: Vec<_> = spans.iter().filter(|s| s.is_emoji).collect();
    assert_eq!(flagged.len(), 1);
    assert_eq!((flagged[0].start, flagged[0].end), (1, 4));
}

#[test]
fn coverage_holds_across_inputs() {
    let cases: &[(&str, Vec<EmojiRange>)] = &[
        ("", vec![]),
        ("x", vec![]),
        ("「你好」world", vec![]),
        ("a😀b[c]😀", vec![emoji(1, 5), emoji(9, 13)]),
        ("\"quoted\" [deep <nest>]", vec![]),
    ];
    for (text, ranges) in cases {
        let spans = build(text, ranges);
        assert_covers(&spans, text.len());
    }
}
