//! Forward UTF-8 code point scanner.
//!
//! Layout works on byte offsets, so everything here reports lengths in
//! bytes. The scanner is deliberately lenient: a stray continuation byte or
//! a truncated trailing sequence is consumed as a single byte instead of
//! failing, which keeps layout total over malformed input.

/// Decode the code point starting at `offset`.
///
/// Returns `(code_point, byte_length)`. Malformed lead bytes and truncated
/// sequences decode as a 1-byte fallback so the caller always makes forward
/// progress. Past the end of `bytes` the result is `(0, 0)`.
pub fn next_codepoint(bytes: &[u8], offset: usize) -> (u32, usize) {
    let Some(&b0) = bytes.get(offset) else {
        return (0, 0);
    };
    let (len, init) = match b0 {
        0x00..=0x7F => return (u32::from(b0), 1),
        0xC0..=0xDF => (2, u32::from(b0 & 0x1F)),
        0xE0..=0xEF => (3, u32::from(b0 & 0x0F)),
        0xF0..=0xF7 => (4, u32::from(b0 & 0x07)),
        // Continuation byte or invalid lead: consume it alone.
        _ => return (u32::from(b0), 1),
    };
    if offset + len > bytes.len() {
        return (u32::from(b0), 1);
    }
    let mut cp = init;
    for &b in &bytes[offset + 1..offset + len] {
        cp = (cp << 6) | u32::from(b & 0x3F);
    }
    (cp, len)
}

/// Convert a leading count of code points (starting at byte `start`) into a
/// byte count. Stops early at the end of the buffer.
pub fn chars_to_bytes(bytes: &[u8], start: usize, char_count: usize) -> usize {
    let mut offset = start;
    let mut seen = 0;
    while offset < bytes.len() && seen < char_count {
        let (_, len) = next_codepoint(bytes, offset);
        offset += len;
        seen += 1;
    }
    offset - start
}

/// Count the code points in `bytes` (1-byte fallbacks included).
pub fn count_codepoints(bytes: &[u8]) -> usize {
    let mut offset = 0;
    let mut count = 0;
    while offset < bytes.len() {
        let (_, len) = next_codepoint(bytes, offset);
        offset += len;
        count += 1;
    }
    count
}
