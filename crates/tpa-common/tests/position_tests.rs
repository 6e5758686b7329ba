use crate::{LineMap, Position, Span};

#[test]
fn line_map_handles_mixed_line_endings() {
    let text = "a\r\nbc\rdef\nx";
    let map = LineMap::build(text);
    assert_eq!(map.line_count(), 4);
    assert_eq!(map.line_start(1), Some(3));
    assert_eq!(map.line_start(2), Some(6));
    assert_eq!(map.line_start(3), Some(10));
}

#[test]
fn offset_to_position_counts_utf16_units() {
    let text = "é𝄞x\nline";
    let map = LineMap::build(text);
    // 'é' is 2 bytes / 1 unit, '𝄞' is 4 bytes / 2 units
    let x_offset = text.find('x').unwrap() as u32;
    assert_eq!(map.offset_to_position(x_offset, text), Position::new(0, 3));
    let l_offset = text.find("line").unwrap() as u32;
    assert_eq!(map.offset_to_position(l_offset, text), Position::new(1, 0));
}

#[test]
fn span_to_range_covers_both_ends() {
    let text = "    return DateTime.Now;\n";
    let map = LineMap::build(text);
    let start = text.find("DateTime").unwrap() as u32;
    let span = Span::new(start, start + "DateTime.Now".len() as u32);
    let range = map.span_to_range(span, text);
    assert_eq!(range.start, Position::new(0, 11));
    assert_eq!(range.end, Position::new(0, 23));
    assert_eq!(span.text(text), "DateTime.Now");
}

#[test]
fn offsets_past_the_end_clamp() {
    let text = "ab";
    let map = LineMap::build(text);
    assert_eq!(map.offset_to_position(99, text), Position::new(0, 2));
}
