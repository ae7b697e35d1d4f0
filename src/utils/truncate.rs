/// Shorten `text` to at most `max_len` bytes, ending with an ellipsis.
///
/// A budget of 2 or 3 still yields the full `"..."`, and a budget of 1 yields
/// a single `"."`. The cut is moved back to a char boundary when needed.
pub fn truncate(text: &str, max_len: i64) -> String {
    if max_len <= 0 {
        return String::new();
    }
    let max = max_len as usize;
    if text.len() <= max {
        return text.to_string();
    }
    match max {
        1 => ".".to_string(),
        2 | 3 => "...".to_string(),
        _ => {
            let mut cut = max - 3;
            while !text.is_char_boundary(cut) {
                cut -= 1;
            }
            format!("{}...", &text[..cut])
        }
    }
}
