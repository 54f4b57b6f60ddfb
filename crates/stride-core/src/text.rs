//! UTF-8-safe truncation for log output.
//!
//! Observations can be arbitrarily large tool output; structured logs only
//! want the head of them. `&str[..n]` panics when `n` lands inside a
//! multi-byte character, so truncation snaps back to a char boundary.

/// Shorten `s` for log output, appending `…` when anything was cut.
///
/// The kept prefix is at most `max_bytes` bytes and never splits a
/// multi-byte character.
#[must_use]
pub fn log_preview(s: &str, max_bytes: usize) -> String {
    if s.len() <= max_bytes {
        return s.to_owned();
    }
    let mut end = max_bytes;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}…", &s[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_string_unchanged() {
        assert_eq!(log_preview("hello", 10), "hello");
    }

    #[test]
    fn exact_length_unchanged() {
        assert_eq!(log_preview("hello", 5), "hello");
    }

    #[test]
    fn long_string_truncated_with_ellipsis() {
        assert_eq!(log_preview("hello world", 5), "hello…");
    }

    #[test]
    fn snaps_back_at_multibyte_boundary() {
        // 'é' is 2 bytes; cutting at byte 1 would split it.
        assert_eq!(log_preview("héllo", 2), "h…");
    }

    #[test]
    fn zero_max_bytes() {
        assert_eq!(log_preview("abc", 0), "…");
    }
}
