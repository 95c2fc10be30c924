//! Terminal output sanitization
//!
//! Clipboard text comes from arbitrary applications and may carry ANSI escape sequences
//! that would clear the screen, move the cursor, or restyle the terminal when printed.
//! Anything copied is passed through [`strip_ansi_codes`] before it reaches the TUI or
//! stdout.

/// Strips ANSI CSI escape codes and control characters (except tab, newline, CR)
///
/// # Examples
///
/// ```
/// use clip_history::utils::terminal::strip_ansi_codes;
///
/// let text = "\x1b[31mRed text\x1b[0m";
/// assert_eq!(strip_ansi_codes(text), "Red text");
/// ```
pub fn strip_ansi_codes(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '\x1b' && chars.peek() == Some(&'[') {
            chars.next();
            // CSI runs until its final letter
            for next_ch in chars.by_ref() {
                if next_ch.is_ascii_alphabetic() {
                    break;
                }
            }
            continue;
        }

        if ch.is_control() && !matches!(ch, '\t' | '\n' | '\r') {
            continue;
        }

        result.push(ch);
    }

    result
}

/// Sanitized text collapsed onto one line, for list rows
///
/// # Examples
///
/// ```
/// use clip_history::utils::terminal::single_line;
///
/// assert_eq!(single_line("first\n  second\tthird"), "first second third");
/// ```
pub fn single_line(text: &str) -> String {
    strip_ansi_codes(text).split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_ansi_codes_color() {
        let text = "\x1b[31mRed text\x1b[0m normal";
        assert_eq!(strip_ansi_codes(text), "Red text normal");
    }

    #[test]
    fn test_strip_ansi_codes_cursor_movement() {
        let text = "\x1b[2J\x1b[H Cleared screen";
        assert_eq!(strip_ansi_codes(text), " Cleared screen");
    }

    #[test]
    fn test_strip_bell_and_backspace() {
        assert_eq!(strip_ansi_codes("Alert! \x07"), "Alert! ");
        assert_eq!(strip_ansi_codes("Test\x08"), "Test");
    }

    #[test]
    fn test_preserves_whitespace_controls() {
        let text = "Line 1\nLine 2\rLine 3\tTabbed";
        assert_eq!(strip_ansi_codes(text), text);
    }

    #[test]
    fn test_unicode_survives() {
        let text = "Hello 👋 \x1b[31mWorld\x1b[0m 🌍";
        assert_eq!(strip_ansi_codes(text), "Hello 👋 World 🌍");
    }

    #[test]
    fn test_unterminated_sequence() {
        assert_eq!(strip_ansi_codes("tail\x1b[123"), "tail");
    }

    #[test]
    fn test_single_line_collapses() {
        assert_eq!(single_line("  a\n\nb\r\n c  "), "a b c");
        assert_eq!(single_line(""), "");
        assert_eq!(single_line("\x1b[1mbold\x1b[0m\nnext"), "bold next");
    }
}
