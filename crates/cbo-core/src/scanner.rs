//! Quote and escape aware scanning of a single line.
//!
//! Every rule reasons about source text through these functions so that
//! string and character literals never confuse them. All positions are byte
//! offsets into the line; nothing here looks past either end of the line.
//!
//! The matching functions follow a sentinel convention: when no match exists
//! on the line they return the query position itself.

/// How a byte relates to string and character literals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    /// Outside any literal.
    Code,
    /// A quote that opens or closes a literal.
    Quote,
    /// Inside a literal.
    Literal,
}

/// Left-to-right walk over a line, tagging each byte with its [`CharClass`].
///
/// A quote toggles its own literal only while the other kind of literal is
/// closed and the quote is not escaped by a backslash. An unterminated literal
/// simply runs to the end of the line.
#[derive(Debug, Clone)]
pub struct Scan<'a> {
    bytes: &'a [u8],
    pos: usize,
    in_single: bool,
    in_double: bool,
    escaped: bool,
}

impl Iterator for Scan<'_> {
    type Item = (usize, u8, CharClass);

    fn next(&mut self) -> Option<Self::Item> {
        let &byte = self.bytes.get(self.pos)?;
        let idx = self.pos;
        self.pos += 1;

        let escaped = self.escaped;
        self.escaped = byte == b'\\' && !escaped;

        let class = match byte {
            b'\'' if !self.in_double && !escaped => {
                self.in_single = !self.in_single;
                CharClass::Quote
            }
            b'"' if !self.in_single && !escaped => {
                self.in_double = !self.in_double;
                CharClass::Quote
            }
            _ if self.in_single || self.in_double => CharClass::Literal,
            _ => CharClass::Code,
        };
        Some((idx, byte, class))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.bytes.len() - self.pos;
        (left, Some(left))
    }
}

/// Classify every byte of `text`.
#[must_use]
pub const fn classify(text: &str) -> Scan<'_> {
    Scan {
        bytes: text.as_bytes(),
        pos: 0,
        in_single: false,
        in_double: false,
        escaped: false,
    }
}

/// Byte length of the line.
#[must_use]
pub const fn length(text: &str) -> usize {
    text.len()
}

/// First position that is neither a space nor a tab, or the length of the line.
#[must_use]
pub fn pos_head(text: &str) -> usize {
    text.bytes()
        .position(|b| !is_blank(b))
        .unwrap_or(text.len())
}

/// A line is a comment when its head is a slash.
#[must_use]
pub fn is_comment(text: &str) -> bool {
    text.as_bytes().get(pos_head(text)) == Some(&b'/')
}

/// Whether the byte at `idx` is outside literals.
#[must_use]
pub fn is_code_at(text: &str, idx: usize) -> bool {
    classify(text)
        .nth(idx)
        .is_some_and(|(_, _, class)| class == CharClass::Code)
}

/// Position where a trailing `//` or `/*` comment starts, or the length of the line.
#[must_use]
pub fn code_end(text: &str) -> usize {
    let bytes = text.as_bytes();
    classify(text)
        .find(|&(idx, byte, class)| {
            class == CharClass::Code
                && byte == b'/'
                && matches!(bytes.get(idx + 1), Some(b'/' | b'*'))
        })
        .map_or(text.len(), |(idx, _, _)| idx)
}

/// Rightmost position of `ch` outside literals, or the length of the line.
#[must_use]
pub fn last_index_outside_strings(text: &str, ch: u8) -> usize {
    classify(text)
        .filter(|&(_, byte, class)| class == CharClass::Code && byte == ch)
        .last()
        .map_or(text.len(), |(idx, _, _)| idx)
}

/// Position of the delimiter closing the one opened at `from`.
///
/// Returns `from` when the byte at `from` is not an opening delimiter outside
/// literals, or when the line ends before the delimiter is balanced.
#[must_use]
pub fn match_forward(text: &str, from: usize) -> usize {
    let Some(open) = text.as_bytes().get(from).copied() else {
        return from;
    };
    let Some(close) = closing_pair(open) else {
        return from;
    };
    if !is_code_at(text, from) {
        return from;
    }

    let mut depth = 0usize;
    for (idx, byte, class) in classify(text).skip(from) {
        if class != CharClass::Code {
            continue;
        }
        if byte == open {
            depth += 1;
        } else if byte == close && depth > 0 {
            depth -= 1;
            if depth == 0 {
                return idx;
            }
        }
    }
    from
}

/// Position of the delimiter opening the one closed at `from`.
///
/// Same sentinel convention as [`match_forward`].
#[must_use]
pub fn match_backward(text: &str, from: usize) -> usize {
    let Some(close) = text.as_bytes().get(from).copied() else {
        return from;
    };
    let Some(open) = opening_pair(close) else {
        return from;
    };

    let scanned: Vec<_> = classify(text).take(from + 1).collect();
    if scanned.last().is_none_or(|&(_, _, class)| class != CharClass::Code) {
        return from;
    }

    let mut depth = 0usize;
    for &(idx, byte, class) in scanned.iter().rev() {
        if class != CharClass::Code {
            continue;
        }
        if byte == close {
            depth += 1;
        } else if byte == open && depth > 0 {
            depth -= 1;
            if depth == 0 {
                return idx;
            }
        }
    }
    from
}

const fn closing_pair(open: u8) -> Option<u8> {
    match open {
        b'{' => Some(b'}'),
        b'(' => Some(b')'),
        b'[' => Some(b']'),
        _ => None,
    }
}

const fn opening_pair(close: u8) -> Option<u8> {
    match close {
        b'}' => Some(b'{'),
        b')' => Some(b'('),
        b']' => Some(b'['),
        _ => None,
    }
}

/// Space or tab.
#[must_use]
pub const fn is_blank(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classes(text: &str) -> String {
        classify(text)
            .map(|(_, _, class)| match class {
                CharClass::Code => 'c',
                CharClass::Quote => 'q',
                CharClass::Literal => 'l',
            })
            .collect()
    }

    #[test]
    fn head_skips_spaces_and_tabs() {
        assert_eq!(pos_head("  \tint x;"), 3);
        assert_eq!(pos_head("int x;"), 0);
        assert_eq!(pos_head("   "), 3);
        assert_eq!(pos_head(""), 0);
    }

    #[test]
    fn comment_is_detected_at_head() {
        assert!(is_comment("  // note"));
        assert!(is_comment("/* block */"));
        assert!(!is_comment("x = a / b;"));
        assert!(!is_comment(""));
    }

    #[test]
    fn classify_tracks_both_quote_kinds() {
        assert_eq!(classes(r#"a"b"c"#), "cqlqc");
        assert_eq!(classes("a'b'c"), "cqlqc");
        // A single quote inside a string does not open a char literal.
        assert_eq!(classes(r#""'"x"#), "qlqc");
    }

    #[test]
    fn escaped_quotes_do_not_toggle() {
        assert_eq!(classes(r#""\"",x"#), "qllqcc");
        assert_eq!(classes(r"'\'',x"), "qllqcc");
    }

    #[test]
    fn escaped_backslash_closes_the_literal() {
        assert_eq!(classes(r"'\\',x"), "qllqcc");
        assert_eq!(classes(r#""a\\",b"#), "qlllqcc");
    }

    #[test]
    fn unterminated_literal_runs_to_end_of_line() {
        assert_eq!(classes(r#"a "b,c"#), "ccqlll");
    }

    #[test]
    fn code_end_ignores_slashes_in_strings() {
        assert_eq!(code_end(r#"puts("//"); // done"#), 12);
        assert_eq!(code_end("a = b / c;"), 10);
        assert_eq!(code_end("x; /* c */"), 3);
    }

    #[test]
    fn last_index_skips_literals() {
        assert_eq!(last_index_outside_strings(r#"a, "b,c""#, b','), 1);
        assert_eq!(last_index_outside_strings("abc", b','), 3);
    }

    #[test]
    fn bracket_matching_is_self_inverse() {
        let text = "if (a) { f(b[1]); }";
        let open = text.find('{').unwrap();
        let close = text.rfind('}').unwrap();
        assert_eq!(match_forward(text, open), close);
        assert_eq!(match_backward(text, close), open);

        let paren = text.find("(b").unwrap();
        let paren_close = text.find(");").unwrap();
        assert_eq!(match_forward(text, paren), paren_close);
        assert_eq!(match_backward(text, paren_close), paren);
    }

    #[test]
    fn matching_ignores_delimiters_in_literals() {
        let text = r#"f("(", ')');"#;
        assert_eq!(match_forward(text, 1), 10);
        assert_eq!(match_backward(text, 10), 1);
    }

    #[test]
    fn unbalanced_returns_query_position() {
        assert_eq!(match_forward("int main() {", 11), 11);
        assert_eq!(match_backward("  x = 1; }", 9), 9);
        assert_eq!(match_forward("abc", 1), 1);
        assert_eq!(match_forward("abc", 10), 10);
        assert_eq!(match_backward("abc", 10), 10);
    }

    #[test]
    fn delimiter_inside_literal_has_no_match() {
        let text = r#"s = "{}";"#;
        assert_eq!(match_forward(text, 5), 5);
        assert_eq!(match_backward(text, 6), 6);
    }
}
