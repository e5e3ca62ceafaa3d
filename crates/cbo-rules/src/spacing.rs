//! Spacing around punctuation and operators.
//!
//! Only code bytes between the head and any trailing comment are examined;
//! literals and comments never raise spacing diagnostics.

use cbo_core::scanner::is_blank;
use cbo_core::{Diagnostics, Line, Rule, RuleKind, SourceFile, StyleSettings};

use crate::{code_bytes, flag_occurrences, is_ident};

/// Binary operators that must be surrounded by single spaces.
const OPERATORS: &[u8] = b"+-/|";

/// Bytes after which `+` and `-` are prefix operators.
const UNARY_CONTEXT: &[u8] = b"(,=[{?:<>!&|+-*/%;~^";

/// Count code bytes of `line` for which `bad` holds.
fn count_code(line: &Line, bad: impl Fn(&[u8], usize, u8) -> bool) -> usize {
    if line.is_blank() || line.is_comment() {
        return 0;
    }
    let bytes = line.bytes();
    code_bytes(line)
        .filter(|&(idx, byte)| bad(bytes, idx, byte))
        .count()
}

pub struct SpaceAroundComma;

impl Rule for SpaceAroundComma {
    fn kind(&self) -> RuleKind {
        RuleKind::SpaceAroundComma
    }

    fn check(&self, file: &SourceFile, _settings: &StyleSettings) -> Diagnostics {
        flag_occurrences(file, self.kind(), |line| {
            let head = line.head();
            count_code(line, |bytes, idx, byte| {
                byte == b','
                    && ((idx > head && is_blank(bytes[idx - 1]))
                        || bytes.get(idx + 1).is_some_and(|&next| !is_blank(next)))
            })
        })
    }
}

pub struct SpaceAroundSemicolon;

impl Rule for SpaceAroundSemicolon {
    fn kind(&self) -> RuleKind {
        RuleKind::SpaceAroundSemicolon
    }

    fn check(&self, file: &SourceFile, _settings: &StyleSettings) -> Diagnostics {
        flag_occurrences(file, self.kind(), |line| {
            let head = line.head();
            count_code(line, |bytes, idx, byte| {
                byte == b';' && idx > head && is_blank(bytes[idx - 1])
            })
        })
    }
}

/// `+ - / |` as binary operators need one space on each side. Directive lines
/// are not checked.
pub struct SpaceAroundOperator;

impl Rule for SpaceAroundOperator {
    fn kind(&self) -> RuleKind {
        RuleKind::SpaceAroundOperator
    }

    fn check(&self, file: &SourceFile, _settings: &StyleSettings) -> Diagnostics {
        flag_occurrences(file, self.kind(), |line| {
            if line.is_preprocessor() {
                return 0;
            }
            let head = line.head();
            count_code(line, |bytes, idx, byte| {
                OPERATORS.contains(&byte) && !is_spaced_operator(bytes, idx, head)
            })
        })
    }
}

fn is_spaced_operator(bytes: &[u8], idx: usize, head: usize) -> bool {
    let op = bytes[idx];
    let prev = idx.checked_sub(1).map(|i| bytes[i]);
    let next = bytes.get(idx + 1).copied();

    // ++ -- || // += -= |= /= ->
    if prev == Some(op) || next == Some(op) || next == Some(b'=') {
        return true;
    }
    if op == b'-' && next == Some(b'>') {
        return true;
    }
    if op == b'/' && (prev == Some(b'*') || next == Some(b'*')) {
        return true;
    }
    if matches!(op, b'+' | b'-') && (is_unary(bytes, idx, head) || is_exponent_sign(bytes, idx)) {
        return true;
    }

    let before = idx == head || prev == Some(b' ');
    let after = next.is_none_or(|b| b == b' ');
    before && after
}

fn is_unary(bytes: &[u8], idx: usize, head: usize) -> bool {
    let before = &bytes[head..idx];
    let Some(last) = before.iter().rposition(|&b| !is_blank(b)) else {
        return true;
    };
    if UNARY_CONTEXT.contains(&before[last]) {
        return true;
    }
    let word_start = before[..=last]
        .iter()
        .rposition(|&b| !is_ident(b))
        .map_or(0, |p| p + 1);
    matches!(&before[word_start..=last], b"return" | b"case")
}

/// Sign of a floating-point exponent, as in `1e+10`.
fn is_exponent_sign(bytes: &[u8], idx: usize) -> bool {
    let Some(e) = idx.checked_sub(1) else {
        return false;
    };
    if !matches!(bytes[e], b'e' | b'E') {
        return false;
    }
    let start = bytes[..e]
        .iter()
        .rposition(|&b| !(is_ident(b) || b == b'.'))
        .map_or(0, |p| p + 1);
    start < e && bytes[start].is_ascii_digit()
}

pub struct SpaceBeforeOpeningBrace;

impl Rule for SpaceBeforeOpeningBrace {
    fn kind(&self) -> RuleKind {
        RuleKind::SpaceBeforeOpeningBrace
    }

    fn check(&self, file: &SourceFile, _settings: &StyleSettings) -> Diagnostics {
        flag_occurrences(file, self.kind(), |line| {
            let head = line.head();
            count_code(line, |bytes, idx, byte| {
                byte == b'{' && idx > head && !matches!(bytes[idx - 1], b' ' | b'{')
            })
        })
    }
}

/// A member-access dot must directly follow an identifier, `]` or `)`.
pub struct CharBeforeDot;

impl Rule for CharBeforeDot {
    fn kind(&self) -> RuleKind {
        RuleKind::CharBeforeDot
    }

    fn check(&self, file: &SourceFile, _settings: &StyleSettings) -> Diagnostics {
        flag_occurrences(file, self.kind(), |line| {
            let head = line.head();
            count_code(line, |bytes, idx, byte| {
                if byte != b'.' || idx <= head {
                    return false;
                }
                let prev = bytes[idx - 1];
                if prev == b'.' || bytes.get(idx + 1) == Some(&b'.') {
                    return false;
                }
                !(is_ident(prev) || prev == b']' || prev == b')')
            })
        })
    }
}
