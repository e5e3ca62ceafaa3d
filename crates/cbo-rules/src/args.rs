//! Argument layout: one argument per line, names aligned in a column.

use cbo_core::scanner::is_blank;
use cbo_core::{Diagnostic, Diagnostics, Line, Rule, RuleKind, SourceFile, StyleSettings};

use crate::{code_bytes, flag_occurrences, is_ident, paren_close};

/// Every comma separating arguments must end its line. Commas inside
/// brackets, braces or the arguments of an all-caps macro are allowed.
pub struct MultipleArgsPerLine;

impl Rule for MultipleArgsPerLine {
    fn kind(&self) -> RuleKind {
        RuleKind::MultipleArgsPerLine
    }

    fn check(&self, file: &SourceFile, _settings: &StyleSettings) -> Diagnostics {
        flag_occurrences(file, self.kind(), inner_commas)
    }
}

fn inner_commas(line: &Line) -> usize {
    if line.is_blank() || line.is_comment() || line.is_preprocessor() {
        return 0;
    }
    let bytes = line.bytes();
    let tail = line.code_tail();

    let mut brackets = 0i32;
    let mut braces = 0i32;
    // One entry per open parenthesis: whether it belongs to a macro call.
    let mut parens: Vec<bool> = Vec::new();
    let mut count = 0;
    for (idx, byte) in code_bytes(line) {
        match byte {
            b'(' => parens.push(is_macro_call(bytes, idx)),
            b')' => {
                parens.pop();
            }
            b'[' => brackets += 1,
            b']' => brackets -= 1,
            b'{' => braces += 1,
            b'}' => braces -= 1,
            b',' if Some(idx) != tail
                && brackets <= 0
                && braces <= 0
                && !parens.contains(&true) =>
            {
                count += 1;
            }
            _ => {}
        }
    }
    count
}

/// The identifier before the parenthesis at `open` is an all-caps macro name.
fn is_macro_call(bytes: &[u8], open: usize) -> bool {
    let before = &bytes[..open];
    let end = before
        .iter()
        .rposition(|&b| !is_blank(b))
        .map_or(0, |p| p + 1);
    let start = before[..end]
        .iter()
        .rposition(|&b| !is_ident(b))
        .map_or(0, |p| p + 1);
    let name = &before[start..end];
    name.first().is_some_and(|b| !b.is_ascii_digit())
        && name.iter().any(u8::is_ascii_uppercase)
        && !name.iter().any(u8::is_ascii_lowercase)
}

/// When a line at column 0 ends with `(`, the argument names on the following
/// lines start in the same column.
pub struct UnalignedArgs;

impl Rule for UnalignedArgs {
    fn kind(&self) -> RuleKind {
        RuleKind::UnalignedArgs
    }

    fn check(&self, file: &SourceFile, _settings: &StyleSettings) -> Diagnostics {
        let lines = file.lines();
        let mut diags = Diagnostics::new();
        for (idx, header) in lines.iter().enumerate() {
            if header.head() != 0
                || header.is_blank()
                || header.is_comment()
                || header.is_preprocessor()
                || !header.ends_with_code(b'(')
            {
                continue;
            }
            let Some(close) = paren_close(lines, idx) else {
                continue;
            };

            let mut reference: Option<Option<usize>> = None;
            for (arg_idx, arg) in lines.iter().enumerate().take(close.line + 1).skip(idx + 1) {
                if arg.is_blank() || arg.is_comment() {
                    continue;
                }
                let end = if arg_idx == close.line {
                    close.column.unwrap_or_else(|| arg.code_end())
                } else {
                    arg.code_end()
                };
                let column = name_column(arg, end);
                match reference {
                    None => reference = Some(column),
                    Some(expected) if expected != column => {
                        diags.push(Diagnostic::new(self.kind(), arg_idx));
                    }
                    Some(_) => {}
                }
            }
        }
        diags
    }
}

/// Position of the last space inside the argument text ending at `end`.
fn name_column(line: &Line, end: usize) -> Option<usize> {
    let segment = &line.bytes()[..end];
    let trimmed = segment
        .iter()
        .rposition(|&b| !is_blank(b))
        .map_or(0, |p| p + 1);
    segment[..trimmed].iter().rposition(|&b| b == b' ')
}
