//! Braces left unbalanced on their own line.

use cbo_core::scanner::{last_index_outside_strings, match_backward, match_forward};
use cbo_core::{Diagnostics, Rule, RuleKind, SourceFile, StyleSettings};

use crate::flag_lines;

/// A `{` at the head of a line that stays open belongs at the end of the
/// previous line.
pub struct BraceAtLineHead;

impl Rule for BraceAtLineHead {
    fn kind(&self) -> RuleKind {
        RuleKind::BraceAtLineHead
    }

    fn check(&self, file: &SourceFile, _settings: &StyleSettings) -> Diagnostics {
        flag_lines(file, self.kind(), |line| {
            let head = line.head();
            line.head_byte() == Some(b'{') && match_forward(line.code(), head) == head
        })
    }
}

/// The last `}` of a line, when not at its head, must close a brace opened on
/// that same line.
pub struct BraceAtLineTail;

impl Rule for BraceAtLineTail {
    fn kind(&self) -> RuleKind {
        RuleKind::BraceAtLineTail
    }

    fn check(&self, file: &SourceFile, _settings: &StyleSettings) -> Diagnostics {
        flag_lines(file, self.kind(), |line| {
            if line.is_comment() {
                return false;
            }
            let code = line.code();
            let idx = last_index_outside_strings(code, b'}');
            idx < code.len() && idx != line.head() && match_backward(code, idx) == idx
        })
    }
}
