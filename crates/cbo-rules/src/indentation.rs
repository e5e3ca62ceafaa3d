//! Indentation check against the levels inferred at load time.

use cbo_core::{Diagnostic, Diagnostics, Rule, RuleKind, SourceFile, StyleSettings};

use crate::paren_close;

/// Each line starts at its expected level times the indent width.
///
/// Directives are skipped. A comment aligns with the next line when that line
/// is not blank. Lines continuing an open parenthesis are left to
/// `unaligned-args`.
pub struct BadIndent;

impl Rule for BadIndent {
    fn kind(&self) -> RuleKind {
        RuleKind::BadIndent
    }

    fn check(&self, file: &SourceFile, settings: &StyleSettings) -> Diagnostics {
        let lines = file.lines();
        let mut diags = Diagnostics::new();
        let mut idx = 0;
        while idx < lines.len() {
            let line = &lines[idx];
            if line.is_blank() || line.is_preprocessor() {
                idx += 1;
                continue;
            }

            let want = match lines.get(idx + 1) {
                Some(next) if line.is_comment() && !next.is_blank() => next.head(),
                _ => settings.columns(line.expected_indent()),
            };
            if line.head() != want {
                diags.push(Diagnostic::new(self.kind(), idx));
            }

            if line.is_comment() {
                idx += 1;
                continue;
            }
            idx = match paren_close(lines, idx) {
                Some(close) => close.line + 1,
                None => idx + 1,
            };
        }
        diags
    }

    fn requires_clean_file(&self) -> bool {
        true
    }
}
