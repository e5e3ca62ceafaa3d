//! Checks on one physical line at a time.

use cbo_core::scanner::is_blank;
use cbo_core::{Diagnostics, Rule, RuleKind, SourceFile, StyleSettings};

use crate::flag_lines;

pub struct LineTooLong;

impl Rule for LineTooLong {
    fn kind(&self) -> RuleKind {
        RuleKind::LineTooLong
    }

    fn check(&self, file: &SourceFile, settings: &StyleSettings) -> Diagnostics {
        flag_lines(file, self.kind(), |line| line.len() > settings.max_line_length)
    }
}

pub struct TrailingWhitespace;

impl Rule for TrailingWhitespace {
    fn kind(&self) -> RuleKind {
        RuleKind::TrailingWhitespace
    }

    fn check(&self, file: &SourceFile, _settings: &StyleSettings) -> Diagnostics {
        flag_lines(file, self.kind(), |line| {
            line.bytes().last().is_some_and(|&b| is_blank(b))
        })
    }
}

/// Tabs anywhere in the leading whitespace.
pub struct TabIndent;

impl Rule for TabIndent {
    fn kind(&self) -> RuleKind {
        RuleKind::TabIndent
    }

    fn check(&self, file: &SourceFile, _settings: &StyleSettings) -> Diagnostics {
        flag_lines(file, self.kind(), |line| {
            line.bytes()[..line.head()].contains(&b'\t')
        })
    }
}
