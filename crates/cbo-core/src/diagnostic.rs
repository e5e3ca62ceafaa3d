//! Rule identifiers and the violations they record.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed set of style rules a file can violate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RuleKind {
    LineTooLong,
    TrailingWhitespace,
    MissingBlankBeforeClosingBrace,
    MissingBlankAfterOpeningBrace,
    MissingBlankAfterClosingBrace,
    SpaceAroundComma,
    SpaceAroundSemicolon,
    SpaceAroundOperator,
    MultipleBlankLines,
    BraceAtLineHead,
    BraceAtLineTail,
    CharBeforeDot,
    SpaceBeforeOpeningBrace,
    MissingBlankBeforeComment,
    BadIndent,
    MultipleArgsPerLine,
    UnalignedArgs,
    TabIndent,
    MissingBlankBeforeCase,
    MacroNameNotCapitalized,
}

impl RuleKind {
    pub const ALL: [Self; 20] = [
        Self::LineTooLong,
        Self::TrailingWhitespace,
        Self::MissingBlankBeforeClosingBrace,
        Self::MissingBlankAfterOpeningBrace,
        Self::MissingBlankAfterClosingBrace,
        Self::SpaceAroundComma,
        Self::SpaceAroundSemicolon,
        Self::SpaceAroundOperator,
        Self::MultipleBlankLines,
        Self::BraceAtLineHead,
        Self::BraceAtLineTail,
        Self::CharBeforeDot,
        Self::SpaceBeforeOpeningBrace,
        Self::MissingBlankBeforeComment,
        Self::BadIndent,
        Self::MultipleArgsPerLine,
        Self::UnalignedArgs,
        Self::TabIndent,
        Self::MissingBlankBeforeCase,
        Self::MacroNameNotCapitalized,
    ];

    /// Stable kebab-case identifier, used in config files and JSON output.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::LineTooLong => "line-too-long",
            Self::TrailingWhitespace => "trailing-whitespace",
            Self::MissingBlankBeforeClosingBrace => "missing-blank-before-closing-brace",
            Self::MissingBlankAfterOpeningBrace => "missing-blank-after-opening-brace",
            Self::MissingBlankAfterClosingBrace => "missing-blank-after-closing-brace",
            Self::SpaceAroundComma => "space-around-comma",
            Self::SpaceAroundSemicolon => "space-around-semicolon",
            Self::SpaceAroundOperator => "space-around-operator",
            Self::MultipleBlankLines => "multiple-blank-lines",
            Self::BraceAtLineHead => "brace-at-line-head",
            Self::BraceAtLineTail => "brace-at-line-tail",
            Self::CharBeforeDot => "char-before-dot",
            Self::SpaceBeforeOpeningBrace => "space-before-opening-brace",
            Self::MissingBlankBeforeComment => "missing-blank-before-comment",
            Self::BadIndent => "bad-indent",
            Self::MultipleArgsPerLine => "multiple-args-per-line",
            Self::UnalignedArgs => "unaligned-args",
            Self::TabIndent => "tab-indent",
            Self::MissingBlankBeforeCase => "missing-blank-before-case",
            Self::MacroNameNotCapitalized => "macro-name-not-capitalized",
        }
    }

    /// Human-readable message, rendered without the final period.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::LineTooLong => "Line too long",
            Self::TrailingWhitespace => "Trailing whitespace at end of line",
            Self::MissingBlankBeforeClosingBrace => "Missing blank line before closing brace",
            Self::MissingBlankAfterOpeningBrace => "Missing blank line after opening brace",
            Self::MissingBlankAfterClosingBrace => "Missing blank line after closing brace",
            Self::SpaceAroundComma => "Comma must be followed by a space and not preceded by one",
            Self::SpaceAroundSemicolon => "Semicolon must not be preceded by a space",
            Self::SpaceAroundOperator => "Operator must be surrounded by spaces",
            Self::MultipleBlankLines => "Multiple consecutive blank lines",
            Self::BraceAtLineHead => "Opening brace must be at the end of the previous line",
            Self::BraceAtLineTail => "Closing brace must be on its own line",
            Self::CharBeforeDot => "Unexpected character before dot",
            Self::SpaceBeforeOpeningBrace => "Opening brace must be preceded by a space",
            Self::MissingBlankBeforeComment => "Missing blank line before comment",
            Self::BadIndent => "Bad indentation",
            Self::MultipleArgsPerLine => "Only one argument per line",
            Self::UnalignedArgs => "Arguments are not aligned",
            Self::TabIndent => "Tab used for indentation",
            Self::MissingBlankBeforeCase => "Missing blank line before case",
            Self::MacroNameNotCapitalized => "Macro name must be capitalized",
        }
    }

    #[must_use]
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.id() == id)
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// One recorded violation. The owning [`crate::SourceFile`] holds the line text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub rule: RuleKind,
    /// 1-based line number of the offending line.
    pub line: usize,
    /// 1-based line number of the line the violation is relative to, for
    /// rules that compare two lines.
    pub related_line: Option<usize>,
}

impl Diagnostic {
    /// Create a diagnostic for the line at 0-based `index`.
    #[must_use]
    pub const fn new(rule: RuleKind, index: usize) -> Self {
        Self {
            rule,
            line: index + 1,
            related_line: None,
        }
    }

    /// Attach the line at 0-based `index` as context.
    #[must_use]
    pub const fn with_related(mut self, index: usize) -> Self {
        self.related_line = Some(index + 1);
        self
    }

    /// 0-based index of the offending line.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.line - 1
    }
}

pub type Diagnostics = Vec<Diagnostic>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_round_trip_through_from_id() {
        for kind in RuleKind::ALL {
            assert_eq!(RuleKind::from_id(kind.id()), Some(kind));
        }
        assert_eq!(RuleKind::from_id("no-such-rule"), None);
    }

    #[test]
    fn serde_name_matches_id() {
        let json = serde_json_like(RuleKind::MissingBlankBeforeCase);
        assert_eq!(json, "missing-blank-before-case");
    }

    fn serde_json_like(kind: RuleKind) -> String {
        #[derive(Serialize)]
        struct Wrapper {
            rule: RuleKind,
        }
        let text = toml::to_string(&Wrapper { rule: kind }).unwrap();
        text.trim()
            .trim_start_matches("rule = ")
            .trim_matches('"')
            .to_string()
    }

    #[test]
    fn diagnostic_numbers_are_one_based() {
        let diag = Diagnostic::new(RuleKind::BadIndent, 0).with_related(3);
        assert_eq!(diag.line, 1);
        assert_eq!(diag.index(), 0);
        assert_eq!(diag.related_line, Some(4));
    }
}
