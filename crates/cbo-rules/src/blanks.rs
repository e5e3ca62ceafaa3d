//! Blank-line separation rules.
//!
//! Each rule compares a line with the one before it, some looking through
//! comment lines. Diagnostics point at the later line and carry the earlier
//! one as related context.

use cbo_core::{Diagnostic, Diagnostics, Line, Rule, RuleKind, SourceFile, StyleSettings};

/// Flag the second line of every adjacent pair matching `pred`, with the
/// first line as related context.
fn flag_pairs(
    file: &SourceFile,
    kind: RuleKind,
    pred: impl Fn(&Line, &Line) -> bool,
) -> Diagnostics {
    file.lines()
        .windows(2)
        .enumerate()
        .filter(|(_, pair)| pred(&pair[0], &pair[1]))
        .map(|(idx, _)| Diagnostic::new(kind, idx + 1).with_related(idx))
        .collect()
}

pub struct MultipleBlankLines;

impl Rule for MultipleBlankLines {
    fn kind(&self) -> RuleKind {
        RuleKind::MultipleBlankLines
    }

    fn check(&self, file: &SourceFile, _settings: &StyleSettings) -> Diagnostics {
        file.lines()
            .windows(2)
            .enumerate()
            .filter(|(_, pair)| pair[0].is_blank() && pair[1].is_blank())
            .map(|(idx, _)| Diagnostic::new(self.kind(), idx + 1))
            .collect()
    }
}

/// A closing brace at a line head needs a blank line above it. Comment lines
/// in between are looked through; macro continuations are exempt.
pub struct MissingBlankBeforeClosingBrace;

impl Rule for MissingBlankBeforeClosingBrace {
    fn kind(&self) -> RuleKind {
        RuleKind::MissingBlankBeforeClosingBrace
    }

    fn check(&self, file: &SourceFile, _settings: &StyleSettings) -> Diagnostics {
        let lines = file.lines();
        let mut diags = Diagnostics::new();
        for (idx, line) in lines.iter().enumerate() {
            if line.head_byte() != Some(b'}') {
                continue;
            }
            let Some(prev_idx) = lines[..idx].iter().rposition(|l| !l.is_comment()) else {
                continue;
            };
            let prev = &lines[prev_idx];
            if !prev.is_blank() && !prev.is_continued() {
                diags.push(Diagnostic::new(self.kind(), idx).with_related(prev_idx));
            }
        }
        diags
    }
}

pub struct MissingBlankAfterOpeningBrace;

impl Rule for MissingBlankAfterOpeningBrace {
    fn kind(&self) -> RuleKind {
        RuleKind::MissingBlankAfterOpeningBrace
    }

    fn check(&self, file: &SourceFile, _settings: &StyleSettings) -> Diagnostics {
        flag_pairs(file, self.kind(), |prev, cur| {
            !prev.is_comment() && prev.ends_with_code(b'{') && !cur.is_blank()
        })
    }
}

/// Comment lines after the brace are looked through.
pub struct MissingBlankAfterClosingBrace;

impl Rule for MissingBlankAfterClosingBrace {
    fn kind(&self) -> RuleKind {
        RuleKind::MissingBlankAfterClosingBrace
    }

    fn check(&self, file: &SourceFile, _settings: &StyleSettings) -> Diagnostics {
        let lines = file.lines();
        let mut diags = Diagnostics::new();
        for (idx, line) in lines.iter().enumerate() {
            if line.is_blank() {
                continue;
            }
            let Some(prev_idx) = lines[..idx].iter().rposition(|l| !l.is_comment()) else {
                continue;
            };
            if lines[prev_idx].ends_with_code(b'}') {
                diags.push(Diagnostic::new(self.kind(), idx).with_related(prev_idx));
            }
        }
        diags
    }
}

/// Comment blocks are separated from preceding code. Consecutive comment lines
/// form one block.
pub struct MissingBlankBeforeComment;

impl Rule for MissingBlankBeforeComment {
    fn kind(&self) -> RuleKind {
        RuleKind::MissingBlankBeforeComment
    }

    fn check(&self, file: &SourceFile, _settings: &StyleSettings) -> Diagnostics {
        flag_pairs(file, self.kind(), |prev, cur| {
            cur.is_comment() && !prev.is_blank() && !prev.is_comment() && !prev.is_continued()
        })
    }
}

/// Stacked labels sharing one body count as a single label.
pub struct MissingBlankBeforeCase;

impl Rule for MissingBlankBeforeCase {
    fn kind(&self) -> RuleKind {
        RuleKind::MissingBlankBeforeCase
    }

    fn check(&self, file: &SourceFile, _settings: &StyleSettings) -> Diagnostics {
        flag_pairs(file, self.kind(), |prev, cur| {
            cur.is_case_label()
                && !prev.is_blank()
                && !prev.is_comment()
                && !prev.is_preprocessor()
                && !prev.is_case_label()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::flagged;

    #[test]
    fn two_empty_lines_flag_the_second() {
        assert_eq!(flagged(&MultipleBlankLines, "\n\n"), vec![2]);
        assert_eq!(flagged(&MultipleBlankLines, "a\n\n  \n\t\nb\n"), vec![3, 4]);
        assert!(flagged(&MultipleBlankLines, "a\n\nb\n\nc\n").is_empty());
    }

    #[test]
    fn closing_brace_needs_blank_line_above() {
        let source = "int f() {\n\n  g();\n}\n";
        assert_eq!(flagged(&MissingBlankBeforeClosingBrace, source), vec![4]);

        let file = SourceFile::from_source("r.c", source).unwrap();
        let diags = MissingBlankBeforeClosingBrace.check(&file, &StyleSettings::default());
        assert_eq!(diags[0].related_line, Some(3));
    }

    #[test]
    fn closing_brace_looks_through_comments() {
        let clean = "int f() {\n\n  g();\n\n  // done\n}\n";
        assert!(flagged(&MissingBlankBeforeClosingBrace, clean).is_empty());

        let dirty = "int f() {\n\n  g();\n  // done\n}\n";
        assert_eq!(flagged(&MissingBlankBeforeClosingBrace, dirty), vec![5]);
    }

    #[test]
    fn closing_brace_after_macro_continuation_is_exempt() {
        let source = "#define BLOCK { \\\n  x = 1; \\\n}\n";
        assert!(flagged(&MissingBlankBeforeClosingBrace, source).is_empty());
    }

    #[test]
    fn opening_brace_needs_blank_line_below() {
        let source = "int f() {\n  g();\n\n}\nint h() { // body\n\n}\n";
        assert_eq!(flagged(&MissingBlankAfterOpeningBrace, source), vec![2]);
    }

    #[test]
    fn brace_inside_literal_does_not_count() {
        let source = "  puts(\"{\");\n  g();\n";
        assert!(flagged(&MissingBlankAfterOpeningBrace, source).is_empty());
    }

    #[test]
    fn closing_brace_needs_blank_line_below() {
        let source = "  if (a) {\n\n    b();\n\n  }\n  c();\n";
        assert_eq!(flagged(&MissingBlankAfterClosingBrace, source), vec![6]);
        assert!(flagged(&MissingBlankAfterClosingBrace, "}\n").is_empty());
    }

    #[test]
    fn closing_brace_looks_through_following_comments() {
        let source = "  }\n  // note\n  g();\n";
        assert_eq!(flagged(&MissingBlankAfterClosingBrace, source), vec![2, 3]);

        let clean = "  }\n\n  // note\n  g();\n";
        assert!(flagged(&MissingBlankAfterClosingBrace, clean).is_empty());
    }

    #[test]
    fn comment_block_needs_blank_line_above() {
        let source = "int a;\n// one\n// two\n\n// three\nint b;\n";
        assert_eq!(flagged(&MissingBlankBeforeComment, source), vec![2]);
    }

    #[test]
    fn case_label_needs_blank_line_above() {
        let source = "\
  switch (a) {

    case 1:
    case 2:
      b();
      break;
    default:
      break;

  }
";
        assert_eq!(flagged(&MissingBlankBeforeCase, source), vec![7]);
    }

    #[test]
    fn case_label_after_directive_is_exempt() {
        let source = "    case 1:\n      break;\n#ifdef X\n    case 2:\n#endif\n";
        assert!(flagged(&MissingBlankBeforeCase, source).is_empty());
    }
}
