//! Preprocessor directive classification.

use crate::scanner;

fn starts_directive(text: &str) -> bool {
    text.as_bytes().get(scanner::pos_head(text)) == Some(&b'#')
}

fn continues(text: &str) -> bool {
    text.as_bytes().last() == Some(&b'\\')
}

/// Whether the line at `index` is a directive, following backslash
/// continuations back to the line that opened it.
///
/// Walks backward one line per step, so it terminates for any `index`.
/// Out-of-range indices are never directives.
#[must_use]
pub fn is_preprocessor_line<S: AsRef<str>>(lines: &[S], index: usize) -> bool {
    let mut idx = index;
    loop {
        let Some(line) = lines.get(idx) else {
            return false;
        };
        if starts_directive(line.as_ref()) {
            return true;
        }
        if idx == 0 || !continues(lines[idx - 1].as_ref()) {
            return false;
        }
        idx -= 1;
    }
}

/// Classify every line in a single forward pass.
///
/// Equivalent to calling [`is_preprocessor_line`] on each index, without
/// re-walking long continuation chains.
#[must_use]
pub fn classify_lines<S: AsRef<str>>(lines: &[S]) -> Vec<bool> {
    let mut flags = Vec::with_capacity(lines.len());
    let mut previous: Option<(&str, bool)> = None;
    for line in lines {
        let text = line.as_ref();
        let flag = starts_directive(text)
            || previous.is_some_and(|(prev, prev_flag)| prev_flag && continues(prev));
        flags.push(flag);
        previous = Some((text, flag));
    }
    flags
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directive_at_head() {
        let lines = ["  #include <stdio.h>", "int x;"];
        assert!(is_preprocessor_line(&lines, 0));
        assert!(!is_preprocessor_line(&lines, 1));
    }

    #[test]
    fn continuation_propagates_forward() {
        let lines = [
            "#define MAX(a, b) \\",
            "  ((a) > (b) ? \\",
            "  (a) : (b))",
            "int y;",
        ];
        assert_eq!(classify_lines(&lines), vec![true, true, true, false]);
        for idx in 0..lines.len() {
            assert_eq!(is_preprocessor_line(&lines, idx), idx < 3);
        }
    }

    #[test]
    fn backslash_outside_directive_is_not_preprocessor() {
        let lines = ["x = 1; \\", "y = 2;"];
        assert_eq!(classify_lines(&lines), vec![false, false]);
        assert!(!is_preprocessor_line(&lines, 1));
    }

    #[test]
    fn out_of_range_is_false() {
        let lines: [&str; 0] = [];
        assert!(!is_preprocessor_line(&lines, 0));
        assert!(classify_lines(&lines).is_empty());
    }
}
