use cbo_core::{Diagnostics, Line, Rule, RuleKind, SourceFile, StyleSettings};

use crate::flag_lines;

/// `#define` names are written in capitals.
pub struct MacroNameNotCapitalized;

impl Rule for MacroNameNotCapitalized {
    fn kind(&self) -> RuleKind {
        RuleKind::MacroNameNotCapitalized
    }

    fn check(&self, file: &SourceFile, _settings: &StyleSettings) -> Diagnostics {
        flag_lines(file, self.kind(), has_lowercase_macro_name)
    }
}

fn has_lowercase_macro_name(line: &Line) -> bool {
    let Some(rest) = line.rest().strip_prefix("#define") else {
        return false;
    };
    if !rest.starts_with([' ', '\t']) {
        return false;
    }
    let name = rest.trim_start_matches([' ', '\t']);
    let end = name.find([' ', '\t', '(']).unwrap_or(name.len());
    name[..end].bytes().any(|b| b.is_ascii_lowercase())
}
