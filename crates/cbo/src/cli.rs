//! CLI argument parsing

use camino::Utf8PathBuf;
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Human,
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "cbo", version, about = "Style checker for C sources and headers")]
pub struct Args {
    /// Files or directories to check. Directories contribute their .c and .h files.
    #[arg(required = true)]
    pub paths: Vec<Utf8PathBuf>,

    /// Print only the paths of files that fail, one per line
    #[arg(long, alias = "listFile")]
    pub list_file: bool,

    /// Output JSON instead of human format
    #[arg(long)]
    pub json: bool,

    /// Optional config file (TOML only). Default: .cbo.toml if present.
    #[arg(long)]
    pub config: Option<Utf8PathBuf>,

    /// Override the maximum line length from the config file
    #[arg(long, value_name = "N")]
    pub max_line_length: Option<usize>,
}

/// Rewrite the historical single-dash spellings into ones clap understands.
pub fn normalize_legacy_flags<I>(args: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    args.into_iter()
        .map(|arg| match arg.as_str() {
            "-help" => "--help".to_string(),
            "-listFile" => "--list-file".to_string(),
            _ => arg,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Args, clap::Error> {
        let args = args.iter().map(ToString::to_string);
        Args::try_parse_from(normalize_legacy_flags(args))
    }

    #[test]
    fn legacy_list_flag_is_accepted() {
        let args = parse(&["cbo", "-listFile", "a.c", "b.h"]).unwrap();
        assert!(args.list_file);
        assert_eq!(args.paths, vec![Utf8PathBuf::from("a.c"), Utf8PathBuf::from("b.h")]);
    }

    #[test]
    fn legacy_help_flag_prints_help() {
        let err = parse(&["cbo", "-help"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn paths_are_required() {
        assert!(parse(&["cbo", "--json"]).is_err());
    }

    #[test]
    fn overrides_parse() {
        let args = parse(&["cbo", "--json", "--max-line-length", "100", "src"]).unwrap();
        assert!(args.json);
        assert!(!args.list_file);
        assert_eq!(args.max_line_length, Some(100));
    }
}
