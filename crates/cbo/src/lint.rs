//! Check command implementation

use anyhow::Result;
use camino::Utf8PathBuf;
use cbo_core::{Regime, SourceFile, Tally};
use cbo_rules::init_regime;
use std::io::{self, Write};

use crate::cli::{Args, OutputFormat};
use crate::config::{load_config, resolve_settings};
use crate::files::{collect_all_files, detect_file_types};
use crate::output::{SerializableDiagnostic, print_file};

/// Resolve configuration, check every file and return the process exit code.
pub fn run_once(args: Args) -> Result<i32> {
    let cfg = load_config(args.config.as_ref())?;
    let format = if args.json {
        OutputFormat::Json
    } else {
        cfg.format.unwrap_or_default()
    };
    let settings = resolve_settings(&args)?;

    let files = collect_all_files(&args.paths)?;
    if files.is_empty() {
        eprintln!("No files found");
        return Ok(0);
    }

    let types = detect_file_types(&files);
    tracing::info!(
        "checking {} file(s): {} header(s), {} source(s), {} other",
        files.len(),
        types.headers,
        types.bodies,
        types.unknown
    );

    let regime = init_regime(settings);
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let tally = if args.list_file {
        check_files(&regime, &files, format, &mut io::sink(), &mut out)?
    } else {
        check_files(&regime, &files, format, &mut out, &mut io::sink())?
    };
    out.flush()?;
    Ok(tally.exit_code())
}

/// Check `files` in order.
///
/// Per-file detail and the final summary go to `details`; the path of every
/// failing file goes to `listing`. Either may be [`io::sink`].
pub fn check_files(
    regime: &Regime,
    files: &[Utf8PathBuf],
    format: OutputFormat,
    details: &mut dyn Write,
    listing: &mut dyn Write,
) -> Result<Tally> {
    let mut tally = Tally::new();
    let mut json_out: Vec<SerializableDiagnostic> = Vec::new();

    for path in files {
        let mut file = match SourceFile::load(path) {
            Ok(file) => file,
            Err(err) => {
                tracing::warn!("{err}");
                tally.record_load_failure();
                if format == OutputFormat::Human {
                    writeln!(details, "Could not load [{path}]: {err}")?;
                }
                writeln!(listing, "{path}")?;
                continue;
            }
        };

        regime.enforce(&mut file);
        tally.record(&file);
        match format {
            OutputFormat::Human => print_file(&file, details)?,
            OutputFormat::Json => json_out.extend(SerializableDiagnostic::from_file(&file)),
        }
        if file.has_diagnostics() {
            writeln!(listing, "{path}")?;
        }
    }

    match format {
        OutputFormat::Human => writeln!(details, "{}", tally.summary())?,
        OutputFormat::Json => writeln!(details, "{}", serde_json::to_string_pretty(&json_out)?)?,
    }
    Ok(tally)
}
