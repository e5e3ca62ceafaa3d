//! File collection and type detection utilities

use anyhow::{Context, Result};
use camino::Utf8PathBuf;
use cbo_core::FileType;
use ignore::WalkBuilder;
use std::fs;

#[derive(Debug, Default, PartialEq, Eq)]
pub struct FileTypes {
    pub headers: usize,
    pub bodies: usize,
    pub unknown: usize,
}

/// Expand the supplied paths into the ordered list of files to check.
///
/// Every path must exist and explicit files must be readable; otherwise the
/// run fails before anything is checked. Explicit files are kept whatever
/// their extension. Directories are walked in name order with gitignore
/// filtering and contribute only C headers and bodies.
pub fn collect_all_files(paths: &[Utf8PathBuf]) -> Result<Vec<Utf8PathBuf>> {
    let mut files = Vec::new();
    for path in paths {
        let metadata = fs::metadata(path).with_context(|| format!("The path [{path}] is incorrect"))?;
        if metadata.is_file() {
            fs::File::open(path).with_context(|| format!("The path [{path}] is incorrect"))?;
            files.push(path.clone());
            continue;
        }

        let walker = WalkBuilder::new(path)
            .standard_filters(true)
            .sort_by_file_name(|a, b| a.cmp(b))
            .build();

        for result in walker {
            let entry = result?;
            if !entry.file_type().is_some_and(|ft| ft.is_file()) {
                continue;
            }
            let p = Utf8PathBuf::from_path_buf(entry.path().to_owned())
                .map_err(|_| anyhow::anyhow!("non-utf8 path: {}", entry.path().display()))?;
            if FileType::from_path(&p).is_checked() {
                files.push(p);
            }
        }
    }
    Ok(files)
}

pub fn detect_file_types(files: &[Utf8PathBuf]) -> FileTypes {
    let mut types = FileTypes::default();
    for file in files {
        match FileType::from_path(file) {
            FileType::CHeader => types.headers += 1,
            FileType::CBody => types.bodies += 1,
            FileType::Unknown => types.unknown += 1,
        }
    }
    types
}
