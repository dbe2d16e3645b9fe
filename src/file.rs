// src/file.rs

use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use tracing::info;

use crate::config::options::ExportOptions;
use crate::csv::write_table;
use crate::data::ResultTable;
use crate::error::{Error, Result};

/// Write the finished table to `export.out_path()`. Returns the path written.
///
/// Refuses to replace an existing file unless `export.overwrite` is set; asking the
/// user is the caller's job. The table is complete before this is called, so a failed
/// scrape never leaves a file behind.
pub fn write_export(export: &ExportOptions, table: &ResultTable) -> Result<PathBuf> {
    let path = export.out_path();

    if path.exists() && !export.overwrite {
        return Err(Error::Io(std::io::Error::new(
            std::io::ErrorKind::AlreadyExists,
            format!("{} already exists", path.display()),
        )));
    }

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }

    let file = File::create(&path)?; // truncate/overwrite
    let mut out = BufWriter::new(file);
    write_table(&mut out, table, export.delim())?;
    out.flush()?;

    info!(path = %path.display(), rows = table.len(), "table written");
    Ok(path)
}

pub fn ensure_directory(dir: &Path) -> Result<()> {
    if dir.exists() && !dir.is_dir() {
        return Err(Error::Io(std::io::Error::new(
            std::io::ErrorKind::NotADirectory,
            format!("Path exists but is not a directory: {}", dir.display()),
        )));
    }
    if !dir.exists() { fs::create_dir_all(dir)?; }
    Ok(())
}

pub fn normalize_separators(p: &str) -> String {
    let sep = std::path::MAIN_SEPARATOR;
    p.chars().map(|c| if c=='/'||c=='\\' { sep } else { c }).collect()
}
