// src/config/options.rs
use std::ffi::OsString;
use std::path::{ Path, PathBuf };
use super::consts::*;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AppOptions {
    pub scrape: ScrapeOptions,
    pub export: ExportOptions,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScrapeOptions {
    /// District index page, e.g. `https://volby.cz/pls/ps2017nss/ps32?xjazyk=CZ&xkraj=2&xnumnuts=2101`
    pub index_url: String,
    /// 1 = strictly sequential; more fetches detail pages in parallel (row order is kept)
    pub workers: usize,
    pub request_pause_ms: u64,
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for ScrapeOptions {
    fn default() -> Self {
        Self {
            index_url: s!(),
            workers: WORKERS,
            request_pause_ms: REQUEST_PAUSE_MS,
            timeout_secs: TIMEOUT_SECS,
            user_agent: s!(USER_AGENT),
        }
    }
}

impl ScrapeOptions {
    pub fn workers(&self) -> usize {
        self.workers.clamp(1, MAX_WORKERS)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExportFormat {
    #[default]
    Csv,
    Tsv,
}

impl ExportFormat {
    pub fn ext(&self) -> &'static str {
        match self { ExportFormat::Csv => "csv", ExportFormat::Tsv => "tsv" }
    }
    pub fn delim(&self) -> u8 {
        match self { ExportFormat::Csv => b',', ExportFormat::Tsv => b'\t' }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExportOptions {
    pub format: ExportFormat,
    out_path: OutputPath,
    /// Replace an existing file without asking
    pub overwrite: bool,
}

impl ExportOptions {
    /// Final file path: `<dir>/<stem>.<ext>`.
    /// A user-typed extension wins over the format's default one.
    pub fn out_path(&self) -> PathBuf {
        let stem = self.out_path.file_stem.to_string_lossy();
        let ext = match &self.out_path.ext {
            Some(e) => e.to_string_lossy().into_owned(),
            None => s!(self.format.ext()),
        };
        self.out_path.dir.join(join!(&*stem, ".", &ext))
    }

    /// Parse user text into dir + stem (+ explicit extension, if typed).
    /// Only `EXPORT_EXTS` count as typed; `okres.benesov` is a stem and still gets `.csv`.
    pub fn set_path(&mut self, text: &str) {
        let p = Path::new(text.trim());
        self.out_path.dir = p.parent().map(Path::to_path_buf).unwrap_or_default();

        let typed = p
            .extension()
            .filter(|e| e.to_str().is_some_and(|e| EXPORT_EXTS.iter().any(|k| k.eq_ignore_ascii_case(e))));
        let stem = if typed.is_some() { p.file_stem() } else { p.file_name() };
        if let Some(stem) = stem {
            self.out_path.file_stem = stem.to_os_string();
        }
        self.out_path.ext = typed.map(|e| e.to_os_string());
    }

    pub fn delim(&self) -> u8 {
        self.format.delim()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct OutputPath {
    dir: PathBuf,
    file_stem: OsString, // without extension
    ext: Option<OsString>,
}

impl Default for OutputPath {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(DEFAULT_OUT_DIR),
            file_stem: OsString::from(DEFAULT_FILE),
            ext: None,
        }
    }
}
