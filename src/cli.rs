// src/cli.rs
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use url::Url;

use crate::config::consts::{TIMEOUT_SECS, WORKERS};
use crate::config::options::{AppOptions, ExportFormat, ExportOptions};
use crate::core::{html, Fetch, HttpFetcher};
use crate::error::{Error, Result};
use crate::file::{normalize_separators, write_export};
use crate::progress::Progress;
use crate::{scrape, specs};

#[derive(Debug, Parser)]
#[command(name = "volby_scrape", version, about = "Scrape a volby.cz district into one table: a row per municipality, a column per party")]
pub struct Args {
    /// District index page URL (asked for when omitted)
    pub url: Option<String>,

    /// Output file; extension follows --format unless one is given (asked for when omitted)
    #[arg(short, long)]
    pub out: Option<String>,

    #[arg(long, value_enum, default_value_t = Format::Csv)]
    pub format: Format,

    /// Overwrite an existing output file without asking
    #[arg(short, long)]
    pub force: bool,

    /// Parallel detail-page fetches; 1 keeps the run strictly sequential
    #[arg(short, long, default_value_t = WORKERS)]
    pub workers: usize,

    /// HTTP timeout in seconds
    #[arg(long, default_value_t = TIMEOUT_SECS)]
    pub timeout: u64,

    /// Print the municipalities found on the index page and exit
    #[arg(long)]
    pub list_links: bool,

    /// Debug-level console logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Also write a debug log to this file
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Csv,
    Tsv,
}

impl From<Format> for ExportFormat {
    fn from(f: Format) -> Self {
        match f { Format::Csv => ExportFormat::Csv, Format::Tsv => ExportFormat::Tsv }
    }
}

/// Console progress: one line per municipality.
pub struct CliProgress<W: Write> {
    out: W,
    total: usize,
    done: usize,
}

impl<W: Write> CliProgress<W> {
    pub fn new(out: W) -> Self { Self { out, total: 0, done: 0 } }
}

impl<W: Write> Progress for CliProgress<W> {
    fn begin(&mut self, total: usize) {
        self.total = total;
        let _ = writeln!(self.out, "Found {total} municipalities");
    }
    fn log(&mut self, msg: &str) {
        let _ = writeln!(self.out, "{msg}");
    }
    fn item_done(&mut self, _code: &str, name: &str) {
        self.done += 1;
        let _ = writeln!(self.out, "[{}/{}] Scraping municipality: {name}", self.done, self.total);
    }
    fn finish(&mut self) {
        let _ = self.out.flush();
    }
}

pub fn run(args: Args) -> Result<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stdout();

    let mut opts = AppOptions::default();
    opts.scrape.workers = args.workers;
    opts.scrape.timeout_secs = args.timeout;
    opts.export.format = args.format.into();
    opts.export.overwrite = args.force;

    greeting(&mut out)?;

    opts.scrape.index_url = match args.url {
        Some(u) => u,
        None => prompt(&mut input, &mut out, "Please enter the base link: ")?,
    };

    let fetcher = HttpFetcher::new(&opts.scrape)?;

    if args.list_links {
        return list_links(&opts.scrape.index_url, &fetcher, &mut out);
    }

    resolve_output(&mut input, &mut out, &mut opts.export, args.out)?;

    let mut progress = CliProgress::new(io::stdout());
    let table = scrape::assemble(&opts.scrape, &fetcher, Some(&mut progress))?;
    let path = write_export(&opts.export, &table)?;

    writeln!(out, "{}", "=".repeat(66))?;
    writeln!(out, "Finished! {} municipalities written to {}", table.len(), path.display())?;
    writeln!(out, "{}", "=".repeat(66))?;
    Ok(())
}

fn greeting<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", "=".repeat(46))?;
    writeln!(out, "volby_scrape {}", env!("CARGO_PKG_VERSION"))?;
    writeln!(out, "{}", "=".repeat(46))
}

fn list_links<F: Fetch, W: Write>(index_url: &str, fetcher: &F, out: &mut W) -> Result<()> {
    let url = Url::parse(index_url.trim())
        .map_err(|source| Error::InvalidUrl { url: s!(index_url), source })?;
    let text = fetcher.fetch(&url).map_err(|e| Error::fetch(&url, e))?;
    let links = specs::district::discover(&html::parse_page(&text), &url)?;
    for l in links {
        writeln!(out, "{},{},{}", l.code, l.name.as_deref().unwrap_or(""), l.url)?;
    }
    Ok(())
}

/// Ask until a non-empty answer arrives. EOF is an error, not an endless loop.
pub fn prompt<R: BufRead, W: Write>(input: &mut R, out: &mut W, question: &str) -> io::Result<String> {
    loop {
        write!(out, "{question}")?;
        out.flush()?;
        let mut line = s!();
        if input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"));
        }
        let answer = line.trim();
        if !answer.is_empty() {
            return Ok(s!(answer));
        }
    }
}

/// Y/N loop; anything else asks again.
pub fn confirm_overwrite<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> io::Result<bool> {
    loop {
        let answer = prompt(input, out, "This file already exists! Overwrite? Y/N ")?;
        match answer.to_ascii_lowercase().as_str() {
            "y" => return Ok(true),
            "n" => return Ok(false),
            _ => writeln!(out, "Invalid action. Enter only Y or N.")?,
        }
    }
}

/// Settle the output path before any network work starts.
/// Existing files are only replaced with `--force` or an explicit Y.
pub fn resolve_output<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    export: &mut ExportOptions,
    initial: Option<String>,
) -> io::Result<()> {
    const ASK: &str = "Please enter the name of the output file to be created: ";

    let name = match initial {
        Some(n) => n,
        None => prompt(input, out, ASK)?,
    };
    export.set_path(&normalize_separators(&name));

    while export.out_path().exists() && !export.overwrite {
        if confirm_overwrite(input, out)? {
            export.overwrite = true;
        } else {
            let name = prompt(input, out, ASK)?;
            export.set_path(&normalize_separators(&name));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn prompt_skips_blank_lines() {
        let mut input = Cursor::new("\n  \nhttps://volby.cz/x\n");
        let mut out = Vec::new();
        assert_eq!(prompt(&mut input, &mut out, "> ").unwrap(), "https://volby.cz/x");
        assert_eq!(String::from_utf8(out).unwrap(), "> > > ");
    }

    #[test]
    fn prompt_eof_is_error() {
        let mut input = Cursor::new("");
        let err = prompt(&mut input, &mut Vec::new(), "> ").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn confirm_retries_until_y_or_n() {
        let mut input = Cursor::new("maybe\nN\n");
        let mut out = Vec::new();
        assert!(!confirm_overwrite(&mut input, &mut out).unwrap());
        assert!(String::from_utf8(out).unwrap().contains("Enter only Y or N"));
    }

    #[test]
    fn resolve_output_new_file_needs_no_confirmation() {
        let dir = std::env::temp_dir().join("volby_cli_resolve_new");
        let _ = std::fs::remove_dir_all(&dir);
        let mut export = ExportOptions::default();
        let name = dir.join("benesov").to_string_lossy().into_owned();
        resolve_output(&mut Cursor::new(""), &mut Vec::new(), &mut export, Some(name)).unwrap();
        assert_eq!(export.out_path(), dir.join("benesov.csv"));
        assert!(!export.overwrite);
    }

    #[test]
    fn resolve_output_existing_file_asks_then_renames() {
        let dir = std::env::temp_dir().join("volby_cli_resolve_existing");
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("taken.csv"), "x").unwrap();

        let taken = dir.join("taken").to_string_lossy().into_owned();
        let fresh = dir.join("fresh").to_string_lossy().into_owned();
        let mut input = Cursor::new(format!("n\n{fresh}\n"));
        let mut export = ExportOptions::default();
        resolve_output(&mut input, &mut Vec::new(), &mut export, Some(taken)).unwrap();
        assert_eq!(export.out_path(), dir.join("fresh.csv"));
        assert!(!export.overwrite);
    }

    #[test]
    fn resolve_output_existing_file_yes_sets_overwrite() {
        let dir = std::env::temp_dir().join("volby_cli_resolve_yes");
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("taken.csv"), "x").unwrap();

        let taken = dir.join("taken").to_string_lossy().into_owned();
        let mut export = ExportOptions::default();
        resolve_output(&mut Cursor::new("y\n"), &mut Vec::new(), &mut export, Some(taken)).unwrap();
        assert!(export.overwrite);
    }

    #[test]
    fn args_parse_flags() {
        let a = Args::parse_from(["volby_scrape", "https://volby.cz/x", "-o", "out", "--format", "tsv", "-w", "4", "--force"]);
        assert_eq!(a.url.as_deref(), Some("https://volby.cz/x"));
        assert_eq!(a.format, Format::Tsv);
        assert_eq!(a.workers, 4);
        assert!(a.force);
        assert_eq!(ExportFormat::from(a.format), ExportFormat::Tsv);
    }

    #[test]
    fn cli_progress_counts() {
        let mut buf = Vec::new();
        {
            let mut p = CliProgress::new(&mut buf);
            p.begin(2);
            p.item_done("1", "Benešov");
            p.item_done("2", "Bernartice");
            p.finish();
        }
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("[1/2] Scraping municipality: Benešov"));
        assert!(text.contains("[2/2] Scraping municipality: Bernartice"));
    }
}
