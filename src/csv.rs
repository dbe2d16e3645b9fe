// src/csv.rs
use std::io::Write;

use csv::{QuoteStyle, WriterBuilder};

use crate::data::ResultTable;
use crate::error::Result;

/* ---------------- Writing ---------------- */

/// Header + rows to any writer, one record per line, fields as text.
pub fn write_table<W: Write>(w: W, table: &ResultTable, delim: u8) -> Result<()> {
    let mut out = WriterBuilder::new()
        .delimiter(delim)
        .quote_style(QuoteStyle::Necessary)
        .from_writer(w);

    for row in table.all_rows() {
        out.write_record(row)?;
    }
    out.flush()?;
    Ok(())
}

/* ---------------- Parsing ---------------- */

/// Rows back out of delimited text; header row included.
pub fn parse_rows(text: &str, delim: u8) -> Result<Vec<Vec<String>>> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(delim)
        .has_headers(false)
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    for rec in rdr.records() {
        rows.push(rec?.iter().map(|f| s!(f)).collect());
    }
    Ok(rows)
}
