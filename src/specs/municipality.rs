// src/specs/municipality.rs
//
// Municipality detail page (volby.cz `ps311`) → party schema + one record.
//
// Page shape:
// - <h3>Obec: Benešov</h3> in the heading block above the statistics table
// - <table id="ps311_t1">: two header rows, then the data row;
//   td 3 = registered voters, td 4 = envelopes issued, td 7 = valid votes
// - two party tables, segments t1/t2:
//   name cells  headers="tNsa1 tNsb2"
//   vote cells  headers="tNsa2 tNsb3" class="cislo"
//   uneven tables are padded with class="hidden_td" cells
//
// Statistics are read by position, parties and votes by attribute. The page gives no
// stable attributes for the statistics cells, so the two strategies stay separate.

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use crate::config::consts::*;
use crate::core::html::{self, Missing, cell_at, cells_by_headers, has_class, table_by_id, text_of};
use crate::core::sanitize::strip_label;
use crate::data::{MunicipalityLink, MunicipalityRecord, Schema};
use crate::error::{Error, Result, Stage};

static HEADING: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(LOCATION_HEADING).expect("invalid selector: location heading"));

/// Field found at a fixed row/column of a table.
#[derive(Clone, Copy, Debug)]
struct ByIndex {
    table_id: &'static str,
    row: usize,
    col: usize,
}

/// Field found on every cell carrying a segment's `headers` ids (and class, if set).
#[derive(Clone, Copy, Debug)]
struct ByAttribute {
    headers: fn(&str) -> String,
    class: Option<&'static str>,
}

const REGISTERED: ByIndex = ByIndex { table_id: STATS_TABLE_ID, row: STATS_ROW, col: COL_REGISTERED };
const ENVELOPES: ByIndex = ByIndex { table_id: STATS_TABLE_ID, row: STATS_ROW, col: COL_ENVELOPES };
const VALID: ByIndex = ByIndex { table_id: STATS_TABLE_ID, row: STATS_ROW, col: COL_VALID };

const PARTY_NAMES: ByAttribute = ByAttribute { headers: name_headers, class: None };
const VOTES: ByAttribute = ByAttribute { headers: votes_headers, class: Some(VOTE_CLASS) };

impl ByIndex {
    fn read(&self, page: &Html, stage: Stage, link: &MunicipalityLink) -> Result<String> {
        let table = table_by_id(page, self.table_id).ok_or_else(|| {
            Error::structure(stage, &link.url, format!("table #{} not found", self.table_id))
        })?;
        let cell = cell_at(table, self.row, self.col).map_err(|m: Missing| {
            Error::structure(stage, &link.url, format!("table #{}: {m}", self.table_id))
        })?;
        Ok(text_of(cell))
    }
}

impl ByAttribute {
    /// Matching cells of all `segments`, segment order then document order.
    /// Cells marked `hidden_td` are dropped; everything else is kept as-is.
    fn read<'a>(&self, page: &'a Html, segments: &[&str]) -> Vec<ElementRef<'a>> {
        segments
            .iter()
            .flat_map(|seg| cells_by_headers(page, &(self.headers)(seg), self.class))
            .filter(|td| !has_class(*td, PADDING_CLASS))
            .collect()
    }
}

/// Filler text in unmarked padding cells: empty (after nbsp trimming) or a lone `-`.
fn is_blank(text: &str) -> bool {
    text.is_empty() || text == "-"
}

/// Party columns from the first detail page of a run.
/// Pure: the same page always yields the same schema.
pub fn resolve_schema(page: &Html, link: &MunicipalityLink) -> Result<Schema> {
    let names: Vec<String> = PARTY_NAMES
        .read(page, VOTE_SEGMENTS)
        .into_iter()
        .map(html::text_normalized)
        .filter(|name| !is_blank(name))
        .collect();

    if names.is_empty() {
        return Err(Error::structure(Stage::Schema, &link.url, "no party names found"));
    }
    debug!(code = %link.code, parties = names.len(), "schema resolved");
    Ok(Schema::from_party_names(names))
}

/// One record, votes aligned by position with `schema`.
pub fn extract(page: &Html, link: &MunicipalityLink, schema: &Schema) -> Result<MunicipalityRecord> {
    let location_name = location_name(page, link)?;

    let registered = REGISTERED.read(page, Stage::Record, link)?;
    let envelopes_used = ENVELOPES.read(page, Stage::Record, link)?;
    let valid_votes = VALID.read(page, Stage::Record, link)?;

    let votes: Vec<String> = VOTES
        .read(page, VOTE_SEGMENTS)
        .into_iter()
        .map(text_of)
        .collect();

    if votes.len() != schema.party_count() {
        return Err(Error::SchemaMismatch {
            code: link.code.clone(),
            url: link.url.to_string(),
            expected: schema.party_count(),
            found: votes.len(),
        });
    }
    // vote cells carry no unmarked padding; a blank one is a broken page
    if let Some(i) = votes.iter().position(|v| is_blank(v)) {
        let party = &schema.parties()[i].name;
        return Err(Error::structure(
            Stage::Record,
            &link.url,
            format!("empty vote cell #{i} ({party})"),
        ));
    }

    Ok(MunicipalityRecord {
        code: link.code.clone(),
        location_name,
        registered,
        envelopes_used,
        valid_votes,
        votes,
    })
}

fn location_name(page: &Html, link: &MunicipalityLink) -> Result<String> {
    page.select(&HEADING)
        .find_map(|h| strip_label(&html::text_normalized(h), LOCATION_LABEL))
        .filter(|name| !name.is_empty())
        .ok_or_else(|| {
            Error::structure(
                Stage::Record,
                &link.url,
                format!("no <{LOCATION_HEADING}> starting with {LOCATION_LABEL:?}"),
            )
        })
}
