// src/core/html.rs
// Node queries over a parsed `scraper::Html` tree.
// Two addressing schemes live here on purpose and stay separate:
// - by attribute: cells matched on their `headers` attribute (plus optional class)
// - by index: a fixed row/column position inside a table found by id

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use super::sanitize::{normalize_ws, trim_cell};

static TD: LazyLock<Selector> = LazyLock::new(|| Selector::parse("td").expect("invalid selector: td"));
static TR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("tr").expect("invalid selector: tr"));
static TABLE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("table").expect("invalid selector: table"));
static A: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a[href]").expect("invalid selector: a[href]"));

pub fn parse_page(text: &str) -> Html {
    Html::parse_document(text)
}

/// Text content of an element, surrounding whitespace and `&nbsp;` trimmed.
/// Inner characters are left as the page has them.
pub fn text_of(el: ElementRef<'_>) -> String {
    trim_cell(&el.text().collect::<String>())
}

/// Text content with all whitespace runs collapsed to one space.
pub fn text_normalized(el: ElementRef<'_>) -> String {
    normalize_ws(&el.text().collect::<String>())
}

pub fn has_class(el: ElementRef<'_>, class: &str) -> bool {
    el.value().classes().any(|c| c == class)
}

/// `headers` attribute equality, tolerant of extra whitespace between ids.
pub fn headers_match(el: ElementRef<'_>, headers: &str) -> bool {
    el.value()
        .attr("headers")
        .is_some_and(|h| h.split_whitespace().eq(headers.split_whitespace()))
}

/* ---------- by attribute ---------- */

/// All `<td>` cells carrying `headers`, in document order.
/// With `class`, only cells that also carry that class.
pub fn cells_by_headers<'a>(doc: &'a Html, headers: &str, class: Option<&str>) -> Vec<ElementRef<'a>> {
    doc.select(&TD)
        .filter(|td| headers_match(*td, headers))
        .filter(|td| class.is_none_or(|c| has_class(*td, c)))
        .collect()
}

/// The `<td>` in the same `<tr>` as `cell` that carries `headers`.
pub fn sibling_by_headers<'a>(cell: ElementRef<'a>, headers: &str) -> Option<ElementRef<'a>> {
    let row = enclosing_row(cell)?;
    row.select(&TD).find(|td| headers_match(*td, headers))
}

pub fn enclosing_row(el: ElementRef<'_>) -> Option<ElementRef<'_>> {
    el.ancestors()
        .filter_map(ElementRef::wrap)
        .find(|a| a.value().name() == "tr")
}

/// `href` of the first link inside `el`.
pub fn first_href<'a>(el: ElementRef<'a>) -> Option<(&'a str, ElementRef<'a>)> {
    el.select(&A)
        .next()
        .and_then(|a| a.value().attr("href").map(|href| (href, a)))
}

/* ---------- by index ---------- */

pub fn table_by_id<'a>(doc: &'a Html, id: &str) -> Option<ElementRef<'a>> {
    doc.select(&TABLE).find(|t| t.value().id() == Some(id))
}

/// Why a positional lookup came up empty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Missing {
    Row { wanted: usize, rows: usize },
    Column { row: usize, wanted: usize, cells: usize },
}

impl std::fmt::Display for Missing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Missing::Row { wanted, rows } => {
                write!(f, "row {wanted} missing (table has {rows} rows)")
            }
            Missing::Column { row, wanted, cells } => {
                write!(f, "column {wanted} missing in row {row} (row has {cells} cells)")
            }
        }
    }
}

/// `<td>` at zero-indexed `col` of the zero-indexed `row`-th `<tr>` of `table`.
/// Rows count every `<tr>` (header rows included); columns count `<td>` only.
pub fn cell_at(table: ElementRef<'_>, row: usize, col: usize) -> Result<ElementRef<'_>, Missing> {
    let rows: Vec<ElementRef<'_>> = table.select(&TR).collect();
    let tr = rows
        .get(row)
        .copied()
        .ok_or(Missing::Row { wanted: row, rows: rows.len() })?;

    let cells: Vec<ElementRef<'_>> = tr.select(&TD).collect();
    cells
        .get(col)
        .copied()
        .ok_or(Missing::Column { row, wanted: col, cells: cells.len() })
}
