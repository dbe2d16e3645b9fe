// src/data.rs
//
// Shapes that flow through a scrape run.
//
// - MunicipalityLink: one detail page found on the district index.
// - Schema: fixed + party columns, resolved once from the first detail page.
// - MunicipalityRecord: one extracted row, votes aligned with the schema.
// - ResultTable: header + rows in discovery order. Read-only once built.

use url::Url;

use crate::config::consts::FIXED_COLUMNS;
use crate::error::{Error, Result};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MunicipalityLink {
    /// Municipality code; identity of the link
    pub code: String,
    pub url: Url,
    /// Name as listed on the index page, when the row has one
    pub name: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PartyColumn {
    pub name: String,
    pub ordinal: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Schema {
    parties: Vec<PartyColumn>,
}

impl Schema {
    /// Party names in order; ordinals follow position.
    pub fn from_party_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let parties = names
            .into_iter()
            .enumerate()
            .map(|(ordinal, name)| PartyColumn { name: name.into(), ordinal })
            .collect();
        Self { parties }
    }

    pub fn parties(&self) -> &[PartyColumn] { &self.parties }
    pub fn party_count(&self) -> usize { self.parties.len() }

    /// Five fixed labels, then party names.
    pub fn header_row(&self) -> Vec<String> {
        FIXED_COLUMNS
            .iter()
            .map(|s| s!(*s))
            .chain(self.parties.iter().map(|p| p.name.clone()))
            .collect()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MunicipalityRecord {
    pub code: String,
    pub location_name: String,
    pub registered: String,
    pub envelopes_used: String,
    pub valid_votes: String,
    pub votes: Vec<String>,
}

impl MunicipalityRecord {
    pub fn into_row(self) -> Vec<String> {
        let mut row = Vec::with_capacity(FIXED_COLUMNS.len() + self.votes.len());
        row.push(self.code);
        row.push(self.location_name);
        row.push(self.registered);
        row.push(self.envelopes_used);
        row.push(self.valid_votes);
        row.extend(self.votes);
        row
    }
}

/// Header row plus one row per municipality. Every row is `header.len()` wide.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultTable {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl ResultTable {
    /// Build from records already in discovery order.
    /// Fails on the first record whose vote count disagrees with `schema`.
    pub fn from_records(
        schema: &Schema,
        records: impl IntoIterator<Item = (MunicipalityLink, MunicipalityRecord)>,
    ) -> Result<Self> {
        let mut rows = Vec::new();
        for (link, rec) in records {
            if rec.votes.len() != schema.party_count() {
                return Err(Error::SchemaMismatch {
                    code: rec.code,
                    url: link.url.to_string(),
                    expected: schema.party_count(),
                    found: rec.votes.len(),
                });
            }
            rows.push(rec.into_row());
        }
        Ok(Self { header: schema.header_row(), rows })
    }

    pub fn header(&self) -> &[String] { &self.header }
    pub fn rows(&self) -> &[Vec<String>] { &self.rows }
    pub fn len(&self) -> usize { self.rows.len() }
    pub fn is_empty(&self) -> bool { self.rows.is_empty() }
    pub fn width(&self) -> usize { self.header.len() }

    /// Header first, then data rows.
    pub fn all_rows(&self) -> impl Iterator<Item = &[String]> {
        std::iter::once(self.header.as_slice()).chain(self.rows.iter().map(Vec::as_slice))
    }
}
