// src/specs/mod.rs
//! # Scraping “specs” module
//!
//! Page-specific scraping rules for the volby.cz result reports.
//! Each spec focuses on a single page kind and encodes *where the ground truth
//! lives in the HTML* and *how to extract it*.
//!
//! ## What lives here
//! - **Pure HTML reading** of already-fetched, already-parsed pages. Nothing here
//!   does network I/O.
//! - **Addressing choice per field**: by `headers` attribute for anchors, party names
//!   and votes; by row/column index for the voter statistics.
//! - **Shaping** into `data::MunicipalityLink`, `data::Schema` and
//!   `data::MunicipalityRecord`.
//!
//! ## What does **not** live here
//! - Fetching, ordering or worker scheduling (`scrape`).
//! - Output formatting (`csv`, `file`).
//!
//! ## Typical call chain
//! ```text
//! cli → scrape::assemble → district::discover (index page)
//!                        → municipality::resolve_schema (first detail page, once)
//!                        → municipality::extract (every detail page)
//! ```
//!
//! ## Conventions & invariants
//! - Structural surprises are errors (`Error::Structure` / `Error::SchemaMismatch`),
//!   never defaulted values.
//! - Segment order first, then document order, wherever cells are collected.
//! - `headers` attribute matching is whitespace-tolerant; everything else is exact.
//!
//! ## Current specs
//! - `district` – municipality links from the district index (`ps32`).
//! - `municipality` – party schema and per-municipality record (`ps311`).
//!
//! ## Testing notes
//! Specs are tested offline against synthetic pages shaped like the live site.
pub mod district;
pub mod municipality;
