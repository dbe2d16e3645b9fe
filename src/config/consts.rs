// src/config/consts.rs

// Index page (district): municipality anchors live in up to three segments
pub const INDEX_SEGMENTS: &[&str] = &["t1", "t2", "t3"];
pub const ANCHOR_CLASS: &str = "cislo";

// Detail page (municipality): party results are split over two segments
pub const VOTE_SEGMENTS: &[&str] = &["t1", "t2"];
pub const VOTE_CLASS: &str = "cislo";
pub const PADDING_CLASS: &str = "hidden_td";

// Detail page: voter statistics table, addressed by position
pub const STATS_TABLE_ID: &str = "ps311_t1";
pub const STATS_ROW: usize = 2;
pub const COL_REGISTERED: usize = 3;
pub const COL_ENVELOPES: usize = 4;
pub const COL_VALID: usize = 7;

// Detail page: heading carrying the municipality name
pub const LOCATION_HEADING: &str = "h3";
pub const LOCATION_LABEL: &str = "Obec:";

// Fixed metadata columns, always first in the output
pub const FIXED_COLUMNS: [&str; 5] = ["Code", "Location", "Registered", "Envelopes", "Valid"];

// `headers` attribute ids per segment, e.g. "t2sa1 t2sb2"
pub fn anchor_headers(seg: &str) -> String { format!("{seg}sa1 {seg}sb1") }
pub fn name_headers(seg: &str) -> String { format!("{seg}sa1 {seg}sb2") }
pub fn votes_headers(seg: &str) -> String { format!("{seg}sa2 {seg}sb3") }

// Code-from-URL: value after the Nth '='
pub const CODE_PARAM_POSITION: usize = 3;

// Net
pub const USER_AGENT: &str = concat!("volby_scrape/", env!("CARGO_PKG_VERSION"));
pub const TIMEOUT_SECS: u64 = 30;

// Export
pub const DEFAULT_OUT_DIR: &str = "";
pub const DEFAULT_FILE: &str = "results";
// Extensions kept when typed; any other dotted suffix is part of the name
pub const EXPORT_EXTS: &[&str] = &["csv", "tsv", "txt"];

// Concurrency
pub const WORKERS: usize = 1;
pub const MAX_WORKERS: usize = 8;
pub const REQUEST_PAUSE_MS: u64 = 75; // be polite
pub const JITTER_MS: u64 = 50; // extra 0..50 ms
