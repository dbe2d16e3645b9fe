// src/progress.rs
/// Status hooks for a scrape run. All methods default to no-ops.
pub trait Progress {
    /// Links are known; `total` municipalities will follow.
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// One municipality extracted. Parallel runs report in completion order.
    fn item_done(&mut self, _code: &str, _name: &str) {}

    /// Run over, successful or not.
    fn finish(&mut self) {}
}

/// Keeps every call for later inspection.
#[derive(Debug, Default)]
pub struct RecordingProgress {
    pub total: Option<usize>,
    pub lines: Vec<String>,
    pub done: Vec<(String, String)>,
    pub finished: bool,
}

impl Progress for RecordingProgress {
    fn begin(&mut self, total: usize) { self.total = Some(total); }
    fn log(&mut self, msg: &str) { self.lines.push(s!(msg)); }
    fn item_done(&mut self, code: &str, name: &str) { self.done.push((s!(code), s!(name))); }
    fn finish(&mut self) { self.finished = true; }
}
