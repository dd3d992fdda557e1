// src/progress.rs
/// Lightweight progress reporting used by long-running operations (race/scrape).
/// Frontends implement this to surface status to users.
pub trait Progress {
    /// Called at the start with the total number of items (if known).
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// Called when one logical unit completes (a page was fetched and read).
    fn item_done(&mut self, _item: &str) {}

    /// Called when one logical unit fails; the operation carries on.
    fn item_failed(&mut self, _item: &str, _reason: &str) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}
