//! Line clear sequencing - full rows stay on the board for a short grace window
//! (so drivers can highlight them) before they are removed.

use crate::board::RowList;
use crate::types::LINE_CLEAR_GRACE_MS;

/// Deferred row removal: Idle when `pending` is empty, Pending otherwise.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineClearSequencer {
    pending: RowList,
    elapsed_ms: u32,
}

impl LineClearSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture `rows` and start the grace window.
    ///
    /// Returns false (and keeps the current capture) when a clear is already
    /// pending or `rows` is empty. At most one board's worth of rows is kept.
    pub fn begin(&mut self, rows: &[usize]) -> bool {
        if self.is_pending() || rows.is_empty() {
            return false;
        }
        self.pending = rows.iter().copied().take(self.pending.capacity()).collect();
        self.elapsed_ms = 0;
        true
    }

    /// Follow the board when `n` rows are pushed in from the bottom.
    ///
    /// Captured rows move up by `n`; rows pushed off the top are dropped, and
    /// the sequencer goes idle if none remain.
    pub fn shift_up(&mut self, n: usize) {
        if n == 0 || !self.is_pending() {
            return;
        }
        self.pending = self
            .pending
            .iter()
            .filter_map(|&y| y.checked_sub(n))
            .collect();
        if self.pending.is_empty() {
            self.elapsed_ms = 0;
        }
    }

    /// Advance the grace window; returns the captured rows once it has elapsed.
    pub fn advance(&mut self, dt_ms: u32) -> Option<RowList> {
        if !self.is_pending() {
            return None;
        }
        self.elapsed_ms = self.elapsed_ms.saturating_add(dt_ms);
        if self.elapsed_ms <= LINE_CLEAR_GRACE_MS {
            return None;
        }
        self.elapsed_ms = 0;
        Some(std::mem::take(&mut self.pending))
    }

    pub fn is_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn pending_rows(&self) -> &[usize] {
        &self.pending
    }

    pub fn elapsed_ms(&self) -> u32 {
        self.elapsed_ms
    }

    pub fn reset(&mut self) {
        self.pending.clear();
        self.elapsed_ms = 0;
    }
}
