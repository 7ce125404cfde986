//! Sequencing of screen load cycles so a superseded load never replaces a newer result.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::errors::FinanceError;

/// Identifies one load cycle. Higher sequence numbers are newer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct LoadTicket {
    sequence: u64,
}

impl LoadTicket {
    pub fn sequence(&self) -> u64 {
        self.sequence
    }
}

/// Issues monotonically increasing tickets; shareable across tasks.
#[derive(Debug, Default)]
pub struct LoadSequencer {
    latest: AtomicU64,
}

impl LoadSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&self) -> LoadTicket {
        let sequence = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        LoadTicket { sequence }
    }

    pub fn is_current(&self, ticket: LoadTicket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.sequence
    }
}

/// Displayed state of a screen: last accepted result plus loading flag.
#[derive(Debug)]
pub struct ScreenState<T> {
    sequencer: LoadSequencer,
    is_loading: bool,
    data: Option<T>,
    error: Option<FinanceError>,
}

impl<T> Default for ScreenState<T> {
    fn default() -> Self {
        Self {
            sequencer: LoadSequencer::new(),
            is_loading: false,
            data: None,
            error: None,
        }
    }
}

impl<T> ScreenState<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new cycle; any cycle still in flight becomes stale.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.is_loading = true;
        self.sequencer.begin()
    }

    /// Applies the outcome of a cycle. Returns `false` when the ticket was superseded
    /// and the outcome discarded.
    pub fn complete(&mut self, ticket: LoadTicket, outcome: Result<T, FinanceError>) -> bool {
        if !self.sequencer.is_current(ticket) {
            tracing::debug!(
                sequence = ticket.sequence(),
                "discarding result of superseded load cycle"
            );
            return false;
        }
        self.is_loading = false;
        match outcome {
            Ok(data) => {
                self.data = Some(data);
                self.error = None;
            }
            Err(err) => {
                tracing::warn!(error = %err, "screen load failed");
                self.error = Some(err);
            }
        }
        true
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    pub fn error(&self) -> Option<&FinanceError> {
        self.error.as_ref()
    }
}
