//! Reload tickets.
//!
//! A [`ReloadTicket`] stands for one in-flight reload. It delivers the
//! reload-finished notification exactly once, whichever way the reload ends:
//! finished successfully, finished with an error, or abandoned (dropped).
//!
//! Tickets are `Send`, so a model can move one into a worker thread or an
//! async task and finish it there.
//!
//! # Example
//!
//! ```ignore
//! fn reload_data(&self) {
//!     let ticket = self.slots.begin_reload();
//!     let store = self.store.clone();
//!     std::thread::spawn(move || {
//!         let result = store.refresh().map_err(ReloadError::from_source);
//!         ticket.finish(result);
//!     });
//! }
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use bradel_core::ReloadError;
use bradel_core::logging::{span_names, targets};

use super::traits::TableViewModelSlots;

static RELOAD_COUNTER: AtomicU64 = AtomicU64::new(1);

/// One pending reload cycle.
///
/// Created by [`TableViewModelSlots::begin_reload`].
#[must_use = "dropping a reload ticket reports the reload as cancelled"]
pub struct ReloadTicket {
    slots: Option<Arc<TableViewModelSlots>>,
    sequence: u64,
}

impl ReloadTicket {
    pub(crate) fn new(slots: Arc<TableViewModelSlots>) -> Self {
        let sequence = RELOAD_COUNTER.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(target: targets::RELOAD, sequence, "reload started");
        Self {
            slots: Some(slots),
            sequence,
        }
    }

    /// Returns the process-wide sequence number of this reload.
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Completes the reload.
    ///
    /// Fires `reload_data_finished` with `None` for `Ok` and with the error
    /// for `Err`.
    pub fn finish(mut self, result: Result<(), ReloadError>) {
        self.deliver(result.err());
    }

    /// Completes the reload successfully.
    pub fn succeed(self) {
        self.finish(Ok(()));
    }

    /// Completes the reload with an error.
    pub fn fail(self, error: ReloadError) {
        self.finish(Err(error));
    }

    fn deliver(&mut self, error: Option<ReloadError>) {
        let Some(slots) = self.slots.take() else {
            return;
        };
        let span = tracing::debug_span!(target: targets::RELOAD, span_names::RELOAD, sequence = self.sequence);
        let _entered = span.enter();
        match &error {
            None => tracing::debug!(target: targets::RELOAD, "reload finished"),
            Some(err) => tracing::debug!(target: targets::RELOAD, %err, "reload finished with error"),
        }
        slots.reload_data_finished.emit(error);
    }
}

impl Drop for ReloadTicket {
    fn drop(&mut self) {
        if self.slots.is_some() {
            tracing::debug!(
                target: targets::RELOAD,
                sequence = self.sequence,
                "reload ticket dropped unfinished"
            );
            self.deliver(Some(ReloadError::Cancelled));
        }
    }
}

impl std::fmt::Debug for ReloadTicket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReloadTicket")
            .field("sequence", &self.sequence)
            .field("pending", &self.slots.is_some())
            .finish()
    }
}

static_assertions::assert_impl_all!(ReloadTicket: Send, Sync);
