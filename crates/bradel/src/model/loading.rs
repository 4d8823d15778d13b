//! A list view model whose sections come from a loader.
//!
//! [`LoadingTableViewModel`] calls its loader on every
//! [`reload_data`](TableViewModel::reload_data). A successful load replaces
//! the whole tree; a failed one keeps the previous tree. Either way exactly
//! one `reload_data_finished` is delivered per reload.
//!
//! With [`LoadMode::Background`] the loader runs on a dedicated thread and the
//! completion is delivered from that thread. Subscribers that touch a
//! rendering surface must hop back to it themselves, for example through
//! [`TableBinding`](super::TableBinding)'s change queue.

use std::fmt;
use std::sync::Arc;

use bradel_core::logging::targets;
use bradel_core::{Property, ReloadError};
use parking_lot::Mutex;

use super::reload::ReloadTicket;
use super::traits::{SectionViewModelRef, TableViewModel, TableViewModelSlots};

type SectionLoader = dyn Fn() -> Result<Vec<SectionViewModelRef>, ReloadError> + Send + Sync;

/// Where the loader runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadMode {
    /// On the thread calling `reload_data`, before it returns.
    #[default]
    Inline,
    /// On a new thread; `reload_data` returns immediately.
    Background,
}

struct LoadState {
    title: Property<Option<String>>,
    sections: Property<Vec<SectionViewModelRef>>,
    loader: Box<SectionLoader>,
    /// Sequence of the most recently started reload.
    latest: Mutex<u64>,
    slots: Arc<TableViewModelSlots>,
}

impl LoadState {
    fn run(&self, ticket: ReloadTicket) {
        match (self.loader)() {
            Ok(sections) => {
                let latest = self.latest.lock();
                if *latest != ticket.sequence() {
                    tracing::debug!(
                        target: targets::RELOAD,
                        sequence = ticket.sequence(),
                        latest = *latest,
                        "discarding superseded load"
                    );
                    drop(latest);
                    ticket.fail(ReloadError::Cancelled);
                    return;
                }
                self.sections.store(sections);
                drop(latest);
                ticket.succeed();
            }
            Err(error) => {
                tracing::debug!(target: targets::RELOAD, %error, "load failed, keeping previous tree");
                ticket.fail(error);
            }
        }
    }
}

/// A list view model backed by a section loader.
pub struct LoadingTableViewModel {
    state: Arc<LoadState>,
    mode: LoadMode,
}

impl LoadingTableViewModel {
    /// Creates a model that loads its sections with `loader`.
    ///
    /// The model starts with no sections; call `reload_data` to load.
    pub fn new<F>(loader: F) -> Self
    where
        F: Fn() -> Result<Vec<SectionViewModelRef>, ReloadError> + Send + Sync + 'static,
    {
        Self {
            state: Arc::new(LoadState {
                title: Property::new(None),
                sections: Property::new(Vec::new()),
                loader: Box::new(loader),
                latest: Mutex::new(0),
                slots: Arc::new(TableViewModelSlots::new()),
            }),
            mode: LoadMode::default(),
        }
    }

    /// Sets where the loader runs.
    pub fn with_mode(mut self, mode: LoadMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the initial title.
    pub fn with_title(self, title: impl Into<String>) -> Self {
        self.state.title.set_silent(Some(title.into()));
        self
    }

    /// Returns where the loader runs.
    pub fn mode(&self) -> LoadMode {
        self.mode
    }

    /// Replaces the title and fires `title_did_change`.
    pub fn set_title(&self, title: Option<String>) {
        self.state.title.store(title.clone());
        self.state.slots.title_did_change.emit(title);
    }
}

impl TableViewModel for LoadingTableViewModel {
    fn title(&self) -> Option<String> {
        self.state.title.get()
    }

    fn sections(&self) -> Vec<SectionViewModelRef> {
        self.state.sections.get()
    }

    fn reload_data(&self) {
        // Sequence and `latest` must advance together so the newest reload wins.
        let ticket = {
            let mut latest = self.state.latest.lock();
            let ticket = self.state.slots.begin_reload();
            *latest = ticket.sequence();
            ticket
        };

        match self.mode {
            LoadMode::Inline => self.state.run(ticket),
            LoadMode::Background => {
                let state = self.state.clone();
                let spawned = std::thread::Builder::new()
                    .name("bradel-reload".into())
                    .spawn(move || state.run(ticket));
                // A failed spawn drops the ticket, which reports the reload as cancelled.
                if let Err(err) = spawned {
                    tracing::warn!(target: targets::RELOAD, %err, "could not spawn reload thread");
                }
            }
        }
    }

    fn slots(&self) -> Option<&Arc<TableViewModelSlots>> {
        Some(&self.state.slots)
    }
}

impl fmt::Debug for LoadingTableViewModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadingTableViewModel")
            .field("title", &self.state.title.get())
            .field("sections", &self.state.sections.with(Vec::len))
            .field("mode", &self.mode)
            .finish_non_exhaustive()
    }
}

static_assertions::assert_impl_all!(LoadingTableViewModel: Send, Sync);
