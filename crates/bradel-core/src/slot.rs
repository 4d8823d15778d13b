//! Single-subscriber notification slots.
//!
//! A [`Slot<Args>`] holds at most one handler. Connecting a new handler
//! replaces the previous one, which matches how a screen owns the change
//! notifications of the one list it presents.
//!
//! # Threading
//!
//! Slots do not marshal handlers onto any particular thread. [`Slot::emit`]
//! calls the handler synchronously on the emitting thread. Consumers that must
//! touch thread-bound resources are responsible for hopping to the right
//! context themselves, for example by forwarding into a channel.
//!
//! # Example
//!
//! ```
//! use bradel_core::Slot;
//!
//! let title_did_change = Slot::<Option<String>>::new();
//!
//! title_did_change.connect(|title| {
//!     println!("title is now {:?}", title);
//! });
//!
//! assert!(title_did_change.emit(Some("Inbox".to_string())));
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;

use crate::logging::targets;

/// Generation counter shared by all slots so ids are never reused.
static NEXT_SLOT_ID: AtomicU64 = AtomicU64::new(1);

/// Identifies one handler installed in a [`Slot`].
///
/// A `SlotId` stays meaningful after the handler is replaced: disconnecting a
/// stale id is a no-op and never removes the newer handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotId(u64);

impl SlotId {
    fn next() -> Self {
        Self(NEXT_SLOT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

type Handler<Args> = Arc<dyn Fn(&Args) + Send + Sync>;

/// A replaceable, single-subscriber callback.
pub struct Slot<Args> {
    handler: Mutex<Option<(SlotId, Handler<Args>)>>,
}

impl<Args: 'static> Default for Slot<Args> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Args: 'static> Slot<Args> {
    /// Creates an empty slot.
    pub fn new() -> Self {
        Self {
            handler: Mutex::new(None),
        }
    }

    /// Installs `handler`, replacing the current one if any.
    pub fn connect<F>(&self, handler: F) -> SlotId
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        let id = SlotId::next();
        let previous = self.handler.lock().replace((id, Arc::new(handler)));
        if previous.is_some() {
            tracing::trace!(target: targets::SLOT, ?id, "replaced slot handler");
        }
        id
    }

    /// Removes the handler identified by `id`.
    ///
    /// Returns `false` if `id` is no longer the current handler.
    pub fn disconnect(&self, id: SlotId) -> bool {
        let mut handler = self.handler.lock();
        match handler.as_ref() {
            Some((current, _)) if *current == id => {
                *handler = None;
                true
            }
            _ => false,
        }
    }

    /// Removes whatever handler is installed.
    pub fn clear(&self) {
        self.handler.lock().take();
    }

    /// Returns `true` if a handler is installed.
    pub fn is_connected(&self) -> bool {
        self.handler.lock().is_some()
    }

    /// Returns the id of the current handler.
    pub fn current(&self) -> Option<SlotId> {
        self.handler.lock().as_ref().map(|(id, _)| *id)
    }

    /// Invokes the current handler with `args`.
    ///
    /// Returns `true` if a handler ran. The handler is called after the
    /// internal lock is released, so it may reconnect or clear this slot.
    #[tracing::instrument(skip_all, target = "bradel_core::slot", level = "trace")]
    pub fn emit(&self, args: Args) -> bool {
        let handler = self.handler.lock().as_ref().map(|(_, h)| h.clone());
        match handler {
            Some(handler) => {
                handler(&args);
                true
            }
            None => {
                tracing::trace!(target: targets::SLOT, "no handler connected");
                false
            }
        }
    }
}

impl<Args> std::fmt::Debug for Slot<Args> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Slot")
            .field("handler", &self.handler.lock().as_ref().map(|(id, _)| *id))
            .finish()
    }
}

static_assertions::assert_impl_all!(Slot<Option<String>>: Send, Sync);
