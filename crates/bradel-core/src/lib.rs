//! Core systems for Bradel.
//!
//! This crate provides the leaf building blocks of the Bradel view-model layer:
//!
//! - **Kind tags**: [`KindTag`] and the type-erased [`AnyKind`] token, usable as
//!   a map key across unrelated tag types
//! - **Slots**: [`Slot<Args>`], a replaceable single-subscriber callback used
//!   for change notification
//! - **Properties**: [`Property<T>`], a lock-protected value cell shared
//!   through `Arc<dyn ...>` models
//! - **Errors**: [`ReloadError`], the failure carried by reload completions
//!
//! # Kind Example
//!
//! ```
//! use bradel_core::{AnyKind, KindTag};
//!
//! #[derive(Debug, PartialEq, Eq, Hash)]
//! struct Banner;
//!
//! impl KindTag for Banner {
//!     fn raw_value(&self) -> &str {
//!         "banner"
//!     }
//! }
//!
//! assert_eq!(AnyKind::new(Banner), AnyKind::new("banner"));
//! ```
//!
//! # Slot Example
//!
//! ```
//! use bradel_core::{ReloadError, Slot};
//!
//! let reload_data_finished = Slot::<Option<ReloadError>>::new();
//! reload_data_finished.connect(|error| {
//!     if let Some(error) = error {
//!         eprintln!("reload failed: {error}");
//!     }
//! });
//! reload_data_finished.emit(None);
//! ```

mod error;
pub mod kind;
pub mod logging;
pub mod property;
pub mod slot;

pub use error::ReloadError;
pub use kind::{AnyKind, KindTag};
pub use property::Property;
pub use slot::{Slot, SlotId};
