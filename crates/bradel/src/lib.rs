//! Bradel - data-driven view models for sectioned lists.
//!
//! This is the main umbrella crate. It re-exports the core building blocks
//! from `bradel-core` and the `#[derive(KindTag)]` macro, and adds the
//! [`model`] module: the view-model hierarchy, convenience models, the
//! component registry and the list binding.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use bradel::AnyKind;
//! use bradel::model::{
//!     CellViewModelRef, IndexPath, SectionViewModelRef, SimpleCellViewModel, SimpleSectionViewModel,
//!     SimpleTableViewModel, TableViewModel,
//! };
//!
//! fn row(kind: &'static str, selectable: bool) -> CellViewModelRef {
//!     Arc::new(SimpleCellViewModel::new(kind, selectable))
//! }
//!
//! fn section(rows: Vec<CellViewModelRef>) -> SectionViewModelRef {
//!     Arc::new(SimpleSectionViewModel::new(rows))
//! }
//!
//! let model = SimpleTableViewModel::new()
//!     .with_title("Settings")
//!     .with_sections(vec![
//!         section(vec![row("x1", true), row("x2", false)]),
//!         section(vec![row("x1", false)]),
//!     ]);
//!
//! assert_eq!(model.first_position(&AnyKind::new("x1")), Some(IndexPath::new(0, 0)));
//! assert_eq!(model.item(IndexPath::new(1, 0)).kind(), AnyKind::new("x1"));
//! assert_eq!(model.number_of_rows(1), 1);
//! ```

pub use bradel_core::*;
pub use bradel_macros::*;

pub mod model;
