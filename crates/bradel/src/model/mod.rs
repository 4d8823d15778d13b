//! View models for sectioned lists.
//!
//! This module separates what a list shows from how it is shown. Screens
//! describe their content as a tree of view models; a rendering surface reads
//! the tree through a [`TableBinding`] and never learns the concrete types.
//!
//! # Core Types
//!
//! - [`IdentifiableViewModel`]: anything displayable, identified by an
//!   [`AnyKind`](crate::AnyKind) that selects its visual component
//! - [`CellViewModel`]: a row, optionally selectable
//! - [`SectionViewModel`]: ordered rows with an optional header and footer
//! - [`TableViewModel`]: the root, with title, sections, list-level header and
//!   footer, lookups, selection and change notifications
//! - [`IndexPath`]: a (section, row) position
//!
//! # Model Implementations
//!
//! - [`SimpleTableViewModel`], [`SimpleSectionViewModel`],
//!   [`SimpleCellViewModel`]: fixed trees built in code
//! - [`LoadingTableViewModel`]: sections produced by a loader on each reload
//!
//! # Consumer Side
//!
//! - [`Configurable`] / [`ConfigurableView`]: components that render a model
//! - [`ViewRegistry`]: kind to component factory
//! - [`TableBinding`] and [`ListSurface`]: drive a surface from a model
//!
//! # Architecture Overview
//!
//! ```text
//! ┌───────────────┐  slots   ┌──────────────┐  ListChange  ┌─────────────┐
//! │ TableViewModel│─────────>│ TableBinding │─────────────>│ ListSurface │
//! └───────────────┘          └──────────────┘              └─────────────┘
//!         │                         │
//!         │ kind()          ┌───────┴──────┐
//!         └────────────────>│ ViewRegistry │──> Configurable components
//!                           └──────────────┘
//! ```

mod binding;
mod config;
mod configure;
pub mod debug;
mod error;
mod index;
mod loading;
mod registry;
mod reload;
mod simple_model;
mod traits;

pub use binding::{ListChange, ListSurface, TableAccessory, TableBinding};
pub use config::{BindingConfig, ListStyle};
pub use configure::{Configurable, ConfigurableView, view_model_cast};
pub use debug::{TreeFormatOptions, TreeStyle, ViewModelTreeDebug};
pub use error::{BindingError, Result};
pub use index::IndexPath;
pub use loading::{LoadMode, LoadingTableViewModel};
pub use registry::{ComponentRole, ViewComponent, ViewRegistry};
pub use reload::ReloadTicket;
pub use simple_model::{SimpleCellViewModel, SimpleSectionViewModel, SimpleTableViewModel};
pub use traits::{
    CellViewModel, CellViewModelRef, IdentifiableViewModel, SectionViewModel, SectionViewModelRef,
    TableViewModel, TableViewModelSlots, ViewModelRef,
};
