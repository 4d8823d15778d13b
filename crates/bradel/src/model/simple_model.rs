//! Ready-made view models for simple lists.
//!
//! [`SimpleTableViewModel`], [`SimpleSectionViewModel`] and
//! [`SimpleCellViewModel`] cover lists whose structure is known up front, so a
//! screen does not need a dedicated type for every tier.
//!
//! # Example
//!
//! ```ignore
//! use bradel::model::{SimpleCellViewModel, SimpleSectionViewModel, SimpleTableViewModel};
//!
//! let model = SimpleTableViewModel::new()
//!     .with_title("Settings")
//!     .with_sections(vec![Arc::new(SimpleSectionViewModel::new(vec![
//!         Arc::new(SimpleCellViewModel::new("toggle", true)),
//!     ]))]);
//!
//! model.slots().title_did_change.connect(|title| println!("title: {title:?}"));
//! model.set_title(Some("Preferences".into()));
//! ```

use std::fmt;
use std::sync::Arc;

use bradel_core::logging::targets;
use bradel_core::{AnyKind, KindTag, Property};

use super::traits::{
    CellViewModel, CellViewModelRef, IdentifiableViewModel, SectionViewModel, SectionViewModelRef,
    TableViewModel, TableViewModelSlots, ViewModelRef,
};

/// A list view model with settable title, header, footer and sections.
///
/// Setting the title, header or footer fires the matching slot exactly once,
/// right after the value is stored, even when the new value equals the old
/// one. Replacing the sections does not notify; call
/// [`reload_data`](TableViewModel::reload_data) afterwards.
pub struct SimpleTableViewModel {
    title: Property<Option<String>>,
    sections: Property<Vec<SectionViewModelRef>>,
    header: Property<Option<ViewModelRef>>,
    footer: Property<Option<ViewModelRef>>,
    slots: Arc<TableViewModelSlots>,
}

impl SimpleTableViewModel {
    /// Creates an empty model with no title, header, footer or sections.
    pub fn new() -> Self {
        Self {
            title: Property::new(None),
            sections: Property::new(Vec::new()),
            header: Property::new(None),
            footer: Property::new(None),
            slots: Arc::new(TableViewModelSlots::new()),
        }
    }

    /// Sets the initial title.
    pub fn with_title(self, title: impl Into<String>) -> Self {
        self.title.set_silent(Some(title.into()));
        self
    }

    /// Sets the initial sections.
    pub fn with_sections(self, sections: Vec<SectionViewModelRef>) -> Self {
        self.sections.set_silent(sections);
        self
    }

    /// Sets the initial list-level header.
    pub fn with_header(self, header: ViewModelRef) -> Self {
        self.header.set_silent(Some(header));
        self
    }

    /// Sets the initial list-level footer.
    pub fn with_footer(self, footer: ViewModelRef) -> Self {
        self.footer.set_silent(Some(footer));
        self
    }

    /// Returns the notification slots.
    ///
    /// Unlike [`TableViewModel::slots`], this is never `None`.
    pub fn slots(&self) -> &Arc<TableViewModelSlots> {
        &self.slots
    }

    /// Replaces the title and fires `title_did_change`.
    pub fn set_title(&self, title: Option<String>) {
        self.title.store(title.clone());
        tracing::trace!(target: targets::MODEL, ?title, "title changed");
        self.slots.title_did_change.emit(title);
    }

    /// Replaces the list-level header and fires `header_did_change`.
    pub fn set_header(&self, header: Option<ViewModelRef>) {
        self.header.store(header.clone());
        self.slots.header_did_change.emit(header);
    }

    /// Replaces the list-level footer and fires `footer_did_change`.
    pub fn set_footer(&self, footer: Option<ViewModelRef>) {
        self.footer.store(footer.clone());
        self.slots.footer_did_change.emit(footer);
    }

    /// Replaces all sections.
    pub fn set_sections(&self, sections: Vec<SectionViewModelRef>) {
        self.sections.store(sections);
    }

    /// Appends a section.
    pub fn push_section(&self, section: SectionViewModelRef) {
        let mut sections = self.sections.get();
        sections.push(section);
        self.sections.store(sections);
    }
}

impl Default for SimpleTableViewModel {
    fn default() -> Self {
        Self::new()
    }
}

impl TableViewModel for SimpleTableViewModel {
    fn title(&self) -> Option<String> {
        self.title.get()
    }

    fn sections(&self) -> Vec<SectionViewModelRef> {
        self.sections.get()
    }

    fn header(&self) -> Option<ViewModelRef> {
        self.header.get()
    }

    fn footer(&self) -> Option<ViewModelRef> {
        self.footer.get()
    }

    /// The tree is held in memory, so a reload completes at once.
    fn reload_data(&self) {
        self.slots.begin_reload().succeed();
    }

    fn slots(&self) -> Option<&Arc<TableViewModelSlots>> {
        Some(&self.slots)
    }
}

impl fmt::Debug for SimpleTableViewModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimpleTableViewModel")
            .field("title", &self.title.get())
            .field("sections", &self.sections.with(Vec::len))
            .field("header", &self.header.with(|h| h.as_ref().map(|h| h.kind())))
            .field("footer", &self.footer.with(|f| f.as_ref().map(|f| f.kind())))
            .field("slots", &self.slots)
            .finish()
    }
}

/// A section built from a fixed list of rows.
#[derive(Clone, Default)]
pub struct SimpleSectionViewModel {
    /// The rows, in display order.
    pub rows: Vec<CellViewModelRef>,
    /// The section header.
    pub header: Option<ViewModelRef>,
    /// The section footer.
    pub footer: Option<ViewModelRef>,
}

impl SimpleSectionViewModel {
    /// Creates a section with `rows` and no header or footer.
    pub fn new(rows: Vec<CellViewModelRef>) -> Self {
        Self {
            rows,
            header: None,
            footer: None,
        }
    }

    /// Sets the header.
    pub fn with_header(mut self, header: ViewModelRef) -> Self {
        self.header = Some(header);
        self
    }

    /// Sets the footer.
    pub fn with_footer(mut self, footer: ViewModelRef) -> Self {
        self.footer = Some(footer);
        self
    }
}

impl SectionViewModel for SimpleSectionViewModel {
    fn rows(&self) -> Vec<CellViewModelRef> {
        self.rows.clone()
    }

    fn header(&self) -> Option<ViewModelRef> {
        self.header.clone()
    }

    fn footer(&self) -> Option<ViewModelRef> {
        self.footer.clone()
    }
}

impl fmt::Debug for SimpleSectionViewModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimpleSectionViewModel")
            .field("rows", &self.rows.iter().map(|r| r.kind()).collect::<Vec<_>>())
            .field("header", &self.header.as_ref().map(|h| h.kind()))
            .field("footer", &self.footer.as_ref().map(|h| h.kind()))
            .finish()
    }
}

/// A row that only carries a kind and a selectable flag.
///
/// Selecting it does nothing.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SimpleCellViewModel {
    kind: AnyKind,
    selectable: bool,
}

impl SimpleCellViewModel {
    /// Creates a row of `kind`.
    pub fn new(kind: impl KindTag, selectable: bool) -> Self {
        Self {
            kind: AnyKind::new(kind),
            selectable,
        }
    }
}

impl IdentifiableViewModel for SimpleCellViewModel {
    fn kind(&self) -> AnyKind {
        self.kind.clone()
    }
}

impl CellViewModel for SimpleCellViewModel {
    fn is_selectable(&self) -> bool {
        self.selectable
    }
}

static_assertions::assert_impl_all!(SimpleTableViewModel: Send, Sync);
static_assertions::assert_impl_all!(SimpleSectionViewModel: Send, Sync);
