//! Core traits for the view-model hierarchy.
//!
//! A list is described by three tiers of view models:
//!
//! - [`TableViewModel`]: the root, with an optional title, ordered sections,
//!   an optional list-level header/footer and four change notification slots
//! - [`SectionViewModel`]: ordered rows plus an optional header/footer
//! - [`CellViewModel`]: one row, which may be selectable
//!
//! Headers and footers are plain [`IdentifiableViewModel`]s. Every member that
//! has a sensible default provides it, so a concrete model only implements
//! what it customizes.

use std::any::Any;
use std::sync::Arc;

use bradel_core::logging::targets;
use bradel_core::{AnyKind, ReloadError, Slot};

use super::index::IndexPath;
use super::reload::ReloadTicket;

/// Shared handle to a header, footer or any other displayable view model.
pub type ViewModelRef = Arc<dyn IdentifiableViewModel>;

/// Shared handle to a row view model.
pub type CellViewModelRef = Arc<dyn CellViewModel>;

/// Shared handle to a section view model.
pub type SectionViewModelRef = Arc<dyn SectionViewModel>;

/// Anything that can be displayed by a registered visual component.
///
/// The [`kind`](Self::kind) selects the component; the view model itself is
/// handed to that component for configuration.
pub trait IdentifiableViewModel: Any + Send + Sync {
    /// Returns the erased kind token of this view model.
    fn kind(&self) -> AnyKind;
}

/// A row in a section.
///
/// Rows are not selectable unless they say so. The consumer checks
/// [`is_selectable`](Self::is_selectable) before calling
/// [`select`](Self::select).
///
/// # Example
///
/// ```ignore
/// use bradel::model::{CellViewModel, IdentifiableViewModel};
/// use bradel::AnyKind;
///
/// struct LogoutRow {
///     session: Arc<Session>,
/// }
///
/// impl IdentifiableViewModel for LogoutRow {
///     fn kind(&self) -> AnyKind {
///         AnyKind::new("destructive_button")
///     }
/// }
///
/// impl CellViewModel for LogoutRow {
///     fn is_selectable(&self) -> bool {
///         true
///     }
///
///     fn select(&self) {
///         self.session.logout();
///     }
/// }
/// ```
pub trait CellViewModel: IdentifiableViewModel {
    /// Returns `true` if the row reacts to selection.
    ///
    /// The default is `false`.
    fn is_selectable(&self) -> bool {
        false
    }

    /// Performs the row's selection action.
    ///
    /// The default does nothing.
    fn select(&self) {}
}

/// A section of rows with an optional header and footer.
pub trait SectionViewModel: Send + Sync {
    /// Returns the rows of this section, in display order.
    ///
    /// The default is no rows.
    fn rows(&self) -> Vec<CellViewModelRef> {
        Vec::new()
    }

    /// Returns the section header.
    fn header(&self) -> Option<ViewModelRef> {
        None
    }

    /// Returns the section footer.
    fn footer(&self) -> Option<ViewModelRef> {
        None
    }
}

/// The four change notifications of a list view model.
///
/// Each slot has a single current subscriber, normally the screen presenting
/// the list. A model that changes its own title, header or footer fires the
/// matching slot once, synchronously, right after the change. Every reload
/// ends with exactly one `reload_data_finished` emission; use
/// [`begin_reload`](Self::begin_reload) to have that enforced.
#[derive(Debug, Default)]
pub struct TableViewModelSlots {
    /// Fired with the new title.
    pub title_did_change: Slot<Option<String>>,
    /// Fired with the new list-level header.
    pub header_did_change: Slot<Option<ViewModelRef>>,
    /// Fired with the new list-level footer.
    pub footer_did_change: Slot<Option<ViewModelRef>>,
    /// Fired once per reload, with `None` on success.
    pub reload_data_finished: Slot<Option<ReloadError>>,
}

impl TableViewModelSlots {
    /// Creates a set of unconnected slots.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a reload cycle.
    ///
    /// The returned ticket fires `reload_data_finished` exactly once: when it
    /// is finished, or with [`ReloadError::Cancelled`] if it is dropped first.
    pub fn begin_reload(self: &Arc<Self>) -> ReloadTicket {
        ReloadTicket::new(self.clone())
    }

    /// Disconnects all four slots.
    pub fn disconnect_all(&self) {
        self.title_did_change.clear();
        self.header_did_change.clear();
        self.footer_did_change.clear();
        self.reload_data_finished.clear();
    }
}

/// The root of a list's view-model tree.
///
/// Every method has a default. The lookup methods are derived from
/// [`sections`](Self::sections) and normally need no override.
///
/// # Positions
///
/// Lookups address rows with an [`IndexPath`]. Querying a section or row that
/// does not exist is a contract violation by the caller and panics; use
/// [`contains`](Self::contains) to test a position first.
pub trait TableViewModel: Send + Sync {
    /// Returns the list title.
    fn title(&self) -> Option<String> {
        None
    }

    /// Returns the sections, in display order.
    ///
    /// The returned vector is a snapshot: rendering one pass from it sees a
    /// stable tree even if the model is replaced concurrently.
    fn sections(&self) -> Vec<SectionViewModelRef> {
        Vec::new()
    }

    /// Returns the list-level header.
    fn header(&self) -> Option<ViewModelRef> {
        None
    }

    /// Returns the list-level footer.
    fn footer(&self) -> Option<ViewModelRef> {
        None
    }

    /// Returns the number of sections.
    fn number_of_sections(&self) -> usize {
        self.sections().len()
    }

    /// Returns the number of rows in `section`.
    ///
    /// # Panics
    ///
    /// Panics if `section >= number_of_sections()`.
    fn number_of_rows(&self, section: usize) -> usize {
        section_at(&self.sections(), section).rows().len()
    }

    /// Returns the row at `index_path`.
    ///
    /// # Panics
    ///
    /// Panics if either coordinate is out of range.
    fn item(&self, index_path: IndexPath) -> CellViewModelRef {
        let sections = self.sections();
        let rows = section_at(&sections, index_path.section).rows();
        match rows.get(index_path.row) {
            Some(row) => row.clone(),
            None => panic!(
                "row index {} out of range for section {} with {} rows",
                index_path.row,
                index_path.section,
                rows.len()
            ),
        }
    }

    /// Returns the header of `section`.
    ///
    /// # Panics
    ///
    /// Panics if `section >= number_of_sections()`.
    fn header_item(&self, section: usize) -> Option<ViewModelRef> {
        section_at(&self.sections(), section).header()
    }

    /// Returns the footer of `section`.
    ///
    /// # Panics
    ///
    /// Panics if `section >= number_of_sections()`.
    fn footer_item(&self, section: usize) -> Option<ViewModelRef> {
        section_at(&self.sections(), section).footer()
    }

    /// Returns `true` if the row at `index_path` is selectable.
    ///
    /// # Panics
    ///
    /// Panics if either coordinate is out of range.
    fn can_select_item(&self, index_path: IndexPath) -> bool {
        self.item(index_path).is_selectable()
    }

    /// Runs the selection action of the row at `index_path`.
    ///
    /// The row's selectability is not checked here; see
    /// [`can_select_item`](Self::can_select_item).
    ///
    /// # Panics
    ///
    /// Panics if either coordinate is out of range.
    fn select_item(&self, index_path: IndexPath) {
        let item = self.item(index_path);
        tracing::debug!(
            target: targets::SELECTION,
            %index_path,
            kind = %item.kind(),
            selectable = item.is_selectable(),
            "selecting row"
        );
        item.select();
    }

    /// Returns the position of the first row whose kind equals `kind`.
    ///
    /// Sections are scanned in order, and rows in order within each section.
    fn first_position(&self, kind: &AnyKind) -> Option<IndexPath> {
        self.sections()
            .iter()
            .enumerate()
            .find_map(|(section_index, section)| {
                section
                    .rows()
                    .iter()
                    .position(|row| row.kind() == *kind)
                    .map(|row_index| IndexPath::new(section_index, row_index))
            })
    }

    /// Returns `true` if `index_path` addresses an existing row.
    fn contains(&self, index_path: IndexPath) -> bool {
        self.sections()
            .get(index_path.section)
            .is_some_and(|section| index_path.row < section.rows().len())
    }

    /// Asks the model to refresh itself.
    ///
    /// Models that override this must fire `reload_data_finished` exactly once
    /// per call. The default does nothing.
    fn reload_data(&self) {}

    /// Returns the notification slots of this model.
    ///
    /// The default is `None`: subscribers are ignored and the model never
    /// notifies.
    fn slots(&self) -> Option<&Arc<TableViewModelSlots>> {
        None
    }
}

/// Looks up a section, panicking with the valid range on a bad index.
fn section_at(sections: &[SectionViewModelRef], section: usize) -> &SectionViewModelRef {
    match sections.get(section) {
        Some(found) => found,
        None => panic!(
            "section index {section} out of range for {} sections",
            sections.len()
        ),
    }
}
