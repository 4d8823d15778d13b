//! Binding a list view model to a rendering surface.
//!
//! [`TableBinding`] is the consumer side of the view-model contract. It
//! answers the questions a list surface asks while rendering (how many
//! sections and rows, which component shows a row, may a row be highlighted)
//! and forwards the model's notifications to the surface.
//!
//! Models may notify from any thread. The binding never calls into the surface
//! from a notification; it queues a [`ListChange`] instead, and the surface
//! applies queued changes on its own thread with
//! [`drain_changes`](TableBinding::drain_changes).
//!
//! # Example
//!
//! ```ignore
//! let registry = Arc::new(ViewRegistry::new());
//! registry.register_cell("toggle", ToggleCell::default);
//!
//! let binding = TableBinding::new(registry, BindingConfig::default());
//! binding.set_view_model(Some(model.clone()));
//!
//! // Later, on the surface's thread:
//! binding.drain_changes(&mut surface);
//! let cell = binding.cell_for_row(IndexPath::new(0, 0))?;
//! ```

use std::fmt;
use std::sync::Arc;

use bradel_core::logging::{span_names, targets};
use bradel_core::{ReloadError, SlotId};
use crossbeam_channel::{Receiver, Sender};
use parking_lot::{Mutex, RwLock};

use super::config::{BindingConfig, ListStyle};
use super::error::{BindingError, Result};
use super::index::IndexPath;
use super::registry::{ComponentRole, ViewComponent, ViewRegistry};
use super::traits::{IdentifiableViewModel, TableViewModel, TableViewModelSlots, ViewModelRef};

/// A queued notification from the bound model.
#[derive(Clone)]
pub enum ListChange {
    /// The title changed.
    TitleChanged(Option<String>),
    /// The list-level header changed.
    HeaderChanged(Option<ViewModelRef>),
    /// The list-level footer changed.
    FooterChanged(Option<ViewModelRef>),
    /// A reload finished, with its error if it failed.
    ReloadFinished(Option<ReloadError>),
    /// The bound model was replaced.
    ModelReplaced,
}

impl fmt::Debug for ListChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TitleChanged(title) => f.debug_tuple("TitleChanged").field(title).finish(),
            Self::HeaderChanged(header) => f
                .debug_tuple("HeaderChanged")
                .field(&header.as_ref().map(|h| h.kind()))
                .finish(),
            Self::FooterChanged(footer) => f
                .debug_tuple("FooterChanged")
                .field(&footer.as_ref().map(|h| h.kind()))
                .finish(),
            Self::ReloadFinished(error) => f.debug_tuple("ReloadFinished").field(error).finish(),
            Self::ModelReplaced => f.write_str("ModelReplaced"),
        }
    }
}

/// What a surface shows in its list-level header or footer area.
pub enum TableAccessory {
    /// A configured component.
    View(Box<dyn ViewComponent>),
    /// Blank space of the given height.
    Spacer { height: f32 },
    /// Nothing.
    Empty,
}

impl TableAccessory {
    /// Returns `true` for [`TableAccessory::Empty`].
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Returns the component, if this is a view.
    pub fn view(&self) -> Option<&dyn ViewComponent> {
        match self {
            Self::View(view) => Some(view.as_ref()),
            _ => None,
        }
    }
}

impl fmt::Debug for TableAccessory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::View(_) => f.write_str("View(..)"),
            Self::Spacer { height } => f.debug_struct("Spacer").field("height", height).finish(),
            Self::Empty => f.write_str("Empty"),
        }
    }
}

/// A rendering surface driven by a [`TableBinding`].
pub trait ListSurface {
    /// Shows a new title.
    fn set_title(&mut self, title: Option<String>);

    /// Replaces the list-level header area.
    fn set_table_header(&mut self, header: TableAccessory);

    /// Replaces the list-level footer area.
    fn set_table_footer(&mut self, footer: TableAccessory);

    /// Re-renders every row.
    ///
    /// `error` is the reload failure, if any. The rows are refreshed either
    /// way.
    fn reload_data(&mut self, error: Option<&ReloadError>);
}

/// The slot handlers a binding installed on one model.
struct Subscription {
    slots: Arc<TableViewModelSlots>,
    title: SlotId,
    header: SlotId,
    footer: SlotId,
    reload: SlotId,
}

impl Subscription {
    fn connect(slots: &Arc<TableViewModelSlots>, changes: &Sender<ListChange>) -> Self {
        let tx = changes.clone();
        let title = slots.title_did_change.connect(move |title| {
            let _ = tx.send(ListChange::TitleChanged(title.clone()));
        });
        let tx = changes.clone();
        let header = slots.header_did_change.connect(move |header| {
            let _ = tx.send(ListChange::HeaderChanged(header.clone()));
        });
        let tx = changes.clone();
        let footer = slots.footer_did_change.connect(move |footer| {
            let _ = tx.send(ListChange::FooterChanged(footer.clone()));
        });
        let tx = changes.clone();
        let reload = slots.reload_data_finished.connect(move |error| {
            let _ = tx.send(ListChange::ReloadFinished(error.clone()));
        });

        Self {
            slots: slots.clone(),
            title,
            header,
            footer,
            reload,
        }
    }

    /// Removes the handlers that are still ours.
    fn release(self) {
        self.slots.title_did_change.disconnect(self.title);
        self.slots.header_did_change.disconnect(self.header);
        self.slots.footer_did_change.disconnect(self.footer);
        self.slots.reload_data_finished.disconnect(self.reload);
    }
}

/// Connects a list view model to a component registry and a surface.
pub struct TableBinding<M: TableViewModel + ?Sized + 'static> {
    model: RwLock<Option<Arc<M>>>,
    subscription: Mutex<Option<Subscription>>,
    registry: Arc<ViewRegistry>,
    config: BindingConfig,
    selected: Mutex<Option<IndexPath>>,
    changes_tx: Sender<ListChange>,
    changes_rx: Receiver<ListChange>,
}

impl<M: TableViewModel + ?Sized + 'static> TableBinding<M> {
    /// Creates a binding with no model.
    pub fn new(registry: Arc<ViewRegistry>, config: BindingConfig) -> Self {
        let (changes_tx, changes_rx) = crossbeam_channel::unbounded();
        Self {
            model: RwLock::new(None),
            subscription: Mutex::new(None),
            registry,
            config,
            selected: Mutex::new(None),
            changes_tx,
            changes_rx,
        }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &BindingConfig {
        &self.config
    }

    /// Returns the component registry.
    pub fn registry(&self) -> &Arc<ViewRegistry> {
        &self.registry
    }

    /// Returns the bound model.
    pub fn view_model(&self) -> Option<Arc<M>> {
        self.model.read().clone()
    }

    /// Replaces the bound model.
    ///
    /// The previous model's slots are released and the new model's slots are
    /// subscribed. The recorded selection is cleared, and the new title and a
    /// full reload are queued for the surface.
    pub fn set_view_model(&self, model: Option<Arc<M>>) {
        {
            let mut subscription = self.subscription.lock();
            if let Some(previous) = subscription.take() {
                previous.release();
            }
            *subscription = model
                .as_ref()
                .and_then(|model| model.slots())
                .map(|slots| Subscription::connect(slots, &self.changes_tx));
        }

        let title = model.as_ref().and_then(|model| model.title());
        tracing::debug!(
            target: targets::BINDING,
            has_model = model.is_some(),
            ?title,
            "view model replaced"
        );
        *self.model.write() = model;
        *self.selected.lock() = None;
        self.queue(ListChange::TitleChanged(title));
        self.queue(ListChange::ModelReplaced);
    }

    /// Asks the bound model to reload.
    pub fn reload(&self) {
        if let Some(model) = self.view_model() {
            model.reload_data();
        }
    }

    /// Returns the title of the bound model.
    pub fn title(&self) -> Option<String> {
        self.view_model().and_then(|model| model.title())
    }

    /// Returns the number of sections, or 0 without a model.
    pub fn number_of_sections(&self) -> usize {
        self.view_model()
            .map_or(0, |model| model.number_of_sections())
    }

    /// Returns the number of rows in `section`, or 0 without a model.
    ///
    /// # Panics
    ///
    /// Panics if a model is bound and `section` is out of range.
    pub fn number_of_rows(&self, section: usize) -> usize {
        self.view_model()
            .map_or(0, |model| model.number_of_rows(section))
    }

    /// Creates and configures the component for the row at `index_path`.
    ///
    /// # Panics
    ///
    /// Panics if a model is bound and `index_path` is out of range.
    pub fn cell_for_row(&self, index_path: IndexPath) -> Result<Box<dyn ViewComponent>> {
        let model = self.view_model().ok_or(BindingError::NoViewModel)?;
        let item = model.item(index_path);
        let kind = item.kind();

        let span = tracing::debug_span!(
            target: targets::BINDING,
            span_names::BIND,
            %index_path,
            %kind
        );
        let _entered = span.enter();

        let mut component = self
            .registry
            .create(&kind, ComponentRole::Cell)
            .inspect_err(|err| tracing::warn!(target: targets::BINDING, %err, "cannot bind row"))?;
        configure(component.as_mut(), item.as_ref());
        Ok(component)
    }

    /// Creates and configures the header component of `section`.
    ///
    /// Returns `None` when the section has no header, or when its kind is not
    /// registered as a header/footer component.
    ///
    /// # Panics
    ///
    /// Panics if a model is bound and `section` is out of range.
    pub fn header_view(&self, section: usize) -> Option<Box<dyn ViewComponent>> {
        let header = self.view_model()?.header_item(section)?;
        self.section_supplement(header.as_ref())
    }

    /// Creates and configures the footer component of `section`.
    ///
    /// Same rules as [`header_view`](Self::header_view).
    pub fn footer_view(&self, section: usize) -> Option<Box<dyn ViewComponent>> {
        let footer = self.view_model()?.footer_item(section)?;
        self.section_supplement(footer.as_ref())
    }

    /// Creates and configures the list-level header component.
    ///
    /// Any registered component may serve as the list header.
    pub fn table_header_view(&self) -> Option<Box<dyn ViewComponent>> {
        let header = self.view_model()?.header()?;
        self.accessory_view(header.as_ref())
    }

    /// Creates and configures the list-level footer component.
    pub fn table_footer_view(&self) -> Option<Box<dyn ViewComponent>> {
        let footer = self.view_model()?.footer()?;
        self.accessory_view(footer.as_ref())
    }

    /// Returns `true` if the row at `index_path` may be highlighted.
    ///
    /// # Panics
    ///
    /// Panics if a model is bound and `index_path` is out of range.
    pub fn should_highlight(&self, index_path: IndexPath) -> bool {
        self.view_model()
            .is_some_and(|model| model.can_select_item(index_path))
    }

    /// Records the selection of the row at `index_path` and runs its action.
    ///
    /// Rows that are not selectable are ignored. Returns `true` if the
    /// selection was taken.
    ///
    /// # Panics
    ///
    /// Panics if a model is bound and `index_path` is out of range.
    pub fn did_select(&self, index_path: IndexPath) -> bool {
        let Some(model) = self.view_model() else {
            return false;
        };
        if !model.can_select_item(index_path) {
            tracing::trace!(target: targets::SELECTION, %index_path, "ignoring non-selectable row");
            return false;
        }
        *self.selected.lock() = Some(index_path);
        model.select_item(index_path);
        true
    }

    /// Returns the recorded selection.
    pub fn selected(&self) -> Option<IndexPath> {
        *self.selected.lock()
    }

    /// Clears the recorded selection and returns the row to deselect.
    pub fn view_will_appear(&self) -> Option<IndexPath> {
        self.selected.lock().take()
    }

    /// Returns the row height estimate.
    pub fn estimated_row_height(&self) -> f32 {
        self.config.estimated_row_height
    }

    /// Returns the section header height estimate.
    pub fn estimated_section_header_height(&self) -> f32 {
        self.config.estimated_section_supplement_height()
    }

    /// Returns the section footer height estimate.
    pub fn estimated_section_footer_height(&self) -> f32 {
        self.config.estimated_section_supplement_height()
    }

    /// Returns the receiving end of the change queue.
    ///
    /// Hosts that multiplex several queues can select on it; everyone else
    /// uses [`drain_changes`](Self::drain_changes).
    pub fn changes(&self) -> &Receiver<ListChange> {
        &self.changes_rx
    }

    /// Returns the number of queued changes.
    pub fn pending_changes(&self) -> usize {
        self.changes_rx.len()
    }

    /// Applies every queued change to `surface`, in order.
    ///
    /// Returns the number of changes applied.
    pub fn drain_changes<S: ListSurface + ?Sized>(&self, surface: &mut S) -> usize {
        let mut applied = 0;
        for change in self.changes_rx.try_iter() {
            self.apply(change, surface);
            applied += 1;
        }
        applied
    }

    /// Applies one change to `surface`.
    pub fn apply<S: ListSurface + ?Sized>(&self, change: ListChange, surface: &mut S) {
        tracing::trace!(target: targets::BINDING, ?change, "applying list change");
        match change {
            ListChange::TitleChanged(title) => surface.set_title(title),
            ListChange::HeaderChanged(Some(header)) => {
                surface.set_table_header(self.accessory(header.as_ref()));
            }
            ListChange::HeaderChanged(None) => {
                let header = match self.config.style {
                    ListStyle::Grouped => TableAccessory::Spacer {
                        height: self.config.grouped_header_spacer_height,
                    },
                    ListStyle::Plain => TableAccessory::Empty,
                };
                surface.set_table_header(header);
            }
            ListChange::FooterChanged(Some(footer)) => {
                surface.set_table_footer(self.accessory(footer.as_ref()));
            }
            ListChange::FooterChanged(None) => surface.set_table_footer(TableAccessory::Empty),
            ListChange::ReloadFinished(error) => surface.reload_data(error.as_ref()),
            ListChange::ModelReplaced => surface.reload_data(None),
        }
    }

    fn queue(&self, change: ListChange) {
        // The receiver lives as long as `self`.
        let _ = self.changes_tx.send(change);
    }

    fn section_supplement(&self, view_model: &dyn IdentifiableViewModel) -> Option<Box<dyn ViewComponent>> {
        let mut component = self
            .registry
            .create(&view_model.kind(), ComponentRole::HeaderFooter)
            .ok()?;
        configure(component.as_mut(), view_model);
        Some(component)
    }

    fn accessory_view(&self, view_model: &dyn IdentifiableViewModel) -> Option<Box<dyn ViewComponent>> {
        let kind = view_model.kind();
        let Some(mut component) = self.registry.create_any(&kind) else {
            tracing::warn!(
                target: targets::BINDING,
                reuse_identifier = kind.raw_value(),
                "no component registered for list accessory"
            );
            return None;
        };
        configure(component.as_mut(), view_model);
        Some(component)
    }

    fn accessory(&self, view_model: &dyn IdentifiableViewModel) -> TableAccessory {
        self.accessory_view(view_model)
            .map_or(TableAccessory::Empty, TableAccessory::View)
    }
}

impl<M: TableViewModel + ?Sized + 'static> Drop for TableBinding<M> {
    fn drop(&mut self) {
        if let Some(subscription) = self.subscription.get_mut().take() {
            subscription.release();
        }
    }
}

impl<M: TableViewModel + ?Sized + 'static> fmt::Debug for TableBinding<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableBinding")
            .field("has_model", &self.model.read().is_some())
            .field("config", &self.config)
            .field("selected", &self.selected())
            .field("pending_changes", &self.pending_changes())
            .finish_non_exhaustive()
    }
}

fn configure(component: &mut dyn ViewComponent, view_model: &dyn IdentifiableViewModel) {
    if let Some(configurable) = component.as_configurable() {
        configurable.configure(view_model);
    }
}

static_assertions::assert_impl_all!(TableBinding<dyn TableViewModel>: Send, Sync);
