//! End-to-end tests: view models, registry, binding and a recording surface.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use bradel::model::{
    BindingConfig, CellViewModel, CellViewModelRef, ConfigurableView, IdentifiableViewModel,
    IndexPath, ListSurface, ListStyle, LoadingTableViewModel, SectionViewModelRef,
    SimpleCellViewModel, SimpleSectionViewModel, SimpleTableViewModel, TableAccessory,
    TableBinding, TableViewModel, ViewComponent, ViewModelTreeDebug, ViewRegistry,
};
use bradel::{AnyKind, KindTag, ReloadError};
use parking_lot::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, KindTag)]
enum SettingsKind {
    #[kind(raw = "settings.switch")]
    Switch,
    #[kind(raw = "settings.action")]
    Action,
    #[kind(raw = "settings.section_title")]
    SectionTitle,
}

struct SwitchRow {
    title: String,
    on: bool,
}

impl IdentifiableViewModel for SwitchRow {
    fn kind(&self) -> AnyKind {
        AnyKind::new(SettingsKind::Switch)
    }
}

impl CellViewModel for SwitchRow {}

struct ActionRow {
    title: String,
    presses: Arc<AtomicUsize>,
}

impl IdentifiableViewModel for ActionRow {
    fn kind(&self) -> AnyKind {
        AnyKind::new(SettingsKind::Action)
    }
}

impl CellViewModel for ActionRow {
    fn is_selectable(&self) -> bool {
        true
    }

    fn select(&self) {
        self.presses.fetch_add(1, Ordering::SeqCst);
    }
}

#[derive(Default)]
struct SwitchCell {
    label: String,
    on: bool,
}

impl ConfigurableView for SwitchCell {
    type Model = SwitchRow;

    fn configure_with_model(&mut self, model: &SwitchRow) {
        self.label = model.title.clone();
        self.on = model.on;
    }
}

impl ViewComponent for SwitchCell {
    fn as_configurable(&mut self) -> Option<&mut dyn bradel::model::Configurable> {
        Some(self)
    }
}

#[derive(Default)]
struct ActionCell {
    label: String,
}

impl ConfigurableView for ActionCell {
    type Model = ActionRow;

    fn configure_with_model(&mut self, model: &ActionRow) {
        self.label = model.title.clone();
    }
}

impl ViewComponent for ActionCell {
    fn as_configurable(&mut self) -> Option<&mut dyn bradel::model::Configurable> {
        Some(self)
    }
}

#[derive(Default)]
struct RecordingSurface {
    title: Option<String>,
    header: Option<String>,
    reloads: usize,
    errors: Vec<String>,
}

impl ListSurface for RecordingSurface {
    fn set_title(&mut self, title: Option<String>) {
        self.title = title;
    }

    fn set_table_header(&mut self, header: TableAccessory) {
        self.header = Some(format!("{header:?}"));
    }

    fn set_table_footer(&mut self, _footer: TableAccessory) {}

    fn reload_data(&mut self, error: Option<&ReloadError>) {
        self.reloads += 1;
        if let Some(error) = error {
            self.errors.push(error.to_string());
        }
    }
}

fn registry() -> Arc<ViewRegistry> {
    let registry = Arc::new(ViewRegistry::new());
    registry.register_cell(SettingsKind::Switch, SwitchCell::default);
    registry.register_cell(SettingsKind::Action, ActionCell::default);
    registry
}

fn row(kind: &'static str) -> CellViewModelRef {
    Arc::new(SimpleCellViewModel::new(kind, false))
}

fn section(rows: Vec<CellViewModelRef>) -> SectionViewModelRef {
    Arc::new(SimpleSectionViewModel::new(rows))
}

#[test]
fn test_two_section_lookup() {
    let model = SimpleTableViewModel::new().with_sections(vec![
        section(vec![row("x1"), row("x2")]),
        section(vec![row("x1")]),
    ]);

    assert_eq!(
        model.first_position(&AnyKind::new("x1")),
        Some(IndexPath::new(0, 0))
    );
    assert_eq!(model.item(IndexPath::new(1, 0)).kind(), AnyKind::new("x1"));
    assert_eq!(model.number_of_rows(1), 1);
}

#[test]
fn test_derived_kind_matches_string_kind() {
    let model = SimpleTableViewModel::new().with_sections(vec![section(vec![
        row("settings.action"),
        row("settings.switch"),
    ])]);
    assert_eq!(
        model.first_position(&AnyKind::new(SettingsKind::Switch)),
        Some(IndexPath::new(0, 1))
    );
    assert_eq!(SettingsKind::SectionTitle.raw_value(), "settings.section_title");
}

#[test]
fn test_render_select_and_reappear() {
    let presses = Arc::new(AtomicUsize::new(0));
    let rows = vec![
        Arc::new(SwitchRow {
            title: "Wi-Fi".into(),
            on: true,
        }) as CellViewModelRef,
        Arc::new(ActionRow {
            title: "Sign out".into(),
            presses: presses.clone(),
        }) as CellViewModelRef,
    ];
    let model = Arc::new(
        SimpleTableViewModel::new()
            .with_title("Settings")
            .with_sections(vec![section(rows)]),
    );
    let binding = TableBinding::new(registry(), BindingConfig::default());
    binding.set_view_model(Some(model.clone()));

    let switch = binding.cell_for_row(IndexPath::new(0, 0)).unwrap();
    let switch = switch.downcast_ref::<SwitchCell>().unwrap();
    assert_eq!((switch.label.as_str(), switch.on), ("Wi-Fi", true));

    let action = binding.cell_for_row(IndexPath::new(0, 1)).unwrap();
    assert_eq!(action.downcast_ref::<ActionCell>().unwrap().label, "Sign out");

    let switch_path = IndexPath::new(0, 0);
    let action_path = IndexPath::new(0, 1);
    assert!(!binding.should_highlight(switch_path));
    assert!(binding.should_highlight(action_path));

    assert!(binding.did_select(action_path));
    assert!(!binding.did_select(switch_path));
    assert_eq!(presses.load(Ordering::SeqCst), 1);
    assert_eq!(binding.view_will_appear(), Some(action_path));
    assert_eq!(binding.view_will_appear(), None);
}

#[test]
fn test_mismatched_component_stays_unconfigured() {
    // A plain row reporting the switch kind gets a switch cell, but the cell
    // cannot read it and keeps its defaults.
    let model = Arc::new(
        SimpleTableViewModel::new()
            .with_sections(vec![section(vec![row("settings.switch")])]),
    );
    let binding = TableBinding::new(registry(), BindingConfig::default());
    binding.set_view_model(Some(model));

    let cell = binding.cell_for_row(IndexPath::new(0, 0)).unwrap();
    let cell = cell.downcast_ref::<SwitchCell>().unwrap();
    assert_eq!(cell.label, "");
    assert!(!cell.on);
}

#[test]
fn test_title_notification_fires_once_per_set() {
    let model = SimpleTableViewModel::new().with_title("A");
    let titles = Arc::new(Mutex::new(Vec::new()));
    let recorded = titles.clone();
    model
        .slots()
        .title_did_change
        .connect(move |title| recorded.lock().push(title.clone()));

    model.set_title(Some("A".into()));
    assert_eq!(*titles.lock(), vec![Some("A".to_string())]);
}

#[test]
fn test_changes_flow_to_surface() {
    let model = Arc::new(SimpleTableViewModel::new().with_title("Before"));
    let binding = TableBinding::new(registry(), BindingConfig::default());
    binding.set_view_model(Some(model.clone()));

    let mut surface = RecordingSurface::default();
    binding.drain_changes(&mut surface);
    assert_eq!(surface.title.as_deref(), Some("Before"));
    assert_eq!(surface.reloads, 1);

    model.set_title(Some("After".into()));
    model.set_header(None);
    model.reload_data();
    assert_eq!(binding.drain_changes(&mut surface), 3);

    assert_eq!(surface.title.as_deref(), Some("After"));
    assert_eq!(surface.header.as_deref(), Some("Spacer { height: 35.0 }"));
    assert_eq!(surface.reloads, 2);
    assert!(surface.errors.is_empty());
}

#[test]
fn test_plain_list_clears_header() {
    let model = Arc::new(SimpleTableViewModel::new());
    let binding = TableBinding::new(
        registry(),
        BindingConfig::default().with_style(ListStyle::Plain),
    );
    binding.set_view_model(Some(model.clone()));
    model.set_header(None);

    let mut surface = RecordingSurface::default();
    binding.drain_changes(&mut surface);
    assert_eq!(surface.header.as_deref(), Some("Empty"));
}

#[test]
fn test_loading_model_reports_each_reload_once() {
    let attempts = Arc::new(AtomicUsize::new(0));
    let counter = attempts.clone();
    let model = Arc::new(LoadingTableViewModel::new(move || {
        match counter.fetch_add(1, Ordering::SeqCst) {
            0 => Ok(vec![section(vec![row("x1")])]),
            _ => Err(ReloadError::failed("server unavailable")),
        }
    }));
    let binding = TableBinding::new(registry(), BindingConfig::default());
    binding.set_view_model(Some(model.clone()));
    let mut surface = RecordingSurface::default();
    binding.drain_changes(&mut surface);

    binding.reload();
    binding.reload();
    binding.drain_changes(&mut surface);

    // One reload for the model swap and one per completed load.
    assert_eq!(surface.reloads, 3);
    assert_eq!(surface.errors, vec!["reload failed: server unavailable".to_string()]);
    assert_eq!(binding.number_of_rows(0), 1);
}

#[test]
fn test_tree_dump_of_bound_model() {
    let model = SimpleTableViewModel::new()
        .with_title("Dump")
        .with_sections(vec![section(vec![row("x1")])]);
    let dump = ViewModelTreeDebug::new().format(&model);
    assert_eq!(dump, "Dump\n└── section 0 (1 row)\n    └── [0, 0] x1\n");
}

#[test]
fn test_logging_with_subscriber_installed() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("bradel=trace,bradel_core=trace")
        .with_test_writer()
        .try_init();

    let model = Arc::new(
        SimpleTableViewModel::new().with_sections(vec![section(vec![row("unregistered")])]),
    );
    let binding = TableBinding::new(registry(), BindingConfig::default());
    binding.set_view_model(Some(model));
    assert!(binding.cell_for_row(IndexPath::new(0, 0)).is_err());
}
