//! Registration of visual components by kind.
//!
//! Before a list can render, every kind its view models report must be mapped
//! to a component factory. The reuse identifier of a registration is the
//! kind's raw value, so two kinds with equal raw values share a registration.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use bradel_core::logging::targets;
use bradel_core::{AnyKind, KindTag};
use parking_lot::RwLock;

use super::configure::Configurable;
use super::error::{BindingError, Result};

/// Which part of a list a component renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentRole {
    /// A row.
    Cell,
    /// A section header or footer, or a list-level header or footer.
    HeaderFooter,
}

impl fmt::Display for ComponentRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cell => f.write_str("cell"),
            Self::HeaderFooter => f.write_str("header/footer"),
        }
    }
}

/// A visual component created by a [`ViewRegistry`].
///
/// Components that display view-model data expose themselves through
/// [`as_configurable`](Self::as_configurable). Purely decorative components
/// keep the default and are handed out unconfigured.
pub trait ViewComponent: Any + Send {
    /// Returns the component as [`Configurable`], if it is.
    fn as_configurable(&mut self) -> Option<&mut dyn Configurable> {
        None
    }
}

impl dyn ViewComponent {
    /// Downcasts a component to its concrete type.
    pub fn downcast_ref<T: ViewComponent>(&self) -> Option<&T> {
        (self as &dyn Any).downcast_ref::<T>()
    }

    /// Mutable variant of [`downcast_ref`](Self::downcast_ref).
    pub fn downcast_mut<T: ViewComponent>(&mut self) -> Option<&mut T> {
        (self as &mut dyn Any).downcast_mut::<T>()
    }
}

type ComponentFactory = Arc<dyn Fn() -> Box<dyn ViewComponent> + Send + Sync>;

#[derive(Clone)]
struct Registration {
    role: ComponentRole,
    type_name: &'static str,
    factory: ComponentFactory,
}

/// Maps kinds to component factories.
///
/// Registering a kind that is already registered replaces the previous entry.
#[derive(Default)]
pub struct ViewRegistry {
    entries: RwLock<HashMap<AnyKind, Registration>>,
}

impl ViewRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a row component for `kind`.
    pub fn register_cell<K, V, F>(&self, kind: K, factory: F)
    where
        K: KindTag,
        V: ViewComponent,
        F: Fn() -> V + Send + Sync + 'static,
    {
        self.register(kind, ComponentRole::Cell, factory);
    }

    /// Registers a header/footer component for `kind`.
    pub fn register_header_footer<K, V, F>(&self, kind: K, factory: F)
    where
        K: KindTag,
        V: ViewComponent,
        F: Fn() -> V + Send + Sync + 'static,
    {
        self.register(kind, ComponentRole::HeaderFooter, factory);
    }

    /// Registers a component for `kind` in `role`.
    pub fn register<K, V, F>(&self, kind: K, role: ComponentRole, factory: F)
    where
        K: KindTag,
        V: ViewComponent,
        F: Fn() -> V + Send + Sync + 'static,
    {
        let kind = AnyKind::new(kind);
        let registration = Registration {
            role,
            type_name: std::any::type_name::<V>(),
            factory: Arc::new(move || Box::new(factory()) as Box<dyn ViewComponent>),
        };
        tracing::debug!(
            target: targets::REGISTRY,
            reuse_identifier = kind.raw_value(),
            %role,
            component = registration.type_name,
            "registering component"
        );
        if let Some(previous) = self.entries.write().insert(kind, registration) {
            tracing::debug!(
                target: targets::REGISTRY,
                replaced = previous.type_name,
                "replaced existing registration"
            );
        }
    }

    /// Removes the registration for `kind`.
    ///
    /// Returns `true` if one existed.
    pub fn unregister(&self, kind: &AnyKind) -> bool {
        self.entries.write().remove(kind).is_some()
    }

    /// Returns the reuse identifier for `kind`, if it is registered.
    pub fn reuse_identifier(&self, kind: &AnyKind) -> Option<String> {
        self.entries
            .read()
            .get_key_value(kind)
            .map(|(key, _)| key.raw_value().to_owned())
    }

    /// Returns the role `kind` is registered in.
    pub fn role(&self, kind: &AnyKind) -> Option<ComponentRole> {
        self.entries.read().get(kind).map(|entry| entry.role)
    }

    /// Returns `true` if `kind` is registered in any role.
    pub fn is_registered(&self, kind: &AnyKind) -> bool {
        self.entries.read().contains_key(kind)
    }

    /// Returns the number of registrations.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns `true` if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Creates a component for `kind`, requiring it to be registered in `role`.
    pub fn create(&self, kind: &AnyKind, role: ComponentRole) -> Result<Box<dyn ViewComponent>> {
        let factory = {
            let entries = self.entries.read();
            let entry = entries
                .get(kind)
                .ok_or_else(|| BindingError::unregistered(kind.raw_value()))?;
            if entry.role != role {
                return Err(BindingError::RoleMismatch {
                    reuse_identifier: kind.raw_value().to_owned(),
                    expected: role,
                    found: entry.role,
                });
            }
            entry.factory.clone()
        };
        Ok(factory())
    }

    /// Creates a component for `kind` in whatever role it is registered.
    pub fn create_any(&self, kind: &AnyKind) -> Option<Box<dyn ViewComponent>> {
        let factory = self.entries.read().get(kind).map(|entry| entry.factory.clone())?;
        Some(factory())
    }
}

impl fmt::Debug for ViewRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entries = self.entries.read();
        let mut map = f.debug_map();
        for (kind, entry) in entries.iter() {
            map.entry(&kind.raw_value(), &(entry.role, entry.type_name));
        }
        map.finish()
    }
}

static_assertions::assert_impl_all!(ViewRegistry: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct LabelCell;

    impl ViewComponent for LabelCell {}

    #[derive(Debug, Default)]
    struct SectionTitle;

    impl ViewComponent for SectionTitle {}

    #[test]
    fn test_register_and_create() {
        let registry = ViewRegistry::new();
        registry.register_cell("label", LabelCell::default);
        registry.register_header_footer("title", SectionTitle::default);

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.role(&AnyKind::new("label")), Some(ComponentRole::Cell));
        assert_eq!(
            registry.reuse_identifier(&AnyKind::new("title")).as_deref(),
            Some("title")
        );

        let cell = registry
            .create(&AnyKind::new("label"), ComponentRole::Cell)
            .unwrap();
        assert!(cell.downcast_ref::<LabelCell>().is_some());
        assert!(cell.downcast_ref::<SectionTitle>().is_none());
    }

    #[test]
    fn test_create_errors() {
        let registry = ViewRegistry::new();
        registry.register_cell("label", LabelCell::default);

        let missing = registry
            .create(&AnyKind::new("missing"), ComponentRole::Cell)
            .err();
        assert_eq!(missing, Some(BindingError::unregistered("missing")));

        let wrong_role = registry
            .create(&AnyKind::new("label"), ComponentRole::HeaderFooter)
            .err();
        assert_eq!(
            wrong_role,
            Some(BindingError::RoleMismatch {
                reuse_identifier: "label".into(),
                expected: ComponentRole::HeaderFooter,
                found: ComponentRole::Cell,
            })
        );
        assert!(registry.create_any(&AnyKind::new("label")).is_some());
    }

    #[test]
    fn test_reregistering_replaces() {
        let registry = ViewRegistry::new();
        registry.register_cell("row", LabelCell::default);
        registry.register_header_footer(String::from("row"), SectionTitle::default);

        assert_eq!(registry.len(), 1);
        let component = registry
            .create(&AnyKind::new("row"), ComponentRole::HeaderFooter)
            .unwrap();
        assert!(component.downcast_ref::<SectionTitle>().is_some());
    }

    #[test]
    fn test_unregister() {
        let registry = ViewRegistry::new();
        registry.register_cell("row", LabelCell::default);
        assert!(registry.unregister(&AnyKind::new("row")));
        assert!(!registry.unregister(&AnyKind::new("row")));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_unconfigurable_component_by_default() {
        let mut cell: Box<dyn ViewComponent> = Box::new(LabelCell);
        assert!(cell.as_configurable().is_none());
    }
}
