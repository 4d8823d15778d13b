//! Configuring visual components from view models.
//!
//! A rendering surface hands each component the type-erased view model it
//! should display. Components implement [`Configurable`] to accept it.
//!
//! Most components expect exactly one concrete view-model type. They
//! implement [`ConfigurableView`] instead and get [`Configurable`] for free:
//! the blanket implementation downcasts the erased model and configures the
//! component only when the type matches. On a mismatch nothing happens. Reuse
//! pools make such mismatches transient, so they must never crash rendering.
//!
//! # Example
//!
//! ```ignore
//! use bradel::model::{ConfigurableView, IdentifiableViewModel};
//!
//! struct SwitchCell {
//!     label: String,
//!     on: bool,
//! }
//!
//! impl ConfigurableView for SwitchCell {
//!     type Model = SwitchRow;
//!
//!     fn configure_with_model(&mut self, model: &SwitchRow) {
//!         self.label = model.title.clone();
//!         self.on = model.is_on();
//!     }
//! }
//! ```

use std::any::Any;

use bradel_core::logging::targets;

use super::traits::IdentifiableViewModel;

/// A visual component that can render itself from an erased view model.
pub trait Configurable {
    /// Updates the component from `view_model`.
    ///
    /// Returns `true` if the component accepted the model. A component that
    /// rejects a model must leave its state unchanged.
    fn configure(&mut self, view_model: &dyn IdentifiableViewModel) -> bool;
}

/// A visual component that expects one concrete view-model type.
pub trait ConfigurableView {
    /// The view-model type this component renders.
    type Model: IdentifiableViewModel;

    /// Updates the component from its expected model.
    fn configure_with_model(&mut self, model: &Self::Model);
}

impl<T: ConfigurableView> Configurable for T {
    fn configure(&mut self, view_model: &dyn IdentifiableViewModel) -> bool {
        match view_model_cast::<T::Model>(view_model) {
            Some(model) => {
                self.configure_with_model(model);
                true
            }
            None => {
                tracing::trace!(
                    target: targets::BINDING,
                    expected = std::any::type_name::<T::Model>(),
                    kind = %view_model.kind(),
                    "view model type mismatch, skipping configure"
                );
                false
            }
        }
    }
}

/// Downcasts an erased view model to its concrete type.
///
/// Returns `None` when `view_model` is not a `T`.
pub fn view_model_cast<T: IdentifiableViewModel>(view_model: &dyn IdentifiableViewModel) -> Option<&T> {
    (view_model as &dyn Any).downcast_ref::<T>()
}
