//! Logging facilities for Bradel.
//!
//! Bradel uses the `tracing` crate for instrumentation and never installs a
//! subscriber itself. To see logs, install one in your application:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("bradel=debug,bradel_core::slot=trace")
//!     .init();
//! ```
//!
//! The constants below name the targets and spans used throughout the
//! workspace so filters do not have to hard-code strings.

/// Span names used throughout Bradel for tracing.
pub mod span_names {
    /// Reload cycle span.
    pub const RELOAD: &str = "bradel::reload";
    /// Cell binding span.
    pub const BIND: &str = "bradel::bind";
}

/// Target names for log filtering.
pub mod targets {
    /// Notification slots.
    pub const SLOT: &str = "bradel_core::slot";
    /// View model traits and convenience models.
    pub const MODEL: &str = "bradel::model";
    /// Selection dispatch.
    pub const SELECTION: &str = "bradel::model::selection";
    /// Reload lifecycle.
    pub const RELOAD: &str = "bradel::model::reload";
    /// List binding.
    pub const BINDING: &str = "bradel::model::binding";
    /// Component registry.
    pub const REGISTRY: &str = "bradel::model::registry";
}
