//! Error types for Bradel.

use std::sync::Arc;

/// Failure reported through a list's reload-finished notification.
///
/// The core never interprets this value; it only guarantees that each reload
/// delivers exactly one completion, carrying `None` on success and a
/// `ReloadError` otherwise.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ReloadError {
    /// The reload was abandoned before it produced a result.
    #[error("reload was cancelled")]
    Cancelled,

    /// The reload failed with a message.
    #[error("reload failed: {0}")]
    Failed(String),

    /// The reload failed with an underlying error.
    #[error("reload failed: {0}")]
    Source(Arc<dyn std::error::Error + Send + Sync>),
}

impl ReloadError {
    /// Creates a failure with a message.
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed(message.into())
    }

    /// Wraps an arbitrary error.
    pub fn from_source<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Source(Arc::new(err))
    }

    /// Returns `true` if the reload was cancelled rather than failed.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_display() {
        assert_eq!(ReloadError::Cancelled.to_string(), "reload was cancelled");
        assert_eq!(
            ReloadError::failed("offline").to_string(),
            "reload failed: offline"
        );
        let err = ReloadError::from_source(io::Error::new(io::ErrorKind::TimedOut, "timed out"));
        assert_eq!(err.to_string(), "reload failed: timed out");
    }

    #[test]
    fn test_clone_keeps_source() {
        let err = ReloadError::from_source(io::Error::other("boom"));
        let copy = err.clone();
        assert!(!copy.is_cancelled());
        assert!(matches!(copy, ReloadError::Source(_)));
    }
}
