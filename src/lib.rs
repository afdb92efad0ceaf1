//! # gvkreg - Generic adapter registry for external frameworks
//!
//! Maps configured external frameworks to their Group-Version-Kind so that
//! workload controllers can ask "is there a generic adapter for this kind?".
//!
//! gvkreg provides:
//! - A single kind-reference parser producing canonical GVK identifiers
//! - A registry that replaces its contents on every load and tolerates bad entries
//! - An atomically swapped shared snapshot for concurrent readers
//! - A file watcher that keeps the shared snapshot in sync with its config file

pub mod gvk;
pub mod config;
pub mod registry;
pub mod shared;
pub mod watcher;
pub mod output;
pub mod ui;

// Re-exports for convenient access
pub use gvk::GroupVersionKind;
pub use config::{ExternalFramework, FrameworkConfig};
pub use registry::{FrameworkRegistry, GenericAdapter};
pub use shared::SharedRegistry;

/// Result type alias for gvkreg operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for gvkreg operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("name is required")]
    EmptyName,

    #[error("invalid GVK format '{0}'")]
    MalformedIdentifier(String),

    #[error("encountered {count} configuration errors (see logs for details)")]
    BatchPartialFailure { count: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    ConfigParse(String),
}
