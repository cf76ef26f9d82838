//! # Bidtrack - Construction bid tracking backend
//!
//! Tracks construction projects, their bid categories and the vendor quotes
//! collected for each category.
//!
//! Bidtrack provides:
//! - Typed records for projects, categories, vendors, groups and documents
//! - A single JSON document as the whole datastore, behind a `Storage` trait
//! - A repository that joins categories to vendors and derives dashboard metrics
//! - An axum HTTP API serving the dashboard
//! - A static catalog of project templates

pub mod model;
pub mod storage;
pub mod repository;
pub mod templates;
pub mod server;
pub mod config;
pub mod output;
pub mod ui;

// Re-exports for convenient access
pub use model::{
    BidStatus, Category, CategoryStatus, Document, NewCategory, NewProject, NewVendor, Project,
    ProjectGroup, ProjectStatus, ProjectUpdate, Vendor, VendorParticipation,
};
pub use repository::Repository;
pub use storage::{Dataset, JsonFileStore, MemoryStore, Storage};

/// Result type alias for Bidtrack operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for Bidtrack operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid {field}: {message}")]
    Validation { field: String, message: String },

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: u64 },

    #[error("Template not found: {0}")]
    TemplateNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl Error {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn not_found(entity: &'static str, id: u64) -> Self {
        Error::NotFound { entity, id }
    }

    /// True for errors caused by the caller's input rather than the system
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Error::Validation { .. } | Error::NotFound { .. } | Error::TemplateNotFound(_)
        )
    }
}
