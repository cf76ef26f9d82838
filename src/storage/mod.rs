//! Storage Layer - whole-document persistence
//!
//! The system of record is a single JSON document with one array per collection:
//! - vendors
//! - projects
//! - categories
//! - documents
//! - groups (optional, omitted while empty)
//!
//! Every operation loads the whole document and, for mutations, saves the whole
//! document back. There is no incremental indexing.

pub mod json_file;
pub mod memory;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

use crate::Result;
use crate::model::{Category, Document, Project, ProjectGroup, Vendor};
use serde::{Deserialize, Serialize};

/// Project ids start right after this value
pub const PROJECT_ID_FLOOR: u64 = 0;
/// Vendor ids start right after this value (first vendor is 101)
pub const VENDOR_ID_FLOOR: u64 = 100;
/// Category ids start right after this value, clear of hand-written seed data
pub const CATEGORY_ID_FLOOR: u64 = 1000;

/// Load/save seam between the repository and the backing medium.
pub trait Storage: Send + Sync {
    /// Read the whole document
    fn load(&self) -> Result<Dataset>;

    /// Replace the whole document
    fn save(&self, dataset: &Dataset) -> Result<()>;

    /// Human-readable location, used in log lines
    fn describe(&self) -> String;
}

/// The entire datastore
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub vendors: Vec<Vendor>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub documents: Vec<Document>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<ProjectGroup>,
}

/// Next id for a collection: highest existing id (or `floor`) plus one.
///
/// Ids are never reused and gaps are never filled.
pub fn next_id(ids: impl IntoIterator<Item = u64>, floor: u64) -> u64 {
    ids.into_iter().max().unwrap_or(floor) + 1
}

impl Dataset {
    pub fn project(&self, id: u64) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    pub fn project_mut(&mut self, id: u64) -> Option<&mut Project> {
        self.projects.iter_mut().find(|p| p.id == id)
    }

    pub fn category(&self, id: u64) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn vendor(&self, id: u64) -> Option<&Vendor> {
        self.vendors.iter().find(|v| v.id == id)
    }

    pub fn group(&self, id: u64) -> Option<&ProjectGroup> {
        self.groups.iter().find(|g| g.id == id)
    }

    /// Categories of a project, in stored order
    pub fn categories_for(&self, project_id: u64) -> impl Iterator<Item = &Category> {
        self.categories.iter().filter(move |c| c.project_id == project_id)
    }

    /// Projects whose `groupId` matches
    pub fn projects_in_group(&self, group_id: u64) -> impl Iterator<Item = &Project> {
        self.projects
            .iter()
            .filter(move |p| p.group_id == Some(group_id))
    }

    pub fn next_project_id(&self) -> u64 {
        next_id(self.projects.iter().map(|p| p.id), PROJECT_ID_FLOOR)
    }

    pub fn next_vendor_id(&self) -> u64 {
        next_id(self.vendors.iter().map(|v| v.id), VENDOR_ID_FLOOR)
    }

    pub fn next_category_id(&self) -> u64 {
        next_id(self.categories.iter().map(|c| c.id), CATEGORY_ID_FLOOR)
    }
}
