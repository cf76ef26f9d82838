//! Repository - lookups, joins and mutations over the datastore
//!
//! Every call reloads the whole document from storage; nothing is cached.
//! Mutations are a read-modify-write of the whole document, serialized by a
//! process-wide lock so two writers in this process cannot lose each other's
//! changes. Writers in other processes are not coordinated.

pub mod enrich;
pub mod outreach;

pub use enrich::{
    CategoryQuotes, CategoryWithVendors, CompetitionLevel, EnrichedVendor, GroupDetail,
    GroupSummary, ProjectDetail, ProjectMetrics, ProjectWithMetrics, QuoteAnalytics,
    VendorManagement, VendorStatusBreakdown,
};
pub use outreach::{OutreachAction, OutreachReceipt};

use std::sync::{Arc, Mutex};

use serde::Serialize;

use crate::model::{
    Category, NewCategory, NewProject, NewVendor, Project, ProjectUpdate, Vendor, timestamp,
};
use crate::storage::{Dataset, Storage};
use crate::templates::ProjectTemplate;
use crate::{Error, Result};

/// Outcome of a cascading project delete
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletedProject {
    pub project: Project,
    pub categories_removed: usize,
    pub documents_removed: usize,
}

/// Project and categories created from a template
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemplateInstance {
    pub project: Project,
    pub categories: Vec<Category>,
}

/// Data access for projects, categories, vendors and groups
pub struct Repository {
    store: Arc<dyn Storage>,
    write_lock: Mutex<()>,
}

impl Repository {
    pub fn new(store: Arc<dyn Storage>) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    /// Where the data lives, for logs and banners
    pub fn describe(&self) -> String {
        self.store.describe()
    }

    fn dataset(&self) -> Result<Dataset> {
        self.store.load()
    }

    /// Load, apply `change`, save. Nothing is written when `change` fails.
    fn mutate<T>(&self, change: impl FnOnce(&mut Dataset) -> Result<T>) -> Result<T> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|e| Error::Storage(e.to_string()))?;

        let mut dataset = self.store.load()?;
        let outcome = change(&mut dataset)?;
        self.store.save(&dataset)?;
        Ok(outcome)
    }

    // ========== Projects ==========

    pub fn list_projects(&self) -> Result<Vec<Project>> {
        Ok(self.dataset()?.projects)
    }

    pub fn get_project(&self, id: u64) -> Result<Project> {
        self.dataset()?
            .project(id)
            .cloned()
            .ok_or_else(|| Error::not_found("Project", id))
    }

    /// Every project with its metrics, in stored order
    pub fn projects_with_metrics(&self) -> Result<Vec<ProjectWithMetrics>> {
        let dataset = self.dataset()?;
        Ok(dataset
            .projects
            .iter()
            .map(|project| enrich::with_metrics(&dataset, project))
            .collect())
    }

    /// A project with its categories, their vendors, and metrics
    pub fn project_detail(&self, id: u64) -> Result<ProjectDetail> {
        let dataset = self.dataset()?;
        let project = dataset
            .project(id)
            .ok_or_else(|| Error::not_found("Project", id))?;
        Ok(enrich::project_detail(&dataset, project))
    }

    pub fn project_metrics(&self, project_id: u64) -> Result<ProjectMetrics> {
        Ok(enrich::project_metrics(&self.dataset()?, project_id))
    }

    pub fn create_project(&self, new: NewProject) -> Result<Project> {
        let project = self.mutate(|dataset| {
            let project = Project::from_new(dataset.next_project_id(), new, &timestamp());
            dataset.projects.push(project.clone());
            Ok(project)
        })?;
        tracing::info!("Created project {} ({})", project.id, project.name);
        Ok(project)
    }

    /// Apply a partial update. `lastUpdated` is always re-stamped.
    pub fn update_project(&self, id: u64, update: &ProjectUpdate) -> Result<Project> {
        let project = self.mutate(|dataset| {
            let project = dataset
                .project_mut(id)
                .ok_or_else(|| Error::not_found("Project", id))?;
            project.apply_update(update, &timestamp());
            Ok(project.clone())
        })?;
        tracing::info!("Updated project {}", id);
        Ok(project)
    }

    /// Remove a project with its categories and documents.
    ///
    /// Vendors are never deleted.
    pub fn delete_project(&self, id: u64) -> Result<DeletedProject> {
        let deleted = self.mutate(|dataset| {
            let index = dataset
                .projects
                .iter()
                .position(|p| p.id == id)
                .ok_or_else(|| Error::not_found("Project", id))?;
            let project = dataset.projects.remove(index);

            let categories_before = dataset.categories.len();
            dataset.categories.retain(|c| c.project_id != id);
            let documents_before = dataset.documents.len();
            dataset.documents.retain(|d| d.project_id != id);

            Ok(DeletedProject {
                project,
                categories_removed: categories_before - dataset.categories.len(),
                documents_removed: documents_before - dataset.documents.len(),
            })
        })?;
        tracing::info!(
            "Deleted project {} with {} categories and {} documents",
            id,
            deleted.categories_removed,
            deleted.documents_removed
        );
        Ok(deleted)
    }

    // ========== Categories ==========

    /// Categories of a project, in stored order
    pub fn list_categories(&self, project_id: u64) -> Result<Vec<Category>> {
        Ok(self
            .dataset()?
            .categories_for(project_id)
            .cloned()
            .collect())
    }

    pub fn get_category(&self, id: u64) -> Result<Category> {
        self.dataset()?
            .category(id)
            .cloned()
            .ok_or_else(|| Error::not_found("Category", id))
    }

    pub fn add_category_to_project(&self, project_id: u64, new: NewCategory) -> Result<Category> {
        let category = self.mutate(|dataset| insert_category(dataset, project_id, new))?;
        tracing::info!(
            "Added category {} ({}) to project {}",
            category.id,
            category.name,
            project_id
        );
        Ok(category)
    }

    /// Vendor profiles joined into the category's participation list.
    ///
    /// An unknown category yields an empty list, same as a category without vendors.
    pub fn enriched_vendors_for_category(&self, category_id: u64) -> Result<Vec<EnrichedVendor>> {
        let dataset = self.dataset()?;
        Ok(dataset
            .category(category_id)
            .map(|category| enrich::enriched_vendors(&dataset, category))
            .unwrap_or_default())
    }

    pub fn category_quote_analytics(&self, category_id: u64) -> Result<QuoteAnalytics> {
        let dataset = self.dataset()?;
        let category = dataset
            .category(category_id)
            .ok_or_else(|| Error::not_found("Category", category_id))?;
        Ok(enrich::quote_analytics(category))
    }

    /// Category, its vendors and quote analytics
    pub fn category_quotes(&self, category_id: u64) -> Result<CategoryQuotes> {
        let dataset = self.dataset()?;
        let category = dataset
            .category(category_id)
            .ok_or_else(|| Error::not_found("Category", category_id))?;
        Ok(CategoryQuotes {
            category: category.clone(),
            vendors: enrich::enriched_vendors(&dataset, category),
            analytics: enrich::quote_analytics(category),
        })
    }

    /// Category, its vendors and a bid status breakdown
    pub fn vendor_management(&self, category_id: u64) -> Result<VendorManagement> {
        let dataset = self.dataset()?;
        let category = dataset
            .category(category_id)
            .ok_or_else(|| Error::not_found("Category", category_id))?;
        let vendors = enrich::enriched_vendors(&dataset, category);
        Ok(VendorManagement {
            category: category.clone(),
            statistics: enrich::status_breakdown(&vendors),
            vendors,
        })
    }

    // ========== Vendors ==========

    pub fn list_vendors(&self) -> Result<Vec<Vendor>> {
        Ok(self.dataset()?.vendors)
    }

    pub fn get_vendor(&self, id: u64) -> Result<Vendor> {
        self.dataset()?
            .vendor(id)
            .cloned()
            .ok_or_else(|| Error::not_found("Vendor", id))
    }

    pub fn add_vendor(&self, new: NewVendor) -> Result<Vendor> {
        let vendor = self.mutate(|dataset| {
            let vendor = Vendor::from_new(dataset.next_vendor_id(), new, &timestamp());
            dataset.vendors.push(vendor.clone());
            Ok(vendor)
        })?;
        tracing::info!("Added vendor {} ({})", vendor.id, vendor.company_name);
        Ok(vendor)
    }

    // ========== Groups ==========

    pub fn list_groups(&self) -> Result<Vec<GroupSummary>> {
        let dataset = self.dataset()?;
        Ok(dataset
            .groups
            .iter()
            .map(|group| enrich::group_summary(&dataset, group))
            .collect())
    }

    pub fn get_group(&self, id: u64) -> Result<GroupDetail> {
        let dataset = self.dataset()?;
        let group = dataset
            .group(id)
            .ok_or_else(|| Error::not_found("Group", id))?;
        Ok(GroupDetail {
            summary: enrich::group_summary(&dataset, group),
            projects: dataset
                .projects_in_group(id)
                .map(|project| enrich::with_metrics(&dataset, project))
                .collect(),
        })
    }

    // ========== Templates ==========

    /// Create a project and, optionally, the template's default categories.
    ///
    /// A template category that cannot be created is logged and skipped; the
    /// project is kept either way.
    pub fn create_from_template(
        &self,
        template: &ProjectTemplate,
        new: NewProject,
        include_categories: bool,
    ) -> Result<TemplateInstance> {
        let project = self.create_project(new)?;
        let mut categories = Vec::new();

        if include_categories {
            for default in &template.categories {
                let created = default
                    .to_new_category()
                    .and_then(|new| self.add_category_to_project(project.id, new));
                match created {
                    Ok(category) => categories.push(category),
                    Err(e) => tracing::warn!(
                        "Skipping template category '{}' for project {}: {}",
                        default.name,
                        project.id,
                        e
                    ),
                }
            }
        }

        let project = if categories.is_empty() {
            project
        } else {
            self.get_project(project.id)?
        };
        Ok(TemplateInstance { project, categories })
    }
}

fn insert_category(dataset: &mut Dataset, project_id: u64, new: NewCategory) -> Result<Category> {
    if dataset.project(project_id).is_none() {
        return Err(Error::not_found("Project", project_id));
    }

    let category = Category::from_new(dataset.next_category_id(), project_id, new);
    dataset.categories.push(category.clone());

    if let Some(project) = dataset.project_mut(project_id) {
        project.category_ids.push(category.id);
        project.last_updated = timestamp();
    }
    Ok(category)
}
