//! Enrichment - denormalized views joined from the flat collections
//!
//! Everything here is a pure function over a loaded `Dataset`:
//! - Vendor profiles joined into a category's participation list
//! - Project completion metrics
//! - Quote analytics and bid status breakdown for a category
//! - Live project aggregates for a group

use std::collections::HashSet;

use serde::Serialize;

use crate::model::{BidStatus, Category, Project, ProjectGroup, ProjectStatus};
use crate::storage::Dataset;

/// Profile fields the dashboard shows that are not tracked in the datastore.
pub mod placeholder {
    pub const RATING: f64 = 4.5;
    pub const COMPLETED_PROJECTS: u32 = 25;
    pub const DELIVERY_TIME: &str = "4-6 weeks";
    pub const WARRANTY: &str = "2 years";
    pub const CERTIFICATIONS: &[&str] = &["ISO 9001"];
}

/// A vendor profile flattened together with one participation record
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedVendor {
    pub id: u64,
    pub name: String,
    pub representative: String,
    pub email: String,
    pub phone: String,
    pub website: String,
    pub address: String,
    pub specialties: Vec<String>,
    pub bid_amount: f64,
    pub bid_status: BidStatus,
    pub bid_date: String,
    pub invite_date: String,
    pub notes: String,
    pub date_added: String,
    pub last_updated: String,
    pub last_contact: String,
    pub rating: f64,
    pub completed_projects: u32,
    pub delivery_time: String,
    pub warranty: String,
    pub certifications: Vec<String>,
}

/// Join each participation record of `category` to its vendor, in stored order.
///
/// Records pointing at a vendor id that no longer exists are skipped.
pub fn enriched_vendors(dataset: &Dataset, category: &Category) -> Vec<EnrichedVendor> {
    category
        .vendor_participation
        .iter()
        .filter_map(|participation| {
            let Some(vendor) = dataset.vendor(participation.vendor_id) else {
                tracing::debug!(
                    "Category {} references missing vendor {}",
                    category.id,
                    participation.vendor_id
                );
                return None;
            };

            Some(EnrichedVendor {
                id: vendor.id,
                name: vendor.company_name.clone(),
                representative: vendor.contact_info.representative.clone(),
                email: vendor.contact_info.email.clone(),
                phone: vendor.contact_info.phone.clone(),
                website: vendor.contact_info.website.clone().unwrap_or_default(),
                address: vendor.address.formatted(),
                specialties: vendor.specialties.clone(),
                bid_amount: participation.bid_amount,
                bid_status: participation.bid_status.clone(),
                bid_date: participation.bid_date.clone(),
                invite_date: participation
                    .invite_date
                    .clone()
                    .unwrap_or_else(|| participation.bid_date.clone()),
                notes: participation.notes.clone().unwrap_or_default(),
                date_added: vendor.date_added.clone(),
                last_updated: vendor.last_updated.clone(),
                last_contact: vendor.last_updated.clone(),
                rating: placeholder::RATING,
                completed_projects: placeholder::COMPLETED_PROJECTS,
                delivery_time: placeholder::DELIVERY_TIME.to_string(),
                warranty: placeholder::WARRANTY.to_string(),
                certifications: placeholder::CERTIFICATIONS
                    .iter()
                    .map(|c| c.to_string())
                    .collect(),
            })
        })
        .collect()
}

/// Completion and vendor activity for one project
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectMetrics {
    pub total_materials: u64,
    pub quoted_materials: u64,
    /// Distinct vendor ids across the project's categories
    pub total_vendors: usize,
    /// Submitted participation records; a vendor submitting in two
    /// categories counts twice
    pub active_vendors: usize,
    pub completion_percentage: u32,
}

pub fn project_metrics(dataset: &Dataset, project_id: u64) -> ProjectMetrics {
    let mut metrics = ProjectMetrics::default();
    let mut vendor_ids = HashSet::new();

    for category in dataset.categories_for(project_id) {
        metrics.total_materials += u64::from(category.total_items);
        metrics.quoted_materials += u64::from(category.quoted_items);

        for participation in &category.vendor_participation {
            vendor_ids.insert(participation.vendor_id);
            if participation.is_submitted() {
                metrics.active_vendors += 1;
            }
        }
    }

    metrics.total_vendors = vendor_ids.len();
    metrics.completion_percentage =
        completion_percentage(metrics.quoted_materials, metrics.total_materials);
    metrics
}

/// `quoted / total` as a whole percentage, halves rounded to even; 0 when
/// nothing is expected.
pub fn completion_percentage(quoted: u64, total: u64) -> u32 {
    if total == 0 {
        return 0;
    }
    (quoted as f64 / total as f64 * 100.0).round_ties_even() as u32
}

/// How contested a category is, from the number of submitted bids
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CompetitionLevel {
    High,
    Low,
    None,
}

impl CompetitionLevel {
    pub fn from_submissions(count: usize) -> Self {
        match count {
            0 => CompetitionLevel::None,
            1 | 2 => CompetitionLevel::Low,
            _ => CompetitionLevel::High,
        }
    }
}

/// Summary of the submitted quotes in a category
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteAnalytics {
    pub best_quote: Option<f64>,
    pub average_quote: f64,
    pub submitted_quotes: usize,
    pub total_vendors: usize,
    pub competition_level: CompetitionLevel,
}

pub fn quote_analytics(category: &Category) -> QuoteAnalytics {
    let amounts: Vec<f64> = category.submitted_bids().map(|p| p.bid_amount).collect();

    let best_quote = amounts.iter().copied().reduce(f64::min);
    let average_quote = if amounts.is_empty() {
        0.0
    } else {
        amounts.iter().sum::<f64>() / amounts.len() as f64
    };

    QuoteAnalytics {
        best_quote,
        average_quote,
        submitted_quotes: amounts.len(),
        total_vendors: category.vendor_participation.len(),
        competition_level: CompetitionLevel::from_submissions(amounts.len()),
    }
}

/// Bid status counts over the vendors listed for a category
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorStatusBreakdown {
    pub total_vendors: usize,
    pub quotes_received: usize,
    pub pending_quotes: usize,
    pub invited_vendors: usize,
    pub declined_vendors: usize,
    pub selected_vendors: usize,
    pub not_selected_vendors: usize,
}

pub fn status_breakdown(vendors: &[EnrichedVendor]) -> VendorStatusBreakdown {
    let mut breakdown = VendorStatusBreakdown {
        total_vendors: vendors.len(),
        ..Default::default()
    };
    for vendor in vendors {
        match vendor.bid_status {
            BidStatus::Submitted => breakdown.quotes_received += 1,
            BidStatus::Pending => breakdown.pending_quotes += 1,
            BidStatus::Invited => breakdown.invited_vendors += 1,
            BidStatus::Declined => breakdown.declined_vendors += 1,
            BidStatus::Selected => breakdown.selected_vendors += 1,
            BidStatus::NotSelected => breakdown.not_selected_vendors += 1,
            BidStatus::Other(_) => {}
        }
    }
    breakdown
}

/// A project together with its metrics
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectWithMetrics {
    #[serde(flatten)]
    pub project: Project,
    pub metrics: ProjectMetrics,
}

/// A category together with its enriched vendor list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryWithVendors {
    #[serde(flatten)]
    pub category: Category,
    pub vendors: Vec<EnrichedVendor>,
}

/// Full project view: categories with vendors, plus metrics
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectDetail {
    #[serde(flatten)]
    pub project: Project,
    pub categories: Vec<CategoryWithVendors>,
    pub metrics: ProjectMetrics,
}

/// Quote comparison view of a category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryQuotes {
    pub category: Category,
    pub vendors: Vec<EnrichedVendor>,
    pub analytics: QuoteAnalytics,
}

/// Vendor management view of a category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VendorManagement {
    pub category: Category,
    pub vendors: Vec<EnrichedVendor>,
    pub statistics: VendorStatusBreakdown,
}

/// A group with aggregates computed from its member projects
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupSummary {
    #[serde(flatten)]
    pub group: ProjectGroup,
    pub actual_project_count: usize,
    pub actual_total_value: f64,
    pub active_projects: usize,
    pub completed_projects: usize,
}

/// A group summary with its member projects
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupDetail {
    #[serde(flatten)]
    pub summary: GroupSummary,
    pub projects: Vec<ProjectWithMetrics>,
}

pub fn with_metrics(dataset: &Dataset, project: &Project) -> ProjectWithMetrics {
    ProjectWithMetrics {
        project: project.clone(),
        metrics: project_metrics(dataset, project.id),
    }
}

pub fn project_detail(dataset: &Dataset, project: &Project) -> ProjectDetail {
    let categories = dataset
        .categories_for(project.id)
        .map(|category| CategoryWithVendors {
            category: category.clone(),
            vendors: enriched_vendors(dataset, category),
        })
        .collect();

    ProjectDetail {
        project: project.clone(),
        categories,
        metrics: project_metrics(dataset, project.id),
    }
}

pub fn group_summary(dataset: &Dataset, group: &ProjectGroup) -> GroupSummary {
    let mut summary = GroupSummary {
        group: group.clone(),
        actual_project_count: 0,
        actual_total_value: 0.0,
        active_projects: 0,
        completed_projects: 0,
    };

    for project in dataset.projects_in_group(group.id) {
        summary.actual_project_count += 1;
        summary.actual_total_value += project.estimated_value;
        match project.status {
            ProjectStatus::Early | ProjectStatus::Active => summary.active_projects += 1,
            ProjectStatus::Complete => summary.completed_projects += 1,
            _ => {}
        }
    }
    summary
}
