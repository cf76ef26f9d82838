//! Bid categories and the vendor participation embedded in them

use crate::model::{Extra, lenient_amount, lenient_count, required_text};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Progress of a bid category
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CategoryStatus {
    #[default]
    Pending,
    InProgress,
    Quoted,
    Complete,
    /// Unrecognized stored status, written back unchanged
    Other(String),
}

impl CategoryStatus {
    pub fn as_str(&self) -> &str {
        match self {
            CategoryStatus::Pending => "pending",
            CategoryStatus::InProgress => "in_progress",
            CategoryStatus::Quoted => "quoted",
            CategoryStatus::Complete => "complete",
            CategoryStatus::Other(status) => status,
        }
    }
}

impl From<String> for CategoryStatus {
    fn from(s: String) -> Self {
        match normalize(&s).as_str() {
            "pending" => CategoryStatus::Pending,
            "in_progress" => CategoryStatus::InProgress,
            "quoted" => CategoryStatus::Quoted,
            "complete" | "completed" => CategoryStatus::Complete,
            _ => CategoryStatus::Other(s),
        }
    }
}

impl From<CategoryStatus> for String {
    fn from(status: CategoryStatus) -> Self {
        match status {
            CategoryStatus::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for CategoryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Where a vendor stands in the bidding for one category.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BidStatus {
    #[default]
    Pending,
    Invited,
    Submitted,
    Declined,
    Selected,
    NotSelected,
    /// Unrecognized stored status, written back unchanged
    Other(String),
}

impl BidStatus {
    pub fn as_str(&self) -> &str {
        match self {
            BidStatus::Pending => "pending",
            BidStatus::Invited => "invited",
            BidStatus::Submitted => "submitted",
            BidStatus::Declined => "declined",
            BidStatus::Selected => "selected",
            BidStatus::NotSelected => "not_selected",
            BidStatus::Other(status) => status,
        }
    }

    pub fn all() -> [BidStatus; 6] {
        [
            BidStatus::Pending,
            BidStatus::Invited,
            BidStatus::Submitted,
            BidStatus::Declined,
            BidStatus::Selected,
            BidStatus::NotSelected,
        ]
    }

    fn known(s: &str) -> Option<Self> {
        match normalize(s).as_str() {
            "pending" => Some(BidStatus::Pending),
            "invited" => Some(BidStatus::Invited),
            "submitted" => Some(BidStatus::Submitted),
            "declined" => Some(BidStatus::Declined),
            "selected" => Some(BidStatus::Selected),
            "not_selected" => Some(BidStatus::NotSelected),
            _ => None,
        }
    }
}

impl FromStr for BidStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::known(s)
            .ok_or_else(|| Error::validation("bidStatus", format!("unknown bid status '{}'", s)))
    }
}

impl From<String> for BidStatus {
    fn from(s: String) -> Self {
        Self::known(&s).unwrap_or(BidStatus::Other(s))
    }
}

impl From<BidStatus> for String {
    fn from(status: BidStatus) -> Self {
        match status {
            BidStatus::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for BidStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Lowercase with `-` and spaces folded to `_`
fn normalize(s: &str) -> String {
    s.trim().to_lowercase().replace(['-', ' '], "_")
}

/// A vendor's bid record within one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorParticipation {
    pub vendor_id: u64,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub bid_amount: f64,
    #[serde(default)]
    pub bid_status: BidStatus,
    #[serde(default)]
    pub bid_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invite_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl VendorParticipation {
    pub fn is_submitted(&self) -> bool {
        self.bid_status == BidStatus::Submitted
    }
}

/// A bid package within a project.
///
/// `quotedItems` is expected to stay at or below `totalItems`, but stored
/// data is not checked against that.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: u64,
    pub project_id: u64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, deserialize_with = "lenient_count")]
    pub total_items: u32,
    #[serde(default, deserialize_with = "lenient_count")]
    pub quoted_items: u32,
    #[serde(default)]
    pub status: CategoryStatus,
    #[serde(default)]
    pub specifications: String,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub estimated_value: f64,
    #[serde(default)]
    pub deadline_date: String,
    #[serde(default)]
    pub vendor_participation: Vec<VendorParticipation>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl Category {
    /// Build the stored record for a new category: nothing quoted, no vendors yet
    pub fn from_new(id: u64, project_id: u64, new: NewCategory) -> Self {
        Self {
            id,
            project_id,
            name: new.name,
            description: new.description,
            total_items: new.total_items,
            quoted_items: 0,
            status: CategoryStatus::Pending,
            specifications: new.specifications,
            estimated_value: new.estimated_value,
            deadline_date: new.deadline_date,
            vendor_participation: Vec::new(),
            extra: Extra::new(),
        }
    }

    /// Participation records whose bid has been submitted
    pub fn submitted_bids(&self) -> impl Iterator<Item = &VendorParticipation> {
        self.vendor_participation.iter().filter(|p| p.is_submitted())
    }
}

/// Validated input for adding a category to a project
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewCategory {
    pub name: String,
    pub description: String,
    pub total_items: u32,
    pub estimated_value: f64,
    pub specifications: String,
    pub deadline_date: String,
}

impl NewCategory {
    pub fn new(name: impl Into<String>) -> Result<Self> {
        Ok(Self {
            name: required_text("name", name)?,
            ..Self::default()
        })
    }

    pub fn with_total_items(mut self, total_items: u32) -> Self {
        self.total_items = total_items;
        self
    }

    pub fn with_estimated_value(mut self, value: f64) -> Result<Self> {
        self.estimated_value = crate::model::amount("estimatedValue", value)?;
        Ok(self)
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}
