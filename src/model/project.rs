//! Project records and the inputs that create and update them

use crate::model::{Extra, lenient_amount, required_text};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Lifecycle stage of a project as shown on the dashboard.
///
/// Stored documents may carry statuses this crate doesn't know; those load as
/// `Other` and are written back verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ProjectStatus {
    /// Scope is still being defined
    #[default]
    Early,
    /// Bids are being collected
    Active,
    /// Contracts have been awarded
    Awarded,
    /// Work is finished
    Complete,
    Other(String),
}

impl ProjectStatus {
    pub fn as_str(&self) -> &str {
        match self {
            ProjectStatus::Early => "early",
            ProjectStatus::Active => "active",
            ProjectStatus::Awarded => "awarded",
            ProjectStatus::Complete => "complete",
            ProjectStatus::Other(status) => status,
        }
    }

    pub fn all() -> [ProjectStatus; 4] {
        [
            ProjectStatus::Early,
            ProjectStatus::Active,
            ProjectStatus::Awarded,
            ProjectStatus::Complete,
        ]
    }

    /// Known statuses and their aliases, ignoring case
    fn known(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "early" | "planning" => Some(ProjectStatus::Early),
            "active" | "bidding" => Some(ProjectStatus::Active),
            "awarded" => Some(ProjectStatus::Awarded),
            "complete" | "completed" => Some(ProjectStatus::Complete),
            _ => None,
        }
    }
}

/// Strict parse for request input: unknown statuses are rejected
impl FromStr for ProjectStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::known(s)
            .ok_or_else(|| Error::validation("status", format!("unknown project status '{}'", s)))
    }
}

impl From<String> for ProjectStatus {
    fn from(s: String) -> Self {
        Self::known(&s).unwrap_or(ProjectStatus::Other(s))
    }
}

impl From<ProjectStatus> for String {
    fn from(status: ProjectStatus) -> Self {
        match status {
            ProjectStatus::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Site address of a project
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Location {
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
}

/// Owner-side contact for a project
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientContact {
    pub name: String,
    pub email: String,
    pub phone: String,
}

/// A construction project.
///
/// Categories and documents reference the project through their `projectId`;
/// the project keeps the matching id lists in `categoryIds` / `documentIds`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: u64,
    pub name: String,
    pub client: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub bid_deadline: String,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub estimated_value: f64,
    #[serde(default)]
    pub status: ProjectStatus,
    #[serde(default)]
    pub location: Location,
    #[serde(default)]
    pub client_contact: ClientContact,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<u64>,
    #[serde(default)]
    pub category_ids: Vec<u64>,
    #[serde(default)]
    pub document_ids: Vec<u64>,
    #[serde(default)]
    pub created_date: String,
    #[serde(default)]
    pub last_updated: String,
    #[serde(flatten)]
    pub extra: Extra,
}

impl Project {
    /// Build the stored record for a new project
    pub fn from_new(id: u64, new: NewProject, now: &str) -> Self {
        Self {
            id,
            name: new.name,
            client: new.client,
            description: new.description,
            start_date: new.start_date,
            bid_deadline: new.bid_deadline,
            estimated_value: new.estimated_value,
            status: new.status,
            location: new.location,
            client_contact: new.client_contact,
            group_id: new.group_id,
            category_ids: Vec::new(),
            document_ids: Vec::new(),
            created_date: now.to_string(),
            last_updated: now.to_string(),
            extra: Extra::new(),
        }
    }

    /// Apply the fields present in `update`; absent fields keep their value.
    pub fn apply_update(&mut self, update: &ProjectUpdate, now: &str) {
        if let Some(name) = &update.name {
            self.name = name.clone();
        }
        if let Some(client) = &update.client {
            self.client = client.clone();
        }
        if let Some(description) = &update.description {
            self.description = description.clone();
        }
        if let Some(start_date) = &update.start_date {
            self.start_date = start_date.clone();
        }
        if let Some(bid_deadline) = &update.bid_deadline {
            self.bid_deadline = bid_deadline.clone();
        }
        if let Some(value) = update.estimated_value {
            self.estimated_value = value;
        }
        if let Some(status) = &update.status {
            self.status = status.clone();
        }
        if let Some(group_id) = update.group_id {
            self.group_id = Some(group_id);
        }

        if let Some(address) = &update.address {
            self.location.address = address.clone();
        }
        if let Some(city) = &update.city {
            self.location.city = city.clone();
        }
        if let Some(state) = &update.state {
            self.location.state = state.clone();
        }
        if let Some(zip_code) = &update.zip_code {
            self.location.zip_code = zip_code.clone();
        }

        if let Some(name) = &update.client_contact_name {
            self.client_contact.name = name.clone();
        }
        if let Some(email) = &update.client_contact_email {
            self.client_contact.email = email.clone();
        }
        if let Some(phone) = &update.client_contact_phone {
            self.client_contact.phone = phone.clone();
        }

        self.last_updated = now.to_string();
    }
}

/// Validated input for creating a project
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewProject {
    pub name: String,
    pub client: String,
    pub description: String,
    pub start_date: String,
    pub bid_deadline: String,
    pub estimated_value: f64,
    pub status: ProjectStatus,
    pub location: Location,
    pub client_contact: ClientContact,
    pub group_id: Option<u64>,
}

impl NewProject {
    /// Create a project input; `name` and `client` must not be blank.
    pub fn new(name: impl Into<String>, client: impl Into<String>) -> Result<Self> {
        Ok(Self {
            name: required_text("name", name)?,
            client: required_text("client", client)?,
            ..Self::default()
        })
    }

    pub fn with_estimated_value(mut self, value: f64) -> Result<Self> {
        self.estimated_value = crate::model::amount("estimatedValue", value)?;
        Ok(self)
    }

    pub fn with_status(mut self, status: ProjectStatus) -> Self {
        self.status = status;
        self
    }
}

/// Partial update for a project.
///
/// Only these fields can change through an update; location and contact
/// fields are addressed by their flat names.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectUpdate {
    pub name: Option<String>,
    pub client: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<String>,
    pub bid_deadline: Option<String>,
    pub estimated_value: Option<f64>,
    pub status: Option<ProjectStatus>,
    pub group_id: Option<u64>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub client_contact_name: Option<String>,
    pub client_contact_email: Option<String>,
    pub client_contact_phone: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_roundtrip() {
        for status in ProjectStatus::all() {
            let parsed: ProjectStatus = status.as_str().parse().unwrap();
            assert_eq!(status, parsed);
        }
        assert_eq!(ProjectStatus::from_str("Completed").unwrap(), ProjectStatus::Complete);
        assert!(ProjectStatus::from_str("on-hold").is_err());
    }

    #[test]
    fn test_new_project_requires_name_and_client() {
        assert!(NewProject::new("Harbor Point", "Acme Dev").is_ok());
        assert!(matches!(
            NewProject::new("", "Acme Dev"),
            Err(Error::Validation { field, .. }) if field == "name"
        ));
        assert!(matches!(
            NewProject::new("Harbor Point", " "),
            Err(Error::Validation { field, .. }) if field == "client"
        ));
    }

    #[test]
    fn test_apply_update_touches_only_present_fields() {
        let new = NewProject::new("Harbor Point", "Acme Dev").unwrap();
        let mut project = Project::from_new(1, new, "2024-01-01T00:00:00");
        project.location.city = "Austin".to_string();
        project.location.state = "TX".to_string();

        let update = ProjectUpdate {
            city: Some("Dallas".to_string()),
            client_contact_email: Some("pm@acme.test".to_string()),
            ..ProjectUpdate::default()
        };
        project.apply_update(&update, "2024-02-01T00:00:00");

        assert_eq!(project.name, "Harbor Point");
        assert_eq!(project.location.city, "Dallas");
        assert_eq!(project.location.state, "TX");
        assert_eq!(project.client_contact.email, "pm@acme.test");
        assert_eq!(project.created_date, "2024-01-01T00:00:00");
        assert_eq!(project.last_updated, "2024-02-01T00:00:00");
    }

    #[test]
    fn test_unknown_keys_survive_roundtrip() {
        let raw = r#"{"id": 3, "name": "Depot", "client": "City", "squareFeet": 42000}"#;
        let project: Project = serde_json::from_str(raw).unwrap();
        assert_eq!(project.status, ProjectStatus::Early);
        assert_eq!(project.extra["squareFeet"], 42000);

        let value = serde_json::to_value(&project).unwrap();
        assert_eq!(value["squareFeet"], 42000);
        assert_eq!(value["categoryIds"], serde_json::json!([]));
    }

    #[test]
    fn test_stored_status_aliases_and_unknowns() {
        let raw = r#"[
            {"id": 1, "name": "A", "client": "C", "status": "Planning"},
            {"id": 2, "name": "B", "client": "C", "status": "completed"},
            {"id": 3, "name": "D", "client": "C", "status": "on_hold"}
        ]"#;
        let projects: Vec<Project> = serde_json::from_str(raw).unwrap();
        assert_eq!(projects[0].status, ProjectStatus::Early);
        assert_eq!(projects[1].status, ProjectStatus::Complete);
        assert_eq!(projects[2].status, ProjectStatus::Other("on_hold".to_string()));

        let value = serde_json::to_value(&projects).unwrap();
        assert_eq!(value[0]["status"], "early");
        assert_eq!(value[2]["status"], "on_hold");

        assert!(ProjectStatus::from_str("on_hold").is_err());
    }
}
