//! Project templates
//!
//! A static catalog of common project types. Each template carries project
//! defaults and a list of default bid categories. Creating a project from a
//! template layers the caller's fields over the template defaults, caller
//! first.

use std::sync::OnceLock;

use serde::Serialize;
use serde_json::{Map, Value, json};

use crate::Result;
use crate::model::{NewCategory, ProjectStatus};

static CATALOG: OnceLock<Vec<ProjectTemplate>> = OnceLock::new();

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateCategory {
    pub name: String,
    pub description: String,
    pub total_items: u32,
    pub estimated_value: f64,
}

impl TemplateCategory {
    fn new(name: &str, description: &str, total_items: u32, estimated_value: f64) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            total_items,
            estimated_value,
        }
    }

    pub fn to_new_category(&self) -> Result<NewCategory> {
        NewCategory::new(self.name.as_str())?
            .with_description(self.description.as_str())
            .with_total_items(self.total_items)
            .with_estimated_value(self.estimated_value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectTemplate {
    pub key: String,
    pub name: String,
    pub description: String,
    pub default_status: ProjectStatus,
    pub estimated_value: f64,
    pub categories: Vec<TemplateCategory>,
}

impl ProjectTemplate {
    /// Project fields this template fills in, keyed like a create request
    pub fn project_defaults(&self) -> Map<String, Value> {
        let mut defaults = Map::new();
        defaults.insert("description".to_string(), json!(self.description));
        defaults.insert("status".to_string(), json!(self.default_status));
        defaults.insert("estimatedValue".to_string(), json!(self.estimated_value));
        defaults
    }

    /// Template defaults overlaid with `overrides`; keys present in both take
    /// the override's value.
    pub fn merge_overrides(&self, overrides: Map<String, Value>) -> Map<String, Value> {
        let mut merged = self.project_defaults();
        merged.extend(overrides);
        merged
    }
}

pub fn catalog() -> &'static [ProjectTemplate] {
    CATALOG.get_or_init(build_catalog)
}

/// Look a template up by key or display name, ignoring case
pub fn find(name: &str) -> Option<&'static ProjectTemplate> {
    let wanted = name.trim();
    catalog()
        .iter()
        .find(|t| t.key.eq_ignore_ascii_case(wanted) || t.name.eq_ignore_ascii_case(wanted))
}

fn build_catalog() -> Vec<ProjectTemplate> {
    vec![
        ProjectTemplate {
            key: "commercial_office".to_string(),
            name: "Commercial Office Building".to_string(),
            description: "Multi-story office building with core and shell plus tenant improvements".to_string(),
            default_status: ProjectStatus::Early,
            estimated_value: 12_000_000.0,
            categories: vec![
                TemplateCategory::new("Structural Steel", "Frame, decking and connections", 45, 2_400_000.0),
                TemplateCategory::new("Curtain Wall", "Glazing system and exterior panels", 30, 1_800_000.0),
                TemplateCategory::new("HVAC", "Air handling units, ductwork and controls", 60, 1_500_000.0),
                TemplateCategory::new("Electrical", "Service, distribution and lighting", 80, 1_200_000.0),
                TemplateCategory::new("Elevators", "Passenger and service elevators", 4, 600_000.0),
            ],
        },
        ProjectTemplate {
            key: "residential_multifamily".to_string(),
            name: "Multifamily Residential".to_string(),
            description: "Wood-frame apartment building over podium parking".to_string(),
            default_status: ProjectStatus::Early,
            estimated_value: 8_500_000.0,
            categories: vec![
                TemplateCategory::new("Concrete Podium", "Foundations, podium slab and parking structure", 25, 1_300_000.0),
                TemplateCategory::new("Framing", "Wood framing, sheathing and trusses", 50, 1_100_000.0),
                TemplateCategory::new("Plumbing", "Domestic water, waste and fixtures", 70, 650_000.0),
                TemplateCategory::new("Appliances", "Unit kitchen and laundry appliances", 120, 400_000.0),
            ],
        },
        ProjectTemplate {
            key: "retail_fitout".to_string(),
            name: "Retail Fit-Out".to_string(),
            description: "Interior build-out of a retail tenant space".to_string(),
            default_status: ProjectStatus::Early,
            estimated_value: 750_000.0,
            categories: vec![
                TemplateCategory::new("Millwork", "Display fixtures and casework", 35, 120_000.0),
                TemplateCategory::new("Flooring", "Finish flooring and base", 12, 60_000.0),
                TemplateCategory::new("Lighting", "Track, accent and emergency lighting", 40, 75_000.0),
            ],
        },
    ]
}
