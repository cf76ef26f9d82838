use crate::model::Extra;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroupLocation {
    pub city: String,
    pub state: String,
}

/// A program of related projects.
///
/// Only the metadata is stored; project counts and values are computed from
/// the projects whose `groupId` matches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectGroup {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub client: String,
    #[serde(default)]
    pub status: String,
    #[serde(default, rename = "type")]
    pub group_type: String,
    #[serde(default)]
    pub location: GroupLocation,
    #[serde(default)]
    pub expected_completion: String,
    #[serde(default)]
    pub total_value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}
