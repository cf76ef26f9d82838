use crate::model::Extra;
use serde::{Deserialize, Serialize};

/// A file attached to a project (drawings, specs, bid forms)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: u64,
    pub project_id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "type")]
    pub doc_type: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub uploaded_date: String,
    #[serde(flatten)]
    pub extra: Extra,
}
