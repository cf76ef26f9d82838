use tabled::{Table, Tabled, settings::Style};

use crate::repository::ProjectWithMetrics;

#[derive(Tabled)]
pub struct ProjectRow {
    #[tabled(rename = "ID")]
    pub id: u64,
    #[tabled(rename = "Project")]
    pub name: String,
    #[tabled(rename = "Client")]
    pub client: String,
    #[tabled(rename = "Status")]
    pub status: String,
    #[tabled(rename = "Value")]
    pub value: String,
    #[tabled(rename = "Quoted")]
    pub quoted: String,
    #[tabled(rename = "Vendors")]
    pub vendors: String,
}

impl From<&ProjectWithMetrics> for ProjectRow {
    fn from(row: &ProjectWithMetrics) -> Self {
        let metrics = &row.metrics;
        Self {
            id: row.project.id,
            name: row.project.name.clone(),
            client: row.project.client.clone(),
            status: row.project.status.to_string(),
            value: format!("${:.0}", row.project.estimated_value),
            quoted: format!(
                "{}/{} ({}%)",
                metrics.quoted_materials, metrics.total_materials, metrics.completion_percentage
            ),
            vendors: format!("{} active / {}", metrics.active_vendors, metrics.total_vendors),
        }
    }
}

/// Render projects as a rounded table; empty input renders nothing
pub fn project_table(projects: &[ProjectWithMetrics]) -> String {
    if projects.is_empty() {
        return String::new();
    }
    let rows: Vec<ProjectRow> = projects.iter().map(ProjectRow::from).collect();
    Table::new(rows).with(Style::rounded()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{NewProject, Project};
    use crate::repository::ProjectMetrics;

    #[test]
    fn test_project_table() {
        assert!(project_table(&[]).is_empty());

        let project = Project::from_new(
            3,
            NewProject::new("Harbor Point", "Acme").unwrap(),
            "2024-01-01T00:00:00",
        );
        let row = ProjectWithMetrics {
            project,
            metrics: ProjectMetrics {
                total_materials: 40,
                quoted_materials: 10,
                total_vendors: 2,
                active_vendors: 1,
                completion_percentage: 25,
            },
        };

        let table = project_table(&[row]);
        assert!(table.contains("Harbor Point"));
        assert!(table.contains("10/40 (25%)"));
        assert!(table.contains("early"));
    }
}
