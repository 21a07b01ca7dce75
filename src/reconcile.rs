use crate::error::{LedgerError, Result};
use crate::schema::RawAssignmentRecord;
use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const UNKNOWN_CLIENT: &str = "Unknown Client";

/// One project a staff member is assigned to, carrying the client metadata
/// of the assignment it was derived from. The project payload itself is kept
/// as fetched; only the client fields are attached alongside it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconciledProject {
    pub project_id: String,
    pub client_id: Option<String>,
    pub client_name: String,
    pub project: serde_json::Value,
}

/// Merges assignment records fetched under several client scopes into one
/// deduplicated project list.
///
/// Assignments without resolvable project data are dropped with a warning.
/// When the same project id appears under more than one assignment, the
/// last occurrence in input order wins while the project keeps its
/// first-occurrence position. That is deliberate policy, not merge-order
/// accident: the most recently fetched client relationship is treated as
/// current.
pub fn reconcile_assignments(assignments: &[RawAssignmentRecord]) -> Vec<ReconciledProject> {
    let mut projects: Vec<ReconciledProject> = Vec::new();
    let mut index_by_id: HashMap<String, usize> = HashMap::new();

    for (idx, assignment) in assignments.iter().enumerate() {
        let reconciled = match reconcile_assignment(assignment) {
            Ok(project) => project,
            Err(err) => {
                warn!("Skipping assignment record #{}: {}", idx, err);
                continue;
            }
        };

        match index_by_id.get(&reconciled.project_id) {
            Some(&existing) => {
                warn!(
                    "Ambiguous assignment: project '{}' appears under client '{}' and client '{}'; keeping the latter",
                    reconciled.project_id, projects[existing].client_name, reconciled.client_name
                );
                projects[existing] = reconciled;
            }
            None => {
                index_by_id.insert(reconciled.project_id.clone(), projects.len());
                projects.push(reconciled);
            }
        }
    }

    projects
}

fn reconcile_assignment(assignment: &RawAssignmentRecord) -> Result<ReconciledProject> {
    let client_name = assignment
        .client_name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .unwrap_or(UNKNOWN_CLIENT)
        .to_string();

    let (project_id, project) = resolve_project(assignment).ok_or_else(|| {
        LedgerError::UnresolvableAssignment {
            client: client_name.clone(),
        }
    })?;

    Ok(ReconciledProject {
        project_id,
        client_id: assignment.client_id.clone(),
        client_name,
        project,
    })
}

/// Project id resolution: `projectData._id` is authoritative; the bare
/// `projectId` field covers older assignment rows whose payload was never
/// populated.
fn resolve_project(assignment: &RawAssignmentRecord) -> Option<(String, serde_json::Value)> {
    if let Some(data) = &assignment.project_data {
        if let Some(id) = data.get("_id").and_then(|v| v.as_str()) {
            if !id.is_empty() {
                return Some((id.to_string(), data.clone()));
            }
        }
    }

    if let Some(id) = assignment.project_id.as_deref().filter(|id| !id.is_empty()) {
        let payload = assignment
            .project_data
            .clone()
            .unwrap_or_else(|| serde_json::json!({ "_id": id }));
        return Some((id.to_string(), payload));
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn assignment(client: &str, project_id: &str, project_name: &str) -> RawAssignmentRecord {
        RawAssignmentRecord {
            client_id: Some(format!("{}-id", client.to_lowercase())),
            client_name: Some(client.to_string()),
            project_data: Some(json!({ "_id": project_id, "name": project_name })),
            project_id: None,
        }
    }

    #[test]
    fn test_projects_carry_their_client_metadata() {
        let result = reconcile_assignments(&[
            assignment("Acme", "p1", "Tower A"),
            assignment("Birla", "p2", "Mall Annex"),
        ]);

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].client_name, "Acme");
        assert_eq!(result[0].project["name"], "Tower A");
        assert_eq!(result[1].client_name, "Birla");
        assert_eq!(result[1].client_id.as_deref(), Some("birla-id"));
    }

    #[test]
    fn test_duplicate_project_last_occurrence_wins() {
        let result = reconcile_assignments(&[
            assignment("Acme", "p1", "Tower A"),
            assignment("Birla", "p2", "Mall Annex"),
            assignment("Chandra", "p1", "Tower A"),
        ]);

        // Exactly one copy of p1, at its first-occurrence position, carrying
        // the later record's client.
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].project_id, "p1");
        assert_eq!(result[0].client_name, "Chandra");
        assert_eq!(result[1].project_id, "p2");
    }

    #[test]
    fn test_unresolvable_assignments_are_dropped() {
        let mut no_data = assignment("Acme", "p1", "Tower A");
        no_data.project_data = None;

        let mut no_id = assignment("Birla", "p2", "Mall Annex");
        no_id.project_data = Some(json!({ "name": "Mall Annex" }));

        let result = reconcile_assignments(&[
            no_data,
            no_id,
            assignment("Chandra", "p3", "Warehouse"),
        ]);

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].project_id, "p3");
    }

    #[test]
    fn test_bare_project_id_fallback() {
        let record = RawAssignmentRecord {
            client_id: Some("acme-id".to_string()),
            client_name: Some("Acme".to_string()),
            project_data: None,
            project_id: Some("p9".to_string()),
        };

        let result = reconcile_assignments(&[record]);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].project_id, "p9");
        assert_eq!(result[0].project["_id"], "p9");
    }

    #[test]
    fn test_missing_client_name_defaults() {
        let mut record = assignment("Acme", "p1", "Tower A");
        record.client_name = None;

        let result = reconcile_assignments(&[record]);
        assert_eq!(result[0].client_name, UNKNOWN_CLIENT);
    }

    #[test]
    fn test_empty_input() {
        assert!(reconcile_assignments(&[]).is_empty());
    }
}
