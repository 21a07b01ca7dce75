use serde_json::json;
use site_ledger::{reconcile_assignments, RawAssignmentRecord};

fn main() {
    env_logger::init();

    // One staff member's assignments as fetched per client organization.
    // Tower A appears under two clients; the later fetch wins.
    let assignments = vec![
        RawAssignmentRecord {
            client_id: Some("c1".to_string()),
            client_name: Some("Acme Constructions".to_string()),
            project_data: Some(json!({ "_id": "p1", "name": "Tower A", "status": "active" })),
            project_id: None,
        },
        RawAssignmentRecord {
            client_id: Some("c1".to_string()),
            client_name: Some("Acme Constructions".to_string()),
            project_data: Some(json!({ "_id": "p2", "name": "Tower B", "status": "active" })),
            project_id: None,
        },
        RawAssignmentRecord {
            client_id: Some("c2".to_string()),
            client_name: Some("Birla Estates".to_string()),
            project_data: Some(json!({ "_id": "p3", "name": "Mall Annex", "status": "on-hold" })),
            project_id: None,
        },
        RawAssignmentRecord {
            client_id: Some("c2".to_string()),
            client_name: Some("Birla Estates".to_string()),
            project_data: Some(json!({ "_id": "p1", "name": "Tower A", "status": "active" })),
            project_id: None,
        },
        // Stale row with no populated project: dropped with a warning
        RawAssignmentRecord {
            client_id: Some("c3".to_string()),
            client_name: None,
            project_data: None,
            project_id: None,
        },
    ];

    let projects = reconcile_assignments(&assignments);

    println!("Reconciled project list ({} projects):", projects.len());
    for project in &projects {
        println!(
            " - {} [{}] via {}",
            project.project["name"].as_str().unwrap_or("?"),
            project.project_id,
            project.client_name
        );
    }
}
