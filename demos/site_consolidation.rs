use chrono::NaiveDate;
use site_ledger::*;

fn main() {
    env_logger::init();

    let ledger = ScopeLedger {
        scope_id: "ms-foundation".to_string(),
        materials: vec![
            RawMaterialRecord {
                name: Some("Cement".to_string()),
                specs: [("grade".to_string(), serde_json::json!("OPC 53"))].into(),
                qnt: Some(50.0),
                unit: Some("bags".to_string()),
                cost: Some(420.0),
                added_at: Some("2024-03-01T09:00:00Z".to_string()),
                note: Some("opening stock".to_string()),
                mini_section_id: Some("ms-foundation".to_string()),
                ..Default::default()
            },
            RawMaterialRecord {
                name: Some("cement".to_string()),
                specs: [("grade".to_string(), serde_json::json!("OPC 53"))].into(),
                qnt: Some(30.0),
                unit: Some("bags".to_string()),
                cost: Some(410.0),
                added_at: Some("2024-03-08T10:30:00Z".to_string()),
                mini_section_id: Some("ms-foundation".to_string()),
                ..Default::default()
            },
            RawMaterialRecord {
                name: Some("River Sand".to_string()),
                qnt: Some(600.0),
                unit: Some("cft".to_string()),
                cost: Some(55.0),
                added_at: Some("2024-03-02T07:45:00Z".to_string()),
                mini_section_id: Some("ms-foundation".to_string()),
                ..Default::default()
            },
        ],
        labor: vec![
            RawLaborRecord {
                category: Some("Skilled".to_string()),
                labor_type: Some("Mason".to_string()),
                count: Some(5.0),
                per_labor_cost: Some(800.0),
                work_date: Some("2024-03-04T00:00:00Z".to_string()),
                mini_section_id: Some("ms-foundation".to_string()),
                ..Default::default()
            },
            RawLaborRecord {
                category: Some("Skilled".to_string()),
                labor_type: Some("Mason".to_string()),
                count: Some(3.0),
                per_labor_cost: Some(1_000.0),
                work_date: Some("2024-03-11T00:00:00Z".to_string()),
                mini_section_id: Some("ms-foundation".to_string()),
                ..Default::default()
            },
        ],
    };

    let summary = process_scope_ledger(&ledger);

    println!("Scope {} consolidated:", summary.scope_id);
    for entry in summary.materials.iter().chain(summary.labor.iter()) {
        println!(
            " - {}: {} {} at {:.2}/unit = {:.2} ({} recordings)",
            entry.label,
            entry.total_quantity,
            entry.unit.as_deref().unwrap_or("nos"),
            entry.effective_unit_cost(),
            entry.total_cost,
            entry.merged_count
        );
    }

    println!(
        "\nMaterial total: {:.2}\nLabor total:    {:.2}\nGrand total:    {:.2}",
        summary.totals.material_total, summary.totals.labor_total, summary.totals.grand_total
    );

    let today = NaiveDate::from_ymd_opt(2024, 3, 12).unwrap();
    let timeline = timeline_sections(
        normalize_materials(&ledger.materials),
        |e| e.recorded_at.date(),
        today,
    );

    println!("\nMaterial timeline:");
    for section in &timeline {
        println!(" {}:", section.label);
        for entry in &section.items {
            println!("   - {} x{}", entry.label, entry.quantity);
        }
    }

    let all: Vec<ConsolidatedEntry> = summary
        .materials
        .iter()
        .chain(summary.labor.iter())
        .cloned()
        .collect();
    let report = CostReport::from_consolidated("Foundation Cost Report", &all, |e| {
        e.kind.as_str().to_string()
    });

    println!("\n{}", report.to_markdown());
}
