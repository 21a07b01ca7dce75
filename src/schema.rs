use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum EntryKind {
    #[schemars(description = "A material imported to or consumed on site (cement, steel, aggregate)")]
    Material,

    #[schemars(description = "Labor deployed on site for a day or shift (masons, helpers, operators)")]
    Labor,
}

impl EntryKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Material => "material",
            Self::Labor => "labor",
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RawMaterialRecord {
    #[schemars(description = "Material name as entered on the import/consumption form (e.g. 'Cement', 'TMT Bar'). Matched case-insensitively when merging repeat entries.")]
    pub name: Option<String>,

    #[serde(default)]
    #[schemars(
        description = "Specification fields distinguishing variants of the same material (e.g. grade, brand, diameter). Two entries are the same material only if the name and every specification field match exactly; field order is irrelevant."
    )]
    pub specs: BTreeMap<String, serde_json::Value>,

    #[serde(default, alias = "quantity")]
    #[schemars(description = "Quantity imported or consumed, in the stated unit")]
    pub qnt: Option<f64>,

    #[schemars(description = "Unit of measure for the quantity (e.g. 'bags', 'kg', 'cft')")]
    pub unit: Option<String>,

    #[schemars(description = "Per-unit cost. Used to derive the total when totalCost is absent.")]
    pub cost: Option<f64>,

    #[schemars(description = "Total cost of this entry. Takes precedence over qnt × cost when both are present.")]
    pub total_cost: Option<f64>,

    #[schemars(description = "When the entry was added, RFC 3339 or epoch milliseconds")]
    pub added_at: Option<String>,

    #[schemars(description = "Fallback creation timestamp used when addedAt is absent")]
    pub created_at: Option<String>,

    #[schemars(description = "Optional free-text remark entered with the record")]
    pub note: Option<String>,

    #[schemars(description = "Identifier of the mini-section (or section) this entry belongs to")]
    pub mini_section_id: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RawLaborRecord {
    #[schemars(description = "Labor category (e.g. 'Skilled', 'Unskilled'). Matched case-insensitively when merging repeat entries.")]
    pub category: Option<String>,

    #[serde(rename = "type")]
    #[schemars(description = "Labor type within the category (e.g. 'Mason', 'Helper'). Matched case-insensitively.")]
    pub labor_type: Option<String>,

    #[schemars(description = "Number of laborers deployed")]
    pub count: Option<f64>,

    #[schemars(description = "Cost per laborer. Used to derive the total when totalCost is absent.")]
    pub per_labor_cost: Option<f64>,

    #[schemars(description = "Total cost of this deployment. Takes precedence over count × perLaborCost when both are present.")]
    pub total_cost: Option<f64>,

    #[schemars(description = "The work date of the deployment, RFC 3339 or epoch milliseconds")]
    pub work_date: Option<String>,

    #[schemars(description = "Fallback creation timestamp used when workDate is absent")]
    pub created_at: Option<String>,

    #[schemars(description = "Optional free-text remark entered with the record")]
    pub note: Option<String>,

    #[schemars(description = "Identifier of the mini-section (or section) this entry belongs to")]
    pub mini_section_id: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RawAssignmentRecord {
    #[schemars(description = "Identifier of the client organization this assignment was fetched under")]
    pub client_id: Option<String>,

    #[schemars(description = "Display name of the client organization. Defaults to 'Unknown Client' downstream when absent.")]
    pub client_name: Option<String>,

    #[schemars(
        description = "Populated project document, expected to carry an '_id' field. Assignments without resolvable project data are skipped."
    )]
    pub project_data: Option<serde_json::Value>,

    #[schemars(description = "Bare project identifier, consulted when projectData carries no '_id'")]
    pub project_id: Option<String>,
}

/// One screen-load snapshot of a single scope's raw ledger, as returned by
/// the project APIs. The scope is a mini-section or section; entries from
/// different scopes are never consolidated together.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScopeLedger {
    #[schemars(description = "The mini-section or section identifier that bounds consolidation")]
    pub scope_id: String,

    #[schemars(description = "Raw material entries recorded against this scope, in recording order")]
    pub materials: Vec<RawMaterialRecord>,

    #[schemars(description = "Raw labor entries recorded against this scope, in recording order")]
    pub labor: Vec<RawLaborRecord>,
}

impl ScopeLedger {
    pub fn generate_json_schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(ScopeLedger)
    }

    pub fn schema_as_json() -> Result<String, serde_json::Error> {
        let schema = Self::generate_json_schema();
        serde_json::to_string_pretty(&schema)
    }
}
