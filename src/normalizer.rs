use crate::error::{LedgerError, Result};
use crate::schema::{EntryKind, RawLaborRecord, RawMaterialRecord};
use crate::utils::{canonical_specs_json, parse_timestamp};
use chrono::NaiveDateTime;
use log::warn;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A raw record resolved into the uniform shape the rest of the engine
/// consumes. Field ambiguities in the upstream payloads (`cost` vs
/// `totalCost`, `qnt` vs `count`, the timestamp fallback chain) are settled
/// here, once, at the boundary.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LedgerEntry {
    pub kind: EntryKind,

    /// The attribute combination that decides whether two entries are
    /// occurrences of the same thing and may be merged.
    pub identity_key: String,

    /// Human-readable name for display: the material name, or
    /// "Category / Type" for labor.
    pub label: String,

    /// Unit of measure for material quantities; labor counts carry none.
    pub unit: Option<String>,

    pub quantity: f64,

    /// Always defined: the provided total, else quantity × unit cost, else 0.
    pub total_cost: f64,

    pub recorded_at: NaiveDateTime,

    pub note: Option<String>,

    pub scope_id: Option<String>,
}

impl LedgerEntry {
    /// Per-entry unit cost, derived from totals rather than trusted from the
    /// raw record, so later aggregation cannot drift from the totals.
    pub fn unit_cost(&self) -> f64 {
        if self.quantity == 0.0 {
            0.0
        } else {
            self.total_cost / self.quantity
        }
    }
}

pub fn normalize_material(raw: &RawMaterialRecord) -> Result<LedgerEntry> {
    let name = raw
        .name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .ok_or(LedgerError::MissingIdentity {
            kind: "material",
            field: "name",
        })?;

    let identity_key = format!(
        "{}::{}",
        name.to_lowercase(),
        canonical_specs_json(&raw.specs)?
    );

    let quantity = raw.qnt.unwrap_or(0.0);
    let recorded_at = resolve_recorded_at(
        "material",
        name,
        raw.added_at.as_deref(),
        raw.created_at.as_deref(),
    )?;

    Ok(LedgerEntry {
        kind: EntryKind::Material,
        identity_key,
        label: name.to_string(),
        unit: raw.unit.clone(),
        quantity,
        total_cost: resolve_total_cost(raw.total_cost, quantity, raw.cost),
        recorded_at,
        note: clean_note(raw.note.as_deref()),
        scope_id: raw.mini_section_id.clone(),
    })
}

pub fn normalize_labor(raw: &RawLaborRecord) -> Result<LedgerEntry> {
    let category = raw
        .category
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .ok_or(LedgerError::MissingIdentity {
            kind: "labor",
            field: "category",
        })?;

    let labor_type = raw
        .labor_type
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or(LedgerError::MissingIdentity {
            kind: "labor",
            field: "type",
        })?;

    let label = format!("{} / {}", category, labor_type);
    let count = raw.count.unwrap_or(0.0);
    let recorded_at = resolve_recorded_at(
        "labor",
        &label,
        raw.work_date.as_deref(),
        raw.created_at.as_deref(),
    )?;

    Ok(LedgerEntry {
        kind: EntryKind::Labor,
        identity_key: format!("{}|{}", category.to_lowercase(), labor_type.to_lowercase()),
        label,
        unit: None,
        quantity: count,
        total_cost: resolve_total_cost(raw.total_cost, count, raw.per_labor_cost),
        recorded_at,
        note: clean_note(raw.note.as_deref()),
        scope_id: raw.mini_section_id.clone(),
    })
}

/// Normalizes a batch of material records, preserving input order. Malformed
/// records are skipped with a diagnostic; they never abort the batch.
pub fn normalize_materials(raws: &[RawMaterialRecord]) -> Vec<LedgerEntry> {
    let mut entries = Vec::with_capacity(raws.len());
    for (idx, raw) in raws.iter().enumerate() {
        match normalize_material(raw) {
            Ok(entry) => entries.push(entry),
            Err(err) => warn!("Skipping material record #{}: {}", idx, err),
        }
    }
    entries
}

/// Labor counterpart of [`normalize_materials`].
pub fn normalize_labor_records(raws: &[RawLaborRecord]) -> Vec<LedgerEntry> {
    let mut entries = Vec::with_capacity(raws.len());
    for (idx, raw) in raws.iter().enumerate() {
        match normalize_labor(raw) {
            Ok(entry) => entries.push(entry),
            Err(err) => warn!("Skipping labor record #{}: {}", idx, err),
        }
    }
    entries
}

fn resolve_total_cost(total: Option<f64>, quantity: f64, unit_cost: Option<f64>) -> f64 {
    match (total, unit_cost) {
        (Some(total), _) => total,
        (None, Some(unit)) => quantity * unit,
        (None, None) => 0.0,
    }
}

fn resolve_recorded_at(
    kind: &'static str,
    label: &str,
    primary: Option<&str>,
    fallback: Option<&str>,
) -> Result<NaiveDateTime> {
    let raw = primary
        .or(fallback)
        .ok_or_else(|| LedgerError::MissingTimestamp {
            kind,
            label: label.to_string(),
        })?;

    parse_timestamp(raw)
}

fn clean_note(note: Option<&str>) -> Option<String> {
    note.map(str::trim)
        .filter(|n| !n.is_empty())
        .map(str::to_string)
}
