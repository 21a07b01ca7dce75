use crate::normalizer::LedgerEntry;
use crate::schema::EntryKind;
use chrono::NaiveDateTime;
use log::debug;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

const NOTE_SEPARATOR: &str = "; ";

/// One summary row per distinct identity key within a scope: the fold of
/// every raw entry that recorded the same material or labor happening again.
///
/// `total_quantity` and `total_cost` are always the arithmetic sums over the
/// contributing entries. The unit cost is exposed as a derived value only
/// (see [`ConsolidatedEntry::effective_unit_cost`]), so it can never drift
/// from the totals through merging.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConsolidatedEntry {
    pub kind: EntryKind,
    pub identity_key: String,
    pub label: String,
    pub unit: Option<String>,
    pub total_quantity: f64,
    pub total_cost: f64,
    pub earliest_recorded_at: NaiveDateTime,
    pub merged_notes: Option<String>,
    /// How many raw entries were folded into this row.
    pub merged_count: usize,
    pub scope_id: Option<String>,
}

impl ConsolidatedEntry {
    /// Weighted-average unit cost: `total_cost / total_quantity`, not a mean
    /// of the per-entry rates. A zero-quantity group yields 0.0, not NaN.
    pub fn effective_unit_cost(&self) -> f64 {
        if self.total_quantity == 0.0 {
            0.0
        } else {
            self.total_cost / self.total_quantity
        }
    }

    /// Re-expresses the summary as a single ledger entry, as data-entry
    /// screens do when a consolidated row is edited and re-submitted.
    pub fn as_entry(&self) -> LedgerEntry {
        LedgerEntry {
            kind: self.kind,
            identity_key: self.identity_key.clone(),
            label: self.label.clone(),
            unit: self.unit.clone(),
            quantity: self.total_quantity,
            total_cost: self.total_cost,
            recorded_at: self.earliest_recorded_at,
            note: self.merged_notes.clone(),
            scope_id: self.scope_id.clone(),
        }
    }

    fn from_entry(entry: &LedgerEntry) -> Self {
        Self {
            kind: entry.kind,
            identity_key: entry.identity_key.clone(),
            label: entry.label.clone(),
            unit: entry.unit.clone(),
            total_quantity: entry.quantity,
            total_cost: entry.total_cost,
            earliest_recorded_at: entry.recorded_at,
            merged_notes: entry.note.clone(),
            merged_count: 1,
            scope_id: entry.scope_id.clone(),
        }
    }

    fn absorb(&mut self, entry: &LedgerEntry) {
        self.total_quantity += entry.quantity;
        self.total_cost += entry.total_cost;
        self.merged_count += 1;

        if entry.recorded_at < self.earliest_recorded_at {
            self.earliest_recorded_at = entry.recorded_at;
        }

        if self.unit.is_none() {
            self.unit = entry.unit.clone();
        }

        if let Some(note) = &entry.note {
            match &mut self.merged_notes {
                None => self.merged_notes = Some(note.clone()),
                Some(existing) => {
                    let already_present = existing
                        .split(NOTE_SEPARATOR)
                        .any(|part| part == note.as_str());
                    if !already_present {
                        existing.push_str(NOTE_SEPARATOR);
                        existing.push_str(note);
                    }
                }
            }
        }
    }
}

/// Folds a scope's entries into one [`ConsolidatedEntry`] per identity key.
///
/// Output order follows the first occurrence of each identity key in the
/// input. The caller supplies entries from a single mini-section or section;
/// consolidation never merges across scopes.
pub fn consolidate(entries: &[LedgerEntry]) -> Vec<ConsolidatedEntry> {
    if let Some(first) = entries.first() {
        debug_assert!(
            entries.iter().all(|e| e.scope_id == first.scope_id),
            "consolidate called with entries from more than one scope"
        );
    }

    let mut consolidated: Vec<ConsolidatedEntry> = Vec::new();
    let mut index_by_key: HashMap<&str, usize> = HashMap::new();

    for entry in entries {
        match index_by_key.get(entry.identity_key.as_str()) {
            Some(&idx) => consolidated[idx].absorb(entry),
            None => {
                index_by_key.insert(entry.identity_key.as_str(), consolidated.len());
                consolidated.push(ConsolidatedEntry::from_entry(entry));
            }
        }
    }

    debug!(
        "Consolidated {} entries into {} identity groups",
        entries.len(),
        consolidated.len()
    );

    consolidated
}
