//! # Site Ledger
//!
//! A library for consolidating construction-site material and labor ledgers
//! into deduplicated, financially consistent view models.
//!
//! ## Core Concepts
//!
//! - **Raw records**: material/labor rows as the project APIs return them,
//!   with duplicate recordings and inconsistent optional fields
//! - **Normalization**: resolves the field ambiguities once at the boundary
//!   and assigns each row its identity key
//! - **Consolidation**: folds rows sharing an identity key into one summary
//!   with conserved quantity and cost sums
//! - **Weighted-average unit cost**: `total_cost / total_quantity`, never a
//!   naive mean of per-entry rates
//! - **Reconciliation**: merges a staff member's per-client assignment
//!   records into one deduplicated project list
//!
//! ## Example
//!
//! ```rust,ignore
//! use site_ledger::*;
//!
//! let ledger = ScopeLedger {
//!     scope_id: "ms-1".to_string(),
//!     materials: vec![
//!         RawMaterialRecord {
//!             name: Some("Cement".to_string()),
//!             qnt: Some(50.0),
//!             unit: Some("bags".to_string()),
//!             cost: Some(420.0),
//!             added_at: Some("2024-03-05T09:30:00Z".to_string()),
//!             ..Default::default()
//!         },
//!         RawMaterialRecord {
//!             name: Some("cement".to_string()),
//!             qnt: Some(30.0),
//!             unit: Some("bags".to_string()),
//!             cost: Some(410.0),
//!             added_at: Some("2024-03-12T10:00:00Z".to_string()),
//!             ..Default::default()
//!         },
//!     ],
//!     labor: vec![],
//! };
//!
//! let summary = process_scope_ledger(&ledger);
//! assert_eq!(summary.materials.len(), 1);
//! assert_eq!(summary.totals.material_total, 33_300.0);
//! ```

pub mod bucket;
pub mod consolidate;
pub mod error;
pub mod normalizer;
pub mod reconcile;
pub mod report;
pub mod schema;
pub mod totals;
pub mod utils;

pub use bucket::{bucket_by_date, bucket_label, timeline_sections, DateBucket, TimelineSection};
pub use consolidate::{consolidate, ConsolidatedEntry};
pub use error::{LedgerError, Result};
pub use normalizer::{
    normalize_labor, normalize_labor_records, normalize_material, normalize_materials, LedgerEntry,
};
pub use reconcile::{reconcile_assignments, ReconciledProject, UNKNOWN_CLIENT};
pub use report::{CategoryBreakdown, CostReport};
pub use schema::*;
pub use totals::{totalize, CostTotals};
pub use utils::*;

use log::{debug, info};
use serde::Serialize;

/// The consolidated view of one scope, ready for the section screens and
/// the report exporter.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScopeSummary {
    pub scope_id: String,
    pub materials: Vec<ConsolidatedEntry>,
    pub labor: Vec<ConsolidatedEntry>,
    pub totals: CostTotals,
}

pub struct LedgerProcessor;

impl LedgerProcessor {
    /// Runs the full pipeline for one scope: normalize the raw material and
    /// labor records, consolidate each stream, and roll up the totals.
    ///
    /// Malformed records are skipped with diagnostics and empty inputs
    /// produce empty/zero outputs; neither is an error. Inputs are treated
    /// as immutable snapshots, so repeated calls over the same fetch are
    /// idempotent.
    pub fn process(ledger: &ScopeLedger) -> ScopeSummary {
        info!("Processing ledger for scope: {}", ledger.scope_id);
        debug!(
            "Scope contains {} raw material records and {} raw labor records",
            ledger.materials.len(),
            ledger.labor.len()
        );

        let materials = consolidate(&normalize_materials(&ledger.materials));
        let labor = consolidate(&normalize_labor_records(&ledger.labor));
        let totals = totalize(&materials, &labor);

        ScopeSummary {
            scope_id: ledger.scope_id.clone(),
            materials,
            labor,
            totals,
        }
    }
}

pub fn process_scope_ledger(ledger: &ScopeLedger) -> ScopeSummary {
    LedgerProcessor::process(ledger)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn material(name: &str, qnt: f64, cost: f64, added_at: &str) -> RawMaterialRecord {
        RawMaterialRecord {
            name: Some(name.to_string()),
            qnt: Some(qnt),
            unit: Some("bags".to_string()),
            cost: Some(cost),
            added_at: Some(added_at.to_string()),
            mini_section_id: Some("ms-1".to_string()),
            ..Default::default()
        }
    }

    fn labor(category: &str, labor_type: &str, count: f64, rate: f64) -> RawLaborRecord {
        RawLaborRecord {
            category: Some(category.to_string()),
            labor_type: Some(labor_type.to_string()),
            count: Some(count),
            per_labor_cost: Some(rate),
            work_date: Some("2024-03-05T00:00:00Z".to_string()),
            mini_section_id: Some("ms-1".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_end_to_end_processing() {
        let ledger = ScopeLedger {
            scope_id: "ms-1".to_string(),
            materials: vec![
                material("Cement", 10.0, 100.0, "2024-03-05T09:30:00Z"),
                material("cement", 5.0, 100.0, "2024-03-12T10:00:00Z"),
                material("Sand", 120.0, 55.0, "2024-03-06T08:00:00Z"),
            ],
            labor: vec![
                labor("Skilled", "Mason", 5.0, 800.0),
                labor("skilled", "mason", 3.0, 1_000.0),
            ],
        };

        let summary = process_scope_ledger(&ledger);

        assert_eq!(summary.materials.len(), 2);
        assert_eq!(summary.labor.len(), 1);

        let cement = &summary.materials[0];
        assert_eq!(cement.total_quantity, 15.0);
        assert_eq!(cement.total_cost, 1_500.0);
        assert_eq!(cement.effective_unit_cost(), 100.0);

        let masons = &summary.labor[0];
        assert_eq!(masons.total_quantity, 8.0);
        assert_eq!(masons.total_cost, 7_000.0);
        assert_eq!(masons.effective_unit_cost(), 875.0);

        assert_eq!(summary.totals.material_total, 1_500.0 + 6_600.0);
        assert_eq!(summary.totals.labor_total, 7_000.0);
        assert_eq!(
            summary.totals.grand_total,
            summary.totals.material_total + summary.totals.labor_total
        );
    }

    #[test]
    fn test_empty_scope_yields_zero_summary() {
        let ledger = ScopeLedger {
            scope_id: "ms-9".to_string(),
            materials: vec![],
            labor: vec![],
        };

        let summary = process_scope_ledger(&ledger);
        assert!(summary.materials.is_empty());
        assert!(summary.labor.is_empty());
        assert_eq!(summary.totals, CostTotals::default());
    }

    #[test]
    fn test_malformed_rows_never_abort_the_scope() {
        let ledger = ScopeLedger {
            scope_id: "ms-1".to_string(),
            materials: vec![
                RawMaterialRecord::default(),
                material("Cement", 10.0, 400.0, "2024-03-05T09:30:00Z"),
            ],
            labor: vec![RawLaborRecord::default()],
        };

        let summary = process_scope_ledger(&ledger);
        assert_eq!(summary.materials.len(), 1);
        assert!(summary.labor.is_empty());
        assert_eq!(summary.totals.grand_total, 4_000.0);
    }

    #[test]
    fn test_processing_is_idempotent_over_a_snapshot() {
        let ledger = ScopeLedger {
            scope_id: "ms-1".to_string(),
            materials: vec![
                material("Cement", 10.0, 400.0, "2024-03-05T09:30:00Z"),
                material("Cement", 5.0, 410.0, "2024-03-12T10:00:00Z"),
            ],
            labor: vec![],
        };

        let first = process_scope_ledger(&ledger);
        let second = process_scope_ledger(&ledger);

        assert_eq!(first.totals, second.totals);
        assert_eq!(first.materials.len(), second.materials.len());
    }
}
