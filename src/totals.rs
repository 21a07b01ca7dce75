use crate::consolidate::ConsolidatedEntry;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Grand totals for a project, section, or mini-section view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CostTotals {
    pub material_total: f64,
    pub labor_total: f64,
    pub grand_total: f64,
}

/// Sums consolidated material and labor costs into display totals.
///
/// Operates on consolidated entries only; summing raw rows here would count
/// duplicate recordings twice. Empty inputs yield all-zero totals.
pub fn totalize(materials: &[ConsolidatedEntry], labor: &[ConsolidatedEntry]) -> CostTotals {
    let material_total: f64 = materials.iter().map(|c| c.total_cost).sum();
    let labor_total: f64 = labor.iter().map(|c| c.total_cost).sum();

    CostTotals {
        material_total,
        labor_total,
        grand_total: material_total + labor_total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consolidate::consolidate;
    use crate::normalizer::LedgerEntry;
    use crate::schema::EntryKind;
    use chrono::NaiveDate;

    fn entry(kind: EntryKind, key: &str, quantity: f64, total_cost: f64) -> LedgerEntry {
        LedgerEntry {
            kind,
            identity_key: key.to_string(),
            label: key.to_string(),
            unit: None,
            quantity,
            total_cost,
            recorded_at: NaiveDate::from_ymd_opt(2024, 3, 5)
                .unwrap()
                .and_hms_opt(9, 0, 0)
                .unwrap(),
            note: None,
            scope_id: Some("ms-1".to_string()),
        }
    }

    #[test]
    fn test_empty_inputs_yield_zero_totals() {
        let totals = totalize(&[], &[]);
        assert_eq!(totals, CostTotals::default());
        assert_eq!(totals.grand_total, 0.0);
    }

    #[test]
    fn test_grand_total_is_exact_sum_of_parts() {
        let materials = consolidate(&[
            entry(EntryKind::Material, "cement::{}", 10.0, 4_000.0),
            entry(EntryKind::Material, "sand::{}", 120.0, 6_600.0),
        ]);
        let labor = consolidate(&[entry(EntryKind::Labor, "skilled|mason", 4.0, 3_600.0)]);

        let totals = totalize(&materials, &labor);
        assert_eq!(totals.material_total, 10_600.0);
        assert_eq!(totals.labor_total, 3_600.0);
        assert_eq!(totals.grand_total, totals.material_total + totals.labor_total);
        assert_eq!(totals.grand_total, 14_200.0);
    }

    #[test]
    fn test_duplicate_raw_rows_do_not_inflate_totals() {
        // The same delivery recorded twice must enter the total once per
        // actual rupee, which consolidation guarantees before totalizing.
        let raw = vec![
            entry(EntryKind::Material, "cement::{}", 10.0, 4_000.0),
            entry(EntryKind::Material, "cement::{}", 10.0, 4_000.0),
        ];

        let totals = totalize(&consolidate(&raw), &[]);
        assert_eq!(totals.material_total, 8_000.0);
        assert_eq!(totals.grand_total, 8_000.0);
    }
}
