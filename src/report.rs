use crate::consolidate::ConsolidatedEntry;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryBreakdown {
    pub category: String,
    pub entries: Vec<ConsolidatedEntry>,
    pub subtotal: f64,
}

/// Per-category cost breakdown for the report exporter, built by re-grouping
/// consolidated entries with a caller-supplied category function. The engine
/// imposes no category taxonomy of its own.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostReport {
    pub title: String,
    pub categories: Vec<CategoryBreakdown>,
}

impl CostReport {
    pub fn from_consolidated<F>(
        title: impl Into<String>,
        entries: &[ConsolidatedEntry],
        category_of: F,
    ) -> Self
    where
        F: Fn(&ConsolidatedEntry) -> String,
    {
        let mut categories: Vec<CategoryBreakdown> = Vec::new();

        for entry in entries {
            let category = category_of(entry);
            match categories.iter_mut().find(|c| c.category == category) {
                Some(breakdown) => {
                    breakdown.subtotal += entry.total_cost;
                    breakdown.entries.push(entry.clone());
                }
                None => categories.push(CategoryBreakdown {
                    category,
                    subtotal: entry.total_cost,
                    entries: vec![entry.clone()],
                }),
            }
        }

        Self {
            title: title.into(),
            categories,
        }
    }

    pub fn grand_total(&self) -> f64 {
        self.categories.iter().map(|c| c.subtotal).sum()
    }

    pub fn category_count(&self) -> usize {
        self.categories.len()
    }

    pub fn entry_count(&self) -> usize {
        self.categories.iter().map(|c| c.entries.len()).sum()
    }

    pub fn to_csv(&self) -> String {
        let mut output = String::new();
        output.push_str("Category,Item,Unit,Quantity,Unit Cost,Total Cost\n");

        for breakdown in &self.categories {
            for entry in &breakdown.entries {
                output.push_str(&format!(
                    "{},{},{},{:.2},{:.2},{:.2}\n",
                    breakdown.category,
                    entry.label,
                    entry.unit.as_deref().unwrap_or(""),
                    entry.total_quantity,
                    entry.effective_unit_cost(),
                    entry.total_cost
                ));
            }
        }

        output.push_str(&format!("Grand Total,,,,,{:.2}\n", self.grand_total()));
        output
    }

    pub fn to_markdown(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!("# {}\n\n", self.title));

        for breakdown in &self.categories {
            output.push_str(&format!("## {}\n\n", breakdown.category));

            for entry in &breakdown.entries {
                let quantity = match &entry.unit {
                    Some(unit) => format!("{} {}", entry.total_quantity, unit),
                    None => format!("{}", entry.total_quantity),
                };
                output.push_str(&format!(
                    "- {}: {} at {:.2}/unit = {:.2}\n",
                    entry.label,
                    quantity,
                    entry.effective_unit_cost(),
                    entry.total_cost
                ));
            }

            output.push_str(&format!("\n**Subtotal:** {:.2}\n\n", breakdown.subtotal));
        }

        output.push_str(&format!("**Grand Total:** {:.2}\n", self.grand_total()));
        output
    }
}
