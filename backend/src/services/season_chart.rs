//! Monthly season-group roll-up for the inventory trend chart
//!
//! Classifies each month of a year independently (with that year's
//! season window) and sums stock/sales amounts per season group.

use std::collections::BTreeMap;

use shared::{InventoryFact, ItemFilter, MonthSeasonBuckets, YearWindow};

use super::classification::{classify_all, ClassifyContext};

/// Roll up one calendar year of facts into twelve monthly buckets.
///
/// Months without data stay zeroed so the chart always has twelve
/// entries. The item filter applies after classification, mirroring
/// the dashboard: category totals and the quantity floors are always
/// computed across all four categories.
pub fn year_rollup(
    year: i32,
    facts_by_month: BTreeMap<String, Vec<InventoryFact>>,
    ctx: &ClassifyContext,
    item_filter: ItemFilter,
) -> Vec<MonthSeasonBuckets> {
    let window = YearWindow::for_year(year);
    let month_ctx = ClassifyContext {
        year_window: window,
        ..ctx.clone()
    };

    (1..=12)
        .map(|m| {
            let month = format!("{year}{m:02}");
            let mut buckets = MonthSeasonBuckets::empty(month.clone());

            if let Some(facts) = facts_by_month.get(&month) {
                let outcome = classify_all(facts.clone(), &month_ctx);
                for record in outcome
                    .records
                    .iter()
                    .filter(|r| item_filter.matches(r.fact.mid_category))
                {
                    let bucket = buckets.bucket_mut(record.season_group);
                    bucket.stock_amt += record.fact.stock_amt;
                    bucket.sales_amt += record.fact.sales_amt;
                    buckets.total_stock_amt += record.fact.stock_amt;
                    buckets.total_sales_amt += record.fact.sales_amt;
                }
            }

            buckets
        })
        .collect()
}
