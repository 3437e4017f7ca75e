//! Category roll-up aggregation over classified records
//!
//! Two percent modes exist on purpose: the unsplit "total inventory"
//! card divides by the grand total, while the stagnant/normal split
//! divides each category by that category's own total so the two
//! percentages are complementary.

use std::collections::{HashMap, HashSet};

use rust_decimal::Decimal;

use shared::{
    CategorySummary, Channel, ClassifiedRecord, MidCategory, SummaryBoxData, SummaryCategory,
};

/// Denominator for `stock_amt_pct`
#[derive(Debug, Clone)]
pub enum PctBase<'a> {
    /// Percent of a single grand total (must share the items' channel
    /// and filter scope)
    GrandTotal(Decimal),
    /// Percent of each category's own total across the whole filtered
    /// set; the "all" row divides by the sum of the map
    PerCategory(&'a HashMap<MidCategory, Decimal>),
}

impl PctBase<'_> {
    fn denominator(&self, category: SummaryCategory) -> Decimal {
        match self {
            PctBase::GrandTotal(total) => *total,
            PctBase::PerCategory(map) => match category.mid_category() {
                Some(mid) => map.get(&mid).copied().unwrap_or(Decimal::ZERO),
                None => map.values().copied().sum(),
            },
        }
    }
}

fn percent_of(amount: Decimal, denominator: Decimal) -> Decimal {
    if denominator > Decimal::ZERO {
        amount / denominator * Decimal::from(100)
    } else {
        Decimal::ZERO
    }
}

/// Channel-scoped stock-amount totals per mid-category, for the
/// per-category percent base
pub fn category_stock_totals(
    items: &[ClassifiedRecord],
    channel: Channel,
) -> HashMap<MidCategory, Decimal> {
    let mut totals: HashMap<MidCategory, Decimal> = HashMap::new();
    for item in items {
        *totals.entry(item.fact.mid_category).or_insert(Decimal::ZERO) +=
            item.fact.stock_amt_in(channel);
    }
    totals
}

/// Roll up classified records into the five summary rows
/// (전체, 신발, 모자, 가방, 기타) using the channel's stock/sales fields
pub fn aggregate_by_category(
    items: &[ClassifiedRecord],
    channel: Channel,
    base: &PctBase,
) -> Vec<CategorySummary> {
    SummaryCategory::ALL
        .iter()
        .map(|&category| {
            let filtered: Vec<&ClassifiedRecord> = match category.mid_category() {
                None => items.iter().collect(),
                Some(mid) => items
                    .iter()
                    .filter(|item| item.fact.mid_category == mid)
                    .collect(),
            };

            let stock_amt: Decimal = filtered.iter().map(|i| i.fact.stock_amt_in(channel)).sum();
            let stock_qty: i64 = filtered.iter().map(|i| i.fact.stock_qty_in(channel)).sum();
            let sales_tag_amt: Decimal =
                filtered.iter().map(|i| i.fact.sales_amt_in(channel)).sum();

            // De-dup safeguard: a dimension key appears once per fact,
            // but the count is distinct keys, not rows
            let item_count = filtered
                .iter()
                .filter(|i| i.fact.stock_amt_in(channel) > Decimal::ZERO)
                .map(|i| i.fact.dimension_key.as_str())
                .collect::<HashSet<_>>()
                .len() as i64;

            CategorySummary {
                category,
                stock_amt,
                stock_amt_pct: percent_of(stock_amt, base.denominator(category)),
                stock_qty,
                item_count,
                sales_tag_amt,
            }
        })
        .collect()
}

/// Build a summary box; the "전체" row doubles as the box total
pub fn summary_box(
    title: &str,
    items: &[ClassifiedRecord],
    channel: Channel,
    base: &PctBase,
) -> SummaryBoxData {
    let categories = aggregate_by_category(items, channel, base);
    let total = categories
        .iter()
        .find(|c| c.category == SummaryCategory::All)
        .cloned()
        .unwrap_or(CategorySummary {
            category: SummaryCategory::All,
            stock_amt: Decimal::ZERO,
            stock_amt_pct: Decimal::ZERO,
            stock_qty: 0,
            item_count: 0,
            sales_tag_amt: Decimal::ZERO,
        });

    SummaryBoxData {
        title: title.to_string(),
        categories,
        total,
    }
}
