//! Season-group classification engine
//!
//! Assigns every inventory fact of a month to exactly one of the five
//! buckets. Rule order is load-bearing:
//!
//! 1. style-level quantity floor (당월수량미달) overrides everything;
//! 2. current/next season-code prefixes are never reclassified as
//!    stagnant, regardless of sales;
//! 3. past-season stock is stagnant only when the prior-month balance
//!    was at least `min_qty` and the sales-to-category-stock ratio is
//!    below the threshold.
//!
//! Classification is pure and always runs on the unsplit (전체)
//! amounts; channel filters only affect aggregation downstream.

use std::collections::{BTreeSet, HashMap};

use rust_decimal::Decimal;

use shared::{ClassifiedRecord, InventoryFact, MidCategory, SeasonGroup, YearWindow};

/// Parameters of one classification run
#[derive(Debug, Clone)]
pub struct ClassifyContext {
    pub year_window: YearWindow,
    /// Stagnation threshold as a fraction (UI percent / 100)
    pub threshold_ratio: Decimal,
    /// Prior-month quantity floor for the past-season stagnation check
    pub min_qty: i64,
    /// Current-month style-level quantity floor for the override bucket
    pub current_month_min_qty: i64,
}

/// Result of classifying one month's fact set
#[derive(Debug, Clone)]
pub struct ClassificationOutcome {
    pub records: Vec<ClassifiedRecord>,
    /// Styles that triggered the below-min-qty override, sorted and
    /// de-duplicated for cross-referencing in other dimension tabs
    pub excluded_styles: Vec<String>,
}

/// Current-month stock quantity summed per style, across every
/// dimension key belonging to the style
pub fn style_qty_totals(facts: &[InventoryFact]) -> HashMap<String, i64> {
    let mut totals: HashMap<String, i64> = HashMap::new();
    for fact in facts {
        *totals.entry(fact.style_code.clone()).or_insert(0) += fact.stock_qty;
    }
    totals
}

/// Styles whose current-month aggregate quantity is below the floor
pub fn low_stock_styles(facts: &[InventoryFact], floor: i64) -> BTreeSet<String> {
    style_qty_totals(facts)
        .into_iter()
        .filter(|(_, qty)| *qty < floor)
        .map(|(style, _)| style)
        .collect()
}

/// Stock-amount denominator per mid-category, computed from the same
/// filtered fact set that gets classified
pub fn category_totals(facts: &[InventoryFact]) -> HashMap<MidCategory, Decimal> {
    let mut totals: HashMap<MidCategory, Decimal> = HashMap::new();
    for fact in facts {
        *totals.entry(fact.mid_category).or_insert(Decimal::ZERO) += fact.stock_amt;
    }
    totals
}

/// Sales-to-category-stock ratio; 0 when the denominator is not
/// positive, so a category with no tracked stock never exonerates a
/// unit (0 < any positive threshold)
pub fn sales_ratio(sales_amt: Decimal, category_total: Decimal) -> Decimal {
    if category_total > Decimal::ZERO {
        sales_amt / category_total
    } else {
        Decimal::ZERO
    }
}

/// Classify a single fact. `low_stock` is the style set from
/// [`low_stock_styles`]; `category_total` the fact's category
/// denominator. First match wins.
pub fn classify(
    fact: &InventoryFact,
    category_total: Decimal,
    low_stock: &BTreeSet<String>,
    ctx: &ClassifyContext,
) -> SeasonGroup {
    if low_stock.contains(&fact.style_code) {
        return SeasonGroup::BelowMinQty;
    }

    if !fact.season.is_empty() {
        if fact.season.starts_with(&ctx.year_window.current_prefix) {
            return SeasonGroup::CurrentSeason;
        }
        if fact.season.starts_with(&ctx.year_window.next_prefix) {
            return SeasonGroup::NextSeason;
        }
    }

    // Past season: a nearly-depleted prior-month balance is winding
    // down normally, not stuck. Strict inequality.
    if fact.prev_stock_qty < ctx.min_qty {
        return SeasonGroup::PastSeason;
    }

    if sales_ratio(fact.sales_amt, category_total) < ctx.threshold_ratio {
        SeasonGroup::Stagnant
    } else {
        SeasonGroup::PastSeason
    }
}

/// Classify a whole month's fact set.
///
/// Facts with non-positive stock amount are dropped here as well as in
/// SQL; a unit with no stock cannot be stagnant.
pub fn classify_all(facts: Vec<InventoryFact>, ctx: &ClassifyContext) -> ClassificationOutcome {
    let facts: Vec<InventoryFact> = facts
        .into_iter()
        .filter(|f| f.stock_amt > Decimal::ZERO)
        .collect();

    let low_stock = low_stock_styles(&facts, ctx.current_month_min_qty);
    let totals = category_totals(&facts);

    let mut excluded_styles: BTreeSet<String> = BTreeSet::new();
    let records = facts
        .into_iter()
        .map(|fact| {
            let category_total = totals
                .get(&fact.mid_category)
                .copied()
                .unwrap_or(Decimal::ZERO);
            let season_group = classify(&fact, category_total, &low_stock, ctx);
            if season_group == SeasonGroup::BelowMinQty {
                excluded_styles.insert(fact.style_code.clone());
            }
            ClassifiedRecord {
                ratio: sales_ratio(fact.sales_amt, category_total),
                status: season_group.status(),
                season_group,
                fact,
            }
        })
        .collect();

    ClassificationOutcome {
        records,
        excluded_styles: excluded_styles.into_iter().collect(),
    }
}
