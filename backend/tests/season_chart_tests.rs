//! Season trend chart tests
//!
//! Tests for the monthly roll-up including:
//! - Twelve buckets per year, zeroed for missing months
//! - Each year classified with its own season window
//! - Item filter applied after classification

use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::str::FromStr;

use merch_analytics_backend::services::classification::ClassifyContext;
use merch_analytics_backend::services::season_chart::year_rollup;
use shared::{InventoryFact, ItemFilter, MidCategory, SeasonGroup, YearWindow};

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn fact(key: &str, style: &str, season: &str, category: MidCategory, stock_amt: &str) -> InventoryFact {
    let stock_amt = dec(stock_amt);
    InventoryFact {
        dimension_key: key.to_string(),
        style_code: style.to_string(),
        product_name: "TEST PRODUCT".to_string(),
        color_code: None,
        size_code: None,
        season: season.to_string(),
        mid_category: category,
        stock_qty: 100,
        stock_amt,
        prev_stock_qty: 100,
        sales_qty: 0,
        sales_amt: Decimal::ZERO,
        fr_stock_qty: 50,
        fr_stock_amt: stock_amt * dec("0.5"),
        fr_sales_amt: Decimal::ZERO,
        or_stock_qty: 50,
        or_stock_amt: stock_amt * dec("0.5"),
        or_sales_amt: Decimal::ZERO,
    }
}

fn ctx() -> ClassifyContext {
    ClassifyContext {
        year_window: YearWindow::for_year(2025),
        threshold_ratio: dec("0.0001"),
        min_qty: 10,
        current_month_min_qty: 10,
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn always_twelve_months_in_order() {
        let rollup = year_rollup(2025, BTreeMap::new(), &ctx(), ItemFilter::AccTotal);
        assert_eq!(rollup.len(), 12);
        assert_eq!(rollup[0].month, "202501");
        assert_eq!(rollup[11].month, "202512");
        assert!(rollup.iter().all(|m| m.total_stock_amt == Decimal::ZERO));
    }

    #[test]
    fn months_classify_into_buckets() {
        let mut by_month = BTreeMap::new();
        by_month.insert(
            "202503".to_string(),
            vec![
                fact("K1", "ST001", "25S", MidCategory::Hats, "400"),
                fact("K2", "ST002", "23S", MidCategory::Hats, "600"),
            ],
        );

        let rollup = year_rollup(2025, by_month, &ctx(), ItemFilter::AccTotal);
        let march = &rollup[2];
        assert_eq!(march.bucket(SeasonGroup::CurrentSeason).stock_amt, dec("400"));
        // No sales against a 1000 hat total: stagnant
        assert_eq!(march.bucket(SeasonGroup::Stagnant).stock_amt, dec("600"));
        assert_eq!(march.total_stock_amt, dec("1000"));
    }

    /// The same stock reads as current in 2025 and as stagnant in 2026:
    /// each year gets its own season window
    #[test]
    fn each_year_uses_its_own_window() {
        let facts = vec![fact("K1", "ST001", "25S", MidCategory::Hats, "500")];
        let mut y2025 = BTreeMap::new();
        y2025.insert("202506".to_string(), facts.clone());
        let mut y2026 = BTreeMap::new();
        y2026.insert("202606".to_string(), facts);

        let c = ctx();
        let r2025 = year_rollup(2025, y2025, &c, ItemFilter::AccTotal);
        let r2026 = year_rollup(2026, y2026, &c, ItemFilter::AccTotal);

        assert_eq!(
            r2025[5].bucket(SeasonGroup::CurrentSeason).stock_amt,
            dec("500")
        );
        assert_eq!(
            r2026[5].bucket(SeasonGroup::CurrentSeason).stock_amt,
            Decimal::ZERO
        );
        assert_eq!(r2026[5].bucket(SeasonGroup::Stagnant).stock_amt, dec("500"));
    }

    #[test]
    fn item_filter_trims_the_output() {
        let mut by_month = BTreeMap::new();
        by_month.insert(
            "202501".to_string(),
            vec![
                fact("K1", "ST001", "25S", MidCategory::Hats, "400"),
                fact("K2", "ST002", "25S", MidCategory::Shoes, "600"),
            ],
        );

        let rollup = year_rollup(2025, by_month, &ctx(), ItemFilter::Hats);
        let january = &rollup[0];
        assert_eq!(january.total_stock_amt, dec("400"));
        assert_eq!(
            january.bucket(SeasonGroup::CurrentSeason).stock_amt,
            dec("400")
        );
    }

    /// The quantity floor still sums the style across categories even
    /// when the filter later hides part of the style
    #[test]
    fn item_filter_applies_after_classification() {
        let mut hat = fact("ST001_CAP", "ST001", "25S", MidCategory::Hats, "100");
        hat.stock_qty = 5;
        let mut shoe = fact("ST001_SHOE", "ST001", "25S", MidCategory::Shoes, "100");
        shoe.stock_qty = 6;

        let mut by_month = BTreeMap::new();
        by_month.insert("202501".to_string(), vec![hat, shoe]);

        // Style total 11 clears the floor of 10, so neither unit is
        // below-min even though the filter only shows the shoe half
        let rollup = year_rollup(2025, by_month, &ctx(), ItemFilter::Shoes);
        let january = &rollup[0];
        assert_eq!(
            january.bucket(SeasonGroup::BelowMinQty).stock_amt,
            Decimal::ZERO
        );
        assert_eq!(
            january.bucket(SeasonGroup::CurrentSeason).stock_amt,
            dec("100")
        );
        assert_eq!(january.total_stock_amt, dec("100"));
    }
}
