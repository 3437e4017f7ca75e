//! Report assembly tests
//!
//! Tests for the dashboard report including:
//! - Detail tables partitioning the classified set
//! - Channel scoping that never re-runs classification
//! - Complementary stagnant/normal percentages
//! - Audit lists and parameter echo

use rust_decimal::Decimal;
use std::str::FromStr;

use merch_analytics_backend::services::classification::{classify_all, ClassifyContext};
use merch_analytics_backend::services::report::{build_report, ReportParams};
use shared::{
    Channel, DimensionTab, ExcludedCategory, InventoryFact, MidCategory, ReportMeta, SeasonGroup,
    StagnantStockReport, SummaryCategory, YearWindow,
};

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn fact(
    key: &str,
    style: &str,
    season: &str,
    category: MidCategory,
    stock_amt: &str,
    sales_amt: &str,
) -> InventoryFact {
    let stock_amt = dec(stock_amt);
    let sales_amt = dec(sales_amt);
    let fr_stock_amt = stock_amt * dec("0.5");
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
        sales_qty: 10,
        sales_amt,
        fr_stock_qty: 50,
        fr_stock_amt,
        fr_sales_amt: sales_amt * dec("0.5"),
        or_stock_qty: 50,
        or_stock_amt: stock_amt - fr_stock_amt,
        or_sales_amt: sales_amt * dec("0.5"),
    }
}

fn ctx() -> ClassifyContext {
    ClassifyContext {
        year_window: YearWindow {
            current_prefix: "25".to_string(),
            next_prefix: "26".to_string(),
        },
        threshold_ratio: dec("0.0001"),
        min_qty: 10,
        current_month_min_qty: 10,
    }
}

fn params(channel: Channel) -> ReportParams {
    ReportParams {
        meta: ReportMeta {
            brand: "M".to_string(),
            target_month: "202507".to_string(),
            dimension_tab: DimensionTab::Style,
            channel,
            threshold_pct: dec("0.01"),
            min_qty: 10,
            current_month_min_qty: 10,
            current_year_prefix: "25".to_string(),
            next_year_prefix: "26".to_string(),
        },
        available_months: vec!["202507".to_string(), "202506".to_string()],
        excluded_categories: vec![ExcludedCategory {
            label: "(미분류)".to_string(),
            row_count: 3,
        }],
    }
}

/// One fact per bucket: below-min (low style qty), current, next,
/// past (low prior balance), stagnant (no sales)
fn mixed_facts() -> Vec<InventoryFact> {
    let mut below = fact("K1", "ST_LOW", "25S", MidCategory::Shoes, "500", "50");
    below.stock_qty = 5;
    let mut past = fact("K4", "ST004", "24F", MidCategory::Bags, "200", "9999");
    past.prev_stock_qty = 3;
    vec![
        below,
        fact("K2", "ST002", "25F", MidCategory::Hats, "400", "40"),
        fact("K3", "ST003", "26S", MidCategory::Hats, "300", "30"),
        past,
        fact("K5", "ST005", "23S", MidCategory::Other, "100", "0"),
    ]
}

fn build(channel: Channel) -> StagnantStockReport {
    build_report(classify_all(mixed_facts(), &ctx()), params(channel))
}

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn detail_tables_partition_the_classified_set() {
        let report = build(Channel::Total);
        let tables = [
            (&report.below_min_qty_detail, SeasonGroup::BelowMinQty),
            (&report.current_season_detail, SeasonGroup::CurrentSeason),
            (&report.next_season_detail, SeasonGroup::NextSeason),
            (&report.past_season_detail, SeasonGroup::PastSeason),
            (&report.stagnant_detail, SeasonGroup::Stagnant),
        ];

        for (table, group) in &tables {
            assert_eq!(table.items.len(), 1);
            assert!(table.items.iter().all(|i| i.season_group == *group));
            assert_eq!(table.season_group, *group);
        }

        let detail_amt: Decimal = tables.iter().map(|(t, _)| t.total_row.stock_amt).sum();
        assert_eq!(detail_amt, report.total_summary.total.stock_amt);
        assert_eq!(detail_amt, dec("1500"));

        let detail_count: usize = tables.iter().map(|(t, _)| t.items.len()).sum();
        assert_eq!(detail_count as i64, report.total_summary.total.item_count);
    }

    #[test]
    fn detail_rows_sorted_by_stock_amount_descending() {
        let mut facts = mixed_facts();
        facts.push(fact("K6", "ST006", "23F", MidCategory::Other, "900", "0"));
        let report = build_report(classify_all(facts, &ctx()), params(Channel::Total));

        let amounts: Vec<Decimal> = report
            .stagnant_detail
            .items
            .iter()
            .map(|i| i.fact.stock_amt)
            .collect();
        assert_eq!(amounts, vec![dec("900"), dec("100")]);
        assert_eq!(report.stagnant_detail.total_row.stock_amt, dec("1000"));
    }

    #[test]
    fn summary_boxes_carry_expected_titles() {
        let report = build(Channel::Total);
        assert_eq!(report.total_summary.title, "전체 재고");
        assert_eq!(report.stagnant_summary.title, "정체재고");
        assert_eq!(report.normal_summary.title, "정상재고");
        assert_eq!(report.below_min_qty_summary.title, "당월수량미달");
        assert_eq!(report.stagnant_detail.title, "정체재고 - 전체");
    }

    /// Stagnant and normal share a per-category base over exactly the
    /// two partitions, so their percentages sum to 100
    #[test]
    fn stagnant_and_normal_percentages_are_complementary() {
        let facts = vec![
            fact("K1", "ST001", "23S", MidCategory::Other, "100", "0"),
            fact("K2", "ST002", "24F", MidCategory::Other, "300", "9999"),
        ];
        let report = build_report(classify_all(facts, &ctx()), params(Channel::Total));

        let pct = |boxed: &shared::SummaryBoxData| {
            boxed
                .categories
                .iter()
                .find(|c| c.category == SummaryCategory::Other)
                .unwrap()
                .stock_amt_pct
        };

        assert_eq!(pct(&report.stagnant_summary), dec("25"));
        assert_eq!(pct(&report.normal_summary), dec("75"));
    }

    /// The below-min box divides by the grand total, not by the split
    #[test]
    fn below_min_box_uses_grand_total_base() {
        let report = build(Channel::Total);
        // 500 of 1500 total
        let expected = dec("500") / dec("1500") * dec("100");
        assert_eq!(report.below_min_qty_summary.total.stock_amt_pct, expected);
    }

    #[test]
    fn channel_filter_hides_items_without_channel_stock() {
        let mut facts = mixed_facts();
        // Stagnant unit held entirely by headquarters
        facts[4].fr_stock_amt = Decimal::ZERO;
        facts[4].or_stock_amt = facts[4].stock_amt;

        let outcome = classify_all(facts, &ctx());
        let total = build_report(outcome.clone(), params(Channel::Total));
        let fr = build_report(outcome, params(Channel::Fr));

        assert_eq!(total.stagnant_detail.items.len(), 1);
        assert!(fr.stagnant_detail.items.is_empty());
        // The other four units keep their buckets in the FR view
        assert_eq!(fr.total_summary.total.item_count, 4);
        assert_eq!(fr.current_season_detail.items.len(), 1);
    }

    /// Channel scoping switches every sum to the channel fields but the
    /// season group stays the one computed on the unsplit totals
    #[test]
    fn channel_view_keeps_unsplit_classification() {
        let report = build(Channel::Fr);
        assert_eq!(report.total_summary.total.stock_amt, dec("750.0"));
        assert_eq!(
            report.stagnant_detail.items[0].season_group,
            SeasonGroup::Stagnant
        );
        assert_eq!(report.stagnant_detail.total_row.stock_amt, dec("50.0"));
    }

    #[test]
    fn audit_lists_and_meta_are_passed_through() {
        let report = build(Channel::Total);
        assert_eq!(report.excluded_styles, vec!["ST_LOW".to_string()]);
        assert_eq!(report.excluded_categories.len(), 1);
        assert_eq!(report.excluded_categories[0].label, "(미분류)");
        assert_eq!(report.meta.target_month, "202507");
        assert_eq!(report.meta.threshold_pct, dec("0.01"));
        assert_eq!(report.available_months.len(), 2);
    }

    #[test]
    fn empty_month_yields_empty_report() {
        let report = build_report(classify_all(vec![], &ctx()), params(Channel::Total));
        assert_eq!(report.total_summary.total.stock_amt, Decimal::ZERO);
        assert!(report.stagnant_detail.items.is_empty());
        assert!(report.excluded_styles.is_empty());
    }
}
