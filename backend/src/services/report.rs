//! Detail/summary assembler
//!
//! Groups one classification run into the response the dashboard
//! renders: three summary cards (plus the below-min-qty card), five
//! detail tables, and the audit lists. The five detail tables
//! partition the classified set; their totals sum to the total card.

use rust_decimal::Decimal;

use shared::{
    Channel, ClassifiedRecord, DetailTableData, ExcludedCategory, ReportMeta, SeasonGroup,
    StagnantStockReport, TotalsRow,
};

use super::aggregation::{category_stock_totals, summary_box, PctBase};
use super::classification::ClassificationOutcome;

/// Everything the assembler needs besides the classified records
#[derive(Debug, Clone)]
pub struct ReportParams {
    pub meta: ReportMeta,
    pub available_months: Vec<String>,
    pub excluded_categories: Vec<ExcludedCategory>,
}

fn detail_table(
    title: &str,
    group: SeasonGroup,
    items: &[&ClassifiedRecord],
    channel: Channel,
) -> DetailTableData {
    let mut rows: Vec<ClassifiedRecord> = items
        .iter()
        .filter(|i| i.season_group == group)
        .map(|i| (*i).clone())
        .collect();
    rows.sort_by(|a, b| b.fact.stock_amt_in(channel).cmp(&a.fact.stock_amt_in(channel)));

    let total_row = TotalsRow {
        stock_qty: rows.iter().map(|i| i.fact.stock_qty_in(channel)).sum(),
        stock_amt: rows.iter().map(|i| i.fact.stock_amt_in(channel)).sum(),
        sales_tag_amt: rows.iter().map(|i| i.fact.sales_amt_in(channel)).sum(),
    };

    DetailTableData {
        title: title.to_string(),
        season_group: group,
        items: rows,
        total_row,
    }
}

/// Assemble the full report for one (brand, month, dimension, channel)
/// combination.
///
/// The channel filter hides items with no stock in that channel and
/// switches every sum to the per-channel fields, but never re-runs
/// classification: a unit's season group is always the one computed on
/// the unsplit totals.
pub fn build_report(outcome: ClassificationOutcome, params: ReportParams) -> StagnantStockReport {
    let channel = params.meta.channel;

    let visible: Vec<&ClassifiedRecord> = outcome
        .records
        .iter()
        .filter(|r| r.fact.stock_amt_in(channel) > Decimal::ZERO)
        .collect();

    let grand_total: Decimal = visible.iter().map(|r| r.fact.stock_amt_in(channel)).sum();

    let all: Vec<ClassifiedRecord> = visible.iter().map(|r| (*r).clone()).collect();
    let stagnant: Vec<ClassifiedRecord> = all
        .iter()
        .filter(|r| r.season_group == SeasonGroup::Stagnant)
        .cloned()
        .collect();
    let below_min: Vec<ClassifiedRecord> = all
        .iter()
        .filter(|r| r.season_group == SeasonGroup::BelowMinQty)
        .cloned()
        .collect();
    let normal: Vec<ClassifiedRecord> = all
        .iter()
        .filter(|r| {
            r.season_group != SeasonGroup::Stagnant && r.season_group != SeasonGroup::BelowMinQty
        })
        .cloned()
        .collect();

    // Complementary base for the stagnant/normal split: category
    // totals over exactly those two partitions, so the percentages
    // add up to 100 within each category
    let split_set: Vec<ClassifiedRecord> = stagnant
        .iter()
        .chain(normal.iter())
        .cloned()
        .collect();
    let split_totals = category_stock_totals(&split_set, channel);

    let grand_base = PctBase::GrandTotal(grand_total);
    let split_base = PctBase::PerCategory(&split_totals);

    let total_summary = summary_box("전체 재고", &all, channel, &grand_base);
    let stagnant_summary = summary_box("정체재고", &stagnant, channel, &split_base);
    let normal_summary = summary_box("정상재고", &normal, channel, &split_base);
    let below_min_qty_summary = summary_box("당월수량미달", &below_min, channel, &grand_base);

    let report = StagnantStockReport {
        available_months: params.available_months,
        total_summary,
        stagnant_summary,
        normal_summary,
        below_min_qty_summary,
        below_min_qty_detail: detail_table(
            "당월수량미달",
            SeasonGroup::BelowMinQty,
            &visible,
            channel,
        ),
        current_season_detail: detail_table(
            "당시즌 정상재고",
            SeasonGroup::CurrentSeason,
            &visible,
            channel,
        ),
        next_season_detail: detail_table(
            "차기시즌 정상재고",
            SeasonGroup::NextSeason,
            &visible,
            channel,
        ),
        past_season_detail: detail_table(
            "과시즌 정상재고",
            SeasonGroup::PastSeason,
            &visible,
            channel,
        ),
        stagnant_detail: detail_table("정체재고 - 전체", SeasonGroup::Stagnant, &visible, channel),
        excluded_styles: outcome.excluded_styles,
        excluded_categories: params.excluded_categories,
        meta: params.meta,
    };

    tracing::debug!(
        month = %report.meta.target_month,
        records = report.total_summary.total.item_count,
        stagnant = report.stagnant_summary.total.item_count,
        "assembled stagnant stock report"
    );

    report
}
