//! Report structures consumed by the dashboard presentation layer

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::classification::{ClassifiedRecord, MidCategory, SeasonGroup};
use crate::types::{Channel, DimensionTab};

/// Row key of a summary box: the four mid-categories plus the "all" row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SummaryCategory {
    #[serde(rename = "전체")]
    All,
    #[serde(rename = "신발")]
    Shoes,
    #[serde(rename = "모자")]
    Hats,
    #[serde(rename = "가방")]
    Bags,
    #[serde(rename = "기타")]
    Other,
}

impl SummaryCategory {
    pub const ALL: [SummaryCategory; 5] = [
        SummaryCategory::All,
        SummaryCategory::Shoes,
        SummaryCategory::Hats,
        SummaryCategory::Bags,
        SummaryCategory::Other,
    ];

    /// The mid-category this row filters on, `None` for the "all" row
    pub fn mid_category(&self) -> Option<MidCategory> {
        match self {
            SummaryCategory::All => None,
            SummaryCategory::Shoes => Some(MidCategory::Shoes),
            SummaryCategory::Hats => Some(MidCategory::Hats),
            SummaryCategory::Bags => Some(MidCategory::Bags),
            SummaryCategory::Other => Some(MidCategory::Other),
        }
    }
}

impl From<MidCategory> for SummaryCategory {
    fn from(cat: MidCategory) -> Self {
        match cat {
            MidCategory::Shoes => SummaryCategory::Shoes,
            MidCategory::Hats => SummaryCategory::Hats,
            MidCategory::Bags => SummaryCategory::Bags,
            MidCategory::Other => SummaryCategory::Other,
        }
    }
}

/// Per-category aggregate for a summary box
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategorySummary {
    pub category: SummaryCategory,
    pub stock_amt: Decimal,
    pub stock_amt_pct: Decimal,
    pub stock_qty: i64,
    /// Distinct dimension keys with stock in the active channel
    pub item_count: i64,
    pub sales_tag_amt: Decimal,
}

/// One of the three/four summary cards at the top of the dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryBoxData {
    pub title: String,
    pub categories: Vec<CategorySummary>,
    pub total: CategorySummary,
}

/// Totals row shown under a detail table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TotalsRow {
    pub stock_qty: i64,
    pub stock_amt: Decimal,
    pub sales_tag_amt: Decimal,
}

/// Full record list for one season group, sorted by stock amount
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailTableData {
    pub title: String,
    #[serde(rename = "seasonGroup")]
    pub season_group: SeasonGroup,
    pub items: Vec<ClassifiedRecord>,
    #[serde(rename = "totalRow")]
    pub total_row: TotalsRow,
}

/// Audit entry for warehouse category labels outside the canonical four
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExcludedCategory {
    pub label: String,
    pub row_count: i64,
}

/// Request parameters echoed back with the report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMeta {
    pub brand: String,
    #[serde(rename = "targetMonth")]
    pub target_month: String,
    #[serde(rename = "dimensionTab")]
    pub dimension_tab: DimensionTab,
    pub channel: Channel,
    #[serde(rename = "thresholdPct")]
    pub threshold_pct: Decimal,
    #[serde(rename = "minQty")]
    pub min_qty: i64,
    #[serde(rename = "currentMonthMinQty")]
    pub current_month_min_qty: i64,
    #[serde(rename = "currentYearPrefix")]
    pub current_year_prefix: String,
    #[serde(rename = "nextYearPrefix")]
    pub next_year_prefix: String,
}

/// Complete stagnant-stock analysis for one brand/month/dimension
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StagnantStockReport {
    #[serde(rename = "availableMonths")]
    pub available_months: Vec<String>,

    #[serde(rename = "totalSummary")]
    pub total_summary: SummaryBoxData,
    #[serde(rename = "stagnantSummary")]
    pub stagnant_summary: SummaryBoxData,
    #[serde(rename = "normalSummary")]
    pub normal_summary: SummaryBoxData,
    #[serde(rename = "belowMinQtySummary")]
    pub below_min_qty_summary: SummaryBoxData,

    #[serde(rename = "belowMinQtyDetail")]
    pub below_min_qty_detail: DetailTableData,
    #[serde(rename = "currentSeasonDetail")]
    pub current_season_detail: DetailTableData,
    #[serde(rename = "nextSeasonDetail")]
    pub next_season_detail: DetailTableData,
    #[serde(rename = "pastSeasonDetail")]
    pub past_season_detail: DetailTableData,
    #[serde(rename = "stagnantDetail")]
    pub stagnant_detail: DetailTableData,

    /// Styles removed by the below-min-qty override, for
    /// cross-referencing in other dimension-tab views
    #[serde(rename = "excludedStyles")]
    pub excluded_styles: Vec<String>,
    #[serde(rename = "excludedCategories")]
    pub excluded_categories: Vec<ExcludedCategory>,

    pub meta: ReportMeta,
}

/// Stock/sales amounts for one season group in one month
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeasonBucket {
    pub stock_amt: Decimal,
    pub sales_amt: Decimal,
}

/// Monthly season-group roll-up for the trend chart
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthSeasonBuckets {
    /// YYYYMM
    pub month: String,
    #[serde(rename = "당월수량미달")]
    pub below_min_qty: SeasonBucket,
    #[serde(rename = "과시즌")]
    pub past_season: SeasonBucket,
    #[serde(rename = "당시즌")]
    pub current_season: SeasonBucket,
    #[serde(rename = "차기시즌")]
    pub next_season: SeasonBucket,
    #[serde(rename = "정체재고")]
    pub stagnant: SeasonBucket,
    pub total_stock_amt: Decimal,
    pub total_sales_amt: Decimal,
}

impl MonthSeasonBuckets {
    pub fn empty(month: String) -> Self {
        Self {
            month,
            below_min_qty: SeasonBucket::default(),
            past_season: SeasonBucket::default(),
            current_season: SeasonBucket::default(),
            next_season: SeasonBucket::default(),
            stagnant: SeasonBucket::default(),
            total_stock_amt: Decimal::ZERO,
            total_sales_amt: Decimal::ZERO,
        }
    }

    pub fn bucket_mut(&mut self, group: SeasonGroup) -> &mut SeasonBucket {
        match group {
            SeasonGroup::BelowMinQty => &mut self.below_min_qty,
            SeasonGroup::PastSeason => &mut self.past_season,
            SeasonGroup::CurrentSeason => &mut self.current_season,
            SeasonGroup::NextSeason => &mut self.next_season,
            SeasonGroup::Stagnant => &mut self.stagnant,
        }
    }

    pub fn bucket(&self, group: SeasonGroup) -> &SeasonBucket {
        match group {
            SeasonGroup::BelowMinQty => &self.below_min_qty,
            SeasonGroup::PastSeason => &self.past_season,
            SeasonGroup::CurrentSeason => &self.current_season,
            SeasonGroup::NextSeason => &self.next_season,
            SeasonGroup::Stagnant => &self.stagnant,
        }
    }
}

/// Parameters echoed back with the season chart
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeasonChartMeta {
    pub brand: String,
    #[serde(rename = "dimensionTab")]
    pub dimension_tab: DimensionTab,
    #[serde(rename = "thresholdPct")]
    pub threshold_pct: Decimal,
    #[serde(rename = "minQty")]
    pub min_qty: i64,
    #[serde(rename = "currentMonthMinQty")]
    pub current_month_min_qty: i64,
}

/// Two years of monthly season-group roll-ups
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeasonChartReport {
    #[serde(rename = "prevYear")]
    pub prev_year: Vec<MonthSeasonBuckets>,
    #[serde(rename = "currYear")]
    pub curr_year: Vec<MonthSeasonBuckets>,
    pub meta: SeasonChartMeta,
}
