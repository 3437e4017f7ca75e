//! HTTP handler for the inventory season trend chart

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::Datelike;
use rust_decimal::Decimal;
use serde::Deserialize;

use shared::{
    validation, Brand, DimensionTab, ItemFilter, SeasonChartMeta, SeasonChartReport, YearWindow,
};

use crate::error::{AppError, AppResult};
use crate::services::classification::ClassifyContext;
use crate::services::season_chart::year_rollup;
use crate::services::FactService;
use crate::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonChartQuery {
    pub brand: Option<String>,
    pub year: Option<i32>,
    pub dimension_tab: Option<DimensionTab>,
    pub item_filter: Option<ItemFilter>,
    pub threshold_pct: Option<Decimal>,
    pub min_qty: Option<i64>,
    pub current_month_min_qty: Option<i64>,
}

/// Two-year monthly roll-up of stock by season group.
///
/// Each year is classified with its own season window, so a "25"
/// season counts as current throughout 2025 and as past throughout
/// 2026.
pub async fn get_inventory_season_chart(
    State(state): State<AppState>,
    Query(query): Query<SeasonChartQuery>,
) -> AppResult<Json<SeasonChartReport>> {
    let raw_brand = query.brand.as_deref().ok_or_else(|| {
        AppError::validation("brand", "Brand is required", "브랜드는 필수 파라미터입니다")
    })?;
    let brand = Brand::parse(raw_brand).ok_or_else(|| {
        AppError::validation(
            "brand",
            format!("Unknown brand: {raw_brand}"),
            format!("알 수 없는 브랜드입니다: {raw_brand}"),
        )
    })?;
    let dimension_tab = query.dimension_tab.unwrap_or_default();
    let item_filter = query.item_filter.unwrap_or_default();

    let curr_year = query.year.unwrap_or_else(|| chrono::Utc::now().year());
    validation::validate_chart_year(curr_year)
        .map_err(|msg| AppError::validation("year", msg, "조회 연도가 범위를 벗어났습니다"))?;
    let prev_year = curr_year - 1;

    let defaults = &state.config.analysis;
    let threshold_pct = query.threshold_pct.unwrap_or(defaults.threshold_pct);
    let min_qty = query.min_qty.unwrap_or(defaults.min_qty);
    let current_month_min_qty = query
        .current_month_min_qty
        .unwrap_or(defaults.current_month_min_qty);

    validation::validate_threshold_pct(threshold_pct)
        .map_err(|msg| AppError::validation("thresholdPct", msg, "임계값이 올바르지 않습니다"))?;
    validation::validate_quantity_floor(min_qty)
        .map_err(|msg| AppError::validation("minQty", msg, "최소 수량이 올바르지 않습니다"))?;
    validation::validate_quantity_floor(current_month_min_qty).map_err(|msg| {
        AppError::validation("currentMonthMinQty", msg, "최소 수량이 올바르지 않습니다")
    })?;

    let service = FactService::new(state.db.clone());

    let (prev_facts, curr_facts) = tokio::try_join!(
        service.fetch_year_facts(brand, prev_year, dimension_tab),
        service.fetch_year_facts(brand, curr_year, dimension_tab),
    )?;

    // year_rollup swaps in each year's own window; the one set here is
    // only the starting value
    let ctx = ClassifyContext {
        year_window: YearWindow::for_year(curr_year),
        threshold_ratio: threshold_pct / Decimal::from(100),
        min_qty,
        current_month_min_qty,
    };

    let report = SeasonChartReport {
        prev_year: year_rollup(prev_year, prev_facts, &ctx, item_filter),
        curr_year: year_rollup(curr_year, curr_facts, &ctx, item_filter),
        meta: SeasonChartMeta {
            brand: brand.code().to_string(),
            dimension_tab,
            threshold_pct,
            min_qty,
            current_month_min_qty,
        },
    };

    Ok(Json(report))
}
