//! HTTP handler for the stagnant-stock analysis endpoint

use axum::{
    extract::{Query, State},
    Json,
};
use rust_decimal::Decimal;
use serde::Deserialize;

use shared::{
    validation, Brand, Channel, DimensionTab, ReportMeta, StagnantStockReport, YearWindow,
};

use crate::error::{AppError, AppResult};
use crate::services::classification::{classify_all, ClassifyContext};
use crate::services::report::{build_report, ReportParams};
use crate::services::FactService;
use crate::AppState;

/// Query parameters for the stagnant-stock report. `brand` and
/// `targetMonth` are required; the analysis knobs fall back to the
/// configured defaults. All fields stay `Option` so a missing value
/// yields the bilingual validation error instead of an extractor
/// rejection.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StagnantStockQuery {
    pub brand: Option<String>,
    pub target_month: Option<String>,
    pub dimension_tab: Option<DimensionTab>,
    pub channel: Option<Channel>,
    pub threshold_pct: Option<Decimal>,
    pub min_qty: Option<i64>,
    pub current_month_min_qty: Option<i64>,
    pub current_year_prefix: Option<String>,
    pub next_year_prefix: Option<String>,
}

/// Run the full stagnant-stock analysis for one brand/month/dimension
pub async fn get_stagnant_stock(
    State(state): State<AppState>,
    Query(query): Query<StagnantStockQuery>,
) -> AppResult<Json<StagnantStockReport>> {
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
    let target_month = query.target_month.ok_or_else(|| {
        AppError::validation(
            "targetMonth",
            "Target month is required",
            "기준월은 필수 파라미터입니다",
        )
    })?;
    validation::validate_target_month(&target_month).map_err(|msg| {
        AppError::validation("targetMonth", msg, "기준월은 YYYYMM 6자리여야 합니다")
    })?;

    let dimension_tab = query.dimension_tab.unwrap_or_default();
    let channel = query.channel.unwrap_or_default();

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

    let mut year_window = YearWindow::from_clock();
    if let Some(prefix) = query.current_year_prefix {
        validation::validate_year_prefix(&prefix).map_err(|msg| {
            AppError::validation("currentYearPrefix", msg, "시즌 연도 코드는 2자리 숫자입니다")
        })?;
        year_window.current_prefix = prefix;
    }
    if let Some(prefix) = query.next_year_prefix {
        validation::validate_year_prefix(&prefix).map_err(|msg| {
            AppError::validation("nextYearPrefix", msg, "시즌 연도 코드는 2자리 숫자입니다")
        })?;
        year_window.next_prefix = prefix;
    }

    let service = FactService::new(state.db.clone());

    let (available_months, fetch) = tokio::try_join!(
        service.available_months(brand),
        service.fetch_facts(brand, &target_month, dimension_tab),
    )?;

    let ctx = ClassifyContext {
        year_window: year_window.clone(),
        threshold_ratio: threshold_pct / Decimal::from(100),
        min_qty,
        current_month_min_qty,
    };

    let outcome = classify_all(fetch.facts, &ctx);

    let report = build_report(
        outcome,
        ReportParams {
            meta: ReportMeta {
                brand: brand.code().to_string(),
                target_month,
                dimension_tab,
                channel,
                threshold_pct,
                min_qty,
                current_month_min_qty,
                current_year_prefix: year_window.current_prefix,
                next_year_prefix: year_window.next_prefix,
            },
            available_months,
            excluded_categories: fetch.excluded_categories,
        },
    );

    Ok(Json(report))
}
