//! Warehouse query layer for raw stock/sales facts
//!
//! One bulk query per (brand, month, dimension tab) joins the monthly
//! stock snapshot, the month's sales, and the prior month's stock
//! quantity into one row per dimension key. Classification never sees
//! SQL; it consumes the typed facts this service returns.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};

use shared::{
    previous_month, Brand, DimensionTab, ExcludedCategory, InventoryFact, MidCategory,
};

use crate::error::{AppError, AppResult};

/// Label used in the excluded-category audit when the product master
/// has no mid-category at all
const MISSING_CATEGORY_LABEL: &str = "(미분류)";

/// Fact fetch service backed by the merchandising warehouse
#[derive(Clone)]
pub struct FactService {
    db: PgPool,
}

/// Result of a fact fetch: typed facts plus the audit of rows whose
/// category label falls outside the canonical four. Those rows never
/// enter classification but are counted rather than silently dropped.
#[derive(Debug, Clone)]
pub struct FactFetch {
    pub facts: Vec<InventoryFact>,
    pub excluded_categories: Vec<ExcludedCategory>,
}

/// Raw warehouse row before category parsing
#[derive(Debug, FromRow)]
struct RawFactRow {
    dimension_key: String,
    prdt_cd: String,
    prdt_nm: Option<String>,
    color_cd: Option<String>,
    size_cd: Option<String>,
    season: Option<String>,
    mid_category: Option<String>,
    stock_qty: i64,
    stock_amt: Decimal,
    prev_stock_qty: i64,
    sales_qty: i64,
    sales_tag_amt: Decimal,
    fr_stock_qty: i64,
    fr_stock_amt: Decimal,
    fr_sales_amt: Decimal,
    or_stock_qty: i64,
    or_stock_amt: Decimal,
    or_sales_amt: Decimal,
}

/// Raw warehouse row for the year query (adds the month column)
#[derive(Debug, FromRow)]
struct RawYearFactRow {
    month: String,
    #[sqlx(flatten)]
    fact: RawFactRow,
}

/// Dimension-key SQL expressions per tab. `a` aliases the stock
/// snapshot, `s` the sales table.
fn stock_key_expr(tab: DimensionTab) -> &'static str {
    match tab {
        DimensionTab::Style => "a.prdt_cd",
        DimensionTab::Color => "a.prdt_cd || '_' || a.color_cd",
        DimensionTab::Size => "a.prdt_cd || '_' || a.size_cd",
        DimensionTab::ColorSize => "a.prdt_scs_cd",
    }
}

fn sales_key_expr(tab: DimensionTab) -> &'static str {
    match tab {
        DimensionTab::Style => "s.prdt_cd",
        DimensionTab::Color => "s.prdt_cd || '_' || s.color_cd",
        DimensionTab::Size => "s.prdt_cd || '_' || s.size_cd",
        DimensionTab::ColorSize => "s.prdt_scs_cd",
    }
}

impl FactService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Distinct sale months available for a brand, newest first
    pub async fn available_months(&self, brand: Brand) -> AppResult<Vec<String>> {
        let months = sqlx::query_scalar::<_, String>(
            r#"
            SELECT DISTINCT to_char(s.sale_dt, 'YYYYMM') AS sale_ym
            FROM chn.dw_sale s
            LEFT JOIN sap.mst_prdt p ON s.prdt_cd = p.prdt_cd
            WHERE s.brd_cd = $1
              AND p.prdt_hrrc1_nm = 'ACC'
              AND s.sale_dt >= DATE '2024-01-01'
            ORDER BY sale_ym DESC
            "#,
        )
        .bind(brand.code())
        .fetch_all(&self.db)
        .await?;

        Ok(months)
    }

    /// Fetch one month's facts at the requested dimension granularity.
    ///
    /// Rows with no remaining stock amount are filtered in SQL; rows
    /// with a category label outside the canonical four are returned
    /// only in the audit list.
    pub async fn fetch_facts(
        &self,
        brand: Brand,
        target_month: &str,
        dimension_tab: DimensionTab,
    ) -> AppResult<FactFetch> {
        let prev = previous_month(target_month).ok_or_else(|| {
            AppError::validation(
                "targetMonth",
                "Target month must be six digits (YYYYMM)",
                "기준월은 YYYYMM 6자리여야 합니다",
            )
        })?;

        let stock_key = stock_key_expr(dimension_tab);
        let sales_key = sales_key_expr(dimension_tab);

        let query = format!(
            r#"
            WITH sales_agg AS (
                SELECT
                    {sales_key} AS dimension_key,
                    SUM(s.tag_amt) AS sales_tag_amt,
                    CAST(SUM(s.qty) AS BIGINT) AS sales_qty,
                    SUM(CASE WHEN d.fr_or_cls = 'FR' THEN s.tag_amt ELSE 0 END) AS fr_sales_amt,
                    SUM(CASE WHEN d.fr_or_cls = 'FR' THEN 0 ELSE s.tag_amt END) AS or_sales_amt
                FROM chn.dw_sale s
                LEFT JOIN sap.mst_prdt p ON s.prdt_cd = p.prdt_cd
                LEFT JOIN chn.dw_shop_wh_detail d ON s.shop_id = d.oa_map_shop_id
                WHERE to_char(s.sale_dt, 'YYYYMM') = $2
                  AND s.brd_cd = $1
                  AND p.prdt_hrrc1_nm = 'ACC'
                  AND d.fr_or_cls IN ('FR', 'OR')
                GROUP BY {sales_key}
            ),
            stock_agg AS (
                SELECT
                    {stock_key} AS dimension_key,
                    MAX(a.prdt_cd) AS prdt_cd,
                    MAX(a.color_cd) AS color_cd,
                    MAX(a.size_cd) AS size_cd,
                    MAX(b.prdt_nm) AS prdt_nm,
                    MAX(a.sesn) AS season,
                    MAX(b.prdt_hrrc2_nm) AS mid_category,
                    SUM(a.stock_tag_amt_expected) AS stock_amt,
                    CAST(SUM(a.stock_qty_expected) AS BIGINT) AS stock_qty,
                    SUM(CASE WHEN c.fr_or_cls = 'FR' THEN a.stock_tag_amt_expected ELSE 0 END) AS fr_stock_amt,
                    CAST(SUM(CASE WHEN c.fr_or_cls = 'FR' THEN a.stock_qty_expected ELSE 0 END) AS BIGINT) AS fr_stock_qty,
                    SUM(CASE WHEN c.fr_or_cls = 'FR' THEN 0 ELSE a.stock_tag_amt_expected END) AS or_stock_amt,
                    CAST(SUM(CASE WHEN c.fr_or_cls = 'FR' THEN 0 ELSE a.stock_qty_expected END) AS BIGINT) AS or_stock_qty
                FROM chn.dw_stock_m a
                LEFT JOIN sap.mst_prdt b ON a.prdt_cd = b.prdt_cd
                LEFT JOIN chn.dw_shop_wh_detail c ON a.shop_id = c.oa_map_shop_id
                WHERE a.yymm = $2
                  AND a.brd_cd = $1
                  AND b.prdt_hrrc1_nm = 'ACC'
                GROUP BY {stock_key}
            ),
            prev_stock AS (
                SELECT
                    {stock_key} AS dimension_key,
                    CAST(SUM(a.stock_qty_expected) AS BIGINT) AS prev_stock_qty
                FROM chn.dw_stock_m a
                LEFT JOIN sap.mst_prdt b ON a.prdt_cd = b.prdt_cd
                WHERE a.yymm = $3
                  AND a.brd_cd = $1
                  AND b.prdt_hrrc1_nm = 'ACC'
                GROUP BY {stock_key}
            )
            SELECT
                st.dimension_key,
                COALESCE(st.prdt_cd, '') AS prdt_cd,
                COALESCE(st.prdt_nm, '') AS prdt_nm,
                st.color_cd,
                st.size_cd,
                st.season,
                st.mid_category,
                st.stock_qty,
                st.stock_amt,
                COALESCE(pv.prev_stock_qty, 0) AS prev_stock_qty,
                COALESCE(sa.sales_qty, 0) AS sales_qty,
                COALESCE(sa.sales_tag_amt, 0) AS sales_tag_amt,
                st.fr_stock_qty,
                st.fr_stock_amt,
                COALESCE(sa.fr_sales_amt, 0) AS fr_sales_amt,
                st.or_stock_qty,
                st.or_stock_amt,
                COALESCE(sa.or_sales_amt, 0) AS or_sales_amt
            FROM stock_agg st
            LEFT JOIN sales_agg sa ON st.dimension_key = sa.dimension_key
            LEFT JOIN prev_stock pv ON st.dimension_key = pv.dimension_key
            WHERE st.stock_amt > 0
            ORDER BY st.stock_amt DESC
            "#
        );

        let rows = sqlx::query_as::<_, RawFactRow>(&query)
            .bind(brand.code())
            .bind(target_month)
            .bind(&prev)
            .fetch_all(&self.db)
            .await?;

        Ok(convert_rows(rows))
    }

    /// Fetch a whole calendar year of facts, grouped by month, for the
    /// season trend chart
    pub async fn fetch_year_facts(
        &self,
        brand: Brand,
        year: i32,
        dimension_tab: DimensionTab,
    ) -> AppResult<BTreeMap<String, Vec<InventoryFact>>> {
        let stock_key = stock_key_expr(dimension_tab);
        let sales_key = sales_key_expr(dimension_tab);

        let query = format!(
            r#"
            WITH sales_agg AS (
                SELECT
                    to_char(s.sale_dt, 'YYYYMM') AS month,
                    {sales_key} AS dimension_key,
                    SUM(s.tag_amt) AS sales_tag_amt,
                    CAST(SUM(s.qty) AS BIGINT) AS sales_qty,
                    SUM(CASE WHEN d.fr_or_cls = 'FR' THEN s.tag_amt ELSE 0 END) AS fr_sales_amt,
                    SUM(CASE WHEN d.fr_or_cls = 'FR' THEN 0 ELSE s.tag_amt END) AS or_sales_amt
                FROM chn.dw_sale s
                LEFT JOIN sap.mst_prdt p ON s.prdt_cd = p.prdt_cd
                LEFT JOIN chn.dw_shop_wh_detail d ON s.shop_id = d.oa_map_shop_id
                WHERE to_char(s.sale_dt, 'YYYYMM') BETWEEN $2 AND $3
                  AND s.brd_cd = $1
                  AND p.prdt_hrrc1_nm = 'ACC'
                  AND d.fr_or_cls IN ('FR', 'OR')
                GROUP BY to_char(s.sale_dt, 'YYYYMM'), {sales_key}
            ),
            stock_agg AS (
                SELECT
                    a.yymm AS month,
                    {stock_key} AS dimension_key,
                    MAX(a.prdt_cd) AS prdt_cd,
                    MAX(a.color_cd) AS color_cd,
                    MAX(a.size_cd) AS size_cd,
                    MAX(b.prdt_nm) AS prdt_nm,
                    MAX(a.sesn) AS season,
                    MAX(b.prdt_hrrc2_nm) AS mid_category,
                    SUM(a.stock_tag_amt_expected) AS stock_amt,
                    CAST(SUM(a.stock_qty_expected) AS BIGINT) AS stock_qty,
                    SUM(CASE WHEN c.fr_or_cls = 'FR' THEN a.stock_tag_amt_expected ELSE 0 END) AS fr_stock_amt,
                    CAST(SUM(CASE WHEN c.fr_or_cls = 'FR' THEN a.stock_qty_expected ELSE 0 END) AS BIGINT) AS fr_stock_qty,
                    SUM(CASE WHEN c.fr_or_cls = 'FR' THEN 0 ELSE a.stock_tag_amt_expected END) AS or_stock_amt,
                    CAST(SUM(CASE WHEN c.fr_or_cls = 'FR' THEN 0 ELSE a.stock_qty_expected END) AS BIGINT) AS or_stock_qty
                FROM chn.dw_stock_m a
                LEFT JOIN sap.mst_prdt b ON a.prdt_cd = b.prdt_cd
                LEFT JOIN chn.dw_shop_wh_detail c ON a.shop_id = c.oa_map_shop_id
                WHERE a.yymm BETWEEN $2 AND $3
                  AND a.brd_cd = $1
                  AND b.prdt_hrrc1_nm = 'ACC'
                GROUP BY a.yymm, {stock_key}
            ),
            prev_stock AS (
                SELECT
                    a.yymm AS month,
                    {stock_key} AS dimension_key,
                    CAST(SUM(a.stock_qty_expected) AS BIGINT) AS prev_stock_qty
                FROM chn.dw_stock_m a
                LEFT JOIN sap.mst_prdt b ON a.prdt_cd = b.prdt_cd
                WHERE a.yymm BETWEEN $4 AND $5
                  AND a.brd_cd = $1
                  AND b.prdt_hrrc1_nm = 'ACC'
                GROUP BY a.yymm, {stock_key}
            )
            SELECT
                st.month,
                st.dimension_key,
                COALESCE(st.prdt_cd, '') AS prdt_cd,
                COALESCE(st.prdt_nm, '') AS prdt_nm,
                st.color_cd,
                st.size_cd,
                st.season,
                st.mid_category,
                st.stock_qty,
                st.stock_amt,
                COALESCE(pv.prev_stock_qty, 0) AS prev_stock_qty,
                COALESCE(sa.sales_qty, 0) AS sales_qty,
                COALESCE(sa.sales_tag_amt, 0) AS sales_tag_amt,
                st.fr_stock_qty,
                st.fr_stock_amt,
                COALESCE(sa.fr_sales_amt, 0) AS fr_sales_amt,
                st.or_stock_qty,
                st.or_stock_amt,
                COALESCE(sa.or_sales_amt, 0) AS or_sales_amt
            FROM stock_agg st
            LEFT JOIN sales_agg sa
                ON st.month = sa.month AND st.dimension_key = sa.dimension_key
            LEFT JOIN prev_stock pv
                ON pv.dimension_key = st.dimension_key
               AND pv.month = to_char(to_date(st.month, 'YYYYMM') - INTERVAL '1 month', 'YYYYMM')
            WHERE st.stock_amt > 0
            ORDER BY st.month, st.stock_amt DESC
            "#
        );

        let rows = sqlx::query_as::<_, RawYearFactRow>(&query)
            .bind(brand.code())
            .bind(format!("{year}01"))
            .bind(format!("{year}12"))
            .bind(format!("{}12", year - 1))
            .bind(format!("{year}11"))
            .fetch_all(&self.db)
            .await?;

        let mut by_month: BTreeMap<String, Vec<InventoryFact>> = BTreeMap::new();
        let mut excluded = 0u64;
        for row in rows {
            match convert_row(row.fact) {
                Ok(fact) => by_month.entry(row.month).or_default().push(fact),
                Err(_) => excluded += 1,
            }
        }
        if excluded > 0 {
            tracing::warn!(
                brand = brand.code(),
                year,
                excluded,
                "rows excluded from chart: category outside the canonical four"
            );
        }

        Ok(by_month)
    }
}

fn convert_row(row: RawFactRow) -> Result<InventoryFact, String> {
    let label = row
        .mid_category
        .as_deref()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .unwrap_or(MISSING_CATEGORY_LABEL);
    let mid_category =
        MidCategory::parse_label(label).ok_or_else(|| label.to_string())?;

    Ok(InventoryFact {
        dimension_key: row.dimension_key,
        style_code: row.prdt_cd,
        product_name: row.prdt_nm.unwrap_or_default(),
        color_code: row.color_cd,
        size_code: row.size_cd,
        season: row.season.unwrap_or_default(),
        mid_category,
        stock_qty: row.stock_qty,
        stock_amt: row.stock_amt,
        prev_stock_qty: row.prev_stock_qty,
        sales_qty: row.sales_qty,
        sales_amt: row.sales_tag_amt,
        fr_stock_qty: row.fr_stock_qty,
        fr_stock_amt: row.fr_stock_amt,
        fr_sales_amt: row.fr_sales_amt,
        or_stock_qty: row.or_stock_qty,
        or_stock_amt: row.or_stock_amt,
        or_sales_amt: row.or_sales_amt,
    })
}

fn convert_rows(rows: Vec<RawFactRow>) -> FactFetch {
    let mut facts = Vec::with_capacity(rows.len());
    let mut excluded: BTreeMap<String, i64> = BTreeMap::new();

    for row in rows {
        match convert_row(row) {
            Ok(fact) => facts.push(fact),
            Err(label) => *excluded.entry(label).or_insert(0) += 1,
        }
    }

    if !excluded.is_empty() {
        tracing::warn!(
            labels = ?excluded.keys().collect::<Vec<_>>(),
            rows = excluded.values().sum::<i64>(),
            "rows excluded: category outside the canonical four"
        );
    }

    FactFetch {
        facts,
        excluded_categories: excluded
            .into_iter()
            .map(|(label, row_count)| ExcludedCategory { label, row_count })
            .collect(),
    }
}
