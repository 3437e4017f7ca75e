//! Validation utilities for analytics request parameters
//!
//! All checks run before any warehouse fetch; a rejected parameter
//! aborts the whole request.

use rust_decimal::Decimal;

/// Validate a YYYYMM target month
pub fn validate_target_month(month: &str) -> Result<(), &'static str> {
    if month.len() != 6 || !month.chars().all(|c| c.is_ascii_digit()) {
        return Err("Target month must be six digits (YYYYMM)");
    }
    let mm: u32 = month[4..].parse().map_err(|_| "Invalid month")?;
    if !(1..=12).contains(&mm) {
        return Err("Month must be between 01 and 12");
    }
    Ok(())
}

/// Validate the stagnation threshold, given as a UI percentage
pub fn validate_threshold_pct(pct: Decimal) -> Result<(), &'static str> {
    if pct < Decimal::ZERO {
        return Err("Threshold percent cannot be negative");
    }
    if pct > Decimal::from(100) {
        return Err("Threshold percent cannot exceed 100");
    }
    Ok(())
}

/// Validate a quantity floor (minQty / currentMonthMinQty)
pub fn validate_quantity_floor(qty: i64) -> Result<(), &'static str> {
    if qty < 0 {
        return Err("Quantity floor cannot be negative");
    }
    Ok(())
}

/// Validate a two-digit season-year prefix such as "25"
pub fn validate_year_prefix(prefix: &str) -> Result<(), &'static str> {
    if prefix.len() != 2 || !prefix.chars().all(|c| c.is_ascii_digit()) {
        return Err("Year prefix must be two digits");
    }
    Ok(())
}

/// Validate a chart year (bounded to the range the warehouse carries)
pub fn validate_chart_year(year: i32) -> Result<(), &'static str> {
    if !(2000..=2100).contains(&year) {
        return Err("Year out of supported range");
    }
    Ok(())
}
