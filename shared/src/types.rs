//! Common types used across the platform

use chrono::Datelike;
use serde::{Deserialize, Serialize};

/// Brands handled by the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Brand {
    Mlb,
    MlbKids,
    Discovery,
}

impl Brand {
    /// Single-letter code used by the warehouse tables
    pub fn code(&self) -> &'static str {
        match self {
            Brand::Mlb => "M",
            Brand::MlbKids => "I",
            Brand::Discovery => "X",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Brand::Mlb => "MLB",
            Brand::MlbKids => "MLB KIDS",
            Brand::Discovery => "DISCOVERY",
        }
    }

    /// Parse either the warehouse code or the display name
    pub fn parse(s: &str) -> Option<Brand> {
        match s.trim().to_uppercase().as_str() {
            "M" | "MLB" => Some(Brand::Mlb),
            "I" | "MLB KIDS" | "MLB_KIDS" => Some(Brand::MlbKids),
            "X" | "DISCOVERY" => Some(Brand::Discovery),
            _ => None,
        }
    }
}

impl TryFrom<String> for Brand {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Brand::parse(&value).ok_or_else(|| format!("unknown brand: {value}"))
    }
}

impl From<Brand> for String {
    fn from(brand: Brand) -> String {
        brand.code().to_string()
    }
}

/// Granularity at which product units are keyed (the "dimension tab")
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum DimensionTab {
    #[default]
    #[serde(rename = "스타일")]
    Style,
    #[serde(rename = "컬러")]
    Color,
    #[serde(rename = "사이즈")]
    Size,
    #[serde(rename = "컬러&사이즈")]
    ColorSize,
}

impl DimensionTab {
    pub const ALL: [DimensionTab; 4] = [
        DimensionTab::Style,
        DimensionTab::Color,
        DimensionTab::Size,
        DimensionTab::ColorSize,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            DimensionTab::Style => "스타일",
            DimensionTab::Color => "컬러",
            DimensionTab::Size => "사이즈",
            DimensionTab::ColorSize => "컬러&사이즈",
        }
    }
}

/// Sales/stock channel split: storefront (FR) vs headquarters plus
/// other retail (OR), or both combined
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Channel {
    #[default]
    #[serde(rename = "전체")]
    Total,
    #[serde(rename = "FR")]
    Fr,
    #[serde(rename = "본사")]
    Or,
}

impl Channel {
    pub fn label(&self) -> &'static str {
        match self {
            Channel::Total => "전체",
            Channel::Fr => "FR",
            Channel::Or => "본사",
        }
    }
}

/// Category filter for the season trend chart: all accessories or a
/// single mid-category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ItemFilter {
    #[default]
    #[serde(rename = "ACC합계")]
    AccTotal,
    #[serde(rename = "신발")]
    Shoes,
    #[serde(rename = "모자")]
    Hats,
    #[serde(rename = "가방")]
    Bags,
    #[serde(rename = "기타")]
    Other,
}

impl ItemFilter {
    pub fn matches(&self, category: crate::models::MidCategory) -> bool {
        use crate::models::MidCategory;
        match self {
            ItemFilter::AccTotal => true,
            ItemFilter::Shoes => category == MidCategory::Shoes,
            ItemFilter::Hats => category == MidCategory::Hats,
            ItemFilter::Bags => category == MidCategory::Bags,
            ItemFilter::Other => category == MidCategory::Other,
        }
    }
}

/// Two-digit season-code prefixes for the current and next year,
/// e.g. "25" / "26" in 2025. Current/next-season stock is exempt from
/// the stagnation rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearWindow {
    pub current_prefix: String,
    pub next_prefix: String,
}

impl YearWindow {
    /// Window for an explicit calendar year
    pub fn for_year(year: i32) -> Self {
        Self {
            current_prefix: format!("{:02}", year.rem_euclid(100)),
            next_prefix: format!("{:02}", (year + 1).rem_euclid(100)),
        }
    }

    /// Window for the current calendar year
    pub fn from_clock() -> Self {
        Self::for_year(chrono::Utc::now().year())
    }
}

/// Compute the YYYYMM month preceding the given one
pub fn previous_month(yyyymm: &str) -> Option<String> {
    if yyyymm.len() != 6 || !yyyymm.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let year: i32 = yyyymm[..4].parse().ok()?;
    let month: u32 = yyyymm[4..].parse().ok()?;
    if !(1..=12).contains(&month) {
        return None;
    }
    Some(if month == 1 {
        format!("{}12", year - 1)
    } else {
        format!("{}{:02}", year, month - 1)
    })
}
