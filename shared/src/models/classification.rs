//! Classification vocabulary: mid-categories, season groups, stock status

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::fact::InventoryFact;

/// Product mid-categories tracked by the accessory dashboard.
///
/// The warehouse carries other hierarchy labels as well; those never
/// enter classification and are reported separately as excluded rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MidCategory {
    #[serde(rename = "신발")]
    Shoes,
    #[serde(rename = "모자")]
    Hats,
    #[serde(rename = "가방")]
    Bags,
    #[serde(rename = "기타")]
    Other,
}

impl MidCategory {
    pub const ALL: [MidCategory; 4] = [
        MidCategory::Shoes,
        MidCategory::Hats,
        MidCategory::Bags,
        MidCategory::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            MidCategory::Shoes => "신발",
            MidCategory::Hats => "모자",
            MidCategory::Bags => "가방",
            MidCategory::Other => "기타",
        }
    }

    /// Parse either the warehouse hierarchy name or the Korean display
    /// label. Returns `None` for anything outside the canonical four.
    pub fn parse_label(label: &str) -> Option<MidCategory> {
        match label.trim() {
            "Shoes" | "신발" => Some(MidCategory::Shoes),
            "Headwear" | "모자" => Some(MidCategory::Hats),
            "Bag" | "가방" => Some(MidCategory::Bags),
            "Acc_etc" | "기타" => Some(MidCategory::Other),
            _ => None,
        }
    }
}

/// Mutually exclusive buckets assigned by the classification engine.
///
/// The five-way split partitions every classified record; detail
/// tables and the season chart are keyed by this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SeasonGroup {
    #[serde(rename = "당월수량미달")]
    BelowMinQty,
    #[serde(rename = "당시즌")]
    CurrentSeason,
    #[serde(rename = "차기시즌")]
    NextSeason,
    #[serde(rename = "과시즌")]
    PastSeason,
    #[serde(rename = "정체재고")]
    Stagnant,
}

impl SeasonGroup {
    pub const ALL: [SeasonGroup; 5] = [
        SeasonGroup::BelowMinQty,
        SeasonGroup::CurrentSeason,
        SeasonGroup::NextSeason,
        SeasonGroup::PastSeason,
        SeasonGroup::Stagnant,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SeasonGroup::BelowMinQty => "당월수량미달",
            SeasonGroup::CurrentSeason => "당시즌",
            SeasonGroup::NextSeason => "차기시즌",
            SeasonGroup::PastSeason => "과시즌",
            SeasonGroup::Stagnant => "정체재고",
        }
    }

    pub fn status(&self) -> StockStatus {
        match self {
            SeasonGroup::Stagnant => StockStatus::Stagnant,
            _ => StockStatus::Normal,
        }
    }
}

/// Stagnant vs normal, derived from the season group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StockStatus {
    #[serde(rename = "정체재고")]
    Stagnant,
    #[serde(rename = "정상재고")]
    Normal,
}

impl StockStatus {
    pub fn label(&self) -> &'static str {
        match self {
            StockStatus::Stagnant => "정체재고",
            StockStatus::Normal => "정상재고",
        }
    }
}

/// An inventory fact with its assigned bucket and sales-to-category
/// ratio. One per dimension key; the classification run produces these.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifiedRecord {
    #[serde(flatten)]
    pub fact: InventoryFact,
    /// sales_tag_amt / mid-category total stock amount, 0 when the
    /// denominator is not positive
    pub ratio: Decimal,
    pub status: StockStatus,
    #[serde(rename = "seasonGroup")]
    pub season_group: SeasonGroup,
}
