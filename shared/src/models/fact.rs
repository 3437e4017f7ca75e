//! Raw stock/sales facts as returned by the warehouse query layer

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::classification::MidCategory;
use crate::types::Channel;

/// One inventory fact per dimension key per month.
///
/// Amounts are tag-price values. The FR and OR fields split the same
/// fact by channel (OR includes headquarters); the splits sum to the
/// unsplit totals. `prev_stock_qty` is the same dimension key's
/// quantity at the end of the prior month, 0 if it had no row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryFact {
    #[serde(rename = "dimensionKey")]
    pub dimension_key: String,
    /// Style code, the coarsest product identity. Several dimension
    /// keys share a style on the color/size tabs.
    #[serde(rename = "prdt_cd")]
    pub style_code: String,
    #[serde(rename = "prdt_nm")]
    pub product_name: String,
    #[serde(rename = "color_cd")]
    pub color_code: Option<String>,
    #[serde(rename = "size_cd")]
    pub size_code: Option<String>,
    /// Season code such as "25S"; may be empty
    pub season: String,
    #[serde(rename = "mid_category_kr")]
    pub mid_category: MidCategory,
    pub stock_qty: i64,
    pub stock_amt: Decimal,
    pub prev_stock_qty: i64,
    pub sales_qty: i64,
    #[serde(rename = "sales_tag_amt")]
    pub sales_amt: Decimal,
    pub fr_stock_qty: i64,
    pub fr_stock_amt: Decimal,
    pub fr_sales_amt: Decimal,
    pub or_stock_qty: i64,
    pub or_stock_amt: Decimal,
    pub or_sales_amt: Decimal,
}

impl InventoryFact {
    pub fn stock_amt_in(&self, channel: Channel) -> Decimal {
        match channel {
            Channel::Total => self.stock_amt,
            Channel::Fr => self.fr_stock_amt,
            Channel::Or => self.or_stock_amt,
        }
    }

    pub fn stock_qty_in(&self, channel: Channel) -> i64 {
        match channel {
            Channel::Total => self.stock_qty,
            Channel::Fr => self.fr_stock_qty,
            Channel::Or => self.or_stock_qty,
        }
    }

    pub fn sales_amt_in(&self, channel: Channel) -> Decimal {
        match channel {
            Channel::Total => self.sales_amt,
            Channel::Fr => self.fr_sales_amt,
            Channel::Or => self.or_sales_amt,
        }
    }
}
