//! HTTP request handlers

pub mod health;
pub mod season_chart;
pub mod stagnant_stock;

pub use health::*;
pub use season_chart::*;
pub use stagnant_stock::*;
