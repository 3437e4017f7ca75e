//! Business logic for the Merchandising Analytics Platform
//!
//! `facts` is the only module that touches the warehouse; the
//! classification, aggregation, report and season-chart modules are
//! pure functions of their inputs.

pub mod aggregation;
pub mod classification;
pub mod facts;
pub mod report;
pub mod season_chart;

pub use facts::FactService;
