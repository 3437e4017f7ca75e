//! Shared types and models for the Merchandising Analytics Platform
//!
//! This crate contains the domain data model for the stagnant-inventory
//! dashboard: raw stock/sales facts, the season-group classification
//! vocabulary, and the report structures the presentation layer consumes.

pub mod models;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
