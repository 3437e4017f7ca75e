//! Domain models for the Merchandising Analytics Platform

mod classification;
mod fact;
mod report;

pub use classification::*;
pub use fact::*;
pub use report::*;
