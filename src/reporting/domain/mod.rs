//! Domain model for spend input trees and aggregated report values.

mod spend;
mod totals;

pub use spend::{ApplicationSpend, BillingCode, EnvironmentSpend, PortfolioSpend, SpendBucket};
pub use totals::{
    ApplicationTotals, ClinTypeSpend, ClinTypeTotals, EnvironmentTotals, MonthlyTotals,
};
