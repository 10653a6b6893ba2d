//! Report services: pure spend aggregation and the dashboard report facade.

mod aggregation;
mod reports;

pub use aggregation::{
    application_clin_type_totals, application_monthly_totals, environment_clin_type_totals,
    environment_monthly_totals, portfolio_clin_type_totals, portfolio_monthly_totals,
};
pub use reports::{ReportService, ReportingError, ReportingResult};
