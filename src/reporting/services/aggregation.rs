//! Rollups of spend trees into monthly and per-billing-code totals.

use super::reports::{ReportingError, ReportingResult};
use crate::reporting::domain::{
    ApplicationSpend, ApplicationTotals, ClinTypeTotals, EnvironmentSpend, EnvironmentTotals,
    MonthlyTotals, PortfolioSpend, SpendBucket,
};
use rust_decimal::Decimal;
use std::collections::BTreeSet;
use tracing::warn;

/// Sums each bucket of `environment`. Missing buckets are zero and buckets
/// outside the monthly three are left out.
#[must_use]
pub fn environment_monthly_totals(environment: &EnvironmentSpend) -> EnvironmentTotals {
    let bucket_sum = |bucket: &SpendBucket| -> Decimal {
        environment
            .bucket(bucket)
            .map(|codes| codes.values().copied().sum())
            .unwrap_or_default()
    };

    EnvironmentTotals {
        name: environment.name().to_owned(),
        totals: MonthlyTotals {
            this_month: bucket_sum(&SpendBucket::ThisMonth),
            last_month: bucket_sum(&SpendBucket::LastMonth),
            total: bucket_sum(&SpendBucket::Total),
        },
    }
}

/// Totals each environment of `application`, ordered by environment name,
/// and sums them.
#[must_use]
pub fn application_monthly_totals(application: &ApplicationSpend) -> ApplicationTotals {
    let mut environments: Vec<EnvironmentTotals> = application
        .environments()
        .iter()
        .map(environment_monthly_totals)
        .collect();
    environments.sort_by(|left, right| left.name.cmp(&right.name));
    let totals = environments.iter().map(|environment| environment.totals).sum();

    ApplicationTotals {
        name: application.name().to_owned(),
        totals,
        environments,
    }
}

/// Totals each application of `portfolio`, ordered by application name.
#[must_use]
pub fn portfolio_monthly_totals(portfolio: &PortfolioSpend) -> Vec<ApplicationTotals> {
    let mut applications: Vec<ApplicationTotals> = portfolio
        .applications()
        .iter()
        .map(application_monthly_totals)
        .collect();
    applications.sort_by(|left, right| left.name.cmp(&right.name));
    applications
}

/// Splits `environment` spend per billing code into invoiced and estimated.
///
/// Every code seen in any bucket gets an entry, even when all its spend sits
/// on one side.
#[must_use]
pub fn environment_clin_type_totals(environment: &EnvironmentSpend) -> ClinTypeTotals {
    let codes: BTreeSet<_> = environment.entries().map(|(_, code, _)| code).collect();
    let mut totals = ClinTypeTotals::zeroed(codes);
    for (bucket, code, amount) in environment.entries() {
        totals.record(bucket, code, amount);
    }
    totals
}

/// Per-billing-code totals across an application's environments.
///
/// # Errors
///
/// Always returns [`ReportingError::NotImplemented`].
pub fn application_clin_type_totals(
    application: &ApplicationSpend,
) -> ReportingResult<ClinTypeTotals> {
    // TODO: sum environment_clin_type_totals once invoiced/estimated rules
    // for partially invoiced applications are settled with finance.
    warn!(
        application = application.name(),
        "application CLIN type totals requested but not supported"
    );
    Err(ReportingError::NotImplemented("application CLIN type totals"))
}

/// Per-billing-code totals across a portfolio's applications.
///
/// # Errors
///
/// Always returns [`ReportingError::NotImplemented`].
pub fn portfolio_clin_type_totals(portfolio: &PortfolioSpend) -> ReportingResult<ClinTypeTotals> {
    warn!(
        applications = portfolio.applications().len(),
        "portfolio CLIN type totals requested but not supported"
    );
    Err(ReportingError::NotImplemented("portfolio CLIN type totals"))
}
