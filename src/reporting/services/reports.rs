//! Dashboard report facade over a spend source and the task order store.

use super::aggregation::{
    environment_clin_type_totals, portfolio_clin_type_totals, portfolio_monthly_totals,
};
use crate::reporting::{
    domain::{ApplicationTotals, ClinTypeTotals, EnvironmentSpend},
    ports::{SpendDataSource, SpendSourceError},
};
use crate::task_order::{
    domain::{PortfolioId, TaskOrder, expired_task_orders},
    ports::{TaskOrderRepository, TaskOrderRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Errors returned by report operations.
#[derive(Debug, Clone, Error)]
pub enum ReportingError {
    /// The requested rollup is not supported.
    #[error("{0} are not implemented")]
    NotImplemented(&'static str),
    /// The spend source failed.
    #[error(transparent)]
    Source(#[from] SpendSourceError),
    /// Task order lookup failed.
    #[error(transparent)]
    Repository(#[from] TaskOrderRepositoryError),
}

/// Result type for report operations.
pub type ReportingResult<T> = Result<T, ReportingError>;

/// Builds spend and task order reports for portfolio dashboards.
#[derive(Clone)]
pub struct ReportService<S, R, C>
where
    S: SpendDataSource,
    R: TaskOrderRepository,
    C: Clock + Send + Sync,
{
    source: Arc<S>,
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<S, R, C> ReportService<S, R, C>
where
    S: SpendDataSource,
    R: TaskOrderRepository,
    C: Clock + Send + Sync,
{
    /// Creates a report service.
    #[must_use]
    pub const fn new(source: Arc<S>, repository: Arc<R>, clock: Arc<C>) -> Self {
        Self {
            source,
            repository,
            clock,
        }
    }

    /// Monthly totals per application of `portfolio_name`, ordered by name.
    ///
    /// A portfolio absent from the feed yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`ReportingError::Source`] when the feed fails.
    pub fn monthly_spending(&self, portfolio_name: &str) -> ReportingResult<Vec<ApplicationTotals>> {
        let Some(portfolio) = self.source.portfolio_spend(portfolio_name)? else {
            debug!(portfolio = portfolio_name, "no spend data for portfolio");
            return Ok(Vec::new());
        };
        let applications = portfolio_monthly_totals(&portfolio);
        debug!(
            portfolio = portfolio_name,
            applications = applications.len(),
            "computed monthly spending"
        );
        Ok(applications)
    }

    /// Invoiced and estimated totals per billing code of one environment.
    #[must_use]
    pub fn clin_type_totals(&self, environment: &EnvironmentSpend) -> ClinTypeTotals {
        environment_clin_type_totals(environment)
    }

    /// Looks up an environment in the feed and returns its billing code
    /// totals, or `None` when any level of the path is absent.
    ///
    /// # Errors
    ///
    /// Returns [`ReportingError::Source`] when the feed fails.
    pub fn environment_clin_type_totals(
        &self,
        portfolio_name: &str,
        application_name: &str,
        environment_name: &str,
    ) -> ReportingResult<Option<ClinTypeTotals>> {
        let portfolio = self.source.portfolio_spend(portfolio_name)?;
        let totals = portfolio.as_ref().and_then(|spend| {
            spend
                .application(application_name)?
                .environment(environment_name)
                .map(environment_clin_type_totals)
        });
        debug!(
            portfolio = portfolio_name,
            application = application_name,
            environment = environment_name,
            found = totals.is_some(),
            "computed environment CLIN type totals"
        );
        Ok(totals)
    }

    /// Billing code totals across a whole portfolio.
    ///
    /// # Errors
    ///
    /// Returns [`ReportingError::NotImplemented`] for any portfolio with
    /// spend data, and [`ReportingError::Source`] when the feed fails.
    pub fn spending_by_clin_type(&self, portfolio_name: &str) -> ReportingResult<ClinTypeTotals> {
        match self.source.portfolio_spend(portfolio_name)? {
            Some(portfolio) => portfolio_clin_type_totals(&portfolio),
            None => Ok(ClinTypeTotals::default()),
        }
    }

    /// Task orders of `portfolio_id` whose derived status is expired, oldest
    /// first.
    ///
    /// # Errors
    ///
    /// Returns [`ReportingError::Repository`] when lookup fails.
    pub async fn expired_task_orders(
        &self,
        portfolio_id: PortfolioId,
    ) -> ReportingResult<Vec<TaskOrder>> {
        let mut task_orders = self.repository.list_by_portfolio(portfolio_id).await?;
        task_orders.sort_by_key(TaskOrder::created_at);
        let today = self.clock.utc().date_naive();
        Ok(expired_task_orders(task_orders, today))
    }
}
