//! Command-line and environment configuration for the `spend_report` binary.

use crate::task_order::domain::PortfolioId;
use camino::{Utf8Path, Utf8PathBuf};
use chrono::NaiveDate;
use clap::Parser;
use thiserror::Error;
use uuid::Uuid;

/// Renders portfolio spend and task order reports from JSON fixtures.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "spend_report")]
#[command(about = "Render monthly or per-CLIN-type spend, or expired task orders, for a portfolio")]
pub struct ReportArgs {
    /// Directory holding the fixtures
    #[arg(long, env = "SPEND_FIXTURE_DIR", default_value = ".")]
    pub fixture_dir: Utf8PathBuf,

    /// Spend fixture file name, relative to the fixture directory
    #[arg(long, env = "SPEND_FIXTURE_FILE", default_value = "spend.json")]
    pub fixture_file: Utf8PathBuf,

    /// Task order fixture file name, relative to the fixture directory
    #[arg(long, env = "SPEND_TASK_ORDER_FILE")]
    pub task_order_file: Option<Utf8PathBuf>,

    /// Portfolio to report spend for
    #[arg(long, env = "SPEND_PORTFOLIO")]
    pub portfolio: Option<String>,

    /// Application to drill into (requires --environment)
    #[arg(long, env = "SPEND_APPLICATION")]
    pub application: Option<String>,

    /// Environment to report CLIN type totals for (requires --application)
    #[arg(long, env = "SPEND_ENVIRONMENT")]
    pub environment: Option<String>,

    /// List expired task orders of this portfolio ID instead of spend
    #[arg(long, env = "SPEND_EXPIRED_FOR")]
    pub expired_for: Option<Uuid>,

    /// Decide task order expiry as of this date (YYYY-MM-DD) instead of today
    #[arg(long, env = "REPORT_DATE")]
    pub report_date: Option<NaiveDate>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

/// What the binary should render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportTarget<'a> {
    /// Monthly totals for every application of the portfolio.
    MonthlySpending {
        /// Portfolio name.
        portfolio: &'a str,
    },
    /// Invoiced and estimated totals per CLIN type of one environment.
    EnvironmentClinTypes {
        /// Portfolio name.
        portfolio: &'a str,
        /// Application name.
        application: &'a str,
        /// Environment name.
        environment: &'a str,
    },
    /// Signed task orders of a portfolio whose period of performance has
    /// ended on the report date.
    ExpiredTaskOrders {
        /// Portfolio identifier.
        portfolio_id: PortfolioId,
        /// Task order fixture, relative to the fixture directory.
        task_order_file: &'a Utf8Path,
    },
}

impl ReportTarget<'_> {
    /// Returns `true` when rendering reads the spend fixture.
    #[must_use]
    pub const fn reads_spend(&self) -> bool {
        !matches!(self, Self::ExpiredTaskOrders { .. })
    }
}

/// Invalid combinations of report arguments.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A spend report was requested without a portfolio name.
    #[error("SPEND_PORTFOLIO must be set and not blank")]
    EmptyPortfolio,
    /// Only one of application and environment was given.
    #[error("SPEND_APPLICATION and SPEND_ENVIRONMENT must be given together")]
    IncompleteEnvironmentPath,
    /// A fixture file name was absolute.
    #[error("fixture files must be relative to SPEND_FIXTURE_DIR, got {0}")]
    AbsoluteFixtureFile(Utf8PathBuf),
    /// The expired report was requested without task orders to read.
    #[error("SPEND_EXPIRED_FOR requires SPEND_TASK_ORDER_FILE")]
    MissingTaskOrderFile,
    /// The expired report was combined with a spend drill-down.
    #[error("SPEND_EXPIRED_FOR cannot be combined with SPEND_APPLICATION or SPEND_ENVIRONMENT")]
    ConflictingTargets,
}

impl ReportArgs {
    /// Returns the report selected by the arguments.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] naming the first invalid setting.
    pub fn target(&self) -> Result<ReportTarget<'_>, ConfigError> {
        let absolute = std::iter::once(&self.fixture_file)
            .chain(self.task_order_file.as_ref())
            .find(|path| path.is_absolute());
        if let Some(path) = absolute {
            return Err(ConfigError::AbsoluteFixtureFile(path.clone()));
        }
        if self.application.is_some() != self.environment.is_some() {
            return Err(ConfigError::IncompleteEnvironmentPath);
        }

        if let Some(portfolio_id) = self.expired_for {
            if self.application.is_some() {
                return Err(ConfigError::ConflictingTargets);
            }
            let task_order_file = self
                .task_order_file
                .as_deref()
                .ok_or(ConfigError::MissingTaskOrderFile)?;
            return Ok(ReportTarget::ExpiredTaskOrders {
                portfolio_id: PortfolioId::from_uuid(portfolio_id),
                task_order_file,
            });
        }

        let portfolio = self
            .portfolio
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .ok_or(ConfigError::EmptyPortfolio)?;
        Ok(
            match (self.application.as_deref(), self.environment.as_deref()) {
                (Some(application), Some(environment)) => ReportTarget::EnvironmentClinTypes {
                    portfolio,
                    application,
                    environment,
                },
                _ => ReportTarget::MonthlySpending { portfolio },
            },
        )
    }

    /// Returns the default tracing directive for this binary.
    #[must_use]
    pub fn log_directive(&self) -> String {
        format!("spend_report={level},clinledger={level},warn", level = self.log_level)
    }
}
