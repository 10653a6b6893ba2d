//! Port for the cloud spend feed.

use crate::reporting::domain::{BillingCode, PortfolioSpend, SpendBucket};
use rust_decimal::Decimal;
use std::sync::Arc;
use thiserror::Error;

/// Result type for spend source operations.
pub type SpendSourceResult<T> = Result<T, SpendSourceError>;

/// Read-only provider of per-portfolio spend trees.
#[cfg_attr(test, mockall::automock)]
pub trait SpendDataSource: Send + Sync {
    /// Returns the spend tree for `portfolio_name`, or `None` when the feed
    /// has no data for it.
    ///
    /// # Errors
    ///
    /// Returns [`SpendSourceError`] when the feed cannot be read.
    fn portfolio_spend(&self, portfolio_name: &str) -> SpendSourceResult<Option<PortfolioSpend>>;
}

/// Errors returned by spend sources.
#[derive(Debug, Clone, Error)]
pub enum SpendSourceError {
    /// The feed could not be read.
    #[error("failed to read spend data from {path}: {source}")]
    Io {
        /// Location of the feed.
        path: String,
        /// Underlying I/O error.
        source: Arc<std::io::Error>,
    },
    /// The feed was not valid spend JSON.
    #[error("malformed spend data: {0}")]
    Parse(Arc<serde_json::Error>),
    /// A spend amount was negative.
    #[error(
        "negative spend {amount} for {code} ({bucket}) in {portfolio}/{application}/{environment}"
    )]
    NegativeAmount {
        /// Portfolio name.
        portfolio: String,
        /// Application name.
        application: String,
        /// Environment name.
        environment: String,
        /// Bucket holding the amount.
        bucket: SpendBucket,
        /// Billing code holding the amount.
        code: BillingCode,
        /// Offending amount.
        amount: Decimal,
    },
    /// Backend failure in a non-file source.
    #[error("spend source unavailable: {0}")]
    Unavailable(Arc<dyn std::error::Error + Send + Sync>),
}

impl SpendSourceError {
    /// Wraps a backend error.
    pub fn unavailable(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Unavailable(Arc::new(err))
    }
}

impl From<serde_json::Error> for SpendSourceError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(Arc::new(err))
    }
}
