//! Spend source backed by a JSON fixture.
//!
//! The fixture maps portfolio names to spend trees:
//!
//! ```json
//! {
//!   "Aardvark": {
//!     "applications": [
//!       {
//!         "name": "LC04",
//!         "environments": [
//!           {
//!             "name": "Prod",
//!             "spending": {
//!               "this_month": { "JEDI_CLIN_1": 663, "JEDI_CLIN_2": 397 },
//!               "last_month": { "JEDI_CLIN_1": 5006, "JEDI_CLIN_2": 3212 },
//!               "total": { "JEDI_CLIN_1": 23921, "JEDI_CLIN_2": 15745 }
//!             }
//!           }
//!         ]
//!       }
//!     ]
//!   }
//! }
//! ```

use crate::reporting::{
    domain::PortfolioSpend,
    ports::{SpendDataSource, SpendSourceError, SpendSourceResult},
};
use camino::Utf8Path;
use cap_std::fs_utf8::Dir;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

/// In-process spend source holding a fixed set of portfolios.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FixtureSpendDataSource {
    portfolios: BTreeMap<String, PortfolioSpend>,
}

impl FixtureSpendDataSource {
    /// Creates a source with no portfolios.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            portfolios: BTreeMap::new(),
        }
    }

    /// Adds or replaces the spend tree of `name`.
    #[must_use]
    pub fn with_portfolio(mut self, name: impl Into<String>, spend: PortfolioSpend) -> Self {
        self.portfolios.insert(name.into(), spend);
        self
    }

    /// Parses a fixture document.
    ///
    /// # Errors
    ///
    /// Returns [`SpendSourceError::Parse`] for malformed JSON and
    /// [`SpendSourceError::NegativeAmount`] when any amount is below zero.
    pub fn from_json_str(json: &str) -> SpendSourceResult<Self> {
        let portfolios: BTreeMap<String, PortfolioSpend> = serde_json::from_str(json)?;
        validate_amounts(&portfolios)?;
        debug!(portfolios = portfolios.len(), "loaded spend fixture");
        Ok(Self { portfolios })
    }

    /// Reads and parses the fixture at `path` relative to `dir`.
    ///
    /// # Errors
    ///
    /// Returns [`SpendSourceError::Io`] when the file cannot be read, or the
    /// errors of [`Self::from_json_str`].
    pub fn open(dir: &Dir, path: &Utf8Path) -> SpendSourceResult<Self> {
        let contents = dir
            .read_to_string(path)
            .map_err(|err| SpendSourceError::Io {
                path: path.to_string(),
                source: Arc::new(err),
            })?;
        Self::from_json_str(&contents)
    }

    /// Returns the portfolio names in order.
    pub fn portfolio_names(&self) -> impl Iterator<Item = &str> {
        self.portfolios.keys().map(String::as_str)
    }
}

impl SpendDataSource for FixtureSpendDataSource {
    fn portfolio_spend(&self, portfolio_name: &str) -> SpendSourceResult<Option<PortfolioSpend>> {
        Ok(self.portfolios.get(portfolio_name).cloned())
    }
}

fn validate_amounts(portfolios: &BTreeMap<String, PortfolioSpend>) -> SpendSourceResult<()> {
    for (portfolio, spend) in portfolios {
        for application in spend.applications() {
            for environment in application.environments() {
                let negative = environment
                    .entries()
                    .find(|(_, _, amount)| *amount < Decimal::ZERO);
                if let Some((bucket, code, amount)) = negative {
                    return Err(SpendSourceError::NegativeAmount {
                        portfolio: portfolio.clone(),
                        application: application.name().to_owned(),
                        environment: environment.name().to_owned(),
                        bucket: bucket.clone(),
                        code: code.clone(),
                        amount,
                    });
                }
            }
        }
    }
    Ok(())
}
