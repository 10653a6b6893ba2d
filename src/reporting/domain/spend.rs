//! Spend input tree supplied by a cloud provider's reporting feed.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Time-scoped spend aggregate.
///
/// Feeds may carry buckets beyond the three reported monthly; those are kept
/// as [`SpendBucket::Other`] and count as estimated spend.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SpendBucket {
    /// Month to date; not yet invoiced.
    ThisMonth,
    /// The previous calendar month.
    LastMonth,
    /// Lifetime spend.
    Total,
    /// Any other feed bucket, such as a forecast.
    Other(String),
}

impl SpendBucket {
    /// Returns the representation used in spend feeds.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::ThisMonth => "this_month",
            Self::LastMonth => "last_month",
            Self::Total => "total",
            Self::Other(name) => name.as_str(),
        }
    }

    /// Returns `true` for buckets whose spend has already been invoiced.
    #[must_use]
    pub const fn is_invoiced(&self) -> bool {
        matches!(self, Self::LastMonth | Self::Total)
    }
}

impl From<String> for SpendBucket {
    fn from(value: String) -> Self {
        match value.as_str() {
            "this_month" => Self::ThisMonth,
            "last_month" => Self::LastMonth,
            "total" => Self::Total,
            _ => Self::Other(value),
        }
    }
}

impl From<SpendBucket> for String {
    fn from(value: SpendBucket) -> Self {
        match value {
            SpendBucket::Other(name) => name,
            known => known.as_str().to_owned(),
        }
    }
}

impl fmt::Display for SpendBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// JEDI CLIN billing code as it appears in spend feeds (e.g. `JEDI_CLIN_1`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BillingCode(String);

impl BillingCode {
    /// Wraps a billing code.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the code as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for BillingCode {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for BillingCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Spend of one environment, by bucket and billing code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentSpend {
    name: String,
    #[serde(default)]
    spending: BTreeMap<SpendBucket, BTreeMap<BillingCode, Decimal>>,
}

impl EnvironmentSpend {
    /// Creates an environment with no recorded spend.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            spending: BTreeMap::new(),
        }
    }

    /// Records `amount` for `code` in `bucket`, replacing any previous value.
    #[must_use]
    pub fn with_spend(
        mut self,
        bucket: SpendBucket,
        code: impl Into<BillingCode>,
        amount: Decimal,
    ) -> Self {
        self.spending
            .entry(bucket)
            .or_default()
            .insert(code.into(), amount);
        self
    }

    /// Returns the environment name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the spend recorded in `bucket`, by billing code.
    #[must_use]
    pub fn bucket(&self, bucket: &SpendBucket) -> Option<&BTreeMap<BillingCode, Decimal>> {
        self.spending.get(bucket)
    }

    /// Iterates over every `(bucket, code, amount)` leaf.
    pub fn entries(&self) -> impl Iterator<Item = (&SpendBucket, &BillingCode, Decimal)> + '_ {
        self.spending.iter().flat_map(|(bucket, codes)| {
            codes
                .iter()
                .map(move |(code, amount)| (bucket, code, *amount))
        })
    }
}

/// Spend of one application, by environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationSpend {
    name: String,
    #[serde(default)]
    environments: Vec<EnvironmentSpend>,
}

impl ApplicationSpend {
    /// Creates an application with no environments.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            environments: Vec::new(),
        }
    }

    /// Adds an environment.
    #[must_use]
    pub fn with_environment(mut self, environment: EnvironmentSpend) -> Self {
        self.environments.push(environment);
        self
    }

    /// Returns the application name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the environments in feed order.
    #[must_use]
    pub fn environments(&self) -> &[EnvironmentSpend] {
        &self.environments
    }

    /// Finds an environment by name.
    #[must_use]
    pub fn environment(&self, name: &str) -> Option<&EnvironmentSpend> {
        self.environments
            .iter()
            .find(|environment| environment.name() == name)
    }
}

/// Spend of one portfolio, by application.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortfolioSpend {
    #[serde(default)]
    applications: Vec<ApplicationSpend>,
}

impl PortfolioSpend {
    /// Creates a portfolio with no applications.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            applications: Vec::new(),
        }
    }

    /// Adds an application.
    #[must_use]
    pub fn with_application(mut self, application: ApplicationSpend) -> Self {
        self.applications.push(application);
        self
    }

    /// Returns the applications in feed order.
    #[must_use]
    pub fn applications(&self) -> &[ApplicationSpend] {
        &self.applications
    }

    /// Finds an application by name.
    #[must_use]
    pub fn application(&self, name: &str) -> Option<&ApplicationSpend> {
        self.applications
            .iter()
            .find(|application| application.name() == name)
    }
}
