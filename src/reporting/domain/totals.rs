//! Aggregated spend values returned to dashboards.

use super::{BillingCode, SpendBucket};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::iter::Sum;
use std::ops::Add;

/// Spend summed per time bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyTotals {
    /// Month-to-date spend.
    pub this_month: Decimal,
    /// Previous month's spend.
    pub last_month: Decimal,
    /// Lifetime spend.
    pub total: Decimal,
}

impl MonthlyTotals {
    /// All buckets zero.
    pub const ZERO: Self = Self {
        this_month: Decimal::ZERO,
        last_month: Decimal::ZERO,
        total: Decimal::ZERO,
    };
}

impl Add for MonthlyTotals {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            this_month: self.this_month + rhs.this_month,
            last_month: self.last_month + rhs.last_month,
            total: self.total + rhs.total,
        }
    }
}

impl Sum for MonthlyTotals {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

/// Monthly totals of one environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentTotals {
    /// Environment name.
    pub name: String,
    /// Bucket totals.
    #[serde(flatten)]
    pub totals: MonthlyTotals,
}

/// Monthly totals of one application and each of its environments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationTotals {
    /// Application name.
    pub name: String,
    /// Bucket totals summed across environments.
    #[serde(flatten)]
    pub totals: MonthlyTotals,
    /// Environment totals ordered by name.
    pub environments: Vec<EnvironmentTotals>,
}

/// Spend of one billing code split by invoicing state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClinTypeSpend {
    /// Spend already invoiced (`last_month` and `total`).
    pub invoiced: Decimal,
    /// Spend not yet invoiced (`this_month` and any other feed bucket).
    pub estimated: Decimal,
}

/// Invoiced and estimated spend per billing code, ordered by code.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClinTypeTotals(BTreeMap<BillingCode, ClinTypeSpend>);

impl ClinTypeTotals {
    /// Creates totals with a zero entry for each code.
    #[must_use]
    pub fn zeroed<'a>(codes: impl IntoIterator<Item = &'a BillingCode>) -> Self {
        Self(
            codes
                .into_iter()
                .map(|code| (code.clone(), ClinTypeSpend::default()))
                .collect(),
        )
    }

    /// Adds `amount` to the invoiced or estimated side of `code`, depending on
    /// `bucket`. Codes without a seeded entry are ignored.
    pub fn record(&mut self, bucket: &SpendBucket, code: &BillingCode, amount: Decimal) {
        let Some(spend) = self.0.get_mut(code) else {
            return;
        };
        if bucket.is_invoiced() {
            spend.invoiced += amount;
        } else {
            spend.estimated += amount;
        }
    }

    /// Returns the spend for `code`.
    #[must_use]
    pub fn get(&self, code: &BillingCode) -> Option<&ClinTypeSpend> {
        self.0.get(code)
    }

    /// Iterates over codes in order.
    pub fn iter(&self) -> impl Iterator<Item = (&BillingCode, &ClinTypeSpend)> {
        self.0.iter()
    }

    /// Returns the number of billing codes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` when no billing code was observed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
