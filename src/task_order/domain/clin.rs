//! Contract line items (CLINs) owned by a task order.

use super::{ClinId, ParseJediClinTypeError, TaskOrderDomainError, TaskOrderId};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Billing category a CLIN funds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum JediClinType {
    /// Unclassified cloud services.
    #[serde(rename = "JEDI_CLIN_1")]
    Clin1,
    /// Classified cloud services.
    #[serde(rename = "JEDI_CLIN_2")]
    Clin2,
    /// Unclassified cloud support.
    #[serde(rename = "JEDI_CLIN_3")]
    Clin3,
    /// Classified cloud support.
    #[serde(rename = "JEDI_CLIN_4")]
    Clin4,
}

impl JediClinType {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Clin1 => "JEDI_CLIN_1",
            Self::Clin2 => "JEDI_CLIN_2",
            Self::Clin3 => "JEDI_CLIN_3",
            Self::Clin4 => "JEDI_CLIN_4",
        }
    }
}

impl fmt::Display for JediClinType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for JediClinType {
    type Error = ParseJediClinTypeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_uppercase();
        match normalized.as_str() {
            "JEDI_CLIN_1" => Ok(Self::Clin1),
            "JEDI_CLIN_2" => Ok(Self::Clin2),
            "JEDI_CLIN_3" => Ok(Self::Clin3),
            "JEDI_CLIN_4" => Ok(Self::Clin4),
            _ => Err(ParseJediClinTypeError(value.to_owned())),
        }
    }
}

/// CLIN number such as `0001` or `1001`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClinNumber(String);

impl ClinNumber {
    /// Creates a validated CLIN number.
    ///
    /// # Errors
    ///
    /// Returns [`TaskOrderDomainError::EmptyClinNumber`] when the value is
    /// blank.
    pub fn new(value: impl Into<String>) -> Result<Self, TaskOrderDomainError> {
        let raw = value.into();
        let normalized = raw.trim();
        if normalized.is_empty() {
            return Err(TaskOrderDomainError::EmptyClinNumber);
        }
        Ok(Self(normalized.to_owned()))
    }

    /// Returns the number as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Display ordering key: the number without its leading character, then
    /// the leading character.
    ///
    /// Option CLINs share a suffix with their base CLIN (`0001`, `1001`), so
    /// this key groups them together.
    #[must_use]
    pub fn sort_key(&self) -> (&str, Option<char>) {
        let mut chars = self.0.chars();
        let leading = chars.next();
        (chars.as_str(), leading)
    }
}

impl fmt::Display for ClinNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ClinNumber {
    type Error = TaskOrderDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ClinNumber> for String {
    fn from(value: ClinNumber) -> Self {
        value.0
    }
}

/// Caller-supplied CLIN data used when creating or replacing a CLIN set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewClin {
    /// CLIN number.
    pub number: ClinNumber,
    /// First day of the period of performance.
    pub start_date: NaiveDate,
    /// Day the period of performance ends (exclusive for status purposes).
    pub end_date: NaiveDate,
    /// Total contract value, if known.
    pub total_amount: Option<Decimal>,
    /// Amount obligated so far, if known.
    pub obligated_amount: Option<Decimal>,
    /// Billing category, if chosen.
    pub jedi_clin_type: Option<JediClinType>,
}

impl NewClin {
    /// Creates CLIN data with the required number and period of performance.
    #[must_use]
    pub const fn new(number: ClinNumber, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            number,
            start_date,
            end_date,
            total_amount: None,
            obligated_amount: None,
            jedi_clin_type: None,
        }
    }

    /// Sets the total and obligated amounts.
    #[must_use]
    pub const fn with_amounts(mut self, total_amount: Decimal, obligated_amount: Decimal) -> Self {
        self.total_amount = Some(total_amount);
        self.obligated_amount = Some(obligated_amount);
        self
    }

    /// Sets the billing category.
    #[must_use]
    pub const fn with_jedi_clin_type(mut self, jedi_clin_type: JediClinType) -> Self {
        self.jedi_clin_type = Some(jedi_clin_type);
        self
    }
}

/// Contract line item owned by exactly one task order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clin {
    id: ClinId,
    task_order_id: TaskOrderId,
    number: ClinNumber,
    start_date: NaiveDate,
    end_date: NaiveDate,
    total_amount: Option<Decimal>,
    obligated_amount: Option<Decimal>,
    jedi_clin_type: Option<JediClinType>,
}

impl Clin {
    /// Creates a CLIN for the given task order with a fresh identifier.
    #[must_use]
    pub fn new(task_order_id: TaskOrderId, data: NewClin) -> Self {
        Self::from_parts(ClinId::new(), task_order_id, data)
    }

    /// Reconstructs a CLIN from persisted storage.
    #[must_use]
    pub fn from_parts(id: ClinId, task_order_id: TaskOrderId, data: NewClin) -> Self {
        let NewClin {
            number,
            start_date,
            end_date,
            total_amount,
            obligated_amount,
            jedi_clin_type,
        } = data;
        Self {
            id,
            task_order_id,
            number,
            start_date,
            end_date,
            total_amount,
            obligated_amount,
            jedi_clin_type,
        }
    }

    /// Returns the CLIN identifier.
    #[must_use]
    pub const fn id(&self) -> ClinId {
        self.id
    }

    /// Returns the owning task order identifier.
    #[must_use]
    pub const fn task_order_id(&self) -> TaskOrderId {
        self.task_order_id
    }

    /// Returns the CLIN number.
    #[must_use]
    pub const fn number(&self) -> &ClinNumber {
        &self.number
    }

    /// Returns the first day of the period of performance.
    #[must_use]
    pub const fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    /// Returns the end of the period of performance.
    #[must_use]
    pub const fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    /// Returns the total contract value, if recorded.
    #[must_use]
    pub const fn total_amount(&self) -> Option<Decimal> {
        self.total_amount
    }

    /// Returns the obligated amount, if recorded.
    #[must_use]
    pub const fn obligated_amount(&self) -> Option<Decimal> {
        self.obligated_amount
    }

    /// Returns the billing category, if recorded.
    #[must_use]
    pub const fn jedi_clin_type(&self) -> Option<JediClinType> {
        self.jedi_clin_type
    }
}
