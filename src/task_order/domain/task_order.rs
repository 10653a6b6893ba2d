//! Task order aggregate root and its derived lifecycle values.

use super::{
    Attachment, Clin, ClinCompletenessPolicy, NewClin, PortfolioId, SignerId, TaskOrderId,
    TaskOrderNumber, TaskOrderStatus,
};
use chrono::{DateTime, Days, NaiveDate, Utc};
use mockable::Clock;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Financial summary of a task order on a given day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskOrderFinancials {
    /// Sum of CLIN obligated amounts.
    pub obligated: Decimal,
    /// Sum of CLIN total contract amounts.
    pub contract_total: Decimal,
    /// Whole days from the reference day to the end of the period of
    /// performance; negative once expired.
    pub days_to_expiration: i64,
}

/// Task order aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskOrder {
    id: TaskOrderId,
    portfolio_id: PortfolioId,
    number: Option<TaskOrderNumber>,
    pdf: Option<Attachment>,
    clins: Vec<Clin>,
    signer: Option<SignerId>,
    signed_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task order aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskOrderData {
    /// Persisted task order identifier.
    pub id: TaskOrderId,
    /// Owning portfolio.
    pub portfolio_id: PortfolioId,
    /// Persisted contract number, if any.
    pub number: Option<TaskOrderNumber>,
    /// Persisted signed PDF, if any.
    pub pdf: Option<Attachment>,
    /// Persisted CLINs.
    pub clins: Vec<Clin>,
    /// Persisted signer identity, if signed.
    pub signer: Option<SignerId>,
    /// Persisted signing timestamp, if signed.
    pub signed_at: Option<DateTime<Utc>>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl TaskOrder {
    /// Creates an unsigned task order without CLINs.
    #[must_use]
    pub fn new(
        portfolio_id: PortfolioId,
        number: Option<TaskOrderNumber>,
        pdf: Option<Attachment>,
        clock: &impl Clock,
    ) -> Self {
        let timestamp = clock.utc();
        Self {
            id: TaskOrderId::new(),
            portfolio_id,
            number,
            pdf,
            clins: Vec::new(),
            signer: None,
            signed_at: None,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a task order from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskOrderData) -> Self {
        Self {
            id: data.id,
            portfolio_id: data.portfolio_id,
            number: data.number,
            pdf: data.pdf,
            clins: data.clins,
            signer: data.signer,
            signed_at: data.signed_at,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task order identifier.
    #[must_use]
    pub const fn id(&self) -> TaskOrderId {
        self.id
    }

    /// Returns the owning portfolio.
    #[must_use]
    pub const fn portfolio_id(&self) -> PortfolioId {
        self.portfolio_id
    }

    /// Returns the contract number, if set.
    #[must_use]
    pub const fn number(&self) -> Option<&TaskOrderNumber> {
        self.number.as_ref()
    }

    /// Returns the signed PDF, if attached.
    #[must_use]
    pub const fn pdf(&self) -> Option<&Attachment> {
        self.pdf.as_ref()
    }

    /// Returns the CLINs in insertion order.
    #[must_use]
    pub fn clins(&self) -> &[Clin] {
        &self.clins
    }

    /// Returns the CLINs in display order (see [`super::ClinNumber::sort_key`]).
    #[must_use]
    pub fn sorted_clins(&self) -> Vec<&Clin> {
        let mut sorted: Vec<&Clin> = self.clins.iter().collect();
        sorted.sort_by(|left, right| left.number().sort_key().cmp(&right.number().sort_key()));
        sorted
    }

    /// Returns the signer identity, if signed.
    #[must_use]
    pub const fn signer(&self) -> Option<&SignerId> {
        self.signer.as_ref()
    }

    /// Returns the signing timestamp, if signed.
    #[must_use]
    pub const fn signed_at(&self) -> Option<DateTime<Utc>> {
        self.signed_at
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest modification timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns `true` once a signature has been captured.
    #[must_use]
    pub const fn is_signed(&self) -> bool {
        self.signed_at.is_some()
    }

    /// Returns `true` when at least one CLIN exists and every CLIN is
    /// complete under `policy`.
    #[must_use]
    pub fn clins_are_completed(&self, policy: &dyn ClinCompletenessPolicy) -> bool {
        !self.clins.is_empty() && self.clins.iter().all(|clin| policy.is_complete(clin))
    }

    /// Returns `true` when the PDF, the number, and complete CLINs are all
    /// present.
    #[must_use]
    pub fn is_completed(&self, policy: &dyn ClinCompletenessPolicy) -> bool {
        self.pdf.is_some() && self.number.is_some() && self.clins_are_completed(policy)
    }

    /// Earliest CLIN start date, or the creation date when there are no
    /// CLINs.
    #[must_use]
    pub fn start_date(&self) -> NaiveDate {
        self.clins
            .iter()
            .map(Clin::start_date)
            .min()
            .unwrap_or_else(|| self.created_at.date_naive())
    }

    /// Latest CLIN end date, or the day after [`Self::start_date`] when
    /// there are no CLINs.
    #[must_use]
    pub fn end_date(&self) -> NaiveDate {
        self.clins
            .iter()
            .map(Clin::end_date)
            .max()
            .unwrap_or_else(|| {
                let start = self.start_date();
                start.checked_add_days(Days::new(1)).unwrap_or(start)
            })
    }

    /// Returns `true` when `today` is on or after the start date.
    #[must_use]
    pub fn has_begun(&self, today: NaiveDate) -> bool {
        today >= self.start_date()
    }

    /// Returns `true` when `today` is on or after the end date.
    #[must_use]
    pub fn has_ended(&self, today: NaiveDate) -> bool {
        today >= self.end_date()
    }

    /// Whole days between `today` and the end date.
    #[must_use]
    pub fn days_to_expiration(&self, today: NaiveDate) -> i64 {
        self.end_date().signed_duration_since(today).num_days()
    }

    /// Derives the status on `today`.
    ///
    /// Unsigned orders are `Draft` until complete and `Unsigned` after.
    /// Signed orders are placed against the CLIN envelope
    /// `[start_date, end_date)`, whether or not they are still complete.
    #[must_use]
    pub fn status_on(
        &self,
        today: NaiveDate,
        policy: &dyn ClinCompletenessPolicy,
    ) -> TaskOrderStatus {
        if !self.is_signed() {
            return if self.is_completed(policy) {
                TaskOrderStatus::Unsigned
            } else {
                TaskOrderStatus::Draft
            };
        }

        if !self.has_begun(today) {
            TaskOrderStatus::Upcoming
        } else if self.has_ended(today) {
            TaskOrderStatus::Expired
        } else {
            TaskOrderStatus::Active
        }
    }

    /// Derives the status using the clock's current UTC date.
    #[must_use]
    pub fn status(&self, clock: &impl Clock, policy: &dyn ClinCompletenessPolicy) -> TaskOrderStatus {
        self.status_on(clock.utc().date_naive(), policy)
    }

    /// Returns `true` when the order is signed and its envelope has ended.
    ///
    /// Equivalent to `status_on(today, _) == Expired` for every policy, since
    /// completeness only affects unsigned orders.
    #[must_use]
    pub fn is_expired_on(&self, today: NaiveDate) -> bool {
        self.is_signed() && self.has_ended(today)
    }

    /// Returns `true` when the derived status on `today` is `Draft`.
    #[must_use]
    pub fn is_draft(&self, today: NaiveDate, policy: &dyn ClinCompletenessPolicy) -> bool {
        self.status_on(today, policy) == TaskOrderStatus::Draft
    }

    /// Returns `true` when the derived status on `today` is `Unsigned`.
    #[must_use]
    pub fn is_unsigned(&self, today: NaiveDate, policy: &dyn ClinCompletenessPolicy) -> bool {
        self.status_on(today, policy) == TaskOrderStatus::Unsigned
    }

    /// Returns `true` when the derived status on `today` is `Upcoming`.
    #[must_use]
    pub fn is_upcoming(&self, today: NaiveDate, policy: &dyn ClinCompletenessPolicy) -> bool {
        self.status_on(today, policy) == TaskOrderStatus::Upcoming
    }

    /// Returns `true` when the derived status on `today` is `Active`.
    #[must_use]
    pub fn is_active(&self, today: NaiveDate, policy: &dyn ClinCompletenessPolicy) -> bool {
        self.status_on(today, policy) == TaskOrderStatus::Active
    }

    /// Sum of CLIN obligated amounts; CLINs without one contribute zero.
    #[must_use]
    pub fn total_obligated_funds(&self) -> Decimal {
        self.clins.iter().filter_map(Clin::obligated_amount).sum()
    }

    /// Sum of CLIN total amounts; CLINs without one contribute zero.
    #[must_use]
    pub fn total_contract_amount(&self) -> Decimal {
        self.clins.iter().filter_map(Clin::total_amount).sum()
    }

    /// Computes the financial summary for `today`.
    #[must_use]
    pub fn financials(&self, today: NaiveDate) -> TaskOrderFinancials {
        TaskOrderFinancials {
            obligated: self.total_obligated_funds(),
            contract_total: self.total_contract_amount(),
            days_to_expiration: self.days_to_expiration(today),
        }
    }

    /// Replaces the whole CLIN set.
    ///
    /// An empty list leaves the existing CLINs untouched. Returns `true` when
    /// the set was replaced.
    pub fn replace_clins(&mut self, clins: Vec<NewClin>, clock: &impl Clock) -> bool {
        if clins.is_empty() {
            return false;
        }
        let id = self.id;
        self.clins = clins.into_iter().map(|data| Clin::new(id, data)).collect();
        self.touch(clock);
        true
    }

    /// Sets the contract number. Returns `false` without touching the order
    /// when the number is unchanged.
    pub fn set_number(&mut self, number: Option<TaskOrderNumber>, clock: &impl Clock) -> bool {
        if self.number == number {
            return false;
        }
        self.number = number;
        self.touch(clock);
        true
    }

    /// Sets or clears the signed PDF.
    pub fn set_pdf(&mut self, pdf: Option<Attachment>, clock: &impl Clock) {
        if self.pdf != pdf {
            self.pdf = pdf;
            self.touch(clock);
        }
    }

    /// Records the signature.
    ///
    /// Signing does not check completeness; callers gate signature capture
    /// on [`TaskOrderStatus::Unsigned`].
    pub fn sign(&mut self, signer: SignerId, clock: &impl Clock) {
        let timestamp = clock.utc();
        self.signer = Some(signer);
        self.signed_at = Some(timestamp);
        self.updated_at = timestamp;
    }

    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}
