//! Shared builders for task order unit tests.

use crate::clock::FixedClock;
use crate::task_order::domain::{
    Attachment, ClinNumber, JediClinType, NewClin, PortfolioId, TaskOrder, TaskOrderNumber,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;

pub(super) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

pub(super) fn clock_on(year: i32, month: u32, day: u32) -> FixedClock {
    FixedClock::at_date(date(year, month, day))
}

pub(super) fn clin_number(value: &str) -> ClinNumber {
    ClinNumber::new(value).expect("valid CLIN number")
}

/// A CLIN with both amounts and a billing category.
pub(super) fn complete_clin(number: &str, start: NaiveDate, end: NaiveDate) -> NewClin {
    NewClin::new(clin_number(number), start, end)
        .with_amounts(Decimal::new(1_000, 0), Decimal::new(500, 0))
        .with_jedi_clin_type(JediClinType::Clin1)
}

pub(super) fn signed_pdf() -> Attachment {
    Attachment::new("task_order.pdf", "uploads/task_order.pdf")
}

/// A task order with a number, a PDF, and the given CLINs.
pub(super) fn task_order_with(clock: &FixedClock, clins: Vec<NewClin>) -> TaskOrder {
    let number = TaskOrderNumber::new("TO-0001").expect("valid number");
    let mut task_order = TaskOrder::new(PortfolioId::new(), Some(number), Some(signed_pdf()), clock);
    task_order.replace_clins(clins, clock);
    task_order
}

/// A complete, unsigned task order covering `[start, end)`.
pub(super) fn complete_task_order(
    clock: &FixedClock,
    start: NaiveDate,
    end: NaiveDate,
) -> TaskOrder {
    task_order_with(clock, vec![complete_clin("0001", start, end)])
}
