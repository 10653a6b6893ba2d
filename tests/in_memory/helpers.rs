//! Shared test helpers for in-memory integration tests.

use chrono::NaiveDate;
use clinledger::{
    clock::FixedClock,
    task_order::{
        adapters::memory::InMemoryTaskOrderRepository,
        domain::{
            Attachment, ClinNumber, JediClinType, NewClin, PortfolioId, TaskOrder,
            TaskOrderNumber,
        },
    },
};
use rstest::fixture;
use rust_decimal::Decimal;
use std::io;
use tokio::runtime::Runtime;

/// Provides a tokio runtime for async operations in tests.
///
/// # Errors
///
/// Returns an error if the runtime cannot be created.
#[fixture]
pub fn runtime() -> io::Result<Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
}

/// Provides a fresh in-memory task order repository for each test.
#[fixture]
pub fn repo() -> InMemoryTaskOrderRepository {
    InMemoryTaskOrderRepository::new()
}

/// Provides a clock pinned to 2024-06-01.
#[fixture]
pub fn clock() -> FixedClock {
    FixedClock::at_date(date(2024, 6, 1))
}

/// Provides a portfolio ID for tests.
#[fixture]
pub fn portfolio_id() -> PortfolioId {
    PortfolioId::new()
}

/// Builds a calendar date.
///
/// # Panics
///
/// Panics when the date does not exist.
#[must_use]
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

/// Builds a CLIN with both amounts and a billing category.
///
/// # Panics
///
/// Panics when `number` is blank.
#[must_use]
pub fn complete_clin(number: &str, start: NaiveDate, end: NaiveDate) -> NewClin {
    NewClin::new(ClinNumber::new(number).expect("valid CLIN number"), start, end)
        .with_amounts(Decimal::new(10_000, 0), Decimal::new(2_500, 0))
        .with_jedi_clin_type(JediClinType::Clin2)
}

/// Builds a numbered task order with a PDF and one complete CLIN.
///
/// # Panics
///
/// Panics when `number` is blank.
#[must_use]
pub fn numbered_task_order(
    portfolio_id: PortfolioId,
    number: &str,
    clock: &FixedClock,
) -> TaskOrder {
    let mut task_order = TaskOrder::new(
        portfolio_id,
        Some(TaskOrderNumber::new(number).expect("valid number")),
        Some(Attachment::new("to.pdf", format!("uploads/{number}.pdf"))),
        clock,
    );
    task_order.replace_clins(
        vec![complete_clin("0001", date(2024, 1, 1), date(2024, 12, 31))],
        clock,
    );
    task_order
}
