//! Shared world state for task order status BDD scenarios.

use std::sync::Arc;

use chrono::NaiveDate;
use clinledger::{
    clock::FixedClock,
    task_order::{
        adapters::memory::{InMemoryAttachmentRepository, InMemoryTaskOrderRepository},
        domain::{Clin, NewClin, PortfolioId, TaskOrder},
        services::{TaskOrderService, UpdateTaskOrderRequest},
    },
};
use rstest::fixture;

/// Service type used by the BDD world.
pub type TestTaskOrderService =
    TaskOrderService<InMemoryTaskOrderRepository, InMemoryAttachmentRepository, FixedClock>;

/// Scenario world for task order status behaviour tests.
pub struct TaskOrderWorld {
    pub service: TestTaskOrderService,
    pub portfolio_id: PortfolioId,
    pub task_order: Option<TaskOrder>,
}

impl TaskOrderWorld {
    /// Creates a world whose clock is pinned to `today`.
    #[must_use]
    pub fn on(today: NaiveDate) -> Self {
        let service = TaskOrderService::new(
            Arc::new(InMemoryTaskOrderRepository::new()),
            Arc::new(InMemoryAttachmentRepository::new()),
            Arc::new(FixedClock::at_date(today)),
        );
        Self {
            service,
            portfolio_id: PortfolioId::new(),
            task_order: None,
        }
    }

    /// Returns the task order under test.
    ///
    /// # Errors
    ///
    /// Returns an error when no task order has been created yet.
    pub fn current(&self) -> Result<&TaskOrder, eyre::Report> {
        self.task_order
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing task order in scenario world"))
    }

    /// Builds an update that keeps the current number and PDF.
    ///
    /// # Errors
    ///
    /// Returns an error when no task order has been created yet.
    pub fn preserving_update(&self) -> Result<UpdateTaskOrderRequest, eyre::Report> {
        let task_order = self.current()?;
        let mut request =
            UpdateTaskOrderRequest::new(task_order.id()).with_pdf(task_order.pdf().cloned());
        if let Some(number) = task_order.number() {
            request = request.with_number(number.as_str());
        }
        Ok(request)
    }
}

impl Default for TaskOrderWorld {
    fn default() -> Self {
        Self::on(NaiveDate::MIN)
    }
}

/// Copies a stored CLIN back into creation data.
#[must_use]
pub fn as_new_clin(clin: &Clin) -> NewClin {
    NewClin {
        number: clin.number().clone(),
        start_date: clin.start_date(),
        end_date: clin.end_date(),
        total_amount: clin.total_amount(),
        obligated_amount: clin.obligated_amount(),
        jedi_clin_type: clin.jedi_clin_type(),
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> TaskOrderWorld {
    TaskOrderWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

/// Parses an ISO date from a scenario argument.
///
/// # Errors
///
/// Returns an error when `raw` is not `YYYY-MM-DD`.
pub fn parse_date(raw: &str) -> Result<NaiveDate, eyre::Report> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|err| eyre::eyre!("invalid scenario date {raw}: {err}"))
}
