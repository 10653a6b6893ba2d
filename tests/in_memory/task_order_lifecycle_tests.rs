//! In-memory integration tests for task order lifecycle workflows.

use std::sync::Arc;

use crate::in_memory::helpers::{complete_clin, date};
use clinledger::{
    clock::FixedClock,
    task_order::{
        adapters::memory::{InMemoryAttachmentRepository, InMemoryTaskOrderRepository},
        domain::{AttachmentInput, PortfolioId, TaskOrder, TaskOrderStatus},
        services::{
            CreateTaskOrderRequest, SignTaskOrderRequest, TaskOrderService,
            UpdateTaskOrderRequest,
        },
    },
};
use rust_decimal::Decimal;
use rstest::{fixture, rstest};

type TestService =
    TaskOrderService<InMemoryTaskOrderRepository, InMemoryAttachmentRepository, FixedClock>;

/// Services sharing one store, each pinned to a different day.
struct Timeline {
    repository: Arc<InMemoryTaskOrderRepository>,
    attachments: Arc<InMemoryAttachmentRepository>,
}

impl Timeline {
    fn on(&self, year: i32, month: u32, day: u32) -> TestService {
        TaskOrderService::new(
            Arc::clone(&self.repository),
            Arc::clone(&self.attachments),
            Arc::new(FixedClock::at_date(date(year, month, day))),
        )
    }
}

#[fixture]
fn timeline() -> Timeline {
    Timeline {
        repository: Arc::new(InMemoryTaskOrderRepository::new()),
        attachments: Arc::new(InMemoryAttachmentRepository::new()),
    }
}

/// Asserts the derived status of `task_order` on the service's day.
///
/// # Errors
///
/// Returns an error when the status differs from `expected`.
fn assert_status(
    service: &TestService,
    task_order: &TaskOrder,
    expected: TaskOrderStatus,
) -> Result<(), eyre::Report> {
    let actual = service.derive_status(task_order);
    eyre::ensure!(
        actual == expected,
        "expected status {expected}, found {actual}"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn task_order_moves_from_draft_to_expired(timeline: Timeline) -> Result<(), eyre::Report> {
    let portfolio_id = PortfolioId::new();
    let drafting = timeline.on(2023, 11, 1);

    let draft = drafting
        .create(CreateTaskOrderRequest::new(portfolio_id))
        .await?;
    assert_status(&drafting, &draft, TaskOrderStatus::Draft)?;

    let completed = drafting
        .update(
            UpdateTaskOrderRequest::new(draft.id())
                .with_number("TO-2024-01")
                .with_pdf(AttachmentInput::new_upload("to.pdf", "uploads/to-2024-01"))
                .with_clins([
                    complete_clin("0001", date(2024, 1, 1), date(2024, 6, 1)),
                    complete_clin("1001", date(2024, 6, 1), date(2024, 12, 1)),
                ]),
        )
        .await?;
    assert_status(&drafting, &completed, TaskOrderStatus::Unsigned)?;

    let signed = drafting
        .sign(SignTaskOrderRequest::new(draft.id(), "1234567890"))
        .await?;
    assert_status(&drafting, &signed, TaskOrderStatus::Upcoming)?;
    assert_status(&timeline.on(2024, 1, 1), &signed, TaskOrderStatus::Active)?;
    assert_status(&timeline.on(2024, 11, 30), &signed, TaskOrderStatus::Active)?;
    assert_status(&timeline.on(2024, 12, 1), &signed, TaskOrderStatus::Expired)?;

    let financials = timeline.on(2024, 11, 1).financials(&signed);
    assert_eq!(financials.contract_total, Decimal::new(20_000, 0));
    assert_eq!(financials.obligated, Decimal::new(5_000, 0));
    assert_eq!(financials.days_to_expiration, 30);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn expired_task_orders_are_listed_oldest_first(
    timeline: Timeline,
) -> Result<(), eyre::Report> {
    let portfolio_id = PortfolioId::new();
    let mut expected = Vec::new();
    for (month, number) in [(1, "TO-A"), (2, "TO-B")] {
        let service = timeline.on(2023, month, 1);
        let created = service
            .create(
                CreateTaskOrderRequest::new(portfolio_id)
                    .with_number(number)
                    .with_clins([complete_clin("0001", date(2023, 3, 1), date(2023, 9, 1))]),
            )
            .await?;
        service
            .sign(SignTaskOrderRequest::new(created.id(), "1234567890"))
            .await?;
        expected.push(created.id());
    }
    timeline
        .on(2023, 3, 1)
        .create(CreateTaskOrderRequest::new(portfolio_id).with_number("TO-C"))
        .await?;

    let expired: Vec<_> = timeline
        .on(2024, 1, 1)
        .expired_task_orders(portfolio_id)
        .await?
        .iter()
        .map(TaskOrder::id)
        .collect();

    assert_eq!(expired, expected);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn list_sorted_groups_by_status_then_age(timeline: Timeline) -> Result<(), eyre::Report> {
    let portfolio_id = PortfolioId::new();
    let older_draft = timeline
        .on(2024, 1, 1)
        .create(CreateTaskOrderRequest::new(portfolio_id))
        .await?;
    let newer_draft = timeline
        .on(2024, 2, 1)
        .create(CreateTaskOrderRequest::new(portfolio_id))
        .await?;
    let activating = timeline.on(2024, 3, 1);
    let active = activating
        .create(
            CreateTaskOrderRequest::new(portfolio_id)
                .with_number("TO-ACTIVE")
                .with_clins([complete_clin("0001", date(2024, 1, 1), date(2025, 1, 1))]),
        )
        .await?;
    activating
        .sign(SignTaskOrderRequest::new(active.id(), "1234567890"))
        .await?;

    let ids: Vec<_> = timeline
        .on(2024, 6, 1)
        .list_sorted(portfolio_id)
        .await?
        .iter()
        .map(TaskOrder::id)
        .collect();

    assert_eq!(ids, vec![active.id(), older_draft.id(), newer_draft.id()]);
    Ok(())
}
