//! Storage contract tests for the in-memory task order and attachment
//! repositories.

use crate::in_memory::helpers::{
    clock, complete_clin, date, numbered_task_order, portfolio_id, repo, runtime,
};
use clinledger::{
    clock::FixedClock,
    task_order::{
        adapters::memory::{InMemoryAttachmentRepository, InMemoryTaskOrderRepository},
        domain::{PortfolioId, TaskOrderId, TaskOrderNumber},
        ports::{AttachmentRepository, TaskOrderRepository, TaskOrderRepositoryError},
    },
};
use rstest::rstest;
use std::io;
use tokio::runtime::Runtime;

/// Tests that storing the same task order twice is rejected.
#[rstest]
fn duplicate_task_order_id_rejected(
    runtime: io::Result<Runtime>,
    repo: InMemoryTaskOrderRepository,
    clock: FixedClock,
    portfolio_id: PortfolioId,
) {
    let rt = runtime.expect("runtime creation");
    let task_order = numbered_task_order(portfolio_id, "TO-1", &clock);

    rt.block_on(repo.store(&task_order)).expect("first store");
    let result = rt.block_on(repo.store(&task_order));

    assert!(
        matches!(result, Err(TaskOrderRepositoryError::DuplicateTaskOrder(id)) if id == task_order.id()),
        "Should reject duplicate task order ID"
    );
}

/// Tests that contract numbers are unique across portfolios.
#[rstest]
fn duplicate_number_rejected_across_portfolios(
    runtime: io::Result<Runtime>,
    repo: InMemoryTaskOrderRepository,
    clock: FixedClock,
) {
    let rt = runtime.expect("runtime creation");
    let first = numbered_task_order(PortfolioId::new(), "TO-1", &clock);
    let second = numbered_task_order(PortfolioId::new(), "TO-1", &clock);

    rt.block_on(repo.store(&first)).expect("first store");
    let result = rt.block_on(repo.store(&second));

    let expected = TaskOrderNumber::new("TO-1").expect("valid number");
    assert!(
        matches!(result, Err(TaskOrderRepositoryError::DuplicateNumber(ref number)) if *number == expected),
        "Should reject duplicate contract number"
    );
}

/// Tests that an update swaps the whole CLIN set in one step.
#[rstest]
fn update_replaces_clin_set(
    runtime: io::Result<Runtime>,
    repo: InMemoryTaskOrderRepository,
    clock: FixedClock,
    portfolio_id: PortfolioId,
) {
    let rt = runtime.expect("runtime creation");
    let mut task_order = numbered_task_order(portfolio_id, "TO-1", &clock);
    rt.block_on(repo.store(&task_order)).expect("store");

    task_order.replace_clins(
        vec![
            complete_clin("0002", date(2024, 2, 1), date(2024, 8, 1)),
            complete_clin("1002", date(2024, 8, 1), date(2025, 2, 1)),
        ],
        &clock,
    );
    rt.block_on(repo.update(&task_order)).expect("update");

    let stored = rt
        .block_on(repo.find_by_id(task_order.id()))
        .expect("lookup")
        .expect("task order exists");
    let numbers: Vec<&str> = stored
        .sorted_clins()
        .into_iter()
        .map(|clin| clin.number().as_str())
        .collect();
    assert_eq!(numbers, vec!["0002", "1002"]);
}

/// Tests that updating or deleting a missing task order reports `NotFound`.
#[rstest]
fn missing_task_order_is_not_found(
    runtime: io::Result<Runtime>,
    repo: InMemoryTaskOrderRepository,
    clock: FixedClock,
    portfolio_id: PortfolioId,
) {
    let rt = runtime.expect("runtime creation");
    let task_order = numbered_task_order(portfolio_id, "TO-1", &clock);
    let missing = TaskOrderId::new();

    let update = rt.block_on(repo.update(&task_order));
    let delete = rt.block_on(repo.delete(missing));

    assert!(matches!(update, Err(TaskOrderRepositoryError::NotFound(id)) if id == task_order.id()));
    assert!(matches!(delete, Err(TaskOrderRepositoryError::NotFound(id)) if id == missing));
}

/// Tests that deleting a task order releases its contract number.
#[rstest]
fn delete_releases_number(
    runtime: io::Result<Runtime>,
    repo: InMemoryTaskOrderRepository,
    clock: FixedClock,
    portfolio_id: PortfolioId,
) {
    let rt = runtime.expect("runtime creation");
    let first = numbered_task_order(portfolio_id, "TO-1", &clock);
    rt.block_on(repo.store(&first)).expect("store");
    rt.block_on(repo.delete(first.id())).expect("delete");

    let replacement = numbered_task_order(portfolio_id, "TO-1", &clock);
    rt.block_on(repo.store(&replacement))
        .expect("number should be free after delete");

    assert!(
        rt.block_on(repo.find_by_id(first.id()))
            .expect("lookup")
            .is_none()
    );
}

/// Tests that listing is scoped to one portfolio.
#[rstest]
fn list_by_portfolio_filters_other_portfolios(
    runtime: io::Result<Runtime>,
    repo: InMemoryTaskOrderRepository,
    clock: FixedClock,
    portfolio_id: PortfolioId,
) {
    let rt = runtime.expect("runtime creation");
    let mine = numbered_task_order(portfolio_id, "TO-1", &clock);
    let theirs = numbered_task_order(PortfolioId::new(), "TO-2", &clock);
    rt.block_on(repo.store(&mine)).expect("store mine");
    rt.block_on(repo.store(&theirs)).expect("store theirs");

    let listed = rt
        .block_on(repo.list_by_portfolio(portfolio_id))
        .expect("list");

    assert_eq!(listed, vec![mine]);
}

/// Tests that attachments are deduplicated by object name.
#[rstest]
fn attachment_get_or_create_is_idempotent(runtime: io::Result<Runtime>) {
    let rt = runtime.expect("runtime creation");
    let attachments = InMemoryAttachmentRepository::new();

    let first = rt
        .block_on(attachments.get_or_create("to.pdf", "uploads/abc"))
        .expect("first upload");
    let second = rt
        .block_on(attachments.get_or_create("renamed.pdf", "uploads/abc"))
        .expect("second upload");
    let found = rt
        .block_on(attachments.find_by_id(first.id()))
        .expect("lookup");

    assert_eq!(first, second);
    assert_eq!(second.filename(), "to.pdf");
    assert_eq!(found, Some(first));
}
