//! Collection-level ordering and filtering of task orders.

use super::{ClinCompletenessPolicy, TaskOrder};
use chrono::NaiveDate;

/// Orders task orders for display: by status precedence
/// (see [`super::TaskOrderStatus::SORT_ORDERING`]), then by creation time.
///
/// Both passes are stable, so orders sharing a status keep their creation
/// order and orders created at the same instant keep their input order.
#[must_use]
pub fn sort_task_orders(
    mut task_orders: Vec<TaskOrder>,
    today: NaiveDate,
    policy: &dyn ClinCompletenessPolicy,
) -> Vec<TaskOrder> {
    task_orders.sort_by_key(TaskOrder::created_at);
    task_orders.sort_by_cached_key(|task_order| task_order.status_on(today, policy).sort_rank());
    task_orders
}

/// Returns the task orders that are expired on `today`, preserving input
/// order.
#[must_use]
pub fn expired_task_orders(task_orders: Vec<TaskOrder>, today: NaiveDate) -> Vec<TaskOrder> {
    task_orders
        .into_iter()
        .filter(|task_order| task_order.is_expired_on(today))
        .collect()
}
