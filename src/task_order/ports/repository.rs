//! Repository port for task order and CLIN persistence.

use crate::task_order::domain::{PortfolioId, TaskOrder, TaskOrderId, TaskOrderNumber};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task order repository operations.
pub type TaskOrderRepositoryResult<T> = Result<T, TaskOrderRepositoryError>;

/// Task order persistence contract.
///
/// A task order owns its CLINs: they are written, replaced, and deleted with
/// the order as a single unit.
#[async_trait]
pub trait TaskOrderRepository: Send + Sync {
    /// Stores a new task order together with its CLINs.
    ///
    /// # Errors
    ///
    /// Returns [`TaskOrderRepositoryError::DuplicateTaskOrder`] when the
    /// identifier already exists or [`TaskOrderRepositoryError::DuplicateNumber`]
    /// when another task order already uses the number.
    async fn store(&self, task_order: &TaskOrder) -> TaskOrderRepositoryResult<()>;

    /// Persists changes to an existing task order.
    ///
    /// The stored CLIN set is replaced by the aggregate's CLIN set: existing
    /// rows are deleted before the new ones are written, and readers observe
    /// either the old set or the new set.
    ///
    /// # Errors
    ///
    /// Returns [`TaskOrderRepositoryError::NotFound`] when the task order does
    /// not exist or [`TaskOrderRepositoryError::DuplicateNumber`] when the
    /// number collides with another task order.
    async fn update(&self, task_order: &TaskOrder) -> TaskOrderRepositoryResult<()>;

    /// Deletes a task order and every CLIN it owns.
    ///
    /// # Errors
    ///
    /// Returns [`TaskOrderRepositoryError::NotFound`] when the task order does
    /// not exist.
    async fn delete(&self, id: TaskOrderId) -> TaskOrderRepositoryResult<()>;

    /// Finds a task order by identifier.
    ///
    /// Returns `None` when the task order does not exist.
    async fn find_by_id(&self, id: TaskOrderId) -> TaskOrderRepositoryResult<Option<TaskOrder>>;

    /// Returns every task order owned by a portfolio, in no particular order.
    async fn list_by_portfolio(
        &self,
        portfolio_id: PortfolioId,
    ) -> TaskOrderRepositoryResult<Vec<TaskOrder>>;
}

/// Errors returned by task order repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskOrderRepositoryError {
    /// A task order with the same identifier already exists.
    #[error("duplicate task order identifier: {0}")]
    DuplicateTaskOrder(TaskOrderId),

    /// Another task order already uses the contract number.
    #[error("task order number already exists: {0}")]
    DuplicateNumber(TaskOrderNumber),

    /// The task order was not found.
    #[error("task order not found: {0}")]
    NotFound(TaskOrderId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskOrderRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
