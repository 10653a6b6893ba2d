//! In-memory repository for task orders.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::task_order::{
    domain::{PortfolioId, TaskOrder, TaskOrderId, TaskOrderNumber},
    ports::{TaskOrderRepository, TaskOrderRepositoryError, TaskOrderRepositoryResult},
};

/// Thread-safe in-memory task order repository.
///
/// Each task order is stored with its CLINs as one value, so a CLIN
/// replacement is visible atomically once the write lock is released.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskOrderRepository {
    state: Arc<RwLock<InMemoryTaskOrderState>>,
}

#[derive(Debug, Default)]
struct InMemoryTaskOrderState {
    task_orders: HashMap<TaskOrderId, TaskOrder>,
    number_index: HashMap<TaskOrderNumber, TaskOrderId>,
}

impl InMemoryTaskOrderRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: impl std::fmt::Display) -> TaskOrderRepositoryError {
    TaskOrderRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

/// Rejects `number` when another task order already claims it.
fn ensure_number_available(
    state: &InMemoryTaskOrderState,
    task_order: &TaskOrder,
) -> TaskOrderRepositoryResult<()> {
    let Some(number) = task_order.number() else {
        return Ok(());
    };
    match state.number_index.get(number) {
        Some(owner) if *owner != task_order.id() => {
            Err(TaskOrderRepositoryError::DuplicateNumber(number.clone()))
        }
        _ => Ok(()),
    }
}

#[async_trait]
impl TaskOrderRepository for InMemoryTaskOrderRepository {
    async fn store(&self, task_order: &TaskOrder) -> TaskOrderRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        if state.task_orders.contains_key(&task_order.id()) {
            return Err(TaskOrderRepositoryError::DuplicateTaskOrder(task_order.id()));
        }
        ensure_number_available(&state, task_order)?;

        if let Some(number) = task_order.number() {
            state.number_index.insert(number.clone(), task_order.id());
        }
        state.task_orders.insert(task_order.id(), task_order.clone());
        Ok(())
    }

    async fn update(&self, task_order: &TaskOrder) -> TaskOrderRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        let previous_number = state
            .task_orders
            .get(&task_order.id())
            .ok_or(TaskOrderRepositoryError::NotFound(task_order.id()))?
            .number()
            .cloned();
        ensure_number_available(&state, task_order)?;

        if previous_number.as_ref() != task_order.number() {
            if let Some(old) = previous_number {
                state.number_index.remove(&old);
            }
            if let Some(number) = task_order.number() {
                state.number_index.insert(number.clone(), task_order.id());
            }
        }
        state.task_orders.insert(task_order.id(), task_order.clone());
        Ok(())
    }

    async fn delete(&self, id: TaskOrderId) -> TaskOrderRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        let removed = state
            .task_orders
            .remove(&id)
            .ok_or(TaskOrderRepositoryError::NotFound(id))?;
        if let Some(number) = removed.number() {
            state.number_index.remove(number);
        }
        Ok(())
    }

    async fn find_by_id(&self, id: TaskOrderId) -> TaskOrderRepositoryResult<Option<TaskOrder>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.task_orders.get(&id).cloned())
    }

    async fn list_by_portfolio(
        &self,
        portfolio_id: PortfolioId,
    ) -> TaskOrderRepositoryResult<Vec<TaskOrder>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state
            .task_orders
            .values()
            .filter(|task_order| task_order.portfolio_id() == portfolio_id)
            .cloned()
            .collect())
    }
}
