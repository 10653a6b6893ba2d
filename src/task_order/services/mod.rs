//! Application services for task order lifecycle orchestration.

mod lifecycle;

pub use lifecycle::{
    CreateTaskOrderRequest, SignTaskOrderRequest, TaskOrderService, TaskOrderServiceError,
    TaskOrderServiceResult, UpdateTaskOrderRequest,
};
