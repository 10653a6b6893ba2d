//! Port contracts for task order lifecycle management.
//!
//! Ports define infrastructure-agnostic interfaces used by task order
//! services.

pub mod attachment;
pub mod repository;

pub use attachment::{AttachmentRepository, AttachmentRepositoryError, AttachmentRepositoryResult};
pub use repository::{TaskOrderRepository, TaskOrderRepositoryError, TaskOrderRepositoryResult};
