//! In-memory adapters for task order ports.
//!
//! These adapters are thread-safe and suitable for tests and fixtures
//! without a database.

mod attachment;
mod task_order;

pub use attachment::InMemoryAttachmentRepository;
pub use task_order::InMemoryTaskOrderRepository;
