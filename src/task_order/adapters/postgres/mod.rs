//! `PostgreSQL` adapters for task order persistence.

mod attachment;
mod models;
mod repository;
mod schema;

pub use attachment::PostgresAttachmentRepository;
pub use repository::{PostgresTaskOrderRepository, TaskOrderPgPool};
