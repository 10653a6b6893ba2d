//! Repository port for uploaded attachments.

use crate::task_order::domain::{Attachment, AttachmentId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for attachment repository operations.
pub type AttachmentRepositoryResult<T> = Result<T, AttachmentRepositoryError>;

/// Attachment persistence contract.
#[async_trait]
pub trait AttachmentRepository: Send + Sync {
    /// Returns the attachment stored under `object_name`, creating it with
    /// `filename` when none exists.
    async fn get_or_create(
        &self,
        filename: &str,
        object_name: &str,
    ) -> AttachmentRepositoryResult<Attachment>;

    /// Finds an attachment by identifier.
    async fn find_by_id(&self, id: AttachmentId) -> AttachmentRepositoryResult<Option<Attachment>>;
}

/// Errors returned by attachment repository implementations.
#[derive(Debug, Clone, Error)]
pub enum AttachmentRepositoryError {
    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl AttachmentRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
