//! In-memory repository for attachments.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::task_order::{
    domain::{Attachment, AttachmentId},
    ports::{AttachmentRepository, AttachmentRepositoryError, AttachmentRepositoryResult},
};

/// Thread-safe in-memory attachment repository keyed by object name.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAttachmentRepository {
    attachments: Arc<RwLock<HashMap<String, Attachment>>>,
}

impl InMemoryAttachmentRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: impl std::fmt::Display) -> AttachmentRepositoryError {
    AttachmentRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl AttachmentRepository for InMemoryAttachmentRepository {
    async fn get_or_create(
        &self,
        filename: &str,
        object_name: &str,
    ) -> AttachmentRepositoryResult<Attachment> {
        let mut attachments = self.attachments.write().map_err(lock_error)?;
        let attachment = attachments
            .entry(object_name.to_owned())
            .or_insert_with(|| Attachment::new(filename, object_name));
        Ok(attachment.clone())
    }

    async fn find_by_id(&self, id: AttachmentId) -> AttachmentRepositoryResult<Option<Attachment>> {
        let attachments = self.attachments.read().map_err(lock_error)?;
        Ok(attachments
            .values()
            .find(|attachment| attachment.id() == id)
            .cloned())
    }
}
