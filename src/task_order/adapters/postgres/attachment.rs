//! `PostgreSQL` repository implementation for attachments.

use super::{
    TaskOrderPgPool, models::AttachmentRow, repository::row_to_attachment, schema::attachments,
};
use crate::task_order::{
    domain::{Attachment, AttachmentId},
    ports::{AttachmentRepository, AttachmentRepositoryError, AttachmentRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use uuid::Uuid;

/// `PostgreSQL`-backed attachment repository.
#[derive(Debug, Clone)]
pub struct PostgresAttachmentRepository {
    pool: TaskOrderPgPool,
}

impl PostgresAttachmentRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TaskOrderPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> AttachmentRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> AttachmentRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(AttachmentRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(AttachmentRepositoryError::persistence)?
    }
}

#[async_trait]
impl AttachmentRepository for PostgresAttachmentRepository {
    async fn get_or_create(
        &self,
        filename: &str,
        object_name: &str,
    ) -> AttachmentRepositoryResult<Attachment> {
        let candidate = AttachmentRow {
            id: Uuid::new_v4(),
            filename: filename.to_owned(),
            object_name: object_name.to_owned(),
        };

        self.run_blocking(move |connection| {
            // Concurrent uploads of the same object resolve to whichever row
            // won the insert.
            diesel::insert_into(attachments::table)
                .values(&candidate)
                .on_conflict(attachments::object_name)
                .do_nothing()
                .execute(connection)
                .map_err(AttachmentRepositoryError::persistence)?;

            let row = attachments::table
                .filter(attachments::object_name.eq(&candidate.object_name))
                .select(AttachmentRow::as_select())
                .first::<AttachmentRow>(connection)
                .map_err(AttachmentRepositoryError::persistence)?;
            Ok(row_to_attachment(row))
        })
        .await
    }

    async fn find_by_id(&self, id: AttachmentId) -> AttachmentRepositoryResult<Option<Attachment>> {
        self.run_blocking(move |connection| {
            let row = attachments::table
                .filter(attachments::id.eq(id.into_inner()))
                .select(AttachmentRow::as_select())
                .first::<AttachmentRow>(connection)
                .optional()
                .map_err(AttachmentRepositoryError::persistence)?;
            Ok(row.map(row_to_attachment))
        })
        .await
    }
}
