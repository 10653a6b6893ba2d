//! `PostgreSQL` repository implementation for task order storage.

use super::{
    models::{AttachmentRow, ClinRow, TaskOrderRow},
    schema::{attachments, clins, task_orders},
};
use crate::task_order::{
    domain::{
        Attachment, AttachmentId, Clin, ClinId, ClinNumber, JediClinType, NewClin,
        PersistedTaskOrderData, PortfolioId, SignerId, TaskOrder, TaskOrderId, TaskOrderNumber,
    },
    ports::{TaskOrderRepository, TaskOrderRepositoryError, TaskOrderRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};
use std::collections::HashMap;
use uuid::Uuid;

/// `PostgreSQL` connection pool type used by task order adapters.
pub type TaskOrderPgPool = Pool<ConnectionManager<PgConnection>>;

const NUMBER_UNIQUE_CONSTRAINT: &str = "task_orders_number_key";

/// `PostgreSQL`-backed task order repository.
///
/// Every write runs in a single transaction so that CLIN replacement is
/// atomic to concurrent readers.
#[derive(Debug, Clone)]
pub struct PostgresTaskOrderRepository {
    pool: TaskOrderPgPool,
}

impl PostgresTaskOrderRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TaskOrderPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskOrderRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskOrderRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskOrderRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskOrderRepositoryError::persistence)?
    }
}

impl From<DieselError> for TaskOrderRepositoryError {
    fn from(err: DieselError) -> Self {
        Self::persistence(err)
    }
}

#[async_trait]
impl TaskOrderRepository for PostgresTaskOrderRepository {
    async fn store(&self, task_order: &TaskOrder) -> TaskOrderRepositoryResult<()> {
        let task_order_id = task_order.id();
        let number = task_order.number().cloned();
        let row = to_task_order_row(task_order);
        let clin_rows = to_clin_rows(task_order);

        self.run_blocking(move |connection| {
            connection.transaction::<_, TaskOrderRepositoryError, _>(|tx| {
                // The pre-check gives a semantic error; the unique constraint
                // still guards the window between check and insert.
                ensure_number_available(tx, number.as_ref(), task_order_id)?;

                diesel::insert_into(task_orders::table)
                    .values(&row)
                    .execute(tx)
                    .map_err(|err| map_write_error(err, number.as_ref(), task_order_id))?;
                insert_clins(tx, &clin_rows)?;
                Ok(())
            })
        })
        .await
    }

    async fn update(&self, task_order: &TaskOrder) -> TaskOrderRepositoryResult<()> {
        let task_order_id = task_order.id();
        let number = task_order.number().cloned();
        let row = to_task_order_row(task_order);
        let clin_rows = to_clin_rows(task_order);

        self.run_blocking(move |connection| {
            connection.transaction::<_, TaskOrderRepositoryError, _>(|tx| {
                ensure_number_available(tx, number.as_ref(), task_order_id)?;

                let updated_count =
                    diesel::update(task_orders::table.filter(task_orders::id.eq(row.id)))
                        .set((
                            task_orders::number.eq(row.number.clone()),
                            task_orders::pdf_attachment_id.eq(row.pdf_attachment_id),
                            task_orders::signer_dod_id.eq(row.signer_dod_id.clone()),
                            task_orders::signed_at.eq(row.signed_at),
                            task_orders::updated_at.eq(row.updated_at),
                        ))
                        .execute(tx)
                        .map_err(|err| map_write_error(err, number.as_ref(), task_order_id))?;
                if updated_count == 0 {
                    return Err(TaskOrderRepositoryError::NotFound(task_order_id));
                }

                diesel::delete(clins::table.filter(clins::task_order_id.eq(row.id)))
                    .execute(tx)?;
                insert_clins(tx, &clin_rows)?;
                Ok(())
            })
        })
        .await
    }

    async fn delete(&self, id: TaskOrderId) -> TaskOrderRepositoryResult<()> {
        self.run_blocking(move |connection| {
            connection.transaction::<_, TaskOrderRepositoryError, _>(|tx| {
                diesel::delete(clins::table.filter(clins::task_order_id.eq(id.into_inner())))
                    .execute(tx)?;
                let deleted_count =
                    diesel::delete(task_orders::table.filter(task_orders::id.eq(id.into_inner())))
                        .execute(tx)?;
                if deleted_count == 0 {
                    return Err(TaskOrderRepositoryError::NotFound(id));
                }
                Ok(())
            })
        })
        .await
    }

    async fn find_by_id(&self, id: TaskOrderId) -> TaskOrderRepositoryResult<Option<TaskOrder>> {
        self.run_blocking(move |connection| {
            let row = task_orders::table
                .filter(task_orders::id.eq(id.into_inner()))
                .select(TaskOrderRow::as_select())
                .first::<TaskOrderRow>(connection)
                .optional()?;
            let Some(found) = row else {
                return Ok(None);
            };
            Ok(load_aggregates(connection, vec![found])?.pop())
        })
        .await
    }

    async fn list_by_portfolio(
        &self,
        portfolio_id: PortfolioId,
    ) -> TaskOrderRepositoryResult<Vec<TaskOrder>> {
        self.run_blocking(move |connection| {
            let rows = task_orders::table
                .filter(task_orders::portfolio_id.eq(portfolio_id.into_inner()))
                .order(task_orders::created_at.asc())
                .select(TaskOrderRow::as_select())
                .load::<TaskOrderRow>(connection)?;
            load_aggregates(connection, rows)
        })
        .await
    }
}

fn ensure_number_available(
    connection: &mut PgConnection,
    number: Option<&TaskOrderNumber>,
    task_order_id: TaskOrderId,
) -> TaskOrderRepositoryResult<()> {
    let Some(candidate) = number else {
        return Ok(());
    };
    let owner = task_orders::table
        .filter(task_orders::number.eq(candidate.as_str()))
        .select(task_orders::id)
        .first::<Uuid>(connection)
        .optional()?;
    match owner {
        Some(owner_id) if owner_id != task_order_id.into_inner() => {
            Err(TaskOrderRepositoryError::DuplicateNumber(candidate.clone()))
        }
        _ => Ok(()),
    }
}

fn insert_clins(connection: &mut PgConnection, rows: &[ClinRow]) -> TaskOrderRepositoryResult<()> {
    if rows.is_empty() {
        return Ok(());
    }
    diesel::insert_into(clins::table)
        .values(rows)
        .execute(connection)?;
    Ok(())
}

fn map_write_error(
    err: DieselError,
    number: Option<&TaskOrderNumber>,
    task_order_id: TaskOrderId,
) -> TaskOrderRepositoryError {
    match (err, number) {
        (DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info), Some(taken))
            if is_number_unique_violation(info.as_ref()) =>
        {
            TaskOrderRepositoryError::DuplicateNumber(taken.clone())
        }
        (DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _), _) => {
            TaskOrderRepositoryError::DuplicateTaskOrder(task_order_id)
        }
        (other, _) => TaskOrderRepositoryError::persistence(other),
    }
}

fn is_number_unique_violation(info: &dyn DatabaseErrorInformation) -> bool {
    info.constraint_name()
        .is_some_and(|name| name == NUMBER_UNIQUE_CONSTRAINT)
}

/// Loads CLINs and PDF attachments for `rows` and assembles aggregates,
/// preserving row order.
fn load_aggregates(
    connection: &mut PgConnection,
    rows: Vec<TaskOrderRow>,
) -> TaskOrderRepositoryResult<Vec<TaskOrder>> {
    let task_order_ids: Vec<Uuid> = rows.iter().map(|row| row.id).collect();
    let attachment_ids: Vec<Uuid> = rows.iter().filter_map(|row| row.pdf_attachment_id).collect();

    let clin_rows = clins::table
        .filter(clins::task_order_id.eq_any(task_order_ids))
        .order((clins::task_order_id.asc(), clins::position.asc()))
        .select(ClinRow::as_select())
        .load::<ClinRow>(connection)?;
    let attachment_rows = attachments::table
        .filter(attachments::id.eq_any(attachment_ids))
        .select(AttachmentRow::as_select())
        .load::<AttachmentRow>(connection)?;

    let mut clins_by_order: HashMap<Uuid, Vec<ClinRow>> = HashMap::new();
    for clin_row in clin_rows {
        clins_by_order
            .entry(clin_row.task_order_id)
            .or_default()
            .push(clin_row);
    }
    let attachments_by_id: HashMap<Uuid, AttachmentRow> = attachment_rows
        .into_iter()
        .map(|attachment| (attachment.id, attachment))
        .collect();

    rows.into_iter()
        .map(|row| {
            let owned_clins = clins_by_order.remove(&row.id).unwrap_or_default();
            let pdf = row
                .pdf_attachment_id
                .and_then(|id| attachments_by_id.get(&id).cloned());
            row_to_task_order(row, owned_clins, pdf)
        })
        .collect()
}

pub(super) fn to_task_order_row(task_order: &TaskOrder) -> TaskOrderRow {
    TaskOrderRow {
        id: task_order.id().into_inner(),
        portfolio_id: task_order.portfolio_id().into_inner(),
        number: task_order.number().map(|number| number.as_str().to_owned()),
        pdf_attachment_id: task_order.pdf().map(|pdf| pdf.id().into_inner()),
        signer_dod_id: task_order.signer().map(|signer| signer.as_str().to_owned()),
        signed_at: task_order.signed_at(),
        created_at: task_order.created_at(),
        updated_at: task_order.updated_at(),
    }
}

pub(super) fn to_clin_rows(task_order: &TaskOrder) -> Vec<ClinRow> {
    task_order
        .clins()
        .iter()
        .zip(0_i32..)
        .map(|(clin, position)| ClinRow {
            id: clin.id().into_inner(),
            task_order_id: clin.task_order_id().into_inner(),
            number: clin.number().as_str().to_owned(),
            start_date: clin.start_date(),
            end_date: clin.end_date(),
            total_amount: clin.total_amount(),
            obligated_amount: clin.obligated_amount(),
            jedi_clin_type: clin.jedi_clin_type().map(|kind| kind.as_str().to_owned()),
            position,
        })
        .collect()
}

pub(super) fn row_to_clin(row: ClinRow) -> TaskOrderRepositoryResult<Clin> {
    let ClinRow {
        id,
        task_order_id,
        number,
        start_date,
        end_date,
        total_amount,
        obligated_amount,
        jedi_clin_type,
        ..
    } = row;

    let clin_number = ClinNumber::new(number).map_err(TaskOrderRepositoryError::persistence)?;
    let clin_type = jedi_clin_type
        .as_deref()
        .map(|value| JediClinType::try_from(value))
        .transpose()
        .map_err(TaskOrderRepositoryError::persistence)?;

    let data = NewClin {
        number: clin_number,
        start_date,
        end_date,
        total_amount,
        obligated_amount,
        jedi_clin_type: clin_type,
    };
    Ok(Clin::from_parts(
        ClinId::from_uuid(id),
        TaskOrderId::from_uuid(task_order_id),
        data,
    ))
}

pub(super) fn row_to_attachment(row: AttachmentRow) -> Attachment {
    Attachment::from_parts(AttachmentId::from_uuid(row.id), row.filename, row.object_name)
}

pub(super) fn row_to_task_order(
    row: TaskOrderRow,
    mut clin_rows: Vec<ClinRow>,
    pdf: Option<AttachmentRow>,
) -> TaskOrderRepositoryResult<TaskOrder> {
    clin_rows.sort_by_key(|clin| clin.position);
    let TaskOrderRow {
        id,
        portfolio_id,
        number,
        signer_dod_id,
        signed_at,
        created_at,
        updated_at,
        ..
    } = row;

    let task_order_number = number
        .map(TaskOrderNumber::new)
        .transpose()
        .map_err(TaskOrderRepositoryError::persistence)?;
    let signer = signer_dod_id
        .map(SignerId::new)
        .transpose()
        .map_err(TaskOrderRepositoryError::persistence)?;
    let owned_clins = clin_rows
        .into_iter()
        .map(row_to_clin)
        .collect::<TaskOrderRepositoryResult<Vec<_>>>()?;

    Ok(TaskOrder::from_persisted(PersistedTaskOrderData {
        id: TaskOrderId::from_uuid(id),
        portfolio_id: PortfolioId::from_uuid(portfolio_id),
        number: task_order_number,
        pdf: pdf.map(row_to_attachment),
        clins: owned_clins,
        signer,
        signed_at,
        created_at,
        updated_at,
    }))
}
