//! Service layer for creating, updating, signing, and listing task orders.

use crate::task_order::{
    domain::{
        Attachment, AttachmentInput, ClinCompletenessPolicy, NewClin, PortfolioId,
        RequiredClinFields, SignerId, TaskOrder, TaskOrderDomainError, TaskOrderFinancials,
        TaskOrderId, TaskOrderNumber, TaskOrderStatus, expired_task_orders, sort_task_orders,
    },
    ports::{
        AttachmentRepository, AttachmentRepositoryError, TaskOrderRepository,
        TaskOrderRepositoryError,
    },
};
use chrono::NaiveDate;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Request payload for creating a task order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskOrderRequest {
    portfolio_id: PortfolioId,
    number: Option<String>,
    clins: Vec<NewClin>,
    pdf: AttachmentInput,
}

impl CreateTaskOrderRequest {
    /// Creates a request for an empty draft owned by `portfolio_id`.
    #[must_use]
    pub fn new(portfolio_id: PortfolioId) -> Self {
        Self {
            portfolio_id,
            number: None,
            clins: Vec::new(),
            pdf: AttachmentInput::None,
        }
    }

    /// Sets the contract number.
    #[must_use]
    pub fn with_number(mut self, number: impl Into<String>) -> Self {
        self.number = Some(number.into());
        self
    }

    /// Sets the initial CLINs.
    #[must_use]
    pub fn with_clins(mut self, clins: impl IntoIterator<Item = NewClin>) -> Self {
        self.clins = clins.into_iter().collect();
        self
    }

    /// Sets the signed PDF.
    #[must_use]
    pub fn with_pdf(mut self, pdf: impl Into<AttachmentInput>) -> Self {
        self.pdf = pdf.into();
        self
    }
}

/// Request payload for updating a task order.
///
/// The PDF is always overwritten (use [`AttachmentInput::Existing`] to keep
/// it). An empty CLIN list keeps the current CLINs; a non-empty one replaces
/// them all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateTaskOrderRequest {
    id: TaskOrderId,
    number: Option<String>,
    clins: Vec<NewClin>,
    pdf: AttachmentInput,
}

impl UpdateTaskOrderRequest {
    /// Creates an update request that clears the number and PDF and keeps
    /// the CLINs.
    #[must_use]
    pub fn new(id: TaskOrderId) -> Self {
        Self {
            id,
            number: None,
            clins: Vec::new(),
            pdf: AttachmentInput::None,
        }
    }

    /// Sets the contract number.
    #[must_use]
    pub fn with_number(mut self, number: impl Into<String>) -> Self {
        self.number = Some(number.into());
        self
    }

    /// Sets the replacement CLINs.
    #[must_use]
    pub fn with_clins(mut self, clins: impl IntoIterator<Item = NewClin>) -> Self {
        self.clins = clins.into_iter().collect();
        self
    }

    /// Sets the signed PDF.
    #[must_use]
    pub fn with_pdf(mut self, pdf: impl Into<AttachmentInput>) -> Self {
        self.pdf = pdf.into();
        self
    }
}

/// Request payload for signing a task order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignTaskOrderRequest {
    id: TaskOrderId,
    signer: String,
}

impl SignTaskOrderRequest {
    /// Creates a signing request.
    #[must_use]
    pub fn new(id: TaskOrderId, signer: impl Into<String>) -> Self {
        Self {
            id,
            signer: signer.into(),
        }
    }
}

/// Service-level errors for task order operations.
#[derive(Debug, Error)]
pub enum TaskOrderServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskOrderDomainError),
    /// Task order repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskOrderRepositoryError),
    /// Attachment repository operation failed.
    #[error(transparent)]
    Attachment(#[from] AttachmentRepositoryError),
}

/// Result type for task order service operations.
pub type TaskOrderServiceResult<T> = Result<T, TaskOrderServiceError>;

/// Task order lifecycle orchestration service.
#[derive(Clone)]
pub struct TaskOrderService<R, A, C>
where
    R: TaskOrderRepository,
    A: AttachmentRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    attachments: Arc<A>,
    clock: Arc<C>,
    policy: Arc<dyn ClinCompletenessPolicy>,
}

impl<R, A, C> TaskOrderService<R, A, C>
where
    R: TaskOrderRepository,
    A: AttachmentRepository,
    C: Clock + Send + Sync,
{
    /// Creates a service using the [`RequiredClinFields`] completeness policy.
    #[must_use]
    pub fn new(repository: Arc<R>, attachments: Arc<A>, clock: Arc<C>) -> Self {
        Self {
            repository,
            attachments,
            clock,
            policy: Arc::new(RequiredClinFields),
        }
    }

    /// Replaces the CLIN completeness policy.
    #[must_use]
    pub fn with_completeness_policy(
        mut self,
        policy: impl ClinCompletenessPolicy + 'static,
    ) -> Self {
        self.policy = Arc::new(policy);
        self
    }

    /// Returns the clock's current UTC date.
    #[must_use]
    pub fn today(&self) -> NaiveDate {
        self.clock.utc().date_naive()
    }

    /// Creates and stores a task order with its CLINs.
    ///
    /// # Errors
    ///
    /// Returns [`TaskOrderServiceError::Domain`] for an invalid number,
    /// [`TaskOrderServiceError::Attachment`] when the PDF cannot be resolved,
    /// or [`TaskOrderServiceError::Repository`] when the number already
    /// exists ([`TaskOrderRepositoryError::DuplicateNumber`]) or storage
    /// fails.
    pub async fn create(&self, request: CreateTaskOrderRequest) -> TaskOrderServiceResult<TaskOrder> {
        let CreateTaskOrderRequest {
            portfolio_id,
            number,
            clins,
            pdf,
        } = request;

        let task_order_number = number.map(TaskOrderNumber::new).transpose()?;
        let resolved_pdf = self.resolve_attachment(pdf).await?;
        let mut task_order =
            TaskOrder::new(portfolio_id, task_order_number, resolved_pdf, &*self.clock);
        task_order.replace_clins(clins, &*self.clock);

        self.repository.store(&task_order).await?;
        info!(
            task_order_id = %task_order.id(),
            portfolio_id = %portfolio_id,
            clin_count = task_order.clins().len(),
            "created task order"
        );
        Ok(task_order)
    }

    /// Updates the PDF, CLINs, and number of a task order.
    ///
    /// # Errors
    ///
    /// Returns [`TaskOrderServiceError::Repository`] with
    /// [`TaskOrderRepositoryError::NotFound`] for an unknown task order or
    /// [`TaskOrderRepositoryError::DuplicateNumber`] when the new number is
    /// taken, and [`TaskOrderServiceError::Domain`] for an invalid number.
    pub async fn update(&self, request: UpdateTaskOrderRequest) -> TaskOrderServiceResult<TaskOrder> {
        let UpdateTaskOrderRequest {
            id,
            number,
            clins,
            pdf,
        } = request;

        let task_order_number = number.map(TaskOrderNumber::new).transpose()?;
        let mut task_order = self.require(id).await?;
        let resolved_pdf = self.resolve_attachment(pdf).await?;

        task_order.set_pdf(resolved_pdf, &*self.clock);
        let clins_replaced = task_order.replace_clins(clins, &*self.clock);
        let number_changed = task_order.set_number(task_order_number, &*self.clock);

        self.repository.update(&task_order).await?;
        info!(
            task_order_id = %id,
            clins_replaced,
            number_changed,
            "updated task order"
        );
        Ok(task_order)
    }

    /// Records the contracting officer's signature.
    ///
    /// Completeness is not checked; callers gate signature capture on
    /// [`TaskOrderStatus::Unsigned`].
    ///
    /// # Errors
    ///
    /// Returns [`TaskOrderServiceError::Domain`] for a blank signer or
    /// [`TaskOrderServiceError::Repository`] when the task order is unknown
    /// or storage fails.
    pub async fn sign(&self, request: SignTaskOrderRequest) -> TaskOrderServiceResult<TaskOrder> {
        let signer = SignerId::new(request.signer)?;
        let mut task_order = self.require(request.id).await?;
        task_order.sign(signer, &*self.clock);

        self.repository.update(&task_order).await?;
        info!(task_order_id = %request.id, "signed task order");
        Ok(task_order)
    }

    /// Deletes a task order and its CLINs.
    ///
    /// # Errors
    ///
    /// Returns [`TaskOrderServiceError::Repository`] when the task order is
    /// unknown or storage fails.
    pub async fn delete(&self, id: TaskOrderId) -> TaskOrderServiceResult<()> {
        self.repository.delete(id).await?;
        info!(task_order_id = %id, "deleted task order");
        Ok(())
    }

    /// Retrieves a task order by identifier.
    ///
    /// Returns `Ok(None)` when the task order does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`TaskOrderServiceError::Repository`] when lookup fails.
    pub async fn find_by_id(&self, id: TaskOrderId) -> TaskOrderServiceResult<Option<TaskOrder>> {
        Ok(self.repository.find_by_id(id).await?)
    }

    /// Derives the current status of `task_order`.
    #[must_use]
    pub fn derive_status(&self, task_order: &TaskOrder) -> TaskOrderStatus {
        task_order.status_on(self.today(), self.policy.as_ref())
    }

    /// Computes obligated funds, contract total, and days to expiration.
    #[must_use]
    pub fn financials(&self, task_order: &TaskOrder) -> TaskOrderFinancials {
        task_order.financials(self.today())
    }

    /// Returns the portfolio's task orders in display order.
    ///
    /// # Errors
    ///
    /// Returns [`TaskOrderServiceError::Repository`] when lookup fails.
    pub async fn list_sorted(
        &self,
        portfolio_id: PortfolioId,
    ) -> TaskOrderServiceResult<Vec<TaskOrder>> {
        let task_orders = self.repository.list_by_portfolio(portfolio_id).await?;
        debug!(portfolio_id = %portfolio_id, count = task_orders.len(), "sorting task orders");
        Ok(sort_task_orders(
            task_orders,
            self.today(),
            self.policy.as_ref(),
        ))
    }

    /// Returns the portfolio's expired task orders, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`TaskOrderServiceError::Repository`] when lookup fails.
    pub async fn expired_task_orders(
        &self,
        portfolio_id: PortfolioId,
    ) -> TaskOrderServiceResult<Vec<TaskOrder>> {
        let mut task_orders = self.repository.list_by_portfolio(portfolio_id).await?;
        task_orders.sort_by_key(TaskOrder::created_at);
        Ok(expired_task_orders(task_orders, self.today()))
    }

    async fn require(&self, id: TaskOrderId) -> TaskOrderServiceResult<TaskOrder> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(TaskOrderServiceError::Repository(
                TaskOrderRepositoryError::NotFound(id),
            ))
    }

    async fn resolve_attachment(
        &self,
        input: AttachmentInput,
    ) -> TaskOrderServiceResult<Option<Attachment>> {
        match input {
            AttachmentInput::Existing(attachment) => Ok(Some(attachment)),
            AttachmentInput::New { .. } => match input.upload_fields() {
                Some((filename, object_name)) => Ok(Some(
                    self.attachments
                        .get_or_create(filename, object_name)
                        .await?,
                )),
                None => Ok(None),
            },
            AttachmentInput::None => Ok(None),
        }
    }
}
