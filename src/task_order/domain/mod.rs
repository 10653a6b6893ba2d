//! Domain model for task orders and their contract line items.
//!
//! Everything here is pure: derivations take "today" or a clock as an
//! argument and never touch persistence.

mod attachment;
mod clin;
mod completeness;
mod error;
mod ids;
mod ordering;
mod status;
mod task_order;

pub use attachment::{Attachment, AttachmentInput};
pub use clin::{Clin, ClinNumber, JediClinType, NewClin};
pub use completeness::{ClinCompletenessPolicy, RequiredClinFields};
pub use error::{ParseJediClinTypeError, ParseTaskOrderStatusError, TaskOrderDomainError};
pub use ids::{AttachmentId, ClinId, PortfolioId, SignerId, TaskOrderId, TaskOrderNumber};
pub use ordering::{expired_task_orders, sort_task_orders};
pub use status::TaskOrderStatus;
pub use task_order::{PersistedTaskOrderData, TaskOrder, TaskOrderFinancials};
