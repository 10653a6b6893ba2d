//! Diesel row models for task order persistence.

use super::schema::{attachments, clins, task_orders};
use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use rust_decimal::Decimal;

/// Query result and insert row for task order records.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = task_orders)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskOrderRow {
    /// Task order identifier.
    pub id: uuid::Uuid,
    /// Owning portfolio identifier.
    pub portfolio_id: uuid::Uuid,
    /// Contract number.
    pub number: Option<String>,
    /// Signed PDF attachment.
    pub pdf_attachment_id: Option<uuid::Uuid>,
    /// Signer identity.
    pub signer_dod_id: Option<String>,
    /// Signing timestamp.
    pub signed_at: Option<DateTime<Utc>>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Query result and insert row for CLIN records.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = clins)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ClinRow {
    /// CLIN identifier.
    pub id: uuid::Uuid,
    /// Owning task order.
    pub task_order_id: uuid::Uuid,
    /// CLIN number.
    pub number: String,
    /// Period of performance start.
    pub start_date: NaiveDate,
    /// Period of performance end.
    pub end_date: NaiveDate,
    /// Total contract value.
    pub total_amount: Option<Decimal>,
    /// Obligated amount.
    pub obligated_amount: Option<Decimal>,
    /// Billing category.
    pub jedi_clin_type: Option<String>,
    /// Zero-based position within the owning task order.
    pub position: i32,
}

/// Query result and insert row for attachment records.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = attachments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct AttachmentRow {
    /// Attachment identifier.
    pub id: uuid::Uuid,
    /// Original upload filename.
    pub filename: String,
    /// Object-store key.
    pub object_name: String,
}
