//! Diesel schema for task order persistence.

diesel::table! {
    /// Uploaded documents referenced by task orders.
    attachments (id) {
        /// Attachment identifier.
        id -> Uuid,
        /// Original upload filename.
        #[max_length = 255]
        filename -> Varchar,
        /// Unique object-store key.
        #[max_length = 255]
        object_name -> Varchar,
    }
}

diesel::table! {
    /// Task order records.
    task_orders (id) {
        /// Task order identifier.
        id -> Uuid,
        /// Owning portfolio identifier.
        portfolio_id -> Uuid,
        /// Unique contract number.
        #[max_length = 255]
        number -> Nullable<Varchar>,
        /// Signed PDF attachment.
        pdf_attachment_id -> Nullable<Uuid>,
        /// Signer `DoD` identifier.
        #[max_length = 255]
        signer_dod_id -> Nullable<Varchar>,
        /// Signing timestamp.
        signed_at -> Nullable<Timestamptz>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Contract line items owned by task orders.
    clins (id) {
        /// CLIN identifier.
        id -> Uuid,
        /// Owning task order identifier.
        task_order_id -> Uuid,
        /// CLIN number.
        #[max_length = 50]
        number -> Varchar,
        /// Period of performance start.
        start_date -> Date,
        /// Period of performance end.
        end_date -> Date,
        /// Total contract value.
        total_amount -> Nullable<Numeric>,
        /// Obligated amount.
        obligated_amount -> Nullable<Numeric>,
        /// Billing category.
        #[max_length = 50]
        jedi_clin_type -> Nullable<Varchar>,
        /// Zero-based position within the owning task order.
        position -> Int4,
    }
}

diesel::joinable!(clins -> task_orders (task_order_id));
diesel::joinable!(task_orders -> attachments (pdf_attachment_id));

diesel::allow_tables_to_appear_in_same_query!(attachments, clins, task_orders);
