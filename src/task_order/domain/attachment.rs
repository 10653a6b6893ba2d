//! Signed task order PDF attachments.

use super::{AttachmentId, TaskOrderDomainError};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Stored upload referenced by a task order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Attachment {
    id: AttachmentId,
    filename: String,
    object_name: String,
}

impl Attachment {
    /// Creates an attachment record with a fresh identifier.
    #[must_use]
    pub fn new(filename: impl Into<String>, object_name: impl Into<String>) -> Self {
        Self::from_parts(AttachmentId::new(), filename, object_name)
    }

    /// Reconstructs an attachment from persisted storage.
    #[must_use]
    pub fn from_parts(
        id: AttachmentId,
        filename: impl Into<String>,
        object_name: impl Into<String>,
    ) -> Self {
        Self {
            id,
            filename: filename.into(),
            object_name: object_name.into(),
        }
    }

    /// Returns the attachment identifier.
    #[must_use]
    pub const fn id(&self) -> AttachmentId {
        self.id
    }

    /// Returns the original upload filename.
    #[must_use]
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Returns the object-store key of the upload.
    #[must_use]
    pub fn object_name(&self) -> &str {
        &self.object_name
    }
}

/// Attachment value supplied when creating or updating a task order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AttachmentInput {
    /// Keep or set an already stored attachment.
    Existing(Attachment),
    /// Reference a freshly uploaded object.
    New {
        /// Original upload filename.
        filename: String,
        /// Object-store key.
        object_name: String,
    },
    /// No attachment.
    #[default]
    None,
}

impl AttachmentInput {
    /// Creates an input for a freshly uploaded object.
    #[must_use]
    pub fn new_upload(filename: impl Into<String>, object_name: impl Into<String>) -> Self {
        Self::New {
            filename: filename.into(),
            object_name: object_name.into(),
        }
    }

    /// Converts an untyped form or API payload into an attachment input.
    ///
    /// `null` maps to [`AttachmentInput::None`]. An object with an `id` plus
    /// `filename` and `object_name` maps to [`AttachmentInput::Existing`];
    /// without `id` it maps to [`AttachmentInput::New`]. Missing or blank
    /// upload fields are tolerated and resolve to no attachment.
    ///
    /// # Errors
    ///
    /// Returns [`TaskOrderDomainError::InvalidAttachmentType`] for any other
    /// JSON value.
    pub fn from_value(value: Value) -> Result<Self, TaskOrderDomainError> {
        match value {
            Value::Null => Ok(Self::None),
            Value::Object(fields) if fields.contains_key("id") => {
                serde_json::from_value::<Attachment>(Value::Object(fields))
                    .map(Self::Existing)
                    .map_err(|err| TaskOrderDomainError::InvalidAttachmentType(err.to_string()))
            }
            Value::Object(fields) => {
                let filename = string_field(&fields, "filename")?;
                let object_name = string_field(&fields, "object_name")?;
                Ok(Self::New {
                    filename,
                    object_name,
                })
            }
            other => Err(TaskOrderDomainError::InvalidAttachmentType(
                json_type_name(&other).to_owned(),
            )),
        }
    }

    /// Returns the upload fields when both are present and non-blank.
    #[must_use]
    pub fn upload_fields(&self) -> Option<(&str, &str)> {
        match self {
            Self::New {
                filename,
                object_name,
            } if !filename.trim().is_empty() && !object_name.trim().is_empty() => {
                Some((filename.as_str(), object_name.as_str()))
            }
            _ => None,
        }
    }
}

impl From<Attachment> for AttachmentInput {
    fn from(attachment: Attachment) -> Self {
        Self::Existing(attachment)
    }
}

impl From<Option<Attachment>> for AttachmentInput {
    fn from(attachment: Option<Attachment>) -> Self {
        attachment.map_or(Self::None, Self::Existing)
    }
}

fn string_field(
    fields: &serde_json::Map<String, Value>,
    key: &str,
) -> Result<String, TaskOrderDomainError> {
    match fields.get(key) {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(text)) => Ok(text.clone()),
        Some(other) => Err(TaskOrderDomainError::InvalidAttachmentType(format!(
            "{key} must be a string, found {}",
            json_type_name(other)
        ))),
    }
}

const fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
