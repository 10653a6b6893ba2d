//! Identifier and validated scalar types for the task order domain.

use super::TaskOrderDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

macro_rules! uuid_identifier {
    ($(#[$meta:meta])* $name:ident, $noun:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            #[doc = concat!("Creates a new random ", $noun, " identifier.")]
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            #[doc = concat!("Creates a ", $noun, " identifier from an existing UUID.")]
            #[must_use]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the wrapped UUID.
            #[must_use]
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl AsRef<Uuid> for $name {
            fn as_ref(&self) -> &Uuid {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

uuid_identifier!(
    /// Unique identifier for a task order.
    TaskOrderId,
    "task order"
);

uuid_identifier!(
    /// Unique identifier for a contract line item.
    ClinId,
    "CLIN"
);

uuid_identifier!(
    /// Identifier of the portfolio that owns a task order.
    PortfolioId,
    "portfolio"
);

uuid_identifier!(
    /// Unique identifier for an uploaded attachment.
    AttachmentId,
    "attachment"
);

/// Contract number of a task order.
///
/// Numbers are unique across task orders; the uniqueness check belongs to the
/// repository.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TaskOrderNumber(String);

impl TaskOrderNumber {
    /// Creates a validated task order number.
    ///
    /// # Errors
    ///
    /// Returns [`TaskOrderDomainError::EmptyTaskOrderNumber`] when the value
    /// is blank.
    pub fn new(value: impl Into<String>) -> Result<Self, TaskOrderDomainError> {
        let raw = value.into();
        let normalized = raw.trim();
        if normalized.is_empty() {
            return Err(TaskOrderDomainError::EmptyTaskOrderNumber);
        }
        Ok(Self(normalized.to_owned()))
    }

    /// Returns the number as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for TaskOrderNumber {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for TaskOrderNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for TaskOrderNumber {
    type Error = TaskOrderDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TaskOrderNumber> for String {
    fn from(value: TaskOrderNumber) -> Self {
        value.0
    }
}

/// Identity (`DoD` ID) of the contracting officer who signed a task order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SignerId(String);

impl SignerId {
    /// Creates a validated signer identity.
    ///
    /// # Errors
    ///
    /// Returns [`TaskOrderDomainError::EmptySignerId`] when the value is blank.
    pub fn new(value: impl Into<String>) -> Result<Self, TaskOrderDomainError> {
        let raw = value.into();
        let normalized = raw.trim();
        if normalized.is_empty() {
            return Err(TaskOrderDomainError::EmptySignerId);
        }
        Ok(Self(normalized.to_owned()))
    }

    /// Returns the signer identity as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SignerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for SignerId {
    type Error = TaskOrderDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SignerId> for String {
    fn from(value: SignerId) -> Self {
        value.0
    }
}
