//! Derived task order status.

use super::ParseTaskOrderStatusError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Status of a task order, derived from its data and the current date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskOrderStatus {
    /// Missing PDF, number, or complete CLINs, and not signed.
    Draft,
    /// Complete but awaiting signature.
    Unsigned,
    /// Signed, with a period of performance that has not started.
    Upcoming,
    /// Signed and inside its period of performance.
    Active,
    /// Signed, with a period of performance that has ended.
    Expired,
}

impl TaskOrderStatus {
    /// Every status in display precedence.
    pub const SORT_ORDERING: [Self; 5] = [
        Self::Active,
        Self::Draft,
        Self::Upcoming,
        Self::Expired,
        Self::Unsigned,
    ];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Unsigned => "unsigned",
            Self::Upcoming => "upcoming",
            Self::Active => "active",
            Self::Expired => "expired",
        }
    }

    /// Returns the label shown to portfolio users.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::Unsigned => "Not signed",
            Self::Upcoming => "Upcoming",
            Self::Active => "Active",
            Self::Expired => "Expired",
        }
    }

    /// Position of this status in [`Self::SORT_ORDERING`].
    #[must_use]
    pub const fn sort_rank(self) -> u8 {
        match self {
            Self::Active => 0,
            Self::Draft => 1,
            Self::Upcoming => 2,
            Self::Expired => 3,
            Self::Unsigned => 4,
        }
    }
}

impl fmt::Display for TaskOrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl TryFrom<&str> for TaskOrderStatus {
    type Error = ParseTaskOrderStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "draft" => Ok(Self::Draft),
            "unsigned" | "not signed" => Ok(Self::Unsigned),
            "upcoming" => Ok(Self::Upcoming),
            "active" => Ok(Self::Active),
            "expired" => Ok(Self::Expired),
            _ => Err(ParseTaskOrderStatusError(value.to_owned())),
        }
    }
}
