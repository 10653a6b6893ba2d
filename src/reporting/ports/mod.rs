//! Port contracts for spend reporting.

pub mod spend_source;

#[cfg(test)]
pub use spend_source::MockSpendDataSource;
pub use spend_source::{SpendDataSource, SpendSourceError, SpendSourceResult};
