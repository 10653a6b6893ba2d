//! Adapter implementations for the spend reporting ports.

pub mod fixture;

pub use fixture::FixtureSpendDataSource;
