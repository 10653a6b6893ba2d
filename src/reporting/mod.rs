//! Spend reporting for portfolio billing dashboards.
//!
//! Spend arrives as an immutable tree (portfolio, application, environment,
//! time bucket, billing code, amount) from a [`ports::SpendDataSource`].
//! This module rolls it up into per-level monthly totals and per-billing-code
//! invoiced and estimated totals. Output is ordered by name at every level.
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Aggregation and report services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
