//! Clinledger: task order lifecycle and cloud spend reporting.
//!
//! This crate tracks the contracts (task orders) that fund a portfolio's
//! cloud usage, derives their lifecycle status from signature and CLIN
//! dates, and rolls up cloud spend for billing dashboards.
//!
//! # Architecture
//!
//! Each bounded context follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, fixtures)
//! - **Services**: Orchestration over ports
//!
//! # Modules
//!
//! - [`task_order`]: Task orders, CLINs, status derivation and persistence
//! - [`reporting`]: Spend aggregation by time bucket and CLIN type
//! - [`clock`]: Pinned clock for reports and tests
//! - [`config`]: Configuration for the `spend_report` binary

pub mod clock;
pub mod config;
pub mod reporting;
pub mod task_order;
