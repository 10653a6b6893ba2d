//! Step definitions for task order status scenarios.

mod given;
mod when;
pub mod world;
