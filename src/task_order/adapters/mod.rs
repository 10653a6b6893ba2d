//! Adapter implementations for task order ports.

pub mod memory;
pub mod postgres;
