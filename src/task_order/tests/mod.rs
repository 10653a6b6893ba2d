//! Unit tests for the task order module.
//!
//! Tests are organised by domain concept, with service tests running against
//! the in-memory adapters.

mod support;
