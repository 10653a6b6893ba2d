//! Unit tests for spend aggregation and the report service.
