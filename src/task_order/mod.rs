//! Task order lifecycle and financial derivations.
//!
//! A task order funds a portfolio's cloud spend and is composed of CLINs
//! (contract line items). Its status is never stored: it is derived on every
//! read from the signature, the attached PDF, the order number, CLIN
//! completeness, the CLIN date envelope, and the current date. The module
//! follows hexagonal architecture:
//!
//! - Domain types and derivations in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
