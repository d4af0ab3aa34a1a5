//! `clientledger-core` — domain model for clients and their contracts.
//!
//! This crate contains **pure domain** types and rules (no HTTP, no SQL).

pub mod client;
pub mod contract;
pub mod error;

pub use client::{Client, ClientType, NewClient};
pub use contract::{Contract, NewContract};
pub use error::{DomainError, DomainResult};
