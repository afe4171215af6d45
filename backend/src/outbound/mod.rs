//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! This module follows the hexagonal architecture pattern: adapters are
//! thin translators between domain types and infrastructure-specific
//! representations, containing no business logic.
//!
//! - **persistence**: PostgreSQL-backed directories using Diesel, with
//!   tenant-scoped sessions enforcing row-level security.

pub mod persistence;
