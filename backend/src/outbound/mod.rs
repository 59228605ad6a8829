//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL-backed repositories using Diesel ORM
//! - **auth**: bcrypt hashing and repository-backed credential checks
//! - **cache**: in-process view revalidation signal
//!
//! Adapters translate between domain types and infrastructure-specific
//! representations. They contain no business logic.

pub mod auth;
pub mod cache;
pub mod persistence;
