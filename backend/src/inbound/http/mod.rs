//! HTTP inbound adapter: form-post actions and JSON read endpoints.

pub mod action_response;
pub mod auth;
pub mod authorization;
pub mod customers;
pub mod error;
pub mod invoices;
pub mod register;
pub mod revalidations;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;

pub use error::ApiResult;
