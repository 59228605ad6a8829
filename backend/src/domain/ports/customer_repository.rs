//! Read-side port for customer listings.
use async_trait::async_trait;

use crate::domain::Customer;

use super::define_port_error;

define_port_error! {
    /// Errors raised when reading customers.
    pub enum CustomerRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "customer read connection failed: {message}",
        /// Query failed during execution or row conversion.
        Query { message: String } => "customer read query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    /// All customers ordered by name.
    async fn list(&self) -> Result<Vec<Customer>, CustomerRepositoryError>;
}
