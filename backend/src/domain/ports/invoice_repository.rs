//! Port abstraction for invoice persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{Invoice, InvoiceDraft, InvoiceId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by invoice repository adapters.
    pub enum InvoiceRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "invoice repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "invoice repository query failed: {message}",
    }
}

/// Parameterised statements over the `invoices` table.
///
/// Identifiers that cannot name a stored row match nothing: `update` and
/// `delete` succeed without touching any row and `find_by_id` yields
/// `None`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InvoiceRepository: Send + Sync {
    /// Insert a new invoice.
    async fn insert(&self, invoice: &Invoice) -> Result<(), InvoiceRepositoryError>;

    /// Overwrite customer, amount, and status of an invoice. The date is kept.
    async fn update(&self, id: &InvoiceId, draft: &InvoiceDraft)
    -> Result<(), InvoiceRepositoryError>;

    /// Remove an invoice.
    async fn delete(&self, id: &InvoiceId) -> Result<(), InvoiceRepositoryError>;

    /// All invoices, newest first.
    async fn list(&self) -> Result<Vec<Invoice>, InvoiceRepositoryError>;

    /// Fetch one invoice.
    async fn find_by_id(&self, id: &InvoiceId) -> Result<Option<Invoice>, InvoiceRepositoryError>;
}
