//! Driving port for the invoice mutating actions.
//!
//! Inbound adapters call it with raw form input; validation and storage
//! failures come back inside the [`ActionOutcome`] instead of as errors.

use async_trait::async_trait;

use crate::domain::{ActionOutcome, InvoiceForm, InvoiceId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InvoiceCommand: Send + Sync {
    /// Validate and insert a new invoice.
    async fn create(&self, form: InvoiceForm) -> ActionOutcome;

    /// Validate and overwrite an existing invoice.
    async fn update(&self, id: InvoiceId, form: InvoiceForm) -> ActionOutcome;

    /// Remove an invoice.
    async fn delete(&self, id: InvoiceId) -> ActionOutcome;
}
