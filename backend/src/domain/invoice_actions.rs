//! Invoice mutating actions.
//!
//! Each action follows the same sequence: validate the raw form, write
//! through the [`InvoiceRepository`], signal that `/dashboard/invoices` is
//! stale, then tell the caller where to go next. Storage failures stop the
//! sequence before revalidation and come back as returned state.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{error, info};

use crate::domain::ports::{InvoiceCommand, InvoiceRepository, InvoiceRepositoryError, ViewRevalidator};
use crate::domain::{ActionOutcome, Invoice, InvoiceForm, InvoiceId, Redirect};

/// Listing path revalidated after every successful invoice mutation.
pub const INVOICES_PATH: &str = "/dashboard/invoices";

const CREATE_INVALID_MESSAGE: &str = "Missing Fields. Failed to Create Invoice.";
const CREATE_FAILED_MESSAGE: &str = "Database Error: Failed to Create Invoice.";
const UPDATE_INVALID_MESSAGE: &str = "Missing Fields. Failed to Update Invoice.";
const UPDATE_FAILED_MESSAGE: &str = "Database Error: Failed to Update Invoice.";
const DELETE_FAILED_MESSAGE: &str = "Database Error: Failed to Delete Invoice.";

/// Invoice service implementing [`InvoiceCommand`].
#[derive(Clone)]
pub struct InvoiceActions<R> {
    repository: Arc<R>,
    revalidator: Arc<dyn ViewRevalidator>,
    clock: Arc<dyn Clock>,
}

impl<R> InvoiceActions<R> {
    /// Create a service over the given repository, revalidator, and clock.
    pub fn new(
        repository: Arc<R>,
        revalidator: Arc<dyn ViewRevalidator>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repository,
            revalidator,
            clock,
        }
    }

    fn storage_failure(message: &str, err: &InvoiceRepositoryError) -> ActionOutcome {
        error!(error = %err, "{message}");
        ActionOutcome::failed(format!("{message} {err}"))
    }

    fn listing_changed(&self) -> ActionOutcome {
        self.revalidator.revalidate(INVOICES_PATH);
        ActionOutcome::Redirect(Redirect::to(INVOICES_PATH))
    }
}

#[async_trait]
impl<R> InvoiceCommand for InvoiceActions<R>
where
    R: InvoiceRepository,
{
    async fn create(&self, form: InvoiceForm) -> ActionOutcome {
        let draft = match form.validate() {
            Ok(draft) => draft,
            Err(errors) => return ActionOutcome::invalid(errors, CREATE_INVALID_MESSAGE),
        };

        let today = self.clock.utc().date_naive();
        let invoice = Invoice::issue(InvoiceId::generate(), draft, today);
        if let Err(err) = self.repository.insert(&invoice).await {
            return Self::storage_failure(CREATE_FAILED_MESSAGE, &err);
        }

        info!(invoice_id = %invoice.id, "invoice created");
        self.listing_changed()
    }

    async fn update(&self, id: InvoiceId, form: InvoiceForm) -> ActionOutcome {
        let draft = match form.validate() {
            Ok(draft) => draft,
            Err(errors) => return ActionOutcome::invalid(errors, UPDATE_INVALID_MESSAGE),
        };

        if let Err(err) = self.repository.update(&id, &draft).await {
            return Self::storage_failure(UPDATE_FAILED_MESSAGE, &err);
        }

        info!(invoice_id = %id, "invoice updated");
        self.listing_changed()
    }

    async fn delete(&self, id: InvoiceId) -> ActionOutcome {
        if let Err(err) = self.repository.delete(&id).await {
            error!(error = %err, invoice_id = %id, "{DELETE_FAILED_MESSAGE}");
            return ActionOutcome::failed(DELETE_FAILED_MESSAGE);
        }

        info!(invoice_id = %id, "invoice deleted");
        self.revalidator.revalidate(INVOICES_PATH);
        ActionOutcome::Done
    }
}

#[cfg(test)]
#[path = "invoice_actions_tests.rs"]
mod tests;
