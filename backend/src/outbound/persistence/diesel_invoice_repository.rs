//! PostgreSQL-backed `InvoiceRepository` implementation using Diesel ORM.
//!
//! Invoice identifiers are UUID columns. An identifier that does not parse
//! as a UUID cannot name a row, so reads return nothing and writes affect
//! nothing rather than failing.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{InvoiceRepository, InvoiceRepositoryError};
use crate::domain::{
    AmountCents, CustomerId, Invoice, InvoiceDraft, InvoiceId, InvoiceStatus, InvoiceValidationError,
};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{InvoiceRow, InvoiceUpdate, NewInvoiceRow};
use super::pool::{DbPool, PoolError};
use super::schema::invoices;

/// Diesel-backed implementation of the [`InvoiceRepository`] port.
#[derive(Clone)]
pub struct DieselInvoiceRepository {
    pool: DbPool,
}

impl DieselInvoiceRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> InvoiceRepositoryError {
    map_pool_error(error, InvoiceRepositoryError::connection)
}

fn diesel_error(error: diesel::result::Error) -> InvoiceRepositoryError {
    map_diesel_error(
        error,
        InvoiceRepositoryError::query,
        InvoiceRepositoryError::connection,
    )
}

fn row_uuid(id: &InvoiceId) -> Option<Uuid> {
    Uuid::parse_str(id.as_ref()).ok()
}

fn customer_uuid(id: &CustomerId) -> Result<Uuid, InvoiceRepositoryError> {
    Uuid::parse_str(id.as_ref())
        .map_err(|_| InvoiceRepositoryError::query("referenced record does not exist"))
}

fn row_to_invoice(row: InvoiceRow) -> Result<Invoice, InvoiceRepositoryError> {
    let row_id = row.id;
    let invalid = |err: InvoiceValidationError| {
        InvoiceRepositoryError::query(format!("invalid invoice row {row_id}: {err}"))
    };
    Ok(Invoice {
        id: InvoiceId::new(row.id.to_string()).map_err(invalid)?,
        customer_id: CustomerId::new(row.customer_id.to_string()).map_err(invalid)?,
        amount: AmountCents::from_cents(row.amount).map_err(invalid)?,
        status: row.status.parse::<InvoiceStatus>().map_err(invalid)?,
        date: row.date,
    })
}

#[async_trait]
impl InvoiceRepository for DieselInvoiceRepository {
    async fn insert(&self, invoice: &Invoice) -> Result<(), InvoiceRepositoryError> {
        let id = Uuid::parse_str(invoice.id.as_ref())
            .map_err(|_| InvoiceRepositoryError::query("invoice id is not a UUID"))?;
        let row = NewInvoiceRow {
            id,
            customer_id: customer_uuid(&invoice.customer_id)?,
            amount: invoice.amount.cents(),
            status: invoice.status.as_str(),
            date: invoice.date,
        };

        let mut conn = self.pool.get().await.map_err(pool_error)?;
        diesel::insert_into(invoices::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(())
    }

    async fn update(
        &self,
        id: &InvoiceId,
        draft: &InvoiceDraft,
    ) -> Result<(), InvoiceRepositoryError> {
        let Some(id) = row_uuid(id) else {
            return Ok(());
        };
        let changes = InvoiceUpdate {
            customer_id: customer_uuid(&draft.customer_id)?,
            amount: draft.amount.cents(),
            status: draft.status.as_str(),
        };

        let mut conn = self.pool.get().await.map_err(pool_error)?;
        diesel::update(invoices::table.find(id))
            .set(&changes)
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(())
    }

    async fn delete(&self, id: &InvoiceId) -> Result<(), InvoiceRepositoryError> {
        let Some(id) = row_uuid(id) else {
            return Ok(());
        };

        let mut conn = self.pool.get().await.map_err(pool_error)?;
        diesel::delete(invoices::table.find(id))
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Invoice>, InvoiceRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let rows: Vec<InvoiceRow> = invoices::table
            .select(InvoiceRow::as_select())
            .order((invoices::date.desc(), invoices::id.asc()))
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;

        rows.into_iter().map(row_to_invoice).collect()
    }

    async fn find_by_id(&self, id: &InvoiceId) -> Result<Option<Invoice>, InvoiceRepositoryError> {
        let Some(id) = row_uuid(id) else {
            return Ok(None);
        };

        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row: Option<InvoiceRow> = invoices::table
            .find(id)
            .select(InvoiceRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;

        row.map(row_to_invoice).transpose()
    }
}
