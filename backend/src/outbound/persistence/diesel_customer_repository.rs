//! PostgreSQL-backed `CustomerRepository` implementation.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{CustomerRepository, CustomerRepositoryError};
use crate::domain::{Customer, CustomerId};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::CustomerRow;
use super::pool::DbPool;
use super::schema::customers;

/// Diesel-backed implementation of the [`CustomerRepository`] port.
#[derive(Clone)]
pub struct DieselCustomerRepository {
    pool: DbPool,
}

impl DieselCustomerRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_customer(row: CustomerRow) -> Result<Customer, CustomerRepositoryError> {
    let id = CustomerId::new(row.id.to_string())
        .map_err(|err| CustomerRepositoryError::query(format!("invalid customer row: {err}")))?;
    Ok(Customer {
        id,
        name: row.name,
        email: row.email,
        image_url: row.image_url,
    })
}

#[async_trait]
impl CustomerRepository for DieselCustomerRepository {
    async fn list(&self) -> Result<Vec<Customer>, CustomerRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, CustomerRepositoryError::connection))?;

        let rows: Vec<CustomerRow> = customers::table
            .select(CustomerRow::as_select())
            .order(customers::name.asc())
            .load(&mut conn)
            .await
            .map_err(|err| {
                map_diesel_error(
                    err,
                    CustomerRepositoryError::query,
                    CustomerRepositoryError::connection,
                )
            })?;

        rows.into_iter().map(row_to_customer).collect()
    }
}
