//! Customer listing used to populate the invoice form.
//!
//! ```text
//! GET /dashboard/customers
//! ```

use actix_web::{get, web};

use crate::domain::ports::CustomerRepositoryError;
use crate::domain::{Customer, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

fn map_customer_error(error: CustomerRepositoryError) -> Error {
    match error {
        CustomerRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("customer storage unavailable: {message}"))
        }
        CustomerRepositoryError::Query { message } => {
            Error::internal(format!("customer query failed: {message}"))
        }
    }
}

/// List customers ordered by name.
#[utoipa::path(
    get,
    path = "/dashboard/customers",
    responses(
        (status = 200, description = "Customers", body = [Customer]),
        (status = 503, description = "Storage unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["customers"],
    operation_id = "listCustomers"
)]
#[get("/customers")]
pub async fn list_customers(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<Customer>>> {
    state
        .customers
        .list()
        .await
        .map(web::Json)
        .map_err(map_customer_error)
}
