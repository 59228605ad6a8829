//! Invoice HTTP handlers.
//!
//! ```text
//! GET  /dashboard/invoices
//! GET  /dashboard/invoices/{id}
//! POST /dashboard/invoices                 customerId=..&amount=..&status=..
//! POST /dashboard/invoices/{id}/edit       customerId=..&amount=..&status=..
//! POST /dashboard/invoices/{id}/delete
//! ```
//!
//! Mutations take `application/x-www-form-urlencoded` bodies and answer
//! through [`outcome_response`]. The listing carries the revalidation
//! generation of `/dashboard/invoices` as its `ETag`.

use actix_web::http::header::{ETAG, IF_NONE_MATCH};
use actix_web::{HttpRequest, HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::ports::InvoiceRepositoryError;
use crate::domain::{Error, FormState, INVOICES_PATH, Invoice, InvoiceForm, InvoiceId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::action_response::outcome_response;
use crate::inbound::http::state::HttpState;

/// Invoice form body shared by create and edit.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceFormRequest {
    pub customer_id: Option<String>,
    pub amount: Option<String>,
    pub status: Option<String>,
}

impl From<InvoiceFormRequest> for InvoiceForm {
    fn from(value: InvoiceFormRequest) -> Self {
        Self {
            customer_id: value.customer_id,
            amount: value.amount,
            status: value.status,
        }
    }
}

pub(crate) fn map_invoice_repository_error(error: InvoiceRepositoryError) -> Error {
    match error {
        InvoiceRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("invoice storage unavailable: {message}"))
        }
        InvoiceRepositoryError::Query { message } => {
            Error::internal(format!("invoice query failed: {message}"))
        }
    }
}

fn parse_invoice_id(raw: String) -> Result<InvoiceId, Error> {
    InvoiceId::new(raw).map_err(|err| {
        Error::invalid_request(err.to_string()).with_details(json!({ "field": "id" }))
    })
}

fn list_etag(generation: u64) -> String {
    format!("\"{generation}\"")
}

fn etag_matches(req: &HttpRequest, etag: &str) -> bool {
    req.headers()
        .get(IF_NONE_MATCH)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.split(',').any(|candidate| candidate.trim() == etag))
}

/// List invoices, newest first.
#[utoipa::path(
    get,
    path = "/dashboard/invoices",
    responses(
        (
            status = 200,
            description = "Invoices",
            headers(("ETag" = String, description = "Revalidation generation")),
            body = [Invoice]
        ),
        (status = 304, description = "Listing unchanged since the supplied ETag"),
        (status = 503, description = "Storage unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["invoices"],
    operation_id = "listInvoices"
)]
#[get("/invoices")]
pub async fn list_invoices(
    state: web::Data<HttpState>,
    req: HttpRequest,
) -> ApiResult<HttpResponse> {
    let etag = list_etag(state.revalidator.generation(INVOICES_PATH));
    if etag_matches(&req, &etag) {
        return Ok(HttpResponse::NotModified()
            .insert_header((ETAG, etag))
            .finish());
    }
    let invoices = state
        .invoices_query
        .list()
        .await
        .map_err(map_invoice_repository_error)?;
    Ok(HttpResponse::Ok()
        .insert_header((ETAG, etag))
        .insert_header(("Cache-Control", "private, no-cache"))
        .json(invoices))
}

/// Fetch one invoice.
#[utoipa::path(
    get,
    path = "/dashboard/invoices/{id}",
    params(("id" = String, Path, description = "Invoice identifier")),
    responses(
        (status = 200, description = "Invoice", body = Invoice),
        (status = 404, description = "Not found", body = Error),
        (status = 503, description = "Storage unavailable", body = Error)
    ),
    tags = ["invoices"],
    operation_id = "getInvoice"
)]
#[get("/invoices/{id}")]
pub async fn get_invoice(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Invoice>> {
    let id = parse_invoice_id(path.into_inner())?;
    state
        .invoices_query
        .find_by_id(&id)
        .await
        .map_err(map_invoice_repository_error)?
        .map(web::Json)
        .ok_or_else(|| Error::not_found("invoice not found").with_details(json!({ "id": id })))
}

/// Create an invoice from a submitted form.
#[utoipa::path(
    post,
    path = "/dashboard/invoices",
    request_body(content = InvoiceFormRequest, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Created; redirect to the invoice list"),
        (status = 422, description = "Validation failed", body = FormState),
        (status = 500, description = "Storage failed", body = FormState)
    ),
    tags = ["invoices"],
    operation_id = "createInvoice"
)]
#[post("/invoices")]
pub async fn create_invoice(
    state: web::Data<HttpState>,
    form: web::Form<InvoiceFormRequest>,
) -> HttpResponse {
    outcome_response(state.invoices.create(form.into_inner().into()).await)
}

/// Update an invoice from a submitted form.
#[utoipa::path(
    post,
    path = "/dashboard/invoices/{id}/edit",
    params(("id" = String, Path, description = "Invoice identifier")),
    request_body(content = InvoiceFormRequest, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Updated; redirect to the invoice list"),
        (status = 422, description = "Validation failed", body = FormState),
        (status = 500, description = "Storage failed", body = FormState)
    ),
    tags = ["invoices"],
    operation_id = "updateInvoice"
)]
#[post("/invoices/{id}/edit")]
pub async fn update_invoice(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    form: web::Form<InvoiceFormRequest>,
) -> ApiResult<HttpResponse> {
    let id = parse_invoice_id(path.into_inner())?;
    Ok(outcome_response(
        state.invoices.update(id, form.into_inner().into()).await,
    ))
}

/// Delete an invoice.
#[utoipa::path(
    post,
    path = "/dashboard/invoices/{id}/delete",
    params(("id" = String, Path, description = "Invoice identifier")),
    responses(
        (status = 204, description = "Deleted, or nothing to delete"),
        (status = 500, description = "Storage failed", body = FormState)
    ),
    tags = ["invoices"],
    operation_id = "deleteInvoice"
)]
#[post("/invoices/{id}/delete")]
pub async fn delete_invoice(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_invoice_id(path.into_inner())?;
    Ok(outcome_response(state.invoices.delete(id).await))
}

#[cfg(test)]
#[path = "invoices_tests.rs"]
mod tests;
