//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint of the inbound layer, the domain
//! schemas they exchange, and the session cookie security scheme. Swagger UI
//! serves it in debug builds.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{Customer, Error, ErrorCode, FieldErrors, FormState, Invoice, InvoiceStatus};
use crate::inbound::http::auth::LoginRequest;
use crate::inbound::http::invoices::InvoiceFormRequest;
use crate::inbound::http::register::RegisterRequest;

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /login.",
            ))),
        );
    }
}

/// OpenAPI document for the dashboard API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Invoice dashboard API",
        description = "Session-authenticated invoice management over customer records."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::invoices::list_invoices,
        crate::inbound::http::invoices::get_invoice,
        crate::inbound::http::invoices::create_invoice,
        crate::inbound::http::invoices::update_invoice,
        crate::inbound::http::invoices::delete_invoice,
        crate::inbound::http::customers::list_customers,
        crate::inbound::http::revalidations::revalidation_events,
        crate::inbound::http::register::register,
        crate::inbound::http::auth::login,
        crate::inbound::http::auth::logout,
    ),
    components(schemas(
        Invoice,
        InvoiceStatus,
        Customer,
        FormState,
        FieldErrors,
        Error,
        ErrorCode,
        InvoiceFormRequest,
        RegisterRequest,
        LoginRequest,
    )),
    tags(
        (name = "invoices", description = "Invoice listing and form actions"),
        (name = "customers", description = "Customer lookups for the invoice form"),
        (name = "auth", description = "Registration, sign-in, and sign-out")
    )
)]
pub struct ApiDoc;
