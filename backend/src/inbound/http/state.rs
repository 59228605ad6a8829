//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports and remain testable without I/O.

use std::sync::Arc;

use url::Url;

use crate::domain::ports::{
    CredentialsProvider, CustomerRepository, InvoiceCommand, InvoiceRepository,
    RegistrationCommand, ViewRevalidator,
};

/// Parameter object bundling the port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub invoices: Arc<dyn InvoiceCommand>,
    pub invoices_query: Arc<dyn InvoiceRepository>,
    pub customers: Arc<dyn CustomerRepository>,
    pub registration: Arc<dyn RegistrationCommand>,
    pub credentials: Arc<dyn CredentialsProvider>,
    pub revalidator: Arc<dyn ViewRevalidator>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub invoices: Arc<dyn InvoiceCommand>,
    pub invoices_query: Arc<dyn InvoiceRepository>,
    pub customers: Arc<dyn CustomerRepository>,
    pub registration: Arc<dyn RegistrationCommand>,
    pub credentials: Arc<dyn CredentialsProvider>,
    pub revalidator: Arc<dyn ViewRevalidator>,
    /// Public origin used to resolve sign-in callbacks.
    pub base_url: Url,
}

impl HttpState {
    /// Bundle `ports` with the public base URL.
    pub fn new(ports: HttpStatePorts, base_url: Url) -> Self {
        let HttpStatePorts {
            invoices,
            invoices_query,
            customers,
            registration,
            credentials,
            revalidator,
        } = ports;
        Self {
            invoices,
            invoices_query,
            customers,
            registration,
            credentials,
            revalidator,
            base_url,
        }
    }
}
