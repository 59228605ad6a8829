//! Wiring of outbound adapters into the HTTP handler state.

use std::sync::Arc;

use actix_web::web;

use dashboard::domain::ports::ViewRevalidator;
use dashboard::domain::{InvoiceActions, RegistrationService};
use dashboard::inbound::http::state::{HttpState, HttpStatePorts};
use dashboard::outbound::auth::{BcryptPasswordHasher, RepositoryCredentialsProvider};
use dashboard::outbound::cache::PathRevalidator;
use dashboard::outbound::persistence::{
    DieselCustomerRepository, DieselInvoiceRepository, DieselUserRepository,
};

use super::ServerConfig;

/// Build the shared handler state from the configured pool.
///
/// One revalidator instance is shared between the invoice actions that bump
/// it and the listing handler that reads it.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let pool = &config.db_pool;
    let invoices = Arc::new(DieselInvoiceRepository::new(pool.clone()));
    let users = Arc::new(DieselUserRepository::new(pool.clone()));
    let hasher = Arc::new(BcryptPasswordHasher::new(config.bcrypt_cost));
    let revalidator: Arc<dyn ViewRevalidator> = Arc::new(PathRevalidator::new());

    let ports = HttpStatePorts {
        invoices: Arc::new(InvoiceActions::new(
            invoices.clone(),
            revalidator.clone(),
            Arc::new(mockable::DefaultClock),
        )),
        invoices_query: invoices,
        customers: Arc::new(DieselCustomerRepository::new(pool.clone())),
        registration: Arc::new(RegistrationService::new(users.clone(), hasher.clone())),
        credentials: Arc::new(RepositoryCredentialsProvider::new(users, hasher)),
        revalidator,
    };
    web::Data::new(HttpState::new(ports, config.base_url.clone()))
}
