//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod credentials_provider;
mod customer_repository;
mod invoice_command;
mod invoice_repository;
mod password_hasher;
mod registration_command;
mod user_repository;
mod view_revalidator;

#[cfg(test)]
pub use credentials_provider::MockCredentialsProvider;
pub use credentials_provider::{CredentialsProvider, SignInError};
#[cfg(test)]
pub use customer_repository::MockCustomerRepository;
pub use customer_repository::{CustomerRepository, CustomerRepositoryError};
#[cfg(test)]
pub use invoice_command::MockInvoiceCommand;
pub use invoice_command::InvoiceCommand;
#[cfg(test)]
pub use invoice_repository::MockInvoiceRepository;
pub use invoice_repository::{InvoiceRepository, InvoiceRepositoryError};
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHashError, PasswordHasher};
#[cfg(test)]
pub use registration_command::MockRegistrationCommand;
pub use registration_command::RegistrationCommand;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
#[cfg(test)]
pub use view_revalidator::MockViewRevalidator;
pub use view_revalidator::{RevalidationEvent, ViewRevalidator};
