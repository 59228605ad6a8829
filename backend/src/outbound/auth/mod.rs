//! Authentication adapters: password hashing and credential verification.

mod bcrypt_hasher;
mod repository_credentials_provider;

pub use bcrypt_hasher::{BcryptPasswordHasher, DEFAULT_BCRYPT_COST};
pub use repository_credentials_provider::RepositoryCredentialsProvider;
