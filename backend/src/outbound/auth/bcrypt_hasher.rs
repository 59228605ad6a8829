//! bcrypt-backed [`PasswordHasher`].
//!
//! bcrypt is CPU bound, so both operations run on the blocking pool.

use async_trait::async_trait;
use zeroize::Zeroizing;

use crate::domain::PasswordDigest;
use crate::domain::ports::{PasswordHashError, PasswordHasher};

/// Work factor used when none is configured.
pub const DEFAULT_BCRYPT_COST: u32 = 10;

/// Password hasher using bcrypt with a fixed cost.
#[derive(Debug, Clone, Copy)]
pub struct BcryptPasswordHasher {
    cost: u32,
}

impl Default for BcryptPasswordHasher {
    fn default() -> Self {
        Self::new(DEFAULT_BCRYPT_COST)
    }
}

impl BcryptPasswordHasher {
    /// Hasher producing digests with the given work factor.
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    /// Configured work factor.
    pub fn cost(&self) -> u32 {
        self.cost
    }
}

async fn blocking<T, F>(task: F) -> Result<T, PasswordHashError>
where
    F: FnOnce() -> Result<T, PasswordHashError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(task)
        .await
        .map_err(|err| PasswordHashError::hash(format!("hashing task failed: {err}")))?
}

#[async_trait]
impl PasswordHasher for BcryptPasswordHasher {
    async fn hash(&self, password: &str) -> Result<PasswordDigest, PasswordHashError> {
        let password = Zeroizing::new(password.to_owned());
        let cost = self.cost;
        blocking(move || {
            let digest = bcrypt::hash(password.as_str(), cost)
                .map_err(|err| PasswordHashError::hash(err.to_string()))?;
            PasswordDigest::new(digest).map_err(|err| PasswordHashError::hash(err.to_string()))
        })
        .await
    }

    async fn verify(
        &self,
        password: &str,
        digest: &PasswordDigest,
    ) -> Result<bool, PasswordHashError> {
        let password = Zeroizing::new(password.to_owned());
        let digest = digest.as_ref().to_owned();
        blocking(move || {
            bcrypt::verify(password.as_str(), &digest)
                .map_err(|err| PasswordHashError::malformed_digest(err.to_string()))
        })
        .await
    }
}
