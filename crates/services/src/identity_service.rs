use std::sync::Arc;

use quiz_core::model::UserName;
use storage::repository::{KeyValueStore, StoreKey};

use crate::documents;
use crate::error::IdentityError;

/// Remembers who is playing. There is no authentication, only a display name.
#[derive(Clone)]
pub struct IdentityService {
    store: Arc<dyn KeyValueStore>,
}

impl IdentityService {
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// The stored name, if someone is logged in.
    ///
    /// # Errors
    ///
    /// Returns `IdentityError::Storage` if the store cannot be read.
    pub async fn current(&self) -> Result<Option<UserName>, IdentityError> {
        Ok(documents::load(self.store.as_ref(), StoreKey::User).await?)
    }

    /// Validate and persist a display name.
    ///
    /// # Errors
    ///
    /// Returns `IdentityError::InvalidName` for blank input, nothing is stored.
    pub async fn login(&self, raw: &str) -> Result<UserName, IdentityError> {
        let name = UserName::new(raw)?;
        documents::save(self.store.as_ref(), StoreKey::User, &name).await?;
        tracing::info!(user = %name, "logged in");
        Ok(name)
    }

    /// Forget the stored name. History, imports and theme are kept.
    ///
    /// # Errors
    ///
    /// Returns `IdentityError::Storage` if the entry cannot be removed.
    pub async fn logout(&self) -> Result<(), IdentityError> {
        self.store.remove(StoreKey::User).await?;
        tracing::info!("logged out");
        Ok(())
    }
}
