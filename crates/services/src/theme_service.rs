use std::sync::Arc;

use quiz_core::model::Theme;
use storage::repository::{KeyValueStore, StoreKey};

use crate::documents;
use crate::error::ThemeError;

/// Persisted light/dark preference.
#[derive(Clone)]
pub struct ThemeService {
    store: Arc<dyn KeyValueStore>,
}

impl ThemeService {
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Stored theme, or light when nothing valid is stored.
    ///
    /// # Errors
    ///
    /// Returns `ThemeError::Storage` if the store cannot be read.
    pub async fn load(&self) -> Result<Theme, ThemeError> {
        Ok(documents::load(self.store.as_ref(), StoreKey::Theme)
            .await?
            .unwrap_or_default())
    }

    /// # Errors
    ///
    /// Returns `ThemeError::Storage` if the theme cannot be written.
    pub async fn set(&self, theme: Theme) -> Result<(), ThemeError> {
        documents::save(self.store.as_ref(), StoreKey::Theme, &theme).await?;
        Ok(())
    }

    /// Flip and persist the theme, returning the new value.
    ///
    /// # Errors
    ///
    /// Returns `ThemeError::Storage` if the store cannot be read or written.
    pub async fn toggle(&self) -> Result<Theme, ThemeError> {
        let next = self.load().await?.toggled();
        self.set(next).await?;
        tracing::debug!(theme = next.as_str(), "theme toggled");
        Ok(next)
    }
}
