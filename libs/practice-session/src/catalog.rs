use practice_common::types::Catalog;
use tracing::{info, warn};

use crate::backend::Backend;
use crate::error::SessionError;

/// Whether the catalog has arrived yet
///
/// `Loaded` with an empty catalog is a real state and is never confused with
/// `NotLoaded`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CatalogState {
    #[default]
    NotLoaded,
    Loaded(Catalog),
}

impl CatalogState {
    pub fn catalog(&self) -> Option<&Catalog> {
        match self {
            CatalogState::Loaded(catalog) => Some(catalog),
            CatalogState::NotLoaded => None,
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, CatalogState::Loaded(_))
    }
}

/// Fetches the catalog once at session start
pub struct CatalogLoader;

impl CatalogLoader {
    pub async fn load<B: Backend + ?Sized>(backend: &B) -> Result<Catalog, SessionError> {
        match backend.list().await {
            Ok(catalog) => {
                info!(practices = catalog.len(), "Catalog loaded");
                Ok(catalog)
            }
            Err(e) => {
                warn!(error = %e, "Catalog load failed");
                Err(SessionError::LoadFailure(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{add_catalog, FakeBackend};

    #[tokio::test]
    async fn test_load_returns_catalog() {
        let backend = FakeBackend::new(Ok(add_catalog()));
        let catalog = CatalogLoader::load(&backend).await.unwrap();
        assert_eq!(catalog, add_catalog());
        assert_eq!(backend.list_calls(), 1);
    }

    #[tokio::test]
    async fn test_load_failure_is_wrapped() {
        let backend = FakeBackend::unavailable();
        let err = CatalogLoader::load(&backend).await.unwrap_err();
        assert!(matches!(err, SessionError::LoadFailure(_)));
    }

    #[test]
    fn test_empty_catalog_is_still_loaded() {
        let state = CatalogState::Loaded(Catalog::default());
        assert!(state.is_loaded());
        assert_ne!(state, CatalogState::NotLoaded);
        assert!(!CatalogState::default().is_loaded());
    }
}
