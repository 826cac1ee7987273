use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{error, info};

use crate::catalog::builtin::builtin_products;
use crate::catalog::loader::{load_catalog_file, CatalogError};
use crate::catalog::models::{Catalog, CatalogProduct};
use crate::config::CatalogConfig;

/// Catalog as last loaded, plus the error shown to the user if loading failed
#[derive(Debug, Clone, Default)]
pub struct CatalogSnapshot {
    pub catalog: Arc<Catalog>,
    pub load_error: Option<String>,
}

/// Service holding the cached catalog
pub struct CatalogService {
    config: CatalogConfig,
    cache: RwLock<CatalogSnapshot>,
}

impl CatalogService {
    /// Create a service with an empty cache; call [`reload`](Self::reload) to fill it
    pub fn new(config: CatalogConfig) -> Self {
        Self {
            config,
            cache: RwLock::new(CatalogSnapshot::default()),
        }
    }

    /// Create a service and load the catalog once
    pub async fn load(config: CatalogConfig) -> Self {
        let service = Self::new(config);
        service.reload().await;
        service
    }

    /// Re-read the catalog source
    ///
    /// A file that cannot be read or validated leaves an empty catalog and
    /// records the error message; the calculator stays usable for manual entry.
    pub async fn reload(&self) -> CatalogSnapshot {
        match self.refresh().await {
            Ok(snapshot) => snapshot,
            Err(_) => self.snapshot().await,
        }
    }

    /// Like [`reload`](Self::reload), but hands the loader error back to the caller
    pub async fn refresh(&self) -> Result<CatalogSnapshot, CatalogError> {
        let (snapshot, result) = match self.load_products() {
            Ok(products) => (
                CatalogSnapshot {
                    catalog: Arc::new(Catalog::new(products)),
                    load_error: None,
                },
                Ok(()),
            ),
            Err(e) => {
                error!(error = %e, "Failed to load catalog");
                (
                    CatalogSnapshot {
                        catalog: Arc::new(Catalog::default()),
                        load_error: Some(e.to_string()),
                    },
                    Err(e),
                )
            }
        };

        info!(products = snapshot.catalog.len(), "Catalog cache refreshed");

        let mut cache = self.cache.write().await;
        *cache = snapshot.clone();
        result.map(|()| snapshot)
    }

    fn load_products(&self) -> Result<Vec<CatalogProduct>, CatalogError> {
        match &self.config.path {
            Some(path) => load_catalog_file(path),
            None if self.config.use_builtin => Ok(builtin_products()),
            None => Ok(Vec::new()),
        }
    }

    pub async fn snapshot(&self) -> CatalogSnapshot {
        self.cache.read().await.clone()
    }

    pub async fn catalog(&self) -> Arc<Catalog> {
        self.cache.read().await.catalog.clone()
    }
}
