use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use shared_types::{Catalog, CatalogError};

static CATALOG: OnceLock<Catalog> = OnceLock::new();

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error("Catalog already initialized")]
    AlreadyInitialized,
    #[error("Catalog not initialized. Call init_catalog() first.")]
    NotInitialized,
}

/// Loads the catalog named by `CATALOG_PATH`, or the built-in demo catalog
/// when the variable is unset. A relative path is taken from `env_dir`, the
/// directory of the `.env` file that was loaded, when there is one.
#[cfg(feature = "ssr")]
pub async fn init_catalog(env_dir: Option<&Path>) -> Result<(), StoreError> {
    let catalog = match std::env::var("CATALOG_PATH") {
        Ok(raw) => {
            let path = resolve_catalog_path(&raw, env_dir);
            tracing::info!(path = %path.display(), "Loading reservation catalog");
            let json = tokio::fs::read_to_string(&path)
                .await
                .map_err(CatalogError::from)?;
            Catalog::from_json(&json)?
        }
        Err(_) => {
            tracing::info!("CATALOG_PATH not set, using demo catalog");
            Catalog::demo()
        }
    };

    tracing::debug!(
        zones = catalog.options.zones.len(),
        courts = catalog.options.courts.len(),
        occupied_dates = catalog.occupied_dates.len(),
        "Catalog ready"
    );

    install_catalog(catalog)
}

pub fn resolve_catalog_path(raw: &str, env_dir: Option<&Path>) -> PathBuf {
    let path = Path::new(raw.trim());
    match env_dir {
        Some(dir) if path.is_relative() => dir.join(path),
        _ => path.to_path_buf(),
    }
}

pub fn install_catalog(catalog: Catalog) -> Result<(), StoreError> {
    CATALOG
        .set(catalog)
        .map_err(|_| StoreError::AlreadyInitialized)
}

pub fn get_catalog() -> Result<&'static Catalog, StoreError> {
    CATALOG.get().ok_or(StoreError::NotInitialized)
}
