//! Storage configuration resolved from the environment.

use std::path::PathBuf;

use crate::error::StoreError;
use crate::kv::{FileKvStore, validate_key};
use crate::product_store::ProductStore;

pub const STORAGE_KEY_VAR: &str = "KATALOG_STORAGE_KEY";
pub const DATA_DIR_VAR: &str = "KATALOG_DATA_DIR";

pub const DEFAULT_STORAGE_KEY: &str = "soft_elegant_products_v1";
pub const DEFAULT_DATA_DIR: &str = "katalog-data";

/// Where and under which key the catalog is persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub storage_key: String,
    pub data_dir: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
        }
    }
}

impl StoreConfig {
    /// Read `KATALOG_STORAGE_KEY` / `KATALOG_DATA_DIR`, falling back to defaults.
    pub fn from_env() -> Result<Self, StoreError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, StoreError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let storage_key = non_blank(STORAGE_KEY_VAR)
            .map(|v| v.trim().to_string())
            .unwrap_or_else(|| DEFAULT_STORAGE_KEY.to_string());
        validate_key(&storage_key)?;

        let data_dir = non_blank(DATA_DIR_VAR).map(PathBuf::from).unwrap_or_else(|| {
            tracing::warn!(
                "{DATA_DIR_VAR} not set; using ./{DEFAULT_DATA_DIR} relative to the working directory"
            );
            PathBuf::from(DEFAULT_DATA_DIR)
        });

        Ok(Self {
            storage_key,
            data_dir,
        })
    }

    pub fn open_file_store(&self) -> ProductStore<FileKvStore> {
        ProductStore::new(FileKvStore::new(&self.data_dir), self.storage_key.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| vars.get(name).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = StoreConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, StoreConfig::default());
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let config =
            StoreConfig::from_lookup(lookup(&[(STORAGE_KEY_VAR, "  "), (DATA_DIR_VAR, "")]))
                .unwrap();
        assert_eq!(config, StoreConfig::default());
    }

    #[test]
    fn reads_overrides() {
        let config = StoreConfig::from_lookup(lookup(&[
            (STORAGE_KEY_VAR, "shop_v2"),
            (DATA_DIR_VAR, "/var/lib/katalog"),
        ]))
        .unwrap();

        assert_eq!(config.storage_key, "shop_v2");
        assert_eq!(config.data_dir, PathBuf::from("/var/lib/katalog"));

        let store = config.open_file_store();
        assert_eq!(store.key(), "shop_v2");
        assert_eq!(store.kv().dir(), config.data_dir.as_path());
    }

    #[test]
    fn rejects_key_that_is_not_a_file_name() {
        let err = StoreConfig::from_lookup(lookup(&[(STORAGE_KEY_VAR, "../etc/passwd")]))
            .unwrap_err();
        assert!(matches!(err, StoreError::InvalidKey(_)));
    }
}
