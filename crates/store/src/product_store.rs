//! Whole-collection persistence under a single key.

use katalog_products::Product;

use crate::error::StoreError;
use crate::kv::KvStore;

/// Result of reading the persisted collection.
#[derive(Debug, Clone, PartialEq)]
pub struct Hydrated {
    pub products: Vec<Product>,
    /// Records stored without an `id`; each got a fresh one while loading.
    pub assigned_ids: usize,
}

impl Hydrated {
    fn empty() -> Self {
        Self {
            products: Vec::new(),
            assigned_ids: 0,
        }
    }

    /// Whether the in-memory collection differs from storage and should be saved back.
    pub fn needs_write_back(&self) -> bool {
        self.assigned_ids > 0
    }
}

/// Persists the ordered product collection as one JSON array.
///
/// Every `save` rewrites the full blob. `clear` only touches storage; any
/// in-memory collection is the caller's to reset.
#[derive(Debug)]
pub struct ProductStore<K> {
    kv: K,
    key: String,
}

impl<K: KvStore> ProductStore<K> {
    pub fn new(kv: K, key: impl Into<String>) -> Self {
        Self {
            kv,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn kv(&self) -> &K {
        &self.kv
    }

    /// Absent (or blank) value → empty collection; undecodable → `Corrupt`.
    pub fn load(&self) -> Result<Vec<Product>, StoreError> {
        Ok(self.hydrate()?.products)
    }

    /// Like [`load`](Self::load), also reporting how many records lacked an id.
    pub fn hydrate(&self) -> Result<Hydrated, StoreError> {
        let Some(bytes) = self.kv.get(&self.key)? else {
            tracing::debug!(key = %self.key, "no persisted catalog; starting empty");
            return Ok(Hydrated::empty());
        };

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Hydrated::empty());
        }

        let corrupt = |source| StoreError::Corrupt {
            key: self.key.clone(),
            source,
        };
        let raw: Vec<serde_json::Value> = serde_json::from_slice(&bytes).map_err(corrupt)?;
        let assigned_ids = raw.iter().filter(|record| record.get("id").is_none()).count();
        let products: Vec<Product> =
            serde_json::from_value(serde_json::Value::Array(raw)).map_err(corrupt)?;

        tracing::debug!(key = %self.key, count = products.len(), assigned_ids, "loaded catalog");
        Ok(Hydrated {
            products,
            assigned_ids,
        })
    }

    pub fn save(&self, products: &[Product]) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec(products).map_err(StoreError::Encode)?;
        self.kv.set(&self.key, &bytes)?;
        tracing::debug!(key = %self.key, count = products.len(), bytes = bytes.len(), "saved catalog");
        Ok(())
    }

    pub fn clear(&self) -> Result<(), StoreError> {
        self.kv.remove(&self.key)?;
        tracing::debug!(key = %self.key, "cleared persisted catalog");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::test_support::scratch_dir;
    use crate::kv::{FileKvStore, InMemoryKvStore};
    use katalog_core::ProductId;
    use katalog_products::ProductDraft;

    const KEY: &str = "soft_elegant_products_v1";

    fn store() -> ProductStore<InMemoryKvStore> {
        ProductStore::new(InMemoryKvStore::new(), KEY)
    }

    fn sample() -> Vec<Product> {
        vec![
            ProductDraft::new("Kursi")
                .price(150000)
                .stock(5)
                .into_product(ProductId::new())
                .unwrap(),
            ProductDraft::new("Meja Kayu")
                .price(320000)
                .category("Furniture")
                .badge("Baru")
                .image("data:image/png;base64,iVBORw0KGgo=")
                .into_product(ProductId::new())
                .unwrap(),
        ]
    }

    #[test]
    fn load_without_blob_is_empty() {
        assert!(store().load().unwrap().is_empty());
    }

    #[test]
    fn save_then_load_round_trips() {
        let store = store();
        let products = sample();
        store.save(&products).unwrap();
        assert_eq!(store.load().unwrap(), products);
    }

    #[test]
    fn save_overwrites_previous_value() {
        let store = store();
        store.save(&sample()).unwrap();
        store.save(&[]).unwrap();
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn blank_blob_is_empty() {
        let store = store();
        store.kv().set(KEY, b"  \n").unwrap();
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn unparsable_blob_is_corrupt() {
        let store = store();
        let blobs: [&[u8]; 3] = [
            b"not json",
            br#"{"name":"x"}"#,
            br#"[{"name":1,"price":2}]"#,
        ];
        for blob in blobs {
            store.kv().set(KEY, blob).unwrap();
            match store.load() {
                Err(StoreError::Corrupt { key, .. }) => assert_eq!(key, KEY),
                other => panic!("Expected Corrupt for {blob:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn legacy_blob_without_ids_loads() {
        let store = store();
        store
            .kv()
            .set(
                KEY,
                br#"[{"name":"Kursi","price":150000,"stock":5,"category":"","badge":"","image":""}]"#,
            )
            .unwrap();

        let products = store.load().unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].name(), "Kursi");
        assert_eq!(products[0].stock(), 5);
    }

    #[test]
    fn fractional_and_negative_stock_load_coerced() {
        let store = store();
        store
            .kv()
            .set(
                KEY,
                br#"[{"name":"Kursi","price":10,"stock":2.5,"category":"","badge":"","image":""},
                     {"name":"Meja","price":20,"stock":-1,"category":"","badge":"","image":""}]"#,
            )
            .unwrap();

        let products = store.load().unwrap();
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].stock(), 2);
        assert_eq!(products[1].stock(), 0);
    }

    #[test]
    fn hydrate_counts_records_without_ids() {
        let store = store();
        store.save(&sample()).unwrap();
        assert!(!store.hydrate().unwrap().needs_write_back());

        store
            .kv()
            .set(KEY, br#"[{"name":"A","price":1},{"name":"B","price":2}]"#)
            .unwrap();
        let hydrated = store.hydrate().unwrap();
        assert_eq!(hydrated.assigned_ids, 2);
        assert!(hydrated.needs_write_back());
    }

    #[test]
    fn clear_removes_blob_only() {
        let store = store();
        let products = sample();
        store.save(&products).unwrap();
        store.clear().unwrap();

        assert!(store.kv().get(KEY).unwrap().is_none());
        assert!(store.load().unwrap().is_empty());
        assert_eq!(products.len(), 2);
    }

    #[test]
    fn file_backed_store_survives_reopen() {
        let dir = scratch_dir();
        let products = sample();

        ProductStore::new(FileKvStore::new(&dir), KEY)
            .save(&products)
            .unwrap();
        let reopened = ProductStore::new(FileKvStore::new(&dir), KEY);
        assert_eq!(reopened.load().unwrap(), products);

        let _ = std::fs::remove_dir_all(dir);
    }
}
