use katalog_core::entity::position_of;
use katalog_core::{CatalogError, CatalogResult, ProductId};
use katalog_products::{Product, ProductDraft, SortKey, SortOrder, to_csv};
use katalog_search::PrefixTable;
use katalog_store::{Hydrated, KvStore, ProductStore, StoreError};

use crate::confirm::{Applied, Confirmation, PendingAction};

/// Owner of the catalog: the ordered collection plus its durable copy.
///
/// Every mutation builds the next collection, persists it, and only then
/// replaces the in-memory one. A failed write returns `Storage` and leaves
/// memory as it was, so memory never runs ahead of storage.
///
/// Positional operations (`update`, `remove`, `get`) address "the record at
/// index i right now"; any mutation may shift indices. The `*_by_id` variants
/// address a record for its whole lifetime.
#[derive(Debug)]
pub struct CatalogService<K> {
    store: ProductStore<K>,
    products: Vec<Product>,
}

impl<K: KvStore> CatalogService<K> {
    /// Hydrate from storage. A corrupt blob is surfaced as `CorruptState`.
    ///
    /// Records stored without an id get one here and the collection is saved
    /// back once, so those ids stay valid across reopens. If that write fails
    /// the catalog still opens; the ids are persisted by the next mutation.
    pub fn open(store: ProductStore<K>) -> CatalogResult<Self> {
        let hydrated = store.hydrate()?;
        Ok(Self::from_hydrated(store, hydrated))
    }

    /// Like [`open`](Self::open), but a corrupt blob is discarded and the
    /// catalog starts empty. The blob stays in storage until the next write.
    pub fn open_or_recover(store: ProductStore<K>) -> CatalogResult<Self> {
        let hydrated = match store.hydrate() {
            Ok(hydrated) => hydrated,
            Err(err @ StoreError::Corrupt { .. }) => {
                tracing::warn!(key = store.key(), error = %err, "discarding corrupt catalog; starting empty");
                return Ok(Self {
                    store,
                    products: Vec::new(),
                });
            }
            Err(err) => return Err(err.into()),
        };
        Ok(Self::from_hydrated(store, hydrated))
    }

    fn from_hydrated(store: ProductStore<K>, hydrated: Hydrated) -> Self {
        if hydrated.needs_write_back() {
            match store.save(&hydrated.products) {
                Ok(()) => tracing::info!(
                    key = store.key(),
                    assigned_ids = hydrated.assigned_ids,
                    "persisted ids assigned to legacy records"
                ),
                Err(err) => tracing::warn!(
                    key = store.key(),
                    error = %err,
                    "could not persist assigned ids; they change on next open unless a mutation succeeds"
                ),
            }
        }

        tracing::info!(key = store.key(), count = hydrated.products.len(), "catalog opened");
        Self {
            store,
            products: hydrated.products,
        }
    }

    pub fn store(&self) -> &ProductStore<K> {
        &self.store
    }

    /// Current collection in stored order.
    pub fn list(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn get(&self, index: usize) -> CatalogResult<&Product> {
        self.products
            .get(index)
            .ok_or_else(|| CatalogError::index_out_of_bounds(index, self.products.len()))
    }

    pub fn get_by_id(&self, id: ProductId) -> CatalogResult<&Product> {
        let index = self.index_of(id)?;
        Ok(&self.products[index])
    }

    /// Validate and append. Returns the stored record (with its new id).
    pub fn add(&mut self, draft: ProductDraft) -> CatalogResult<Product> {
        let product = draft.into_product(ProductId::new())?;

        let mut next = self.products.clone();
        next.push(product.clone());
        self.commit(next)?;

        tracing::info!(product_id = %product.id_typed(), index = self.products.len() - 1, "product added");
        Ok(product)
    }

    /// Replace the record at `index` in place; it keeps its id.
    pub fn update(&mut self, index: usize, draft: ProductDraft) -> CatalogResult<Product> {
        let current = self.get(index)?;
        let product = draft.into_product(current.id_typed())?;

        let mut next = self.products.clone();
        next[index] = product.clone();
        self.commit(next)?;

        tracing::info!(product_id = %product.id_typed(), index, "product updated");
        Ok(product)
    }

    pub fn update_by_id(&mut self, id: ProductId, draft: ProductDraft) -> CatalogResult<Product> {
        let index = self.index_of(id)?;
        self.update(index, draft)
    }

    /// Splice out the record at `index`; later records shift down by one.
    pub fn remove(&mut self, index: usize) -> CatalogResult<Product> {
        self.get(index)?;

        let mut next = self.products.clone();
        let removed = next.remove(index);
        self.commit(next)?;

        tracing::info!(product_id = %removed.id_typed(), index, "product removed");
        Ok(removed)
    }

    pub fn remove_by_id(&mut self, id: ProductId) -> CatalogResult<Product> {
        let index = self.index_of(id)?;
        self.remove(index)
    }

    /// Records whose name contains `query` (case-insensitive), in stored order.
    ///
    /// The query is trimmed; a blank query returns the whole collection.
    pub fn find(&self, query: &str) -> Vec<Product> {
        let table = PrefixTable::new(query.trim());
        let hits: Vec<Product> = self
            .products
            .iter()
            .filter(|p| table.is_found_in(p.name()))
            .cloned()
            .collect();

        tracing::debug!(query, hits = hits.len(), total = self.products.len(), "catalog search");
        hits
    }

    /// Reorder the stored collection. The new order is persisted.
    pub fn sort_by(&mut self, key: SortKey, order: SortOrder) -> CatalogResult<()> {
        let next = katalog_products::sort(&self.products, key, order);
        self.commit(next)?;

        tracing::info!(key = key.as_str(), order = order.as_str(), count = self.products.len(), "catalog sorted");
        Ok(())
    }

    /// CSV payload of the current collection; `None` when there is nothing to export.
    pub fn export_csv(&self) -> Option<String> {
        if self.products.is_empty() {
            tracing::debug!("export skipped; catalog is empty");
            return None;
        }
        Some(to_csv(&self.products))
    }

    /// Remove the persisted blob and empty the in-memory collection.
    pub fn reset(&mut self) -> CatalogResult<usize> {
        self.store.clear()?;
        let cleared = self.products.len();
        self.products.clear();

        tracing::info!(cleared, "catalog reset");
        Ok(cleared)
    }

    pub fn request_remove(&self, id: ProductId) -> CatalogResult<Confirmation> {
        let product = self.get_by_id(id)?;
        Ok(Confirmation::new(PendingAction::Remove {
            id,
            name: product.name().to_string(),
        }))
    }

    pub fn request_reset(&self) -> Confirmation {
        Confirmation::new(PendingAction::Reset {
            count: self.products.len(),
        })
    }

    /// Perform a previously requested action.
    ///
    /// A removal whose target has disappeared in the meantime fails with
    /// `NotFound` and changes nothing.
    pub fn confirm(&mut self, confirmation: Confirmation) -> CatalogResult<Applied> {
        match confirmation.into_action() {
            PendingAction::Remove { id, .. } => self.remove_by_id(id).map(Applied::Removed),
            PendingAction::Reset { .. } => {
                let cleared = self.reset()?;
                Ok(Applied::Reset { cleared })
            }
        }
    }

    fn index_of(&self, id: ProductId) -> CatalogResult<usize> {
        position_of(&self.products, &id).ok_or_else(|| CatalogError::not_found(id))
    }

    fn commit(&mut self, next: Vec<Product>) -> CatalogResult<()> {
        self.store.save(&next)?;
        self.products = next;
        Ok(())
    }
}
