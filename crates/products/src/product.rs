use serde::{Deserialize, Deserializer, Serialize};

use katalog_core::{Entity, ProductId};

/// One catalog record.
///
/// Fields are private: a `Product` only comes into existence through
/// [`ProductDraft::into_product`](crate::ProductDraft::into_product) (validated)
/// or through deserialization of a previously persisted collection.
///
/// Persisted field layout is `name, price, stock, category, badge, image, id`.
/// Older blobs without `stock`, `id` or the optional text fields still load,
/// and a stored `stock` that is fractional or negative is coerced on read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    name: String,
    price: f64,
    #[serde(default, deserialize_with = "lenient_stock")]
    stock: u64,
    #[serde(default, deserialize_with = "null_as_empty")]
    category: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    badge: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    image: String,
    #[serde(default)]
    id: ProductId,
}

impl Product {
    pub(crate) fn from_parts(
        id: ProductId,
        name: String,
        price: f64,
        stock: u64,
        category: String,
        badge: String,
        image: String,
    ) -> Self {
        Self {
            name,
            price,
            stock,
            category,
            badge,
            image,
            id,
        }
    }

    pub fn id_typed(&self) -> ProductId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn stock(&self) -> u64 {
        self.stock
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn badge(&self) -> &str {
        &self.badge
    }

    /// Opaque image payload (typically a data URL). Never inspected.
    pub fn image(&self) -> &str {
        &self.image
    }

    pub fn has_image(&self) -> bool {
        !self.image.is_empty()
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accepts any JSON number (or null): fractions truncate, negatives and
/// non-finite values become 0.
fn lenient_stock<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = Option::<f64>::deserialize(deserializer)? else {
        return Ok(0);
    };
    Ok(coerce_stock(raw))
}

fn coerce_stock(raw: f64) -> u64 {
    if !raw.is_finite() || raw < 0.0 {
        tracing::warn!(stock = raw, "stored stock is negative or not finite; using 0");
        return 0;
    }
    if raw.fract() != 0.0 {
        tracing::warn!(stock = raw, "stored stock is fractional; truncating");
    }
    // Saturates above u64::MAX.
    raw.trunc() as u64
}
