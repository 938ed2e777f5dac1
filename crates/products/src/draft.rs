//! Unvalidated product input and its validation.

use katalog_core::{CatalogError, CatalogResult, ProductId};

use crate::product::Product;

/// Largest stock count accepted (integers above this lose precision as `f64`).
const MAX_STOCK: f64 = 9_007_199_254_740_991.0;

/// Raw text fields exactly as an input form delivers them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormInput {
    pub name: String,
    pub price: String,
    pub stock: String,
    pub category: String,
    pub badge: String,
    pub image: String,
}

/// Typed but not yet validated product fields.
///
/// Built either directly (builder methods) or from a [`FormInput`] via
/// [`ProductDraft::from_form`]. Becomes a [`Product`] only through
/// [`ProductDraft::into_product`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductDraft {
    pub name: String,
    pub price: Option<f64>,
    pub stock: Option<f64>,
    pub category: String,
    pub badge: String,
    pub image: String,
}

impl ProductDraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn price(mut self, price: impl Into<f64>) -> Self {
        self.price = Some(price.into());
        self
    }

    pub fn stock(mut self, stock: impl Into<f64>) -> Self {
        self.stock = Some(stock.into());
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn badge(mut self, badge: impl Into<String>) -> Self {
        self.badge = badge.into();
        self
    }

    pub fn image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    /// Coerce raw form text into typed fields.
    ///
    /// Blank price/stock become absent; anything else must parse as a decimal
    /// number. Range checks happen later in [`into_product`](Self::into_product).
    pub fn from_form(input: &FormInput) -> CatalogResult<Self> {
        Ok(Self {
            name: input.name.clone(),
            price: parse_number("price", &input.price)?,
            stock: parse_number("stock", &input.stock)?,
            category: input.category.clone(),
            badge: input.badge.clone(),
            image: input.image.clone(),
        })
    }

    /// Validate and build the record under the given identity.
    pub fn into_product(self, id: ProductId) -> CatalogResult<Product> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(CatalogError::validation("name cannot be empty"));
        }

        let price = match self.price {
            None => return Err(CatalogError::validation("price is required")),
            Some(p) if !p.is_finite() => {
                return Err(CatalogError::validation("price must be a finite number"));
            }
            Some(p) if p < 0.0 => {
                return Err(CatalogError::validation("price cannot be negative"));
            }
            Some(p) => p,
        };

        let stock = match self.stock {
            None => 0,
            Some(s) if !s.is_finite() => {
                return Err(CatalogError::validation("stock must be a finite number"));
            }
            Some(s) if s < 0.0 => {
                return Err(CatalogError::validation("stock cannot be negative"));
            }
            Some(s) if s.fract() != 0.0 || s > MAX_STOCK => {
                return Err(CatalogError::validation("stock must be a whole number"));
            }
            Some(s) => s as u64,
        };

        Ok(Product::from_parts(
            id,
            name.to_string(),
            // Normalize -0.0 so it serializes as 0.
            price + 0.0,
            stock,
            self.category.trim().to_string(),
            self.badge,
            self.image,
        ))
    }
}

fn parse_number(field: &str, raw: &str) -> CatalogResult<Option<f64>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse::<f64>()
        .map(Some)
        .map_err(|_| CatalogError::validation(format!("{field} must be a number")))
}
