//! Products

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A catalog product, as captured at the moment it enters a cart.
///
/// Cart lines store a full clone of this struct rather than a live catalog
/// reference, so catalog edits after add-to-cart never retroactively change a
/// line's price or availability within the same session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Catalog identifier.
    pub id: String,

    /// Display title.
    pub title: String,

    /// Regular price.
    pub price: Decimal,

    /// Sale price; overrides [`price`](Self::price) when present.
    #[serde(default)]
    pub sale_price: Option<Decimal>,

    /// Units available for sale. Absent means a single unit.
    #[serde(default)]
    pub quantity: Option<u32>,

    /// Short display code quoted in order messages.
    #[serde(default)]
    pub product_code: String,

    /// Image references, passed through opaquely for display.
    #[serde(default)]
    pub images: Vec<String>,
}

impl Product {
    /// Create a new product with the given identity and regular price.
    pub fn new(id: impl Into<String>, title: impl Into<String>, price: Decimal) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            price,
            sale_price: None,
            quantity: None,
            product_code: String::new(),
            images: Vec::new(),
        }
    }

    /// Set the sale price.
    #[must_use]
    pub fn with_sale_price(mut self, sale_price: Decimal) -> Self {
        self.sale_price = Some(sale_price);
        self
    }

    /// Set the available quantity.
    #[must_use]
    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = Some(quantity);
        self
    }

    /// Set the display code.
    #[must_use]
    pub fn with_code(mut self, product_code: impl Into<String>) -> Self {
        self.product_code = product_code.into();
        self
    }

    /// The price a customer actually pays: the sale price when present,
    /// otherwise the regular price.
    pub fn effective_price(&self) -> Decimal {
        self.sale_price.unwrap_or(self.price)
    }

    /// Units available for sale; a product with no recorded quantity is
    /// treated as a single unit.
    pub fn available(&self) -> u32 {
        self.quantity.unwrap_or(1)
    }
}
