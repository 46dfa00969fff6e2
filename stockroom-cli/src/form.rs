//! Product form input and the checks run before anything is sent.

use thiserror::Error;

use crate::client::{Product, ProductInput};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Product name is required")]
    EmptyName,

    #[error("Price must be greater than 0")]
    InvalidPrice,

    #[error("Stock cannot be negative")]
    InvalidStock,
}

/// Raw text of the three product fields, as typed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductForm {
    pub name: String,
    pub price: String,
    pub stock: String,
}

impl ProductForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prefill from a cached product (edit flow).
    pub fn from_product(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            price: product.price.to_string(),
            stock: product.stock.to_string(),
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Checks run in order: name, price, stock. A value that does not parse
    /// fails the same check as an out-of-range one.
    pub fn validate(&self) -> Result<ProductInput, FormError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(FormError::EmptyName);
        }

        let price = self
            .price
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|p| p.is_finite() && *p > 0.0)
            .ok_or(FormError::InvalidPrice)?;

        let stock = self
            .stock
            .trim()
            .parse::<i64>()
            .ok()
            .filter(|s| *s >= 0)
            .ok_or(FormError::InvalidStock)?;

        Ok(ProductInput {
            name: name.to_string(),
            price,
            stock,
        })
    }
}
