//! Product data types shared by the store and the REST layer.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A stored product row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    /// Store-assigned identifier, never reused
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub stock: i64,
}

/// The business fields of a product, already validated.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub price: f64,
    pub stock: i64,
}

impl NewProduct {
    pub fn new(name: impl Into<String>, price: f64, stock: i64) -> Self {
        Self {
            name: name.into(),
            price,
            stock,
        }
    }

    /// Attach a store-assigned id.
    pub fn with_id(self, id: i64) -> Product {
        Product {
            id,
            name: self.name,
            price: self.price,
            stock: self.stock,
        }
    }
}
