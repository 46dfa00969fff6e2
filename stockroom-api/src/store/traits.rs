//! ProductStore trait definition.
//!
//! Handlers work against this trait so the SQLite backend can be swapped
//! out in tests or replaced later without touching the REST layer.

use async_trait::async_trait;

use crate::model::{NewProduct, Product};

use super::error::Result;

/// Keyed storage for product rows.
///
/// Every method is a single statement against one row or the whole table.
/// Field values are stored as given: range checks belong to the caller.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Insert a row and return it with the id the store assigned.
    async fn create_product(&self, product: &NewProduct) -> Result<Product>;

    /// All rows in insertion order. Empty when the table is empty.
    async fn list_products(&self) -> Result<Vec<Product>>;

    /// Get a product by id.
    async fn get_product(&self, id: i64) -> Result<Product>;

    /// Replace name, price and stock of an existing row.
    async fn update_product(&self, id: i64, product: &NewProduct) -> Result<Product>;

    /// Hard-delete a row.
    async fn delete_product(&self, id: i64) -> Result<()>;
}
