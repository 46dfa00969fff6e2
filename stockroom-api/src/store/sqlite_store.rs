//! SqliteStore - ProductStore backed by a SQLite database file.

use std::path::Path;

use async_trait::async_trait;
use sqlx::Row;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions, SqliteRow};

use crate::model::{NewProduct, Product};

use super::error::{Result, StoreError};
use super::traits::ProductStore;

// DECIMAL columns get NUMERIC affinity, so whole prices come back as
// integers unless cast.
const PRODUCT_COLUMNS: &str = "id, name, CAST(price AS REAL) AS price, stock";

/// SQLite-backed product store.
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open (creating if needed) the database file at `path`.
    pub async fn open(path: &Path) -> Result<Self> {
        let db_url = format!("sqlite:{}?mode=rwc", path.display());

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(&db_url)
            .await?;

        let store = Self { pool };
        store.migrate().await?;
        Ok(store)
    }

    /// Open a private in-memory database. Contents are lost on close.
    pub async fn open_in_memory() -> Result<Self> {
        // Every connection to :memory: is its own database, so pin one.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await?;

        let store = Self { pool };
        store.migrate().await?;
        Ok(store)
    }

    async fn migrate(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS products (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                price DECIMAL(10, 2) NOT NULL,
                stock INTEGER NOT NULL DEFAULT 0
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Close all pooled connections. Pending statements finish first.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl ProductStore for SqliteStore {
    async fn create_product(&self, product: &NewProduct) -> Result<Product> {
        let row = sqlx::query(&format!(
            "INSERT INTO products (name, price, stock) VALUES (?, ?, ?) RETURNING {}",
            PRODUCT_COLUMNS
        ))
        .bind(&product.name)
        .bind(product.price)
        .bind(product.stock)
        .fetch_one(&self.pool)
        .await?;

        Ok(row_to_product(&row))
    }

    async fn list_products(&self) -> Result<Vec<Product>> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM products ORDER BY id ASC",
            PRODUCT_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(row_to_product).collect())
    }

    async fn get_product(&self, id: i64) -> Result<Product> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM products WHERE id = ?",
            PRODUCT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref()
            .map(row_to_product)
            .ok_or(StoreError::NotFound(id))
    }

    async fn update_product(&self, id: i64, product: &NewProduct) -> Result<Product> {
        let row = sqlx::query(&format!(
            "UPDATE products SET name = ?, price = ?, stock = ? WHERE id = ? RETURNING {}",
            PRODUCT_COLUMNS
        ))
        .bind(&product.name)
        .bind(product.price)
        .bind(product.stock)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref()
            .map(row_to_product)
            .ok_or(StoreError::NotFound(id))
    }

    async fn delete_product(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM products WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }
}

fn row_to_product(row: &SqliteRow) -> Product {
    Product {
        id: row.get("id"),
        name: row.get("name"),
        price: row.get("price"),
        stock: row.get("stock"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn setup_store() -> (SqliteStore, TempDir) {
        let dir = TempDir::new().unwrap();
        let store = SqliteStore::open(&dir.path().join("products.db"))
            .await
            .unwrap();
        (store, dir)
    }

    #[tokio::test]
    async fn test_product_crud() {
        let (store, _dir) = setup_store().await;

        // Create
        let input = NewProduct::new("Widget", 9.99, 5);
        let created = store.create_product(&input).await.unwrap();
        assert_eq!(created.id, 1);
        assert_eq!(created, input.clone().with_id(1));

        // Get
        let fetched = store.get_product(created.id).await.unwrap();
        assert_eq!(fetched, created);

        // Update
        let updated = store
            .update_product(created.id, &NewProduct::new("Widget", 12.5, 3))
            .await
            .unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.price, 12.5);
        assert_eq!(updated.stock, 3);

        // Delete
        store.delete_product(created.id).await.unwrap();
        assert!(matches!(
            store.get_product(created.id).await,
            Err(StoreError::NotFound(1))
        ));
    }

    #[tokio::test]
    async fn test_list_empty_and_ordered() {
        let (store, _dir) = setup_store().await;
        assert!(store.list_products().await.unwrap().is_empty());

        for name in ["a", "b", "c"] {
            store
                .create_product(&NewProduct::new(name, 1.0, 0))
                .await
                .unwrap();
        }

        let names: Vec<String> = store
            .list_products()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_missing_ids_are_not_found() {
        let (store, _dir) = setup_store().await;
        let fields = NewProduct::new("Ghost", 1.0, 1);

        assert!(matches!(
            store.get_product(42).await,
            Err(StoreError::NotFound(42))
        ));
        assert!(matches!(
            store.update_product(42, &fields).await,
            Err(StoreError::NotFound(42))
        ));
        assert!(matches!(
            store.delete_product(42).await,
            Err(StoreError::NotFound(42))
        ));
    }

    #[tokio::test]
    async fn test_second_delete_is_not_found() {
        let (store, _dir) = setup_store().await;
        let created = store
            .create_product(&NewProduct::new("Once", 2.0, 1))
            .await
            .unwrap();

        store.delete_product(created.id).await.unwrap();
        assert!(matches!(
            store.delete_product(created.id).await,
            Err(StoreError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_ids_not_reused_after_delete() {
        let (store, _dir) = setup_store().await;
        let first = store
            .create_product(&NewProduct::new("first", 1.0, 1))
            .await
            .unwrap();
        store.delete_product(first.id).await.unwrap();

        let second = store
            .create_product(&NewProduct::new("second", 1.0, 1))
            .await
            .unwrap();
        assert!(second.id > first.id);
    }

    #[tokio::test]
    async fn test_whole_price_reads_back_as_float() {
        let (store, _dir) = setup_store().await;
        let created = store
            .create_product(&NewProduct::new("Round", 10.0, 2))
            .await
            .unwrap();

        let fetched = store.get_product(created.id).await.unwrap();
        assert_eq!(fetched.price, 10.0);
    }

    #[tokio::test]
    async fn test_persists_across_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("products.db");

        let store = SqliteStore::open(&path).await.unwrap();
        store
            .create_product(&NewProduct::new("Durable", 3.5, 7))
            .await
            .unwrap();
        store.close().await;

        let reopened = SqliteStore::open(&path).await.unwrap();
        let products = reopened.list_products().await.unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].name, "Durable");
    }

    #[tokio::test]
    async fn test_in_memory_store() {
        let store = SqliteStore::open_in_memory().await.unwrap();
        store
            .create_product(&NewProduct::new("Ephemeral", 1.25, 0))
            .await
            .unwrap();
        assert_eq!(store.list_products().await.unwrap().len(), 1);
    }
}
