//! Product persistence.

mod error;
mod sqlite_store;
mod traits;

pub use error::{Result, StoreError};
pub use sqlite_store::SqliteStore;
pub use traits::ProductStore;
