pub mod audit;
pub mod model;
pub mod rest;
pub mod store;
pub mod validation;

pub use audit::{ApiAuditLogger, create_audit_logger};
pub use model::{NewProduct, Product};
pub use store::{ProductStore, SqliteStore, StoreError};
pub use validation::{ProductPayload, ValidationError};
