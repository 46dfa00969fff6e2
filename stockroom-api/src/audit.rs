use std::sync::Arc;

use tracing::info;

/// Audit trail for product mutations.
///
/// Events go to the `audit` tracing target so they can be filtered or
/// routed separately from request logs (`RUST_LOG=audit=info`).
pub struct ApiAuditLogger {
    enabled: bool,
}

impl ApiAuditLogger {
    pub fn new() -> Self {
        Self { enabled: true }
    }

    pub fn new_noop() -> Self {
        Self { enabled: false }
    }

    fn log(&self, action: &str, product_id: i64, detail: String) {
        if !self.enabled {
            return;
        }
        info!(target: "audit", action, product_id, "{}", detail);
    }

    pub fn product_created(&self, product_id: i64, name: &str) {
        self.log(
            "create",
            product_id,
            format!("Product created: {} ({})", name, product_id),
        );
    }

    pub fn product_updated(&self, product_id: i64, name: &str, price: f64, stock: i64) {
        self.log(
            "update",
            product_id,
            format!(
                "Product updated: {} ({}) price={} stock={}",
                name, product_id, price, stock
            ),
        );
    }

    pub fn product_deleted(&self, product_id: i64) {
        self.log(
            "delete",
            product_id,
            format!("Product deleted: {}", product_id),
        );
    }
}

impl Default for ApiAuditLogger {
    fn default() -> Self {
        Self::new()
    }
}

pub fn create_audit_logger(enabled: bool) -> Arc<ApiAuditLogger> {
    if enabled {
        Arc::new(ApiAuditLogger::new())
    } else {
        Arc::new(ApiAuditLogger::new_noop())
    }
}
