use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info};
use utoipa::ToSchema;

use crate::audit::ApiAuditLogger;
use crate::model::Product;
use crate::store::{ProductStore, StoreError};
use crate::validation::{ProductPayload, ValidationError};

/// Shared application state
pub struct AppState {
    pub store: Arc<dyn ProductStore>,
    pub audit: Arc<ApiAuditLogger>,
}

/// Error body returned by every failing product endpoint
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Body returned for unknown routes under `/products`
#[derive(Serialize, ToSchema)]
pub struct RouteNotFoundResponse {
    pub error: String,
    pub message: String,
}

/// Failures of a product request, mapped onto HTTP status codes.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Product not found")]
    NotFound,

    /// Raw store message, passed through for diagnosis.
    #[error("{0}")]
    Storage(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        if let ApiError::Storage(ref msg) = self {
            error!(error = %msg, "Store operation failed");
        }
        let body = ErrorResponse {
            error: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(_) => ApiError::NotFound,
            StoreError::Storage(e) => ApiError::Storage(e.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation(ValidationError::MalformedBody(rejection.body_text()))
    }
}

/// Ids are integers; any other path segment cannot name a row.
fn parse_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse().map_err(|_| ApiError::NotFound)
}

/// Response for listing products
#[derive(Serialize, ToSchema)]
pub struct ProductListResponse {
    pub message: String,
    pub products: Vec<Product>,
}

/// Response carrying a single product
#[derive(Serialize, ToSchema)]
pub struct ProductResponse {
    pub message: String,
    #[serde(rename = "producto")]
    pub product: Product,
}

/// Response for deleting a product
#[derive(Serialize, ToSchema)]
pub struct DeleteProductResponse {
    pub message: String,
    pub id: i64,
}

/// List all products
#[utoipa::path(
    get,
    path = "/products",
    responses(
        (status = 200, description = "All products in insertion order", body = ProductListResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    ),
    tag = "products"
)]
pub async fn list_products(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ProductListResponse>, ApiError> {
    let products = state.store.list_products().await?;
    Ok(Json(ProductListResponse {
        message: "Products retrieved successfully".to_string(),
        products,
    }))
}

/// Create a product
#[utoipa::path(
    post,
    path = "/products",
    request_body = ProductPayload,
    responses(
        (status = 201, description = "Product created", body = ProductResponse),
        (status = 400, description = "Missing or out-of-range field", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    ),
    tag = "products"
)]
pub async fn create_product(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ProductPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<ProductResponse>), ApiError> {
    let Json(payload) = payload?;
    let fields = payload.validate()?;

    let product = state.store.create_product(&fields).await?;
    info!(id = product.id, name = %product.name, "Product created");
    state.audit.product_created(product.id, &product.name);

    Ok((
        StatusCode::CREATED,
        Json(ProductResponse {
            message: "Product created successfully".to_string(),
            product,
        }),
    ))
}

/// Get a product by ID
#[utoipa::path(
    get,
    path = "/products/{id}",
    params(
        ("id" = i64, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product found", body = ProductResponse),
        (status = 404, description = "Product not found", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    ),
    tag = "products"
)]
pub async fn get_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ProductResponse>, ApiError> {
    let id = parse_id(&id)?;
    let product = state.store.get_product(id).await?;
    Ok(Json(ProductResponse {
        message: "Product retrieved successfully".to_string(),
        product,
    }))
}

/// Replace a product's name, price and stock
#[utoipa::path(
    put,
    path = "/products/{id}",
    params(
        ("id" = i64, Path, description = "Product ID")
    ),
    request_body = ProductPayload,
    responses(
        (status = 200, description = "Product updated", body = ProductResponse),
        (status = 400, description = "Missing or out-of-range field", body = ErrorResponse),
        (status = 404, description = "Product not found", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    ),
    tag = "products"
)]
pub async fn update_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Result<Json<ProductPayload>, JsonRejection>,
) -> Result<Json<ProductResponse>, ApiError> {
    // Body problems are reported before existence.
    let Json(payload) = payload?;
    let fields = payload.validate()?;
    let id = parse_id(&id)?;

    let product = state.store.update_product(id, &fields).await?;
    info!(id = product.id, "Product updated");
    state
        .audit
        .product_updated(product.id, &product.name, product.price, product.stock);

    Ok(Json(ProductResponse {
        message: "Product updated successfully".to_string(),
        product,
    }))
}

/// Delete a product
#[utoipa::path(
    delete,
    path = "/products/{id}",
    params(
        ("id" = i64, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product deleted", body = DeleteProductResponse),
        (status = 404, description = "Product not found", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    ),
    tag = "products"
)]
pub async fn delete_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<DeleteProductResponse>, ApiError> {
    let id = parse_id(&id)?;
    state.store.delete_product(id).await?;
    info!(id, "Product deleted");
    state.audit.product_deleted(id);

    Ok(Json(DeleteProductResponse {
        message: "Product deleted successfully".to_string(),
        id,
    }))
}

/// Fallback for any unmatched path or method under `/products`
pub async fn endpoint_not_found() -> (StatusCode, Json<RouteNotFoundResponse>) {
    (
        StatusCode::NOT_FOUND,
        Json(RouteNotFoundResponse {
            error: "Endpoint not found".to_string(),
            message: "The requested route does not exist".to_string(),
        }),
    )
}
