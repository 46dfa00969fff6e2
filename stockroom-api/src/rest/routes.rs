use axum::{Router, routing::get};
use std::path::Path;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::handlers::{self, AppState};
use crate::model::Product;
use crate::validation::ProductPayload;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Stockroom API",
        version = "0.1.0",
        description = "REST API for the Stockroom inventory manager. Lists, creates, edits and deletes products (name, price, stock).",
        license(name = "MIT")
    ),
    tags(
        (name = "products", description = "Product CRUD operations")
    ),
    paths(
        handlers::list_products,
        handlers::create_product,
        handlers::get_product,
        handlers::update_product,
        handlers::delete_product,
    ),
    components(schemas(
        Product,
        ProductPayload,
        handlers::ProductListResponse,
        handlers::ProductResponse,
        handlers::DeleteProductResponse,
        handlers::ErrorResponse,
        handlers::RouteNotFoundResponse,
    ))
)]
pub struct ApiDoc;

/// JSON API routes: `/products` plus the OpenAPI document.
pub fn create_router(state: Arc<AppState>) -> Router {
    let collection = get(handlers::list_products)
        .post(handlers::create_product)
        .fallback(handlers::endpoint_not_found);

    // Anything under /products that is not a known path+method gets the
    // JSON not-found body instead of axum's empty 404/405.
    let product_routes = Router::new()
        .route("/", collection.clone())
        .route(
            "/{id}",
            get(handlers::get_product)
                .put(handlers::update_product)
                .delete(handlers::delete_product)
                .fallback(handlers::endpoint_not_found),
        )
        .fallback(handlers::endpoint_not_found);

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Nested routes only match `/products` itself, not `/products/`
        .route("/products/", collection)
        .nest("/products", product_routes)
        .with_state(state)
}

/// Full application: API routes, static page from `public_dir`, CORS and
/// request tracing.
pub fn create_app(state: Arc<AppState>, public_dir: &Path) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    create_router(state)
        .fallback_service(ServeDir::new(public_dir))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
