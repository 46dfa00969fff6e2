//! HTTP client for the product API.

use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A product as returned by the API.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub stock: i64,
}

/// Body sent on create and update. All three fields are always sent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductInput {
    pub name: String,
    pub price: f64,
    pub stock: i64,
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Cannot connect to server at {0}")]
    Connect(String),

    /// The server answered with an `{error}` body.
    #[error("{0}")]
    Server(String),

    #[error("Server returned HTTP {0}")]
    Status(StatusCode),

    #[error("Invalid response: {0}")]
    Decode(String),

    #[error("Request failed: {0}")]
    Http(reqwest::Error),
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Deserialize)]
struct ListBody {
    products: Vec<Product>,
}

#[derive(Deserialize)]
struct ProductBody {
    #[serde(rename = "producto", alias = "product")]
    product: Product,
}

#[derive(Deserialize)]
struct DeleteBody {
    id: i64,
}

#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: Client::new(),
            base_url,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn map_send_error(&self, e: reqwest::Error) -> ClientError {
        if e.is_connect() {
            ClientError::Connect(self.base_url.clone())
        } else {
            ClientError::Http(e)
        }
    }

    pub async fn list_products(&self) -> Result<Vec<Product>, ClientError> {
        let response = self
            .http
            .get(self.url("/products"))
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;
        let body: ListBody = decode(response).await?;
        Ok(body.products)
    }

    pub async fn create_product(&self, input: &ProductInput) -> Result<Product, ClientError> {
        let response = self
            .http
            .post(self.url("/products"))
            .json(input)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;
        let body: ProductBody = decode(response).await?;
        Ok(body.product)
    }

    pub async fn update_product(
        &self,
        id: i64,
        input: &ProductInput,
    ) -> Result<Product, ClientError> {
        let response = self
            .http
            .put(self.url(&format!("/products/{}", id)))
            .json(input)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;
        let body: ProductBody = decode(response).await?;
        Ok(body.product)
    }

    /// Returns the id the server confirmed as deleted.
    pub async fn delete_product(&self, id: i64) -> Result<i64, ClientError> {
        let response = self
            .http
            .delete(self.url(&format!("/products/{}", id)))
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;
        let body: DeleteBody = decode(response).await?;
        Ok(body.id)
    }
}

/// Decode a success body, or turn a failure into the server's message when
/// it sent one.
async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let status = response.status();
    let bytes = response.bytes().await.map_err(ClientError::Http)?;

    if !status.is_success() {
        return Err(match serde_json::from_slice::<ErrorBody>(&bytes) {
            Ok(body) => ClientError::Server(body.error),
            Err(_) => ClientError::Status(status),
        });
    }

    serde_json::from_slice(&bytes).map_err(|e| ClientError::Decode(e.to_string()))
}
