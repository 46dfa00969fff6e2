//! Request body validation for product writes.

use serde::Deserialize;
use thiserror::Error;
use utoipa::ToSchema;

use crate::model::NewProduct;

/// Body of `POST /products` and `PUT /products/{id}`.
///
/// Every field is optional at the wire level so a missing field is reported
/// as a validation error instead of a deserialization failure.
#[derive(Debug, Default, Clone, Deserialize, ToSchema)]
pub struct ProductPayload {
    #[serde(default, alias = "nombre")]
    pub name: Option<String>,
    #[serde(default, alias = "precio")]
    pub price: Option<f64>,
    #[serde(default)]
    pub stock: Option<i64>,
}

/// Client-correctable input problems.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("All fields are required: name, price, stock")]
    MissingFields,

    #[error("Price must be greater than 0")]
    NonPositivePrice,

    #[error("Stock cannot be negative")]
    NegativeStock,

    #[error("Invalid request body: {0}")]
    MalformedBody(String),
}

impl ProductPayload {
    /// Check presence, then price, then stock.
    ///
    /// A price of exactly zero counts as missing.
    pub fn validate(&self) -> Result<NewProduct, ValidationError> {
        let name = match &self.name {
            Some(name) if !name.trim().is_empty() => name,
            _ => return Err(ValidationError::MissingFields),
        };
        let price = match self.price {
            Some(price) if price != 0.0 => price,
            _ => return Err(ValidationError::MissingFields),
        };
        let Some(stock) = self.stock else {
            return Err(ValidationError::MissingFields);
        };

        if price <= 0.0 {
            return Err(ValidationError::NonPositivePrice);
        }
        if stock < 0 {
            return Err(ValidationError::NegativeStock);
        }

        Ok(NewProduct::new(name.clone(), price, stock))
    }
}
