use crate::client::{Product, ProductInput};

/// Which product form the modal is showing.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum FormMode {
    Add,
    Edit(i64),
}

/// Requests handed to the background worker.
#[derive(Debug)]
pub enum Action {
    Load,
    Create(ProductInput),
    Update { id: i64, input: ProductInput },
    Delete { id: i64, name: String },
}

/// Outcomes sent back to the UI loop.
#[derive(Debug)]
pub enum ActionResult {
    Loaded(Result<Vec<Product>, String>),
    Created(Result<Product, String>),
    Updated(Result<Product, String>),
    Deleted {
        name: String,
        result: Result<i64, String>,
    },
}
