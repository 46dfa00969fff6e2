//! Client-side product cache and the view model derived from it.

use crate::client::Product;

/// Stock level badge shown next to each row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockLevel {
    InStock,
    Low,
    OutOfStock,
}

impl StockLevel {
    pub fn of(stock: i64) -> Self {
        if stock > 10 {
            StockLevel::InStock
        } else if stock > 0 {
            StockLevel::Low
        } else {
            StockLevel::OutOfStock
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StockLevel::InStock => "in stock",
            StockLevel::Low => "low",
            StockLevel::OutOfStock => "out of stock",
        }
    }
}

/// Aggregates shown above the table.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Stats {
    pub count: usize,
    pub total_value: f64,
    /// Wider than a single stock so the sum of any valid rows fits.
    pub total_stock: i128,
}

/// One rendered table row.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductView {
    pub id: i64,
    pub name: String,
    pub price: String,
    pub stock: i64,
    pub level: StockLevel,
}

impl From<&Product> for ProductView {
    fn from(p: &Product) -> Self {
        Self {
            id: p.id,
            name: p.name.clone(),
            price: format_price(p.price),
            stock: p.stock,
            level: StockLevel::of(p.stock),
        }
    }
}

/// The last product list fetched from the server.
#[derive(Debug, Default)]
pub struct ClientState {
    products: Vec<Product>,
}

impl ClientState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replace(&mut self, products: Vec<Product>) {
        self.products = products;
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn find(&self, id: i64) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn get(&self, index: usize) -> Option<&Product> {
        self.products.get(index)
    }

    pub fn rows(&self) -> Vec<ProductView> {
        self.products.iter().map(ProductView::from).collect()
    }

    pub fn stats(&self) -> Stats {
        Stats {
            count: self.products.len(),
            total_value: self.products.iter().map(|p| p.price * p.stock as f64).sum(),
            total_stock: self.products.iter().map(|p| i128::from(p.stock)).sum(),
        }
    }
}

/// `1234.5` -> `$1,234.50`
pub fn format_price(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let sign = if value < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{}${}.{}", sign, grouped, frac_part)
}
