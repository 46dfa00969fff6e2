use clap::{Parser, Subcommand};
use tabled::{Table, Tabled};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

mod client;
mod form;
mod notify;
mod state;
mod tui;

use client::{ApiClient, ClientError};
use form::ProductForm;
use state::{ClientState, ProductView, format_price};

#[derive(Parser)]
#[command(name = "stockroom")]
#[command(about = "CLI for the Stockroom inventory manager", long_about = None)]
struct Cli {
    /// API server address
    #[arg(short, long, default_value = "http://127.0.0.1:3000")]
    server: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List all products
    List,

    /// Add a product
    Add {
        /// Product name
        #[arg(short, long)]
        name: String,

        /// Unit price (greater than 0)
        #[arg(short, long, allow_hyphen_values = true)]
        price: String,

        /// Units in stock (0 or more)
        #[arg(long, allow_hyphen_values = true)]
        stock: String,
    },

    /// Edit a product; omitted fields keep their current value
    Edit {
        /// Product ID
        id: i64,

        #[arg(short, long)]
        name: Option<String>,

        #[arg(short, long, allow_hyphen_values = true)]
        price: Option<String>,

        #[arg(long, allow_hyphen_values = true)]
        stock: Option<String>,
    },

    /// Delete a product
    Delete {
        /// Product ID
        id: i64,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Tabled)]
struct ProductRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "NAME")]
    name: String,
    #[tabled(rename = "PRICE")]
    price: String,
    #[tabled(rename = "STOCK")]
    stock: i64,
    #[tabled(rename = "LEVEL")]
    level: String,
}

impl From<ProductView> for ProductRow {
    fn from(view: ProductView) -> Self {
        Self {
            id: view.id,
            name: view.name,
            price: view.price,
            stock: view.stock,
            level: view.level.label().to_string(),
        }
    }
}

/// Fetch the product list into a fresh cache.
async fn load_state(client: &ApiClient) -> Result<ClientState, ClientError> {
    let mut state = ClientState::new();
    state.replace(client.list_products().await?);
    Ok(state)
}

async fn confirm(prompt: &str) -> std::io::Result<bool> {
    let mut stdout = tokio::io::stdout();
    stdout.write_all(prompt.as_bytes()).await?;
    stdout.flush().await?;

    let mut line = String::new();
    BufReader::new(tokio::io::stdin())
        .read_line(&mut line)
        .await?;
    Ok(matches!(line.trim(), "y" | "Y" | "yes"))
}

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("Error: {}", message);
    std::process::exit(1);
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = ApiClient::new(cli.server);

    let Some(command) = cli.command else {
        // No subcommand: start TUI
        tui::run(client).await?;
        return Ok(());
    };

    match command {
        Commands::List => {
            let state = load_state(&client).await.unwrap_or_else(|e| fail(e));

            if state.is_empty() {
                println!("No products found");
            } else {
                let rows: Vec<ProductRow> =
                    state.rows().into_iter().map(ProductRow::from).collect();
                println!("{}", Table::new(rows));
            }

            let stats = state.stats();
            println!(
                "{} products, total value {}, {} units in stock",
                stats.count,
                format_price(stats.total_value),
                stats.total_stock
            );
        }

        Commands::Add { name, price, stock } => {
            let input = ProductForm { name, price, stock }
                .validate()
                .unwrap_or_else(|e| fail(e));

            let product = client
                .create_product(&input)
                .await
                .unwrap_or_else(|e| fail(e));
            println!("Added product {}: {}", product.id, product.name);
        }

        Commands::Edit {
            id,
            name,
            price,
            stock,
        } => {
            let state = load_state(&client).await.unwrap_or_else(|e| fail(e));
            let Some(current) = state.find(id) else {
                fail("Product not found");
            };

            let mut form = ProductForm::from_product(current);
            if let Some(name) = name {
                form.name = name;
            }
            if let Some(price) = price {
                form.price = price;
            }
            if let Some(stock) = stock {
                form.stock = stock;
            }
            let input = form.validate().unwrap_or_else(|e| fail(e));

            let product = client
                .update_product(id, &input)
                .await
                .unwrap_or_else(|e| fail(e));
            println!(
                "Updated product {}: {} ({}, {} units)",
                product.id,
                product.name,
                format_price(product.price),
                product.stock
            );
        }

        Commands::Delete { id, yes } => {
            let state = load_state(&client).await.unwrap_or_else(|e| fail(e));
            let Some(product) = state.find(id) else {
                fail("Product not found");
            };

            if !yes
                && !confirm(&format!(
                    "Delete product \"{}\"? [y/N] ",
                    product.name
                ))
                .await?
            {
                println!("Aborted");
                return Ok(());
            }

            let deleted = client
                .delete_product(id)
                .await
                .unwrap_or_else(|e| fail(e));
            println!("Deleted product {}", deleted);
        }
    }

    Ok(())
}
