//! Clementine CLI - Catalog inspection and validation tools.
//!
//! # Usage
//!
//! ```bash
//! # Check catalog integrity (taxonomy invariants and product data)
//! clementine check
//!
//! # Print the category taxonomy
//! clementine tree
//!
//! # Show the filter fields a category declares
//! clementine fields phones
//!
//! # Build the normalized query for a category and query string
//! clementine query phones "storage=64GB&storage=128GB&page=2"
//!
//! # Run a query against the demo products
//! clementine list phones "color=black&sort=price-ascending"
//!
//! # Validate write-path attributes
//! clementine validate tops "size=M&color=navy"
//! ```
//!
//! # Commands
//!
//! - `check` - Verify catalog integrity, exit non-zero on problems
//! - `tree` - Print the category taxonomy
//! - `fields` - Show a category's declared filter fields
//! - `query` - Build and print the normalized product query
//! - `list` - Filter, sort, and paginate the demo products
//! - `validate` - Validate attributes against a category's fields
//!
//! # Environment Variables
//!
//! - `RUST_LOG` - Log filter (e.g. `info`, `clementine_catalog=debug`)
//! - `CLEMENTINE_OUTPUT` - Set to `json` to default all commands to JSON output

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::print_stdout)]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "clementine")]
#[command(author, version, about = "Clementine catalog tools")]
struct Cli {
    /// Emit machine-readable JSON instead of text output
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check catalog integrity
    Check,
    /// Print the category taxonomy
    Tree,
    /// Show the filter fields a category declares
    Fields {
        /// Category name (case-insensitive)
        category: String,
    },
    /// Build the normalized product query for a category
    Query {
        /// Category name (case-insensitive)
        category: String,
        /// URL query string, e.g. "storage=64GB&page=2"
        #[arg(default_value = "")]
        params: String,
    },
    /// Run a query against the demo products and print the page
    List {
        /// Category name (case-insensitive)
        category: String,
        /// URL query string, e.g. "color=black&sort=price-ascending"
        #[arg(default_value = "")]
        params: String,
    },
    /// Validate write-path attributes against a category's fields
    Validate {
        /// Category name (case-insensitive)
        category: String,
        /// URL query string carrying the attribute values
        #[arg(default_value = "")]
        params: String,
        /// Apply the stricter product-variant rule instead
        #[arg(long)]
        variant: bool,
    },
}

fn main() {
    // A .env file may carry RUST_LOG
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    // CLEMENTINE_OUTPUT=json flips the default; --json always wins.
    let json = cli.json || get_env_or_default("CLEMENTINE_OUTPUT", "text") == "json";

    match cli.command {
        Commands::Check => commands::check::run(json)?,
        Commands::Tree => commands::tree::print_tree(json)?,
        Commands::Fields { category } => commands::tree::print_fields(&category, json)?,
        Commands::Query { category, params } => {
            commands::query::build(&category, &params, json)?;
        }
        Commands::List { category, params } => {
            commands::query::list(&category, &params, json)?;
        }
        Commands::Validate {
            category,
            params,
            variant,
        } => commands::validate::run(&category, &params, variant, json)?,
    }
    Ok(())
}

fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
