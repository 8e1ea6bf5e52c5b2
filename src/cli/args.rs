use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "artemisa")]
#[command(about = "Flower order quotes for Artemisa Florería")]
#[command(version = "0.1.0")]
pub struct Args {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Catalog JSON file to use instead of the built-in price list
    #[arg(short, long, global = true)]
    pub catalog: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the catalog with unit prices
    Catalog,
    /// Build a quote interactively
    Quote,
    /// Quote a fixed list of flowers and print the total
    Total {
        /// Flower and quantity as NAME=QUANTITY (repeatable)
        #[arg(short, long = "item", value_name = "NAME=QUANTITY")]
        items: Vec<String>,
        /// Promotions or bundles to print with the quote
        #[arg(short, long)]
        promotions: Option<String>,
        /// Print the quote as JSON
        #[arg(long)]
        json: bool,
    },
}
