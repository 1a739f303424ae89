use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Group product reviews from a CSV file into feature and sentiment cards
#[derive(Debug, Parser)]
#[command(name = "review-insights", version, about)]
pub struct Cli {
    /// TOML config file (default: review-insights.toml in the working directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Analyze a review CSV and print the product cards
    Analyze {
        /// CSV file with review_text and product_id or product_title columns
        file: PathBuf,

        /// Also write the JSON document to this file or directory
        #[arg(long)]
        export: Option<PathBuf>,

        /// Print the plain-text cards instead of JSON
        #[arg(long)]
        text: bool,

        /// Seed for the placeholder mention counts
        #[arg(long)]
        seed: Option<u64>,

        /// Skip the simulated processing delay
        #[arg(long)]
        no_delay: bool,
    },

    /// Serve the HTTP API
    Serve {
        #[arg(long)]
        host: Option<String>,

        #[arg(long)]
        port: Option<u16>,
    },
}
