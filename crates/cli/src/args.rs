use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(name = "stockledger")]
#[command(version, about = "Stock ledger: product catalog, movements and derived stock", long_about = None)]
pub struct Cli {
    /// Config file (TOML)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Data directory, overriding the config file
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage the product catalog
    #[command(subcommand)]
    Product(ProductCommand),

    /// Record or list stock movements
    #[command(subcommand)]
    Movement(MovementCommand),

    /// Show the current stock of a product
    Stock {
        /// Product code (case-insensitive)
        code: String,
    },

    /// Per-product inventory listing with status flags
    Report,

    /// Products below their minimum threshold
    Shortages,

    /// Total inventory value
    Value,

    /// Write inventory, movements and products as CSV
    Export {
        /// Target directory (defaults to `export_dir` from config)
        #[arg(long)]
        dir: Option<PathBuf>,
    },
}

#[derive(Debug, Subcommand)]
pub enum ProductCommand {
    /// Register a new product
    Add {
        code: String,
        name: String,

        #[arg(long, default_value = "")]
        category: String,

        /// Minimum stock threshold
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        min: String,

        /// Unit price, e.g. 12.50
        #[arg(long, allow_hyphen_values = true)]
        price: String,
    },

    /// Show one product with its current stock
    Show { code: String },

    /// List the catalog
    List,
}

#[derive(Debug, Subcommand)]
pub enum MovementCommand {
    /// Record an inbound or outbound movement
    Record {
        code: String,

        /// inbound | outbound (or in | out)
        direction: String,

        #[arg(allow_hyphen_values = true)]
        quantity: String,

        /// Movement date, YYYY-MM-DD (defaults to today)
        #[arg(long)]
        date: Option<String>,

        #[arg(long, default_value = "")]
        reason: String,
    },

    /// List recorded movements
    List {
        /// Only movements of this product
        #[arg(long)]
        product: Option<String>,
    },
}

impl Command {
    /// Whether a successful run changes the session and must be saved.
    pub fn is_mutating(&self) -> bool {
        matches!(
            self,
            Command::Product(ProductCommand::Add { .. }) | Command::Movement(MovementCommand::Record { .. })
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn negative_quantity_reaches_the_validator() {
        let cli = Cli::try_parse_from(["stockledger", "movement", "record", "a", "out", "-3"]).unwrap();
        match cli.command {
            Command::Movement(MovementCommand::Record { quantity, date, .. }) => {
                assert_eq!(quantity, "-3");
                assert!(date.is_none());
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn global_flags_follow_subcommands() {
        let cli = Cli::try_parse_from(["stockledger", "report", "--format", "json", "--data-dir", "/tmp/x"]).unwrap();
        assert_eq!(cli.format, OutputFormat::Json);
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/x")));
        assert!(!cli.command.is_mutating());
    }
}
