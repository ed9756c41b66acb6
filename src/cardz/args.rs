use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "cardz")]
#[command(about = "Local-first loyalty card wallet for the command line", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Override the wallet data directory
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a new card
    #[command(alias = "a")]
    Add {
        /// Display name of the card
        name: String,

        /// Raw barcode payload
        number: String,

        /// Barcode format (EAN13, EAN8, UPC, CODE39, ITF, CODE128, QR)
        #[arg(short, long, default_value = "CODE128")]
        format: String,

        #[arg(short, long, default_value = "other")]
        category: String,

        /// Display color token
        #[arg(long, default_value = "#6366f1")]
        color: String,

        #[arg(long)]
        notes: Option<String>,

        /// Store location as "LAT,LNG"
        #[arg(long)]
        location: Option<String>,

        /// Human-readable label for the location
        #[arg(long)]
        location_name: Option<String>,

        /// Mark as favorite
        #[arg(long)]
        favorite: bool,
    },

    /// List cards
    #[command(alias = "ls")]
    List {
        /// Free-text search over names and card numbers
        #[arg(short, long)]
        search: Option<String>,

        /// Category filter ("all", "nearby", or an exact category)
        #[arg(short, long)]
        category: Option<String>,

        /// Reference location as "LAT,LNG" (required for "nearby")
        #[arg(long)]
        near: Option<String>,
    },

    /// Show a card: raise it and print the scannable payload
    #[command(alias = "s")]
    Show {
        /// Index of the card (from `cardz list`)
        index: usize,
    },

    /// Edit a card's fields
    #[command(alias = "e")]
    Edit {
        /// Index of the card (from `cardz list`)
        index: usize,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        number: Option<String>,

        #[arg(long)]
        format: Option<String>,

        #[arg(long)]
        category: Option<String>,

        #[arg(long)]
        color: Option<String>,

        #[arg(long)]
        notes: Option<String>,

        /// Replace the stored location with "LAT,LNG"
        #[arg(long)]
        location: Option<String>,

        #[arg(long)]
        location_name: Option<String>,

        /// Remove the stored location
        #[arg(long)]
        clear_location: bool,
    },

    /// Delete a card
    #[command(alias = "rm")]
    Delete {
        /// Index of the card (from `cardz list`)
        index: usize,
    },

    /// Mark a card as favorite
    Fav { index: usize },

    /// Clear a card's favorite flag
    Unfav { index: usize },

    /// Create a card from a scanned barcode
    Scan {
        /// Decoded barcode payload
        decoded: String,

        /// Symbology hint reported by the decoder (e.g. EAN_13, QR_CODE)
        #[arg(long)]
        hint: Option<String>,

        /// Name for the new card
        #[arg(long)]
        name: String,

        #[arg(short, long, default_value = "other")]
        category: String,

        #[arg(long, default_value = "#6366f1")]
        color: String,
    },

    /// Export all cards and settings to a backup file
    Export {
        /// Output path (defaults to cardz-backup-<date>.json)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Import a backup file (imported cards win id clashes)
    Import {
        /// Path to the backup JSON file
        path: PathBuf,
    },

    /// Get or set configuration (keys: theme, sort)
    Config {
        /// Configuration key (theme or sort)
        key: Option<String>,

        /// Value to set (if omitted, prints the current value)
        value: Option<String>,
    },
}
