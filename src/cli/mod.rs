pub mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "readstash")]
#[command(about = "Save articles for later, from your terminal", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Save an article URL and watch it being analyzed
    Save {
        /// URL of the article to save
        url: String,

        /// Return right after saving instead of waiting for analysis
        #[arg(long)]
        no_wait: bool,
    },
    /// Check the processing status of an item
    Status {
        /// Item id (defaults to the item saved in this session)
        id: Option<String>,
    },
    /// Show a processed item's preview: summary, reading time, source
    Show {
        /// Item id (defaults to the item saved in this session)
        id: Option<String>,
    },
    /// List today's reads (up to three unfinished ready items)
    Today,
    /// List every saved item
    Library,
    /// Launch the TUI
    Tui,
}
