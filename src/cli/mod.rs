pub mod demo;
pub mod init;
pub mod tracker;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "kickbook",
    version,
    about = "Track sneaker resale income and expenses in the terminal."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Start the tracker without the sample transactions.
    #[arg(long)]
    pub empty: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Walk through add, delete and edit on the sample data and print each step.
    Demo,
    /// Update the settings file.
    Init {
        /// Name shown in the tracker header
        #[arg(long)]
        name: Option<String>,
        /// Start future sessions with the sample transactions
        #[arg(long, conflicts_with = "no_seed")]
        seed: bool,
        /// Start future sessions with an empty transaction list
        #[arg(long = "no-seed")]
        no_seed: bool,
    },
}
