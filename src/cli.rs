use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "cryptohomes",
    about = "CryptoHomes property assistant, investment calculator and offer desk (CLI + TUI)"
)]
pub struct Cli {
    /// Path to config file (default: ./config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Start TUI shell
    Run,
    /// Print the assistant's reply to a single message
    Ask {
        /// Message text; multiple words are joined with spaces
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// Project the value of a property investment
    Calc {
        /// Property value in AED
        #[arg(long, default_value_t = 5_000_000.0)]
        value: f64,
        /// Holding period in years (1-20)
        #[arg(long, default_value_t = 5)]
        years: u32,
        /// Expected annual growth in percent (5-25)
        #[arg(long, default_value_t = 12.0)]
        rate: f64,
        /// Asset used for the crypto price (BTC, ETH, USDT, XRP)
        #[arg(long, default_value = "BTC")]
        crypto: String,
    },
}

impl Cli {
    pub fn command_or_default(&self) -> Command {
        self.command.clone().unwrap_or(Command::Run)
    }
}
