use clap::{Parser, Subcommand};
use engine::catalog::ThemeCategory;
use std::path::PathBuf;

/// Preview, switch and export Lumen site themes.
#[derive(Debug, Parser)]
#[command(name = "lumen", version, about)]
pub struct Cli {
    /// Configuration file (defaults to ./lumen.toml when present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level override: trace, debug, info, warn, error or off
    #[arg(short, long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// List themes in navigation order
    List {
        /// Only themes in this category
        #[arg(long)]
        category: Option<ThemeCategory>,
    },
    /// Describe a theme (the active one by default)
    Show { id: Option<String> },
    /// Switch to a theme by id
    Set { id: String },
    /// Switch to the next theme, wrapping around
    Next,
    /// Switch to the previous theme, wrapping around
    Previous,
    /// Switch to a randomly drawn theme
    Random,
    /// Print the root CSS for the active theme
    Css,
    /// Catalog statistics
    Stats,
    /// Categories with their theme counts
    Categories,
    /// Forget the remembered theme
    Clear,
}

impl Command {
    /// Whether the command goes through a theme switch.
    pub fn is_switch(&self) -> bool {
        matches!(
            self,
            Command::Set { .. } | Command::Next | Command::Previous | Command::Random
        )
    }
}
