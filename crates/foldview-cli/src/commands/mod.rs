//! CLI command definitions and dispatch.

pub mod config;
pub mod render;

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;
use foldview_core::config::AppConfig;
use foldview_core::error::AppError;

/// foldview: permission-filtered folder tree renderer
#[derive(Debug, Parser)]
#[command(name = "foldview", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default")]
    pub config: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Render a user's folder tree from a fixture
    Render(render::RenderArgs),
    /// Expand one folder level (lazy strategy)
    Expand(render::ExpandArgs),
    /// Configuration management
    Config(config::ConfigArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        match &self.command {
            Commands::Render(args) => render::execute(args, &self.config, self.format).await,
            Commands::Expand(args) => render::expand(args, &self.config, self.format).await,
            Commands::Config(args) => config::execute(args, &self.config, self.format),
        }
    }
}

/// Helper: load configuration from file
pub fn load_config(config_path: &str) -> Result<AppConfig, AppError> {
    AppConfig::load_from(config_path)
}
