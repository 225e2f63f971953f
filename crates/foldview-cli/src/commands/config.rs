//! Configuration management CLI commands.

use clap::{Args, Subcommand};

use crate::output::{self, OutputFormat};
use foldview_core::config::AppConfig;
use foldview_core::error::AppError;

/// Arguments for config commands
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Config subcommand
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show,
    /// Validate the configuration file
    Validate,
}

/// Execute config commands
pub fn execute(args: &ConfigArgs, config_path: &str, format: OutputFormat) -> Result<(), AppError> {
    match &args.command {
        ConfigCommand::Show => {
            let config = super::load_config(config_path)?;
            match format {
                OutputFormat::Json => output::print_json(&config),
                OutputFormat::Table => print_summary(&config),
            }
        }
        ConfigCommand::Validate => {
            let config = super::load_config(config_path)?;
            output::print_success(&format!("Configuration '{config_path}' is valid"));
            print_summary(&config);
        }
    }

    Ok(())
}

fn print_summary(config: &AppConfig) {
    let tree = &config.tree;
    output::print_kv("server", &config.server.bind_address());
    output::print_kv("store.fixture_path", &config.store.fixture_path);
    output::print_kv("cache.provider", &config.cache.provider);
    output::print_kv("cache.default_ttl_seconds", &config.cache.default_ttl_seconds.to_string());
    output::print_kv("tree.default_strategy", tree.default_strategy.as_str());
    output::print_kv(
        "tree.show_only_accessible_folders",
        &tree.show_only_accessible_folders.to_string(),
    );
    output::print_kv("tree.show_tree_counters", &tree.show_tree_counters.to_string());
    output::print_kv(
        "tree.enable_personal_folders",
        &tree.enable_personal_folders.to_string(),
    );
    output::print_kv("tree.max_depth", &tree.max_depth.to_string());
    output::print_kv("tree.config_version", &tree.config_version.to_string());
    output::print_kv("logging.level", &config.logging.level);
}
