//! @acp:module "Init Command"
//! @acp:summary "Write a default docgroup configuration"
//! @acp:domain cli
//! @acp:layer handler
//!
//! Implements `docgroup init` command for project initialization.

use std::path::PathBuf;

use anyhow::Result;
use console::style;

use crate::config::{Config, CONFIG_FILE};

/// Options for the init command
#[derive(Debug, Clone, Default)]
pub struct InitOptions {
    /// Force overwrite existing config
    pub force: bool,
    /// Model file patterns to include
    pub include: Vec<String>,
    /// Model file patterns to exclude
    pub exclude: Vec<String>,
    /// Default compatibility rule
    pub rule: Option<String>,
}

/// Execute the init command
pub fn execute_init(options: InitOptions) -> Result<()> {
    let config_path = PathBuf::from(CONFIG_FILE);

    if config_path.exists() && !options.force {
        eprintln!(
            "{} Config file already exists. Use --force to overwrite.",
            style("✗").red()
        );
        std::process::exit(1);
    }

    let config = build_config(&options)?;
    config.save(&config_path)?;
    println!("{} Created {}", style("✓").green(), config_path.display());
    println!("  Default rule: {}", config.grouping.default_rule);

    Ok(())
}

fn build_config(options: &InitOptions) -> Result<Config> {
    let mut config = Config::default();
    if !options.include.is_empty() {
        config.include = options.include.clone();
    }
    if !options.exclude.is_empty() {
        config.exclude = options.exclude.clone();
    }
    if let Some(ref rule) = options.rule {
        // Reject unknown names before writing them out
        rule.parse::<crate::group::BuiltinRule>()?;
        config.grouping.default_rule = rule.clone();
    }
    Ok(config)
}
