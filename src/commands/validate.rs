//! @acp:module "Validate Command"
//! @acp:summary "Load and group a model, reporting rejected groupings and undocumented members"
//! @acp:domain cli
//! @acp:layer handler

use std::path::PathBuf;

use anyhow::Result;
use console::style;

use super::load_catalog;
use crate::config::Config;

/// Options for the validate command
#[derive(Debug, Clone)]
pub struct ValidateOptions {
    /// Model file or directory
    pub path: PathBuf,
    /// Fail when undocumented members remain
    pub strict: bool,
}

/// Execute the validate command
pub fn execute_validate(options: ValidateOptions, config: Config) -> Result<()> {
    let catalog = match load_catalog(&options.path, &config) {
        Ok(catalog) => catalog,
        Err(e) => {
            eprintln!("{} {:#}", style("✗").red(), e);
            std::process::exit(1);
        }
    };

    let stats = catalog.stats();
    println!(
        "{} Model is valid: {} classes, {} declarations, {} groups",
        style("✓").green(),
        stats.classes,
        stats.declarations,
        stats.groups
    );

    let rejections = catalog.rejections();
    if !rejections.is_empty() {
        println!(
            "{} {} declarations could not join an existing group:",
            style("!").yellow(),
            rejections.len()
        );
        for rejection in rejections {
            println!("    {}.{}", rejection.class, rejection.signature);
        }
    }

    let undocumented = catalog.undocumented();
    if !undocumented.is_empty() {
        println!(
            "{} {} members without documentation:",
            style("!").yellow(),
            undocumented.len()
        );
        for group in &undocumented {
            if let Some(canonical) = group.canonical() {
                println!(
                    "    {}.{}{}",
                    canonical.containing_class,
                    canonical.name,
                    group.render_parameter_list()
                );
            }
        }
        if options.strict {
            std::process::exit(1);
        }
    }

    Ok(())
}
