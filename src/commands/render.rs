//! @acp:module "Render Command"
//! @acp:summary "Render grouped documentation to stdout or a file"
//! @acp:domain cli
//! @acp:layer handler

use std::path::PathBuf;

use anyhow::{Context, Result};
use console::style;

use super::load_catalog;
use crate::config::Config;
use crate::render::{render_catalog, OutputFormat, RenderOptions};

/// Options for the render command
#[derive(Debug, Clone)]
pub struct RenderCommandOptions {
    /// Model file or directory
    pub path: PathBuf,
    /// Output format, overriding the config
    pub format: Option<String>,
    /// Output file, overriding the config
    pub output: Option<PathBuf>,
    /// Include hidden members
    pub include_hidden: bool,
}

/// Execute the render command
pub fn execute_render(options: RenderCommandOptions, config: Config) -> Result<()> {
    let catalog = load_catalog(&options.path, &config)?;

    let format: OutputFormat = options
        .format
        .as_deref()
        .unwrap_or(&config.output.format)
        .parse()?;

    let template = match config.output.template {
        Some(ref path) => Some(
            std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read template {}", path.display()))?,
        ),
        None => None,
    };

    let render_options = RenderOptions {
        include_hidden: options.include_hidden || config.output.include_hidden,
        template,
    };
    let rendered = render_catalog(&catalog, format, &render_options)?;

    match options.output.or(config.output.path) {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            std::fs::write(&path, rendered)?;
            println!("{} Documentation written to {}", style("✓").green(), path.display());
        }
        None => println!("{}", rendered),
    }

    Ok(())
}
