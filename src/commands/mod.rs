//! @acp:module "Commands"
//! @acp:summary "CLI command implementations"
//! @acp:domain cli
//! @acp:layer handler
//!
//! Provides implementations for all CLI commands.
//! Each command is in its own submodule for maintainability.

pub mod group;
pub mod init;
pub mod render;
pub mod validate;

pub use group::{execute_group, GroupOptions};
pub use init::{execute_init, InitOptions};
pub use render::{execute_render, RenderCommandOptions};
pub use validate::{execute_validate, ValidateOptions};

use std::path::Path;

use anyhow::{Context, Result};

use crate::catalog::Catalog;
use crate::config::Config;
use crate::group::RuleSet;
use crate::model::Model;

/// Load the model at `path` (file or directory) and group it with the configured rules
pub fn load_catalog(path: &Path, config: &Config) -> Result<Catalog> {
    let model = Model::load_path(path, &config.include, &config.exclude)
        .with_context(|| format!("Failed to load model from {}", path.display()))?;
    let rules = RuleSet::from_config(&config.grouping)?;
    Ok(Catalog::build(&model, rules))
}
