//! @acp:module "Model Loader"
//! @acp:summary "Load documentation models from JSON/YAML files and directories"
//! @acp:domain cli
//! @acp:layer service

use std::path::{Path, PathBuf};

use glob::Pattern;
use serde::{Deserialize, Serialize};
use walkdir::WalkDir;

use super::ClassDoc;
use crate::error::{DocError, Result};

/// @acp:summary "All classes of a documentation model"
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Model {
    #[serde(default)]
    pub classes: Vec<ClassDoc>,
}

impl Model {
    pub fn new(classes: Vec<ClassDoc>) -> Self {
        let mut model = Self { classes };
        model.normalize();
        model
    }

    /// @acp:summary "Load a model file (.json, .yaml, .yml)"
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        let mut model: Model = match extension.as_str() {
            "json" => serde_json::from_str(&content)?,
            "yaml" | "yml" => serde_yaml::from_str(&content)?,
            _ => return Err(DocError::UnsupportedModel(path.to_path_buf())),
        };
        model.normalize();

        tracing::debug!(
            "Loaded {} classes from {}",
            model.classes.len(),
            path.display()
        );
        Ok(model)
    }

    /// @acp:summary "Load a file, or every matching model file below a directory"
    pub fn load_path<P: AsRef<Path>>(path: P, include: &[String], exclude: &[String]) -> Result<Self> {
        let path = path.as_ref();
        if path.is_dir() {
            Self::load_dir(path, include, exclude)
        } else {
            Self::load(path)
        }
    }

    /// @acp:summary "Merge all model files under root matching include/exclude globs"
    /// Files are read in sorted path order so class order is stable.
    pub fn load_dir<P: AsRef<Path>>(root: P, include: &[String], exclude: &[String]) -> Result<Self> {
        let mut merged = Model::default();
        for file in find_model_files(root.as_ref(), include, exclude)? {
            let model = Self::load(&file)?;
            merged.classes.extend(model.classes);
        }
        Ok(merged)
    }

    /// Fill in containing classes left out of model files
    fn normalize(&mut self) {
        for class in &mut self.classes {
            for method in &mut class.methods {
                if method.containing_class.is_empty() {
                    method.containing_class = class.name.clone();
                }
            }
        }
    }

    pub fn class(&self, name: &str) -> Option<&ClassDoc> {
        self.classes.iter().find(|c| c.name == name)
    }

    pub fn method_count(&self) -> usize {
        self.classes.iter().map(|c| c.methods.len()).sum()
    }
}

/// Include/exclude globs over paths relative to the model root
struct ModelFilter {
    include: Vec<Pattern>,
    exclude: Vec<Pattern>,
}

const MATCH_OPTIONS: glob::MatchOptions = glob::MatchOptions {
    case_sensitive: true,
    require_literal_separator: false,
    require_literal_leading_dot: false,
};

fn compile_patterns(patterns: &[String]) -> Result<Vec<Pattern>> {
    patterns
        .iter()
        .map(|p| {
            Pattern::new(p)
                .map_err(|e| DocError::Other(format!("Invalid model file pattern '{}': {}", p, e)))
        })
        .collect()
}

impl ModelFilter {
    fn new(include: &[String], exclude: &[String]) -> Result<Self> {
        Ok(Self {
            include: compile_patterns(include)?,
            exclude: compile_patterns(exclude)?,
        })
    }

    /// An empty include list admits every file
    fn admits(&self, relative: &Path) -> bool {
        let included = self.include.is_empty()
            || self.include.iter().any(|p| p.matches_path_with(relative, MATCH_OPTIONS));
        included && !self.exclude.iter().any(|p| p.matches_path_with(relative, MATCH_OPTIONS))
    }
}

fn find_model_files(root: &Path, include: &[String], exclude: &[String]) -> Result<Vec<PathBuf>> {
    let filter = ModelFilter::new(include, exclude)?;

    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| filter.admits(e.path().strip_prefix(root).unwrap_or(e.path())))
        .map(|e| e.into_path())
        .collect();

    files.sort();
    Ok(files)
}
