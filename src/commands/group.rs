//! @acp:module "Group Command"
//! @acp:summary "Show how declarations were grouped per class"
//! @acp:domain cli
//! @acp:layer handler

use std::path::PathBuf;

use anyhow::Result;
use console::style;
use serde::Serialize;

use super::load_catalog;
use crate::catalog::{Catalog, ClassEntry};
use crate::config::Config;
use crate::error::DocError;
use crate::group::OverloadGroup;

/// Options for the group command
#[derive(Debug, Clone)]
pub struct GroupOptions {
    /// Model file or directory
    pub path: PathBuf,
    /// Only show this class
    pub class: Option<String>,
    /// Output as JSON
    pub json: bool,
}

/// Serializable view of one group
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupView {
    pub name: String,
    pub params: String,
    pub canonical: String,
    pub grouped: bool,
    pub variants: Vec<String>,
}

impl GroupView {
    fn from_group(group: &OverloadGroup) -> Option<Self> {
        Some(Self {
            name: group.name()?.to_string(),
            params: group.render_parameter_list().to_string(),
            canonical: group.signature()?,
            grouped: group.is_grouped(),
            variants: group.variants().iter().map(|v| v.signature()).collect(),
        })
    }
}

fn selected_classes<'a>(catalog: &'a Catalog, class: Option<&str>) -> Result<Vec<&'a ClassEntry>> {
    match class {
        Some(name) => Ok(vec![catalog
            .class(name)
            .ok_or_else(|| DocError::ClassNotFound(name.to_string()))?]),
        None => Ok(catalog.classes().iter().collect()),
    }
}

/// Execute the group command
pub fn execute_group(options: GroupOptions, config: Config) -> Result<()> {
    let catalog = load_catalog(&options.path, &config)?;
    let classes = selected_classes(&catalog, options.class.as_deref())?;

    if options.json {
        let mut views = serde_json::Map::new();
        for class in &classes {
            let groups: Vec<GroupView> =
                class.groups().iter().filter_map(GroupView::from_group).collect();
            views.insert(class.name.clone(), serde_json::to_value(groups)?);
        }
        println!("{}", serde_json::to_string_pretty(&views)?);
        return Ok(());
    }

    for class in classes {
        println!("{}", style(&class.name).bold());
        for view in class.groups().iter().filter_map(GroupView::from_group) {
            let marker = if view.grouped {
                style("●").green()
            } else {
                style("○").dim()
            };
            println!("  {} {}{}", marker, view.name, view.params);
            if view.grouped {
                for variant in &view.variants {
                    let canonical = if *variant == view.canonical { " (canonical)" } else { "" };
                    println!("      {}{}", style(variant).dim(), canonical);
                }
            }
        }
    }

    let stats = catalog.stats();
    println!();
    println!(
        "{} {} groups ({} merged) from {} declarations",
        style("✓").green(),
        stats.groups,
        stats.grouped,
        stats.declarations
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::group::RuleSet;
    use crate::model::{ClassDoc, MethodDeclaration, Model};

    fn catalog() -> Catalog {
        let path = ClassDoc::new("ai.Path")
            .with_method(
                MethodDeclaration::method("ai.Path", "lineTo", "void").param("point", "Point"),
            )
            .with_method(
                MethodDeclaration::method("ai.Path", "lineTo", "void")
                    .param("point", "Point")
                    .param("smooth", "boolean"),
            )
            .with_method(MethodDeclaration::method("ai.Path", "close", "void"));
        Catalog::build(&Model::new(vec![path]), RuleSet::default())
    }

    #[test]
    fn test_group_view() {
        let catalog = catalog();
        let class = catalog.class("ai.Path").unwrap();
        let views: Vec<_> = class.groups().iter().filter_map(GroupView::from_group).collect();

        assert_eq!(views.len(), 2);
        assert_eq!(views[0].name, "lineTo");
        assert!(views[0].grouped);
        assert_eq!(views[0].variants, vec!["lineTo(Point)", "lineTo(Point, boolean)"]);
        assert_eq!(views[0].canonical, "lineTo(Point, boolean)");
        assert_eq!(views[0].params, "(point[, smooth])");
        assert_eq!(views[1].params, "()");
        assert!(!views[1].grouped);
    }

    #[test]
    fn test_unknown_class_is_an_error() {
        let catalog = catalog();
        assert!(selected_classes(&catalog, Some("ai.Missing")).is_err());
        assert_eq!(selected_classes(&catalog, None).unwrap().len(), 1);
    }
}
