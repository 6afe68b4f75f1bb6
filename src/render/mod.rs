//! @acp:module "Renderer"
//! @acp:summary "Render catalog groups as markdown, JSON or plain text member listings"
//! @acp:domain cli
//! @acp:layer output
//!
//! Rendering only consumes the public surface of a group: canonical
//! declaration, merged parameter list, grouping state and role queries.
//! Undocumented overrides borrow their summary through override fallback.

pub mod template;

use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::catalog::{Catalog, ClassEntry};
use crate::error::{DocError, Result};
use crate::group::OverloadGroup;
use crate::model::MethodDeclaration;

/// First sentence of a comment: up to the first `.`, `!` or `?` followed by whitespace or the end
static FIRST_SENTENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)^\s*(.*?[.!?])(?:\s|$)").unwrap());

/// Output format for rendered documentation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Markdown,
    Json,
    Text,
}

impl FromStr for OutputFormat {
    type Err = DocError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            "json" => Ok(OutputFormat::Json),
            "text" | "txt" => Ok(OutputFormat::Text),
            _ => Err(DocError::UnknownFormat(s.to_string())),
        }
    }
}

/// Rendering switches
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Render classes and members outside the visible API
    pub include_hidden: bool,
    /// Custom handlebars template for markdown output
    pub template: Option<String>,
}

/// @acp:summary "One documented member: a whole overload group"
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberEntry {
    pub name: String,
    /// Merged parameter list, e.g. `(a[, b])`
    pub params: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_type: Option<String>,
    pub is_static: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Class the summary was inherited from, for undocumented overrides
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inherited_from: Option<String>,
    pub grouped: bool,
    pub signatures: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operator: Option<String>,
}

/// @acp:summary "Rendered members of one class"
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassPage {
    pub name: String,
    pub simple_name: String,
    pub package: String,
    pub constructors: Vec<MemberEntry>,
    pub methods: Vec<MemberEntry>,
}

/// Extract the summary sentence from comment text
pub fn first_sentence(text: &str) -> Option<String> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    let sentence = FIRST_SENTENCE
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
        .unwrap_or(text);
    Some(sentence.split_whitespace().collect::<Vec<_>>().join(" "))
}

fn summary_of(method: &MethodDeclaration) -> Option<String> {
    first_sentence(&method.comment_text)
}

fn build_entry(catalog: &Catalog, group: &OverloadGroup) -> Option<MemberEntry> {
    let canonical = group.canonical()?;

    let (summary, inherited_from) = match catalog.fallback_for(group) {
        Some(fallback) => {
            let source = fallback.group();
            (
                source.canonical().and_then(|m| summary_of(m)),
                source.containing_class().map(str::to_string),
            )
        }
        None => (summary_of(canonical), None),
    };

    let operator = group
        .extract_operators()
        .first()
        .map(|(op, _)| op.symbol().to_string());

    Some(MemberEntry {
        name: canonical.name.clone(),
        params: group.render_parameter_list().to_string(),
        return_type: group.return_type().map(str::to_string),
        is_static: group.is_static(),
        summary,
        inherited_from,
        grouped: group.is_grouped(),
        signatures: group.variants().iter().map(|v| v.signature()).collect(),
        operator,
    })
}

fn build_page(catalog: &Catalog, class: &ClassEntry, options: &RenderOptions) -> ClassPage {
    let mut constructors = Vec::new();
    let mut methods = Vec::new();
    let mut rendered: Vec<&OverloadGroup> = Vec::new();

    for group in class.groups() {
        let Some(canonical) = group.canonical() else {
            continue;
        };
        if !canonical.visible && !options.include_hidden {
            continue;
        }
        if rendered.iter().any(|r| r.is_similar(group)) {
            tracing::debug!("Collapsing similar entry {}{}", canonical.name, group.render_parameter_list());
            continue;
        }
        rendered.push(group);

        if let Some(entry) = build_entry(catalog, group) {
            if canonical.is_method() {
                methods.push(entry);
            } else {
                constructors.push(entry);
            }
        }
    }

    ClassPage {
        name: class.name.clone(),
        simple_name: class.simple_name().to_string(),
        package: class.package().to_string(),
        constructors,
        methods,
    }
}

/// @acp:summary "Class pages for every (visible) class of the catalog"
pub fn build_pages(catalog: &Catalog, options: &RenderOptions) -> Vec<ClassPage> {
    catalog
        .classes()
        .iter()
        .filter(|c| c.visible || options.include_hidden)
        .map(|c| build_page(catalog, c, options))
        .collect()
}

/// @acp:summary "Render the whole catalog in the requested format"
pub fn render_catalog(catalog: &Catalog, format: OutputFormat, options: &RenderOptions) -> Result<String> {
    let pages = build_pages(catalog, options);
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&pages)?),
        OutputFormat::Text => Ok(render_text(&pages)),
        OutputFormat::Markdown => template::render_markdown(&pages, options.template.as_deref()),
    }
}

fn member_line(entry: &MemberEntry) -> String {
    let mut line = String::new();
    if entry.is_static {
        line.push_str("static ");
    }
    line.push_str(&entry.name);
    line.push_str(&entry.params);
    if let Some(ref return_type) = entry.return_type {
        line.push_str(" -> ");
        line.push_str(return_type);
    }
    if entry.grouped {
        line.push_str(&format!(" [{} variants]", entry.signatures.len()));
    }
    line
}

fn render_text(pages: &[ClassPage]) -> String {
    let mut output = String::new();
    for page in pages {
        output.push_str(&page.name);
        output.push('\n');
        for entry in page.constructors.iter().chain(page.methods.iter()) {
            output.push_str("  ");
            output.push_str(&member_line(entry));
            output.push('\n');
        }
    }
    output.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::group::RuleSet;
    use crate::model::{ClassDoc, Model};
    use pretty_assertions::assert_eq;

    fn point_catalog() -> Catalog {
        let point = ClassDoc::new("ai.Point")
            .with_method(MethodDeclaration::constructor("ai.Point"))
            .with_method(
                MethodDeclaration::constructor("ai.Point")
                    .param("x", "double")
                    .param("y", "double"),
            )
            .with_method(
                MethodDeclaration::method("ai.Point", "add", "Point")
                    .param("point", "Point")
                    .comment("Adds a point. Returns a new point."),
            )
            .with_method(MethodDeclaration::method("ai.Point", "add", "Point").param("value", "double"))
            .with_method(
                MethodDeclaration::method("ai.Point", "getDistance", "double")
                    .static_()
                    .param("a", "Point")
                    .param("b", "Point"),
            )
            .with_method(MethodDeclaration::method("ai.Point", "internal", "void").hidden());
        Catalog::build(&Model::new(vec![point]), RuleSet::default())
    }

    #[test]
    fn test_first_sentence() {
        assert_eq!(
            first_sentence("Adds a point. Returns a new point."),
            Some("Adds a point.".to_string())
        );
        assert_eq!(first_sentence("Version 1.5 of\n  the API"), Some("Version 1.5 of the API".to_string()));
        assert_eq!(first_sentence("   "), None);
    }

    #[test]
    fn test_output_format_parse() {
        assert_eq!("md".parse::<OutputFormat>().unwrap(), OutputFormat::Markdown);
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert!(matches!("pdf".parse::<OutputFormat>(), Err(DocError::UnknownFormat(_))));
    }

    #[test]
    fn test_render_text() {
        let text = render_catalog(&point_catalog(), OutputFormat::Text, &RenderOptions::default()).unwrap();
        let expected = "\
ai.Point
  Point(x, y) [2 variants]
  add(point) -> Point [2 variants]
  static getDistance(a, b) -> double";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_hidden_members_included_on_request() {
        let options = RenderOptions {
            include_hidden: true,
            ..Default::default()
        };
        let pages = build_pages(&point_catalog(), &options);
        assert!(pages[0].methods.iter().any(|m| m.name == "internal"));
    }

    #[test]
    fn test_entries_carry_summary_and_operator() {
        let pages = build_pages(&point_catalog(), &RenderOptions::default());
        let add = &pages[0].methods[0];
        assert_eq!(add.summary.as_deref(), Some("Adds a point."));
        assert_eq!(add.operator.as_deref(), Some("+"));
        assert_eq!(add.signatures, vec!["add(Point)", "add(double)"]);
        assert_eq!(pages[0].constructors[0].return_type, None);
    }

    #[test]
    fn test_inherited_summary() {
        let item = ClassDoc::new("ai.Item").with_method(
            MethodDeclaration::method("ai.Item", "clone", "Item").comment("Clones the item. Deeply."),
        );
        let path = ClassDoc::new("ai.Path").with_method(
            MethodDeclaration::method("ai.Path", "clone", "Item").overriding("ai.Item", "clone()"),
        );
        let catalog = Catalog::build(&Model::new(vec![item, path]), RuleSet::default());

        let pages = build_pages(&catalog, &RenderOptions::default());
        let clone = &pages[1].methods[0];
        assert_eq!(clone.summary.as_deref(), Some("Clones the item."));
        assert_eq!(clone.inherited_from.as_deref(), Some("ai.Item"));
    }

    #[test]
    fn test_render_json() {
        let json = render_catalog(&point_catalog(), OutputFormat::Json, &RenderOptions::default()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["simpleName"], "Point");
        assert_eq!(value[0]["methods"][0]["params"], "(point)");
    }
}
