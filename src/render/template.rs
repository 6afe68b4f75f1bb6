//! @acp:module "Markdown Template"
//! @acp:summary "Handlebars rendering of class pages"
//! @acp:domain cli
//! @acp:layer output

use handlebars::Handlebars;
use serde_json::json;

use super::ClassPage;
use crate::error::Result;

const TEMPLATE_NAME: &str = "pages";

/// Built-in markdown layout; custom templates receive the same `pages` data
pub const DEFAULT_TEMPLATE: &str = r#"{{#each pages}}
# {{simpleName}}
{{#if package}}

Package `{{package}}`
{{/if}}
{{#if constructors}}

## Constructors

{{#each constructors}}
- `{{name}}{{params}}`{{#if summary}}: {{summary}}{{/if}}
{{/each}}
{{/if}}
{{#if methods}}

## Methods

{{#each methods}}
- `{{#if isStatic}}static {{/if}}{{name}}{{params}}`{{#if returnType}} → `{{returnType}}`{{/if}}{{#if operator}} (operator `{{operator}}`){{/if}}{{#if summary}}: {{summary}}{{/if}}{{#if inheritedFrom}} _(from {{inheritedFrom}})_{{/if}}
{{/each}}
{{/if}}
{{/each}}"#;

/// @acp:summary "Render class pages through the default or a custom template"
pub fn render_markdown(pages: &[ClassPage], template: Option<&str>) -> Result<String> {
    let mut registry = Handlebars::new();
    registry.register_escape_fn(handlebars::no_escape);
    registry.register_template_string(TEMPLATE_NAME, template.unwrap_or(DEFAULT_TEMPLATE))?;

    let rendered = registry.render(TEMPLATE_NAME, &json!({ "pages": pages }))?;
    Ok(rendered.trim().to_string())
}
