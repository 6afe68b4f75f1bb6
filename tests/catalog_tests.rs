//! Model loading, configuration and rendering integration tests
//!
//! Builds catalogs from model files on disk and checks the rendered output.

use std::fs;
use std::path::Path;

use docgroup::commands::load_catalog;
use docgroup::config::{FamilyRule, CONFIG_FILE};
use docgroup::{render_catalog, Config, DocError, Model, OutputFormat, RenderOptions};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

const PATHFINDER_JSON: &str = r#"{
  "classes": [
    {
      "name": "ai.Pathfinder",
      "methods": [
        {
          "name": "unite",
          "kind": "method",
          "returnType": "Item",
          "static": true,
          "parameters": [{"name": "items", "type": "Item[]"}]
        },
        {
          "name": "unite",
          "kind": "method",
          "returnType": "Item",
          "static": true,
          "parameters": [
            {"name": "items", "type": "Item[]"},
            {"name": "precision", "type": "float"}
          ]
        },
        {
          "name": "unite",
          "kind": "method",
          "returnType": "Item",
          "static": true,
          "parameters": [
            {"name": "items", "type": "Item[]"},
            {"name": "precision", "type": "float"},
            {"name": "removeHoles", "type": "boolean"}
          ],
          "commentText": "Unites the items. Returns the result."
        }
      ]
    }
  ]
}"#;

const COLOR_YAML: &str = r#"
classes:
  - name: ai.Color
    methods:
      - name: Color
        kind: constructor
        parameters:
          - { name: red, type: float }
          - { name: green, type: float }
          - { name: blue, type: float }
      - name: setRed
        kind: method
        returnType: void
        parameters:
          - { name: red, type: float }
        commentText: Sets the red component.
      - name: setRed
        kind: method
        returnType: void
        parameters:
          - { name: red, type: int }
      - name: debugDump
        kind: method
        returnType: void
        visible: false
"#;

fn write(dir: &Path, name: &str, content: &str) {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

// =============================================================================
// Model loading
// =============================================================================

mod loading_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_load_json_model() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "pathfinder.doc.json", PATHFINDER_JSON);

        let model = Model::load(temp.path().join("pathfinder.doc.json")).unwrap();
        assert_eq!(model.method_count(), 3);
        let unite = &model.classes[0].methods[0];
        assert_eq!(unite.containing_class, "ai.Pathfinder");
        assert!(unite.is_static);
        assert_eq!(unite.return_type(), Some("Item"));
    }

    #[test]
    fn test_load_yaml_model() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "color.doc.yaml", COLOR_YAML);

        let model = Model::load(temp.path().join("color.doc.yaml")).unwrap();
        let color = model.class("ai.Color").unwrap();
        assert!(!color.methods[0].is_method());
        assert!(!color.methods[3].visible);
    }

    #[test]
    fn test_unsupported_extension() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "model.xml", "<classes/>");

        let result = Model::load(temp.path().join("model.xml"));
        assert!(matches!(result, Err(DocError::UnsupportedModel(_))));
    }

    #[test]
    fn test_load_directory_honors_patterns() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "b/pathfinder.doc.json", PATHFINDER_JSON);
        write(temp.path(), "a/color.doc.yaml", COLOR_YAML);
        write(temp.path(), "target/stale.doc.json", PATHFINDER_JSON);
        write(temp.path(), "notes.json", "{}");

        let config = Config::default();
        let model = Model::load_dir(temp.path(), &config.include, &config.exclude).unwrap();
        let names: Vec<_> = model.classes.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["ai.Color", "ai.Pathfinder"]);
    }
}

// =============================================================================
// Configured grouping
// =============================================================================

mod config_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_rules_group_default_parameters() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "pathfinder.doc.json", PATHFINDER_JSON);

        let catalog = load_catalog(temp.path(), &Config::default()).unwrap();
        let class = catalog.class("ai.Pathfinder").unwrap();
        assert_eq!(class.groups().len(), 1);
        assert_eq!(
            class.groups()[0].render_parameter_list(),
            "(items[, precision[, removeHoles]])"
        );
    }

    #[test]
    fn test_family_rule_overrides_default() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "pathfinder.doc.json", PATHFINDER_JSON);

        let mut config = Config::default();
        config.grouping.families.push(FamilyRule {
            pattern: "ai.Pathfinder.*".to_string(),
            rule: "never".to_string(),
        });

        let catalog = load_catalog(temp.path(), &config).unwrap();
        assert_eq!(catalog.class("ai.Pathfinder").unwrap().groups().len(), 3);
        assert_eq!(catalog.rejections().len(), 2);
    }

    #[test]
    fn test_unknown_rule_fails() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "pathfinder.doc.json", PATHFINDER_JSON);

        let mut config = Config::default();
        config.grouping.default_rule = "sometimes".to_string();
        assert!(load_catalog(temp.path(), &config).is_err());
    }

    #[test]
    fn test_config_file_round_trip() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILE);
        write(
            temp.path(),
            CONFIG_FILE,
            r#"{"grouping": {"defaultRule": "type-overloads"}, "output": {"format": "text"}}"#,
        );

        let config = Config::load(&path).unwrap();
        assert_eq!(config.grouping.default_rule, "type-overloads");
        assert_eq!(config.output.format.parse::<OutputFormat>().unwrap(), OutputFormat::Text);
    }
}

// =============================================================================
// Rendering
// =============================================================================

mod render_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn catalog(temp: &TempDir) -> docgroup::Catalog {
        write(temp.path(), "pathfinder.doc.json", PATHFINDER_JSON);
        write(temp.path(), "color.doc.yaml", COLOR_YAML);
        load_catalog(temp.path(), &Config::default()).unwrap()
    }

    #[test]
    fn test_render_text() {
        let temp = TempDir::new().unwrap();
        let text = render_catalog(&catalog(&temp), OutputFormat::Text, &RenderOptions::default()).unwrap();

        let expected = "\
ai.Color
  Color(red, green, blue)
  setRed(red) -> void [2 variants]
ai.Pathfinder
  static unite(items[, precision[, removeHoles]]) -> Item [3 variants]";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_render_markdown() {
        let temp = TempDir::new().unwrap();
        let markdown =
            render_catalog(&catalog(&temp), OutputFormat::Markdown, &RenderOptions::default()).unwrap();

        assert!(markdown.contains("# Color"));
        assert!(markdown.contains("## Constructors"));
        assert!(markdown.contains("- `setRed(red)` → `void`: Sets the red component."));
        assert!(markdown.contains("- `static unite(items[, precision[, removeHoles]])` → `Item`: Unites the items."));
        assert!(!markdown.contains("debugDump"));
    }

    #[test]
    fn test_render_hidden_on_request() {
        let temp = TempDir::new().unwrap();
        let options = RenderOptions {
            include_hidden: true,
            template: None,
        };
        let text = render_catalog(&catalog(&temp), OutputFormat::Text, &options).unwrap();
        assert!(text.contains("debugDump() -> void"));
    }
}
