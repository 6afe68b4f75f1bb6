//! @acp:module "Documentation Model"
//! @acp:summary "Read-only method declarations supplied by the doc extraction stage"
//! @acp:domain cli
//! @acp:layer model
//!
//! # Documentation Model
//!
//! The grouping core never parses source or comments. It consumes
//! declarations that a previous extraction stage already produced:
//!
//! - [`MethodDeclaration`]: one method or constructor, with its parameters,
//!   tags and the method it overrides
//! - [`ClassDoc`]: the declarations of one class, in declaration order
//! - [`Model`]: all classes, loaded from JSON or YAML files

pub mod loader;

pub use loader::Model;

use serde::{Deserialize, Serialize};

/// Declaration kind. Only methods carry a return type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum DeclKind {
    Method {
        #[serde(rename = "returnType")]
        return_type: String,
    },
    Constructor,
}

/// A single formal parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
}

impl Parameter {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
        }
    }
}

/// @acp:summary "Inline documentation tag (text run, link, code, ...)"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    /// Tag kind, `Text` for plain comment text
    #[serde(default = "default_tag_kind")]
    pub kind: String,
    #[serde(default)]
    pub text: String,
}

fn default_tag_kind() -> String {
    "Text".to_string()
}

/// `@param` tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamTag {
    #[serde(rename = "parameterName")]
    pub parameter_name: String,
    #[serde(default)]
    pub text: String,
}

/// `@throws` tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThrowsTag {
    pub exception: String,
    #[serde(default)]
    pub text: String,
}

/// Link to the declaration a method overrides
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverrideRef {
    /// Qualified name of the class declaring the overridden method
    pub class: String,
    /// Signature of the overridden method, as produced by [`MethodDeclaration::signature`]
    pub signature: String,
}

fn default_true() -> bool {
    true
}

/// @acp:summary "One method or constructor declaration, immutable once built"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodDeclaration {
    pub name: String,

    /// Qualified name of the declaring class. Filled in from the
    /// enclosing [`ClassDoc`] when omitted in model files.
    #[serde(default)]
    pub containing_class: String,

    #[serde(flatten)]
    pub kind: DeclKind,

    #[serde(default, rename = "static")]
    pub is_static: bool,

    /// Part of the visible API
    #[serde(default = "default_true")]
    pub visible: bool,

    #[serde(default)]
    pub parameters: Vec<Parameter>,

    #[serde(default)]
    pub comment_text: String,

    #[serde(default)]
    pub inline_tags: Vec<Tag>,

    #[serde(default)]
    pub see_tags: Vec<String>,

    #[serde(default)]
    pub throws_tags: Vec<ThrowsTag>,

    #[serde(default)]
    pub param_tags: Vec<ParamTag>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overrides: Option<OverrideRef>,
}

impl MethodDeclaration {
    /// Create a method with no parameters and no documentation
    pub fn method(
        class: impl Into<String>,
        name: impl Into<String>,
        return_type: impl Into<String>,
    ) -> Self {
        Self::with_kind(
            class,
            name,
            DeclKind::Method {
                return_type: return_type.into(),
            },
        )
    }

    /// Create a constructor. Constructors are named after their class.
    pub fn constructor(class: impl Into<String>) -> Self {
        let class = class.into();
        let name = class.rsplit('.').next().unwrap_or(&class).to_string();
        Self::with_kind(class, name, DeclKind::Constructor)
    }

    fn with_kind(class: impl Into<String>, name: impl Into<String>, kind: DeclKind) -> Self {
        Self {
            name: name.into(),
            containing_class: class.into(),
            kind,
            is_static: false,
            visible: true,
            parameters: Vec::new(),
            comment_text: String::new(),
            inline_tags: Vec::new(),
            see_tags: Vec::new(),
            throws_tags: Vec::new(),
            param_tags: Vec::new(),
            overrides: None,
        }
    }

    pub fn param(mut self, name: impl Into<String>, type_name: impl Into<String>) -> Self {
        self.parameters.push(Parameter::new(name, type_name));
        self
    }

    pub fn static_(mut self) -> Self {
        self.is_static = true;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    /// Set the comment text; the text also becomes a single `Text` inline tag.
    pub fn comment(mut self, text: impl Into<String>) -> Self {
        let text = text.into();
        self.inline_tags.push(Tag {
            kind: default_tag_kind(),
            text: text.clone(),
        });
        self.comment_text = text;
        self
    }

    pub fn inline_tag(mut self, kind: impl Into<String>, text: impl Into<String>) -> Self {
        self.inline_tags.push(Tag {
            kind: kind.into(),
            text: text.into(),
        });
        self
    }

    pub fn param_tag(mut self, parameter: impl Into<String>, text: impl Into<String>) -> Self {
        self.param_tags.push(ParamTag {
            parameter_name: parameter.into(),
            text: text.into(),
        });
        self
    }

    pub fn see(mut self, reference: impl Into<String>) -> Self {
        self.see_tags.push(reference.into());
        self
    }

    pub fn overriding(mut self, class: impl Into<String>, signature: impl Into<String>) -> Self {
        self.overrides = Some(OverrideRef {
            class: class.into(),
            signature: signature.into(),
        });
        self
    }

    /// Dedup key: name plus the ordered parameter type list, e.g. `add(Point, int)`
    pub fn signature(&self) -> String {
        let types: Vec<&str> = self.parameters.iter().map(|p| p.type_name.as_str()).collect();
        format!("{}({})", self.name, types.join(", "))
    }

    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.containing_class, self.name)
    }

    pub fn arity(&self) -> usize {
        self.parameters.len()
    }

    pub fn return_type(&self) -> Option<&str> {
        match &self.kind {
            DeclKind::Method { return_type } => Some(return_type),
            DeclKind::Constructor => None,
        }
    }

    pub fn is_method(&self) -> bool {
        matches!(self.kind, DeclKind::Method { .. })
    }

    /// Class declaring the overridden method, if this declaration overrides one
    pub fn overridden_class(&self) -> Option<&str> {
        self.overrides.as_ref().map(|o| o.class.as_str())
    }

    /// True when any of comment text, see, throws or param tags is present
    pub fn has_documentation(&self) -> bool {
        !self.comment_text.trim().is_empty()
            || !self.see_tags.is_empty()
            || !self.throws_tags.is_empty()
            || !self.param_tags.is_empty()
    }
}

/// @acp:summary "Declarations of one class in declaration order"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassDoc {
    /// Qualified class name
    pub name: String,

    #[serde(default = "default_true")]
    pub visible: bool,

    #[serde(default)]
    pub methods: Vec<MethodDeclaration>,
}

impl ClassDoc {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            visible: true,
            methods: Vec::new(),
        }
    }

    /// Package part of the qualified name, empty for the default package
    pub fn package(&self) -> &str {
        self.name.rsplit_once('.').map(|(pkg, _)| pkg).unwrap_or("")
    }

    pub fn simple_name(&self) -> &str {
        self.name.rsplit('.').next().unwrap_or(&self.name)
    }

    pub fn with_method(mut self, method: MethodDeclaration) -> Self {
        self.methods.push(method);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signature_includes_parameter_types() {
        let method = MethodDeclaration::method("ai.Path", "add", "Segment")
            .param("point", "Point")
            .param("index", "int");
        assert_eq!(method.signature(), "add(Point, int)");
        assert_eq!(method.qualified_name(), "ai.Path.add");
    }

    #[test]
    fn test_constructor_has_no_return_type() {
        let ctor = MethodDeclaration::constructor("ai.Path").param("segments", "Segment[]");
        assert_eq!(ctor.name, "Path");
        assert_eq!(ctor.return_type(), None);
        assert!(!ctor.is_method());
    }

    #[test]
    fn test_has_documentation() {
        let bare = MethodDeclaration::method("ai.Item", "remove", "boolean");
        assert!(!bare.has_documentation());
        assert!(bare.clone().see("ai.Item#clone").has_documentation());
        assert!(bare.clone().param_tag("x", "the x").has_documentation());
        assert!(bare.comment("Removes the item.").has_documentation());
    }

    #[test]
    fn test_deserialize_method_kind() {
        let json = r#"{
            "name": "getBounds",
            "kind": "method",
            "returnType": "Rectangle",
            "parameters": []
        }"#;
        let method: MethodDeclaration = serde_json::from_str(json).unwrap();
        assert_eq!(method.return_type(), Some("Rectangle"));
        assert!(method.visible);
        assert!(!method.is_static);

        let ctor: MethodDeclaration =
            serde_json::from_str(r#"{"name": "Point", "kind": "constructor"}"#).unwrap();
        assert_eq!(ctor.kind, DeclKind::Constructor);
    }

    #[test]
    fn test_class_package() {
        let class = ClassDoc::new("com.scriptographer.ai.Path");
        assert_eq!(class.package(), "com.scriptographer.ai");
        assert_eq!(class.simple_name(), "Path");
        assert_eq!(ClassDoc::new("Path").package(), "");
    }
}
