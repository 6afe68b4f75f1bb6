//! @acp:module "Variant Roles"
//! @acp:summary "Queries isolating getters, setters and operators among variants"
//! @acp:domain cli
//! @acp:layer logic
//!
//! Specialized renderers (bean properties, operator tables) pick single
//! variants out of a group. Setter lookup runs two passes: exact value type
//! first, then primitive widening conversions.

use std::collections::HashSet;
use std::rc::Rc;

use super::OverloadGroup;
use crate::model::MethodDeclaration;

/// Primitive widening conversions, `from -> [to]`
const WIDENING: &[(&str, &[&str])] = &[
    ("byte", &["short", "int", "long", "float", "double"]),
    ("short", &["int", "long", "float", "double"]),
    ("char", &["int", "long", "float", "double"]),
    ("int", &["long", "float", "double"]),
    ("long", &["float", "double"]),
    ("float", &["double"]),
];

/// True when a value of type `from` widens to `to`
pub fn is_widening(from: &str, to: &str) -> bool {
    WIDENING
        .iter()
        .find(|(source, _)| *source == from)
        .map(|(_, targets)| targets.contains(&to))
        .unwrap_or(false)
}

fn has_accessor_prefix(name: &str, prefix: &str) -> bool {
    name.strip_prefix(prefix)
        .and_then(|rest| rest.chars().next())
        .map(|c| c.is_uppercase())
        .unwrap_or(false)
}

/// `getX()` / `isX()` instance methods with a non-void result
pub fn is_getter(method: &MethodDeclaration) -> bool {
    let Some(return_type) = method.return_type() else {
        return false;
    };
    if method.is_static || method.arity() != 0 || return_type == "void" {
        return false;
    }
    has_accessor_prefix(&method.name, "get")
        || (has_accessor_prefix(&method.name, "is") && return_type == "boolean")
}

/// `setX(value)` instance methods accepting `value_type`, optionally by widening
pub fn is_setter(method: &MethodDeclaration, value_type: &str, widening: bool) -> bool {
    if method.is_static || method.arity() != 1 || !has_accessor_prefix(&method.name, "set") {
        return false;
    }
    if !matches!(method.return_type(), Some("void")) {
        return false;
    }
    let param_type = method.parameters[0].type_name.as_str();
    param_type == value_type || (widening && is_widening(value_type, param_type))
}

/// @acp:summary "Arithmetic and comparison operators exposed to scripts"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    Equals,
}

impl Operator {
    pub fn from_method_name(name: &str) -> Option<Self> {
        match name {
            "add" => Some(Operator::Add),
            "subtract" => Some(Operator::Subtract),
            "multiply" => Some(Operator::Multiply),
            "divide" => Some(Operator::Divide),
            "modulo" => Some(Operator::Modulo),
            "equals" => Some(Operator::Equals),
            _ => None,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Subtract => "-",
            Operator::Multiply => "*",
            Operator::Divide => "/",
            Operator::Modulo => "%",
            Operator::Equals => "==",
        }
    }
}

/// Single-operand instance methods named after an operator, returning a value
pub fn operator_of(method: &MethodDeclaration) -> Option<Operator> {
    let return_type = method.return_type()?;
    if method.is_static || method.arity() != 1 || return_type == "void" {
        return None;
    }
    Operator::from_method_name(&method.name)
}

impl OverloadGroup {
    /// @acp:summary "Variants playing the role described by `predicate`"
    pub fn extract_by_role<F>(&self, predicate: F) -> Vec<&Rc<MethodDeclaration>>
    where
        F: Fn(&MethodDeclaration) -> bool,
    {
        self.variants().iter().filter(|m| predicate(m)).collect()
    }

    /// @acp:summary "Two-pass role query: strict matches first, then relaxed ones"
    /// `matcher` receives `false` on the strict pass and `true` on the relaxed
    /// one; a variant appears at most once.
    pub fn extract_paired_by_role<F>(&self, matcher: F) -> Vec<&Rc<MethodDeclaration>>
    where
        F: Fn(&MethodDeclaration, bool) -> bool,
    {
        let mut found = Vec::new();
        let mut added = HashSet::new();
        for relaxed in [false, true] {
            for method in self.variants() {
                let key = format!("{}{}", method.qualified_name(), method.signature());
                if !added.contains(&key) && matcher(method, relaxed) {
                    added.insert(key);
                    found.push(method);
                }
            }
        }
        found
    }

    pub fn extract_getter(&self) -> Option<&Rc<MethodDeclaration>> {
        self.variants().iter().find(|m| is_getter(m))
    }

    /// Setters for `value_type`, exact matches before widening ones
    pub fn extract_setters(&self, value_type: &str) -> Vec<&Rc<MethodDeclaration>> {
        self.extract_paired_by_role(|method, widening| is_setter(method, value_type, widening))
    }

    pub fn extract_operators(&self) -> Vec<(Operator, &Rc<MethodDeclaration>)> {
        self.variants()
            .iter()
            .filter_map(|m| operator_of(m).map(|op| (op, m)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::group::BuiltinRule;

    fn group_of(methods: Vec<MethodDeclaration>) -> OverloadGroup {
        let mut group = OverloadGroup::new(Rc::new(BuiltinRule::Always));
        for method in methods {
            group.add(Rc::new(method));
        }
        group.finalize();
        group
    }

    #[test]
    fn test_widening() {
        assert!(is_widening("int", "double"));
        assert!(is_widening("char", "int"));
        assert!(!is_widening("double", "int"));
        assert!(!is_widening("int", "int"));
        assert!(!is_widening("Point", "Object"));
    }

    #[test]
    fn test_getter_detection() {
        assert!(is_getter(&MethodDeclaration::method("ai.Path", "getLength", "float")));
        assert!(is_getter(&MethodDeclaration::method("ai.Path", "isClosed", "boolean")));
        assert!(!is_getter(&MethodDeclaration::method("ai.Path", "isClosed", "int")));
        assert!(!is_getter(&MethodDeclaration::method("ai.Path", "getter", "int")));
        assert!(!is_getter(&MethodDeclaration::method("ai.Path", "getLength", "void")));
        assert!(!is_getter(
            &MethodDeclaration::method("ai.Path", "getPoint", "Point").param("index", "int")
        ));
        assert!(!is_getter(&MethodDeclaration::constructor("ai.Getter")));
    }

    #[test]
    fn test_extract_getter() {
        let group = group_of(vec![
            MethodDeclaration::method("ai.Path", "getLength", "float").param("precision", "float"),
            MethodDeclaration::method("ai.Path", "getLength", "float"),
        ]);
        let getter = group.extract_getter().unwrap();
        assert_eq!(getter.arity(), 0);
    }

    #[test]
    fn test_extract_setters_prefers_exact_type() {
        let group = group_of(vec![
            MethodDeclaration::method("ai.Path", "setWidth", "void").param("width", "double"),
            MethodDeclaration::method("ai.Path", "setWidth", "void").param("width", "int"),
            MethodDeclaration::method("ai.Path", "setWidth", "void").param("width", "String"),
        ]);

        let setters = group.extract_setters("int");
        let types: Vec<_> = setters.iter().map(|m| m.parameters[0].type_name.as_str()).collect();
        assert_eq!(types, vec!["int", "double"]);

        assert!(group.extract_setters("boolean").is_empty());
    }

    #[test]
    fn test_extract_by_role() {
        let group = group_of(vec![
            MethodDeclaration::method("ai.Point", "transform", "Point").param("matrix", "Matrix"),
            MethodDeclaration::method("ai.Point", "transform", "Point").static_().param("m", "Matrix").param("p", "Point"),
        ]);
        let statics = group.extract_by_role(|m| m.is_static);
        assert_eq!(statics.len(), 1);
        assert_eq!(statics[0].arity(), 2);
    }

    #[test]
    fn test_extract_operators() {
        let group = group_of(vec![
            MethodDeclaration::method("ai.Point", "add", "Point").param("point", "Point"),
            MethodDeclaration::method("ai.Point", "add", "Point").param("x", "double").param("y", "double"),
            MethodDeclaration::method("ai.Point", "add", "Point").param("value", "double"),
        ]);

        let operators = group.extract_operators();
        assert_eq!(operators.len(), 2);
        assert!(operators.iter().all(|(op, _)| *op == Operator::Add));
        assert_eq!(Operator::Add.symbol(), "+");
    }
}
