//! @acp:module "Compatibility Rules"
//! @acp:summary "Pluggable rules deciding which declarations may share one overload group"
//! @acp:domain cli
//! @acp:layer logic
//!
//! Which overloads collapse into one documentation entry differs per
//! overload family. Setter-style families keep the arity and vary the
//! parameter type; default-parameter families (e.g. all `Pathfinder`
//! operations) extend a common prefix. A group never decides this itself:
//! it asks the [`CompatibilityRule`] it was created with.

use std::str::FromStr;

use glob::Pattern;
use serde::{Deserialize, Serialize};

use crate::config::{FamilyRule, GroupingConfig};
use crate::error::{DocError, Result};
use crate::model::MethodDeclaration;

/// Decides whether `candidate` can be documented together with `existing`
pub trait CompatibilityRule {
    fn is_compatible(&self, existing: &MethodDeclaration, candidate: &MethodDeclaration) -> bool;
}

impl<F> CompatibilityRule for F
where
    F: Fn(&MethodDeclaration, &MethodDeclaration) -> bool,
{
    fn is_compatible(&self, existing: &MethodDeclaration, candidate: &MethodDeclaration) -> bool {
        self(existing, candidate)
    }
}

/// @acp:summary "Built-in compatibility rules, selectable from configuration"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BuiltinRule {
    /// Same static-ness and kind, and either default-parameter or type overloads
    #[default]
    Script,
    /// Arities differ and the shorter type list is a prefix of the longer one
    DefaultParameters,
    /// Equal arity with differing parameter types
    TypeOverloads,
    /// Group everything sharing a name
    Always,
    /// Never group; every declaration gets its own entry
    Never,
}

impl BuiltinRule {
    pub fn as_str(&self) -> &'static str {
        match self {
            BuiltinRule::Script => "script",
            BuiltinRule::DefaultParameters => "default-parameters",
            BuiltinRule::TypeOverloads => "type-overloads",
            BuiltinRule::Always => "always",
            BuiltinRule::Never => "never",
        }
    }
}

impl FromStr for BuiltinRule {
    type Err = DocError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "script" => Ok(BuiltinRule::Script),
            "default-parameters" | "defaults" => Ok(BuiltinRule::DefaultParameters),
            "type-overloads" | "types" => Ok(BuiltinRule::TypeOverloads),
            "always" => Ok(BuiltinRule::Always),
            "never" => Ok(BuiltinRule::Never),
            _ => Err(DocError::UnknownRule(s.to_string())),
        }
    }
}

impl CompatibilityRule for BuiltinRule {
    fn is_compatible(&self, existing: &MethodDeclaration, candidate: &MethodDeclaration) -> bool {
        match self {
            BuiltinRule::Script => {
                existing.is_static == candidate.is_static
                    && existing.is_method() == candidate.is_method()
                    && (is_default_parameter_pair(existing, candidate)
                        || is_type_overload_pair(existing, candidate))
            }
            BuiltinRule::DefaultParameters => is_default_parameter_pair(existing, candidate),
            BuiltinRule::TypeOverloads => is_type_overload_pair(existing, candidate),
            BuiltinRule::Always => true,
            BuiltinRule::Never => false,
        }
    }
}

fn parameter_types(method: &MethodDeclaration) -> impl Iterator<Item = &str> {
    method.parameters.iter().map(|p| p.type_name.as_str())
}

/// One parameter list strictly extends the other, type for type
pub fn is_default_parameter_pair(a: &MethodDeclaration, b: &MethodDeclaration) -> bool {
    let (short, long) = if a.arity() < b.arity() { (a, b) } else { (b, a) };
    short.arity() != long.arity() && parameter_types(short).zip(parameter_types(long)).all(|(x, y)| x == y)
}

/// Same arity, different parameter types
pub fn is_type_overload_pair(a: &MethodDeclaration, b: &MethodDeclaration) -> bool {
    a.arity() == b.arity() && parameter_types(a).ne(parameter_types(b))
}

/// @acp:summary "Per-family rule selection by glob over qualified method names"
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    default_rule: BuiltinRule,
    families: Vec<(Pattern, BuiltinRule)>,
}

impl RuleSet {
    pub fn new(default_rule: BuiltinRule) -> Self {
        Self {
            default_rule,
            families: Vec::new(),
        }
    }

    /// Add a family; earlier families take precedence
    pub fn with_family(mut self, pattern: &str, rule: BuiltinRule) -> Result<Self> {
        let pattern = Pattern::new(pattern)
            .map_err(|e| DocError::Other(format!("Invalid family pattern '{}': {}", pattern, e)))?;
        self.families.push((pattern, rule));
        Ok(self)
    }

    /// @acp:summary "Build from the grouping section of the configuration"
    pub fn from_config(config: &GroupingConfig) -> Result<Self> {
        let mut rules = RuleSet::new(config.default_rule.parse()?);
        for FamilyRule { pattern, rule } in &config.families {
            rules = rules.with_family(pattern, rule.parse()?)?;
        }
        Ok(rules)
    }

    pub fn default_rule(&self) -> BuiltinRule {
        self.default_rule
    }

    /// Rule governing the family `method` belongs to
    pub fn rule_for(&self, method: &MethodDeclaration) -> BuiltinRule {
        let name = method.qualified_name();
        self.families
            .iter()
            .find(|(pattern, _)| pattern.matches(&name))
            .map(|(_, rule)| *rule)
            .unwrap_or(self.default_rule)
    }
}

impl CompatibilityRule for RuleSet {
    fn is_compatible(&self, existing: &MethodDeclaration, candidate: &MethodDeclaration) -> bool {
        self.rule_for(existing).is_compatible(existing, candidate)
    }
}
