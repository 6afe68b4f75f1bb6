//! @acp:module "Overload Groups"
//! @acp:summary "Merges overloaded declarations into one documentation entry"
//! @acp:domain cli
//! @acp:layer logic
//!
//! # Overload Grouping
//!
//! An [`OverloadGroup`] collects declarations sharing a name that can be
//! documented as one operation, e.g. setters taking different value types,
//! or default-parameter families where each variant extends the previous
//! parameter list.
//!
//! ## Algorithm
//!
//! 1. **Dedup** by signature: a re-declared signature replaces the mapped
//!    entry and is not grouped again
//! 2. **Check** the candidate against every variant with the injected
//!    [`CompatibilityRule`]; one conflict rejects it
//! 3. **Finalize**: same arity everywhere picks the best documented
//!    variant, mixed arity picks the longest parameter list
//! 4. **Render** the merged parameter list, nesting optional tails in
//!    brackets: `(a[, b[, c]])`

pub mod compat;
pub mod fallback;
pub mod roles;

pub use compat::{BuiltinRule, CompatibilityRule, RuleSet};
pub use fallback::{Fallback, GroupLookup, OverrideResolver};
pub use roles::Operator;

use std::cell::OnceCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::model::{MethodDeclaration, ParamTag, Parameter};

/// Outcome of [`OverloadGroup::remove`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Removal {
    /// The declaration was not a member
    Absent,
    /// Removed, other variants remain
    Removed,
    /// Removed the last variant; the owner must discard the group
    Emptied,
}

/// @acp:summary "Set of compatible overloads documented as one entry"
#[derive(Clone)]
pub struct OverloadGroup {
    rule: Rc<dyn CompatibilityRule>,
    /// First-seen order, unique by signature
    variants: Vec<Rc<MethodDeclaration>>,
    /// Dedup only, never consulted for ordering
    by_signature: HashMap<String, Rc<MethodDeclaration>>,
    is_grouped: bool,
    /// Index into `variants`
    canonical: Option<usize>,
    rendered: OnceCell<String>,
}

impl OverloadGroup {
    /// Create an empty group checking candidates with `rule`
    pub fn new(rule: Rc<dyn CompatibilityRule>) -> Self {
        Self {
            rule,
            variants: Vec::new(),
            by_signature: HashMap::new(),
            is_grouped: false,
            canonical: None,
            rendered: OnceCell::new(),
        }
    }

    /// Create a group holding `method`
    pub fn with_method(rule: Rc<dyn CompatibilityRule>, method: Rc<MethodDeclaration>) -> Self {
        let mut group = Self::new(rule);
        group.add(method);
        group
    }

    /// @acp:summary "Offer a declaration; false means the caller needs a fresh group"
    pub fn add(&mut self, method: Rc<MethodDeclaration>) -> bool {
        let signature = method.signature();
        if self
            .by_signature
            .insert(signature.clone(), Rc::clone(&method))
            .is_some()
        {
            tracing::trace!("Replaced duplicate signature {}", signature);
            return true;
        }

        if let Some(conflict) = self
            .variants
            .iter()
            .find(|existing| !self.rule.is_compatible(existing, &method))
        {
            tracing::debug!(
                "{} not compatible with {}, not grouped",
                signature,
                conflict.signature()
            );
            return false;
        }

        self.variants.push(method);
        self.is_grouped = self.variants.len() >= 2;
        if self.canonical.is_none() {
            self.canonical = Some(0);
        }
        self.invalidate();
        true
    }

    /// @acp:summary "Remove a declaration by identity"
    pub fn remove(&mut self, method: &Rc<MethodDeclaration>) -> Removal {
        let Some(index) = self.variants.iter().position(|v| Rc::ptr_eq(v, method)) else {
            return Removal::Absent;
        };

        let removed = self.variants.remove(index);
        self.by_signature.remove(&removed.signature());
        self.invalidate();

        if self.variants.is_empty() {
            self.canonical = None;
            self.is_grouped = false;
            return Removal::Emptied;
        }

        self.canonical = match self.canonical {
            Some(current) if current == index => Some(0),
            Some(current) if current > index => Some(current - 1),
            other => other,
        };
        self.is_grouped = self.variants.len() >= 2;
        self.finalize();
        Removal::Removed
    }

    /// @acp:summary "Recompute the canonical declaration"
    pub fn finalize(&mut self) {
        if self.variants.is_empty() {
            self.canonical = None;
        } else if !self.is_grouped {
            self.canonical = Some(0);
        } else if self.has_uniform_arity() {
            // Best documented variant; reversed so the first seen wins ties
            self.canonical = self
                .variants
                .iter()
                .enumerate()
                .rev()
                .max_by_key(|(_, v)| v.inline_tags.len())
                .map(|(i, _)| i);
        } else {
            // The longest parameter list is the full form
            self.canonical = self.arity_order().last().copied();
        }
        self.invalidate();
    }

    fn has_uniform_arity(&self) -> bool {
        let mut arities = self.variants.iter().map(|v| v.arity());
        match arities.next() {
            Some(first) => arities.all(|a| a == first),
            None => true,
        }
    }

    /// Variant indices by ascending arity, first-seen order among equals
    pub fn arity_order(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.variants.len()).collect();
        order.sort_by_key(|&i| self.variants[i].arity());
        order
    }

    fn invalidate(&mut self) {
        self.rendered = OnceCell::new();
    }

    /// @acp:summary "Merged parameter list, optional tails in nested brackets"
    pub fn render_parameter_list(&self) -> &str {
        self.rendered.get_or_init(|| self.render())
    }

    fn render(&self) -> String {
        let mut buf = String::from("(");
        if self.is_grouped {
            let mut prev_count = 0;
            let mut opened = 0;
            for index in self.arity_order() {
                let params = &self.variants[index].parameters;
                let count = params.len();
                if count > prev_count {
                    if prev_count > 0 {
                        buf.push('[');
                    }
                    for (i, param) in params.iter().enumerate().take(count).skip(prev_count) {
                        if i > 0 {
                            buf.push_str(", ");
                        }
                        buf.push_str(&param.name);
                    }
                    opened += 1;
                    prev_count = count;
                }
            }
            for _ in 1..opened {
                buf.push(']');
            }
        } else if let Some(canonical) = self.canonical() {
            let names: Vec<&str> = canonical.parameters.iter().map(|p| p.name.as_str()).collect();
            buf.push_str(&names.join(", "));
        }
        buf.push(')');
        buf
    }

    pub fn canonical(&self) -> Option<&Rc<MethodDeclaration>> {
        self.canonical.and_then(|i| self.variants.get(i))
    }

    pub fn variants(&self) -> &[Rc<MethodDeclaration>] {
        &self.variants
    }

    pub fn len(&self) -> usize {
        self.variants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }

    pub fn is_grouped(&self) -> bool {
        self.is_grouped
    }

    pub fn contains(&self, method: &Rc<MethodDeclaration>) -> bool {
        self.variants.iter().any(|v| Rc::ptr_eq(v, method))
    }

    pub(crate) fn rule(&self) -> Rc<dyn CompatibilityRule> {
        Rc::clone(&self.rule)
    }

    pub fn name(&self) -> Option<&str> {
        self.canonical().map(|m| m.name.as_str())
    }

    pub fn signature(&self) -> Option<String> {
        self.canonical().map(|m| m.signature())
    }

    /// None for constructors and empty groups
    pub fn return_type(&self) -> Option<&str> {
        self.canonical().and_then(|m| m.return_type())
    }

    pub fn containing_class(&self) -> Option<&str> {
        self.canonical().map(|m| m.containing_class.as_str())
    }

    pub fn is_static(&self) -> bool {
        self.canonical().map(|m| m.is_static).unwrap_or(false)
    }

    pub fn parameters(&self) -> &[Parameter] {
        self.canonical().map(|m| m.parameters.as_slice()).unwrap_or(&[])
    }

    /// Suffix appended to the name in member listings
    pub fn name_suffix(&self) -> &str {
        self.render_parameter_list()
    }

    /// Canonical parameters paired with their `@param` tags
    pub fn parameters_with_tags(&self) -> Vec<(&Parameter, Option<&ParamTag>)> {
        let Some(canonical) = self.canonical() else {
            return Vec::new();
        };
        let lookup: HashMap<&str, &ParamTag> = canonical
            .param_tags
            .iter()
            .map(|tag| (tag.parameter_name.as_str(), tag))
            .collect();
        canonical
            .parameters
            .iter()
            .map(|param| (param, lookup.get(param.name.as_str()).copied()))
            .collect()
    }

    /// Same static-ness, name and rendered parameter list
    pub fn is_similar(&self, other: &OverloadGroup) -> bool {
        self.is_static() == other.is_static()
            && self.name() == other.name()
            && self.render_parameter_list() == other.render_parameter_list()
    }
}

impl fmt::Debug for OverloadGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let signatures: Vec<String> = self.variants.iter().map(|v| v.signature()).collect();
        f.debug_struct("OverloadGroup")
            .field("variants", &signatures)
            .field("is_grouped", &self.is_grouped)
            .field("canonical", &self.canonical)
            .finish()
    }
}
