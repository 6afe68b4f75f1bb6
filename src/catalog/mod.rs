//! @acp:module "Catalog"
//! @acp:summary "Owns the overload groups of every class in a model"
//! @acp:domain cli
//! @acp:layer service
//!
//! # Catalog
//!
//! Builds overload groups class by class:
//! 1. The first declaration of a name starts a group
//! 2. Later declarations are offered to that name's groups in creation
//!    order; the first group accepting wins
//! 3. A declaration no group accepts starts a fresh group
//! 4. All groups are finalized once the class is complete
//!
//! The catalog also holds the explicit declaration-to-group mapping and
//! resolves override links, serving as [`OverrideResolver`] and
//! [`GroupLookup`] for documentation fallback.

use std::collections::HashMap;
use std::rc::Rc;

use crate::error::{DocError, Result};
use crate::group::{
    CompatibilityRule, Fallback, GroupLookup, OverloadGroup, OverrideResolver, Removal, RuleSet,
};
use crate::model::{MethodDeclaration, Model};

fn decl_key(class: &str, signature: &str) -> String {
    format!("{}#{}", class, signature)
}

/// A declaration that could not join an existing group of its name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    pub class: String,
    pub signature: String,
}

/// @acp:summary "Groups of one class, in first-seen order"
#[derive(Debug, Clone)]
pub struct ClassEntry {
    pub name: String,
    pub visible: bool,
    groups: Vec<OverloadGroup>,
}

impl ClassEntry {
    pub fn groups(&self) -> &[OverloadGroup] {
        &self.groups
    }

    /// All groups sharing `name` (more than one when grouping was rejected)
    pub fn groups_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a OverloadGroup> + 'a {
        self.groups.iter().filter(move |g| g.name() == Some(name))
    }

    pub fn package(&self) -> &str {
        self.name.rsplit_once('.').map(|(pkg, _)| pkg).unwrap_or("")
    }

    pub fn simple_name(&self) -> &str {
        self.name.rsplit('.').next().unwrap_or(&self.name)
    }
}

/// Aggregate numbers for reporting
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CatalogStats {
    pub classes: usize,
    pub declarations: usize,
    pub groups: usize,
    pub grouped: usize,
}

/// @acp:summary "All overload groups of a model plus the lookup tables around them"
#[derive(Debug)]
pub struct Catalog {
    classes: Vec<ClassEntry>,
    /// `class#signature` -> latest declaration with that signature
    declarations: HashMap<String, Rc<MethodDeclaration>>,
    /// `class#signature` -> (class index, group index)
    owners: HashMap<String, (usize, usize)>,
    rejections: Vec<Rejection>,
    /// Declarations listed by the model, re-declared signatures included
    declaration_count: usize,
}

impl Catalog {
    /// @acp:summary "Group every class of the model with the given rules"
    pub fn build(model: &Model, rules: RuleSet) -> Self {
        let rule: Rc<dyn CompatibilityRule> = Rc::new(rules);
        let mut catalog = Catalog {
            classes: Vec::with_capacity(model.classes.len()),
            declarations: HashMap::new(),
            owners: HashMap::new(),
            rejections: Vec::new(),
            declaration_count: 0,
        };

        for class in &model.classes {
            let mut entry = ClassEntry {
                name: class.name.clone(),
                visible: class.visible,
                groups: Vec::new(),
            };

            for method in &class.methods {
                let method = Rc::new(method.clone());
                catalog.declaration_count += 1;
                catalog.declarations.insert(
                    decl_key(&method.containing_class, &method.signature()),
                    Rc::clone(&method),
                );

                let mut candidates = entry
                    .groups
                    .iter_mut()
                    .filter(|g| g.name() == Some(method.name.as_str()))
                    .peekable();
                let had_candidates = candidates.peek().is_some();
                let accepted = candidates.any(|g| g.add(Rc::clone(&method)));

                if !accepted {
                    if had_candidates {
                        tracing::debug!(
                            "{}.{} starts a separate group",
                            class.name,
                            method.signature()
                        );
                        catalog.rejections.push(Rejection {
                            class: class.name.clone(),
                            signature: method.signature(),
                        });
                    }
                    entry
                        .groups
                        .push(OverloadGroup::with_method(Rc::clone(&rule), method));
                }
            }

            for group in &mut entry.groups {
                group.finalize();
            }
            catalog.classes.push(entry);
            catalog.reindex(catalog.classes.len() - 1);
        }

        tracing::debug!(
            "Built {} groups for {} classes",
            catalog.stats().groups,
            catalog.classes.len()
        );
        catalog
    }

    fn reindex(&mut self, class_index: usize) {
        self.owners.retain(|_, (c, _)| *c != class_index);
        let class = &self.classes[class_index];
        for (group_index, group) in class.groups.iter().enumerate() {
            for variant in group.variants() {
                self.owners.insert(
                    decl_key(&variant.containing_class, &variant.signature()),
                    (class_index, group_index),
                );
            }
        }
    }

    pub fn classes(&self) -> &[ClassEntry] {
        &self.classes
    }

    pub fn class(&self, name: &str) -> Option<&ClassEntry> {
        self.classes.iter().find(|c| c.name == name)
    }

    /// Declarations that had to start their own group
    pub fn rejections(&self) -> &[Rejection] {
        &self.rejections
    }

    /// Group documenting the declaration `class#signature`
    pub fn group_for(&self, class: &str, signature: &str) -> Option<&OverloadGroup> {
        self.owners
            .get(&decl_key(class, signature))
            .map(|&(c, g)| &self.classes[c].groups[g])
    }

    /// @acp:summary "Remove a declaration, discarding its group when emptied"
    pub fn remove(&mut self, class: &str, signature: &str) -> Result<Removal> {
        let class_index = self
            .classes
            .iter()
            .position(|c| c.name == class)
            .ok_or_else(|| DocError::ClassNotFound(class.to_string()))?;

        // Search the hosting class; the declaration may name another containing class
        let found = self.classes[class_index]
            .groups
            .iter()
            .enumerate()
            .find_map(|(index, group)| {
                group
                    .variants()
                    .iter()
                    .find(|v| v.signature() == signature)
                    .map(|v| (index, Rc::clone(v)))
            });
        let Some((group_index, variant)) = found else {
            return Ok(Removal::Absent);
        };

        let group = &mut self.classes[class_index].groups[group_index];
        let removal = group.remove(&variant);
        let key = decl_key(&variant.containing_class, signature);
        if removal == Removal::Emptied {
            tracing::debug!("Discarding empty group {} in {}", key, class);
            self.classes[class_index].groups.remove(group_index);
        }
        if self
            .declarations
            .get(&key)
            .is_some_and(|d| Rc::ptr_eq(d, &variant))
        {
            self.declarations.remove(&key);
        }
        self.declaration_count = self.declaration_count.saturating_sub(1);
        self.reindex(class_index);
        Ok(removal)
    }

    /// Documentation source for a group: its override fallback if any
    pub fn fallback_for<'a>(&'a self, group: &OverloadGroup) -> Option<Fallback<'a>> {
        group.overridden_fallback(self, self)
    }

    /// Visible groups with neither documentation nor an override to inherit from
    pub fn undocumented(&self) -> Vec<&OverloadGroup> {
        self.classes
            .iter()
            .flat_map(|c| c.groups.iter())
            .filter(|g| {
                g.canonical()
                    .map(|m| m.visible && !m.has_documentation())
                    .unwrap_or(false)
            })
            .filter(|g| self.fallback_for(g).is_none())
            .collect()
    }

    pub fn stats(&self) -> CatalogStats {
        let groups = self.classes.iter().flat_map(|c| c.groups.iter());
        CatalogStats {
            classes: self.classes.len(),
            declarations: self.declaration_count,
            groups: groups.clone().count(),
            grouped: groups.filter(|g| g.is_grouped()).count(),
        }
    }
}

impl OverrideResolver for Catalog {
    fn overridden(&self, method: &MethodDeclaration) -> Option<Rc<MethodDeclaration>> {
        let target = method.overrides.as_ref()?;
        self.declarations
            .get(&decl_key(&target.class, &target.signature))
            .cloned()
    }
}

impl GroupLookup for Catalog {
    fn group_of(&self, method: &MethodDeclaration) -> Option<&OverloadGroup> {
        self.group_for(&method.containing_class, &method.signature())
    }
}
