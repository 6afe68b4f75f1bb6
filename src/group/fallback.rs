//! @acp:module "Override Fallback"
//! @acp:summary "Borrow documentation from overridden declarations"
//! @acp:domain cli
//! @acp:layer logic
//!
//! An undocumented override (no comment, no see/throws/param tags) is
//! documented with the nearest documented declaration up its override
//! chain. Lookups of ancestors go through an explicit [`GroupLookup`]
//! owned by the caller; when that lookup hands back a group declared in a
//! different class than the override points to (an overridden method moved
//! into a derived class), the ancestor is wrapped in a fresh standalone
//! group instead, which also keeps aliased lookups from recursing.

use std::collections::HashSet;
use std::rc::Rc;

use super::OverloadGroup;
use crate::model::MethodDeclaration;

/// Resolves the declaration a method overrides
pub trait OverrideResolver {
    fn overridden(&self, method: &MethodDeclaration) -> Option<Rc<MethodDeclaration>>;
}

/// Maps a declaration to the group documenting it
pub trait GroupLookup {
    fn group_of(&self, method: &MethodDeclaration) -> Option<&OverloadGroup>;
}

/// Group to document an undocumented override with
#[derive(Debug)]
pub enum Fallback<'a> {
    /// The ancestor's own group
    Existing(&'a OverloadGroup),
    /// The ancestor wrapped on its own
    Standalone(OverloadGroup),
}

impl Fallback<'_> {
    pub fn group(&self) -> &OverloadGroup {
        match self {
            Fallback::Existing(group) => *group,
            Fallback::Standalone(group) => group,
        }
    }

    pub fn is_standalone(&self) -> bool {
        matches!(self, Fallback::Standalone(_))
    }
}

fn chain_key(method: &MethodDeclaration) -> String {
    format!("{}#{}", method.containing_class, method.signature())
}

impl OverloadGroup {
    /// @acp:summary "Nearest documented ancestor for an undocumented canonical method"
    /// `Standalone` only comes from a lookup that maps the ancestor to another
    /// class's group; a catalog lookup resolves an override cycle to `Existing`
    /// or `None`.
    pub fn overridden_fallback<'a, R, L>(&self, resolver: &R, groups: &'a L) -> Option<Fallback<'a>>
    where
        R: OverrideResolver + ?Sized,
        L: GroupLookup + ?Sized,
    {
        let canonical = self.canonical()?;
        if !canonical.is_method() || !canonical.visible || canonical.has_documentation() {
            return None;
        }

        let mut visited = HashSet::new();
        visited.insert(chain_key(canonical));
        let mut current = Rc::clone(canonical);

        loop {
            let expected_class = current.overridden_class()?.to_string();
            let ancestor = resolver.overridden(&current)?;

            if !visited.insert(chain_key(&ancestor)) {
                tracing::warn!(
                    "Cyclic override chain at {}, no documentation inherited",
                    ancestor.qualified_name()
                );
                return None;
            }

            if ancestor.has_documentation() {
                let existing = groups
                    .group_of(&ancestor)
                    .filter(|group| group.containing_class() == Some(expected_class.as_str()));

                return Some(match existing {
                    Some(group) => Fallback::Existing(group),
                    None => {
                        tracing::debug!(
                            "Wrapping {} for {}",
                            ancestor.qualified_name(),
                            current.qualified_name()
                        );
                        Fallback::Standalone(OverloadGroup::with_method(self.rule(), ancestor))
                    }
                });
            }

            current = ancestor;
        }
    }
}
