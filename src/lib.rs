#![forbid(unsafe_code)]

//! @acp:module "docgroup Library"
//! @acp:summary "Overload grouping for API documentation"
//! @acp:domain cli
//! @acp:layer api
//! @acp:stability stable
//!
//! # docgroup
//!
//! Collapses overloaded methods and constructors of a scripting API into a
//! single documentation entry with a merged signature such as
//! `curveTo(handle, to[, parameter])`.
//!
//! ## Features
//!
//! - **Overload Groups**: Pluggable compatibility rules decide which overloads merge
//! - **Merged Signatures**: Optional trailing parameters render in nested brackets
//! - **Override Fallback**: Undocumented overrides borrow their ancestor's documentation
//! - **Role Queries**: Getters, setters and operators picked out of a group
//!
//! ## Example
//!
//! ```rust,no_run
//! use docgroup::{Catalog, Model, RuleSet};
//!
//! fn main() -> anyhow::Result<()> {
//!     let model = Model::load("api.doc.json")?;
//!     let catalog = Catalog::build(&model, RuleSet::default());
//!
//!     for class in catalog.classes() {
//!         for group in class.groups() {
//!             if let Some(name) = group.name() {
//!                 println!("{}{}", name, group.render_parameter_list());
//!             }
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod catalog;
pub mod commands;
pub mod config;
pub mod error;
pub mod group;
pub mod model;
pub mod render;

// Re-exports
pub use catalog::{Catalog, CatalogStats, ClassEntry, Rejection};
pub use config::Config;
pub use error::{DocError, Result};
pub use group::{
    BuiltinRule, CompatibilityRule, Fallback, GroupLookup, Operator, OverloadGroup,
    OverrideResolver, Removal, RuleSet,
};
pub use model::{ClassDoc, MethodDeclaration, Model, Parameter};
pub use render::{render_catalog, OutputFormat, RenderOptions};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
