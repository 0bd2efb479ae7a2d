//! The choice normalization engine.
//!
//! Converts the rules catalog's loosely-typed option trees ([`SourceChoice`],
//! [`SourceOption`]) into one canonical, recursive [`Choice`] tree that every
//! downstream consumer walks the same way.
//!
//! - [`ids`] - deterministic, length-bounded identifiers
//! - [`CategoryClassifier`] - free-text description -> category id
//! - [`ChoiceNormalizer`] - the tree walk itself
//!
//! Everything here is synchronous and free of I/O. Resolving a category into
//! concrete items needs the catalog and lives in the engine crate.

pub mod ids;

mod canonical;
mod classifier;
mod normalizer;
mod proficiency;
mod source;

pub use canonical::{
    BundleItem, Choice, ChoiceOption, ChoiceType, CountedItemReference, ItemReference, OptionSet,
};
pub use classifier::{CategoryClassifier, CategoryRule, DEFAULT_CATEGORY_ID, STANDARD_RULES};
pub use ids::{bounded_id, slug, NESTED_DESCRIPTION_MAX_LEN};
pub use normalizer::ChoiceNormalizer;
pub use source::{SourceChoice, SourceOption, SourceOptionSet};
