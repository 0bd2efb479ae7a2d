//! Use cases - User story orchestration.
//!
//! Each module orchestrates the catalog port and the domain normalizer to
//! answer one family of requests.

pub mod catalog_loader;
pub mod character_options;
pub mod choices;

pub use catalog_loader::{load_all, LoadError};
pub use character_options::{CharacterOptions, CharacterOptionsError};
pub use choices::{CategoryExpander, ExpandError};
