//! Async side of choice normalization.

mod category_expander;

pub use category_expander::{CategoryExpander, ExpandError, ExpandFailure};
