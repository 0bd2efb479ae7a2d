//! Value objects - Immutable objects defined by their attributes

mod quantity;

pub use quantity::{clamp_i32, positive_count};
