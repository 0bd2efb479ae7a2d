//! Character option aggregates.
//!
//! Read models the conversion layer assembles from one catalog entity plus
//! its normalized choices. Once built they are immutable and serialized as-is
//! into persistence and wire formats.

pub mod background;
pub mod class;
pub mod race;

pub use background::BackgroundData;
pub use class::ClassData;
pub use race::{AbilityBonus, AbilityBonusChoice, RaceData};
