//! Port traits for infrastructure boundaries.
//!
//! The engine talks to the outside world through one port: the rules catalog.
//! The REST adapter and the caching decorator both implement it, and tests
//! substitute a mock.

mod catalog;
mod error;

pub use catalog::{
    AbilityBonusOptions, AbilityBonusRecord, BackgroundRecord, CatalogPort, CatalogReference,
    ClassRecord, EquipmentCategory, EquipmentGrant, RaceRecord,
};
pub use error::CatalogError;

#[cfg(test)]
pub use catalog::MockCatalogPort;
