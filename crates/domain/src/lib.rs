extern crate self as charforge_domain;

pub mod aggregates;
pub mod choices;
pub mod error;
pub mod value_objects;

pub use error::DomainError;

// Re-export the normalization engine
pub use choices::{
    BundleItem, CategoryClassifier, CategoryRule, Choice, ChoiceNormalizer, ChoiceOption,
    ChoiceType, CountedItemReference, ItemReference, OptionSet, SourceChoice, SourceOption,
    SourceOptionSet, DEFAULT_CATEGORY_ID,
};

// Re-export character option aggregates
pub use aggregates::{AbilityBonus, AbilityBonusChoice, BackgroundData, ClassData, RaceData};
