//! Rules catalog port and the records it hands back.
//!
//! Records are already decoded from the catalog's wire format: player
//! decisions arrive as [`SourceChoice`] trees ready for normalization, and
//! numbers keep the catalog's unbounded `i64` width until conversion clamps
//! them.

use async_trait::async_trait;

use charforge_domain::SourceChoice;

use super::CatalogError;

/// `{index, name}` pair the catalog uses for every cross-reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogReference {
    pub index: String,
    pub name: String,
}

impl CatalogReference {
    pub fn new(index: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            index: index.into(),
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbilityBonusRecord {
    pub ability: CatalogReference,
    pub bonus: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbilityBonusOptions {
    pub choose: i64,
    pub options: Vec<AbilityBonusRecord>,
}

/// A fixed item grant with its quantity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EquipmentGrant {
    pub equipment: CatalogReference,
    pub quantity: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RaceRecord {
    pub index: String,
    pub name: String,
    pub speed: i64,
    pub size: String,
    pub ability_bonuses: Vec<AbilityBonusRecord>,
    pub ability_bonus_options: Option<AbilityBonusOptions>,
    pub starting_proficiencies: Vec<CatalogReference>,
    pub starting_proficiency_options: Option<SourceChoice>,
    pub languages: Vec<CatalogReference>,
    pub language_options: Option<SourceChoice>,
    pub traits: Vec<CatalogReference>,
    pub subraces: Vec<CatalogReference>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassRecord {
    pub index: String,
    pub name: String,
    pub hit_die: i64,
    pub proficiency_choices: Vec<SourceChoice>,
    pub proficiencies: Vec<CatalogReference>,
    pub saving_throws: Vec<CatalogReference>,
    pub starting_equipment: Vec<EquipmentGrant>,
    pub starting_equipment_options: Vec<SourceChoice>,
    pub subclasses: Vec<CatalogReference>,
    pub spellcasting_ability: Option<CatalogReference>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackgroundRecord {
    pub index: String,
    pub name: String,
    pub starting_proficiencies: Vec<CatalogReference>,
    pub language_options: Option<SourceChoice>,
    pub starting_equipment: Vec<EquipmentGrant>,
    pub starting_equipment_options: Vec<SourceChoice>,
}

/// Members of a named equipment category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EquipmentCategory {
    pub index: String,
    pub name: String,
    pub equipment: Vec<CatalogReference>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogPort: Send + Sync {
    async fn list_races(&self) -> Result<Vec<CatalogReference>, CatalogError>;
    async fn list_classes(&self) -> Result<Vec<CatalogReference>, CatalogError>;
    async fn list_backgrounds(&self) -> Result<Vec<CatalogReference>, CatalogError>;

    async fn get_race(&self, id: &str) -> Result<RaceRecord, CatalogError>;
    async fn get_class(&self, id: &str) -> Result<ClassRecord, CatalogError>;
    async fn get_background(&self, id: &str) -> Result<BackgroundRecord, CatalogError>;

    /// Full member list of an equipment category.
    async fn get_equipment_category(&self, id: &str) -> Result<EquipmentCategory, CatalogError>;
}
