//! Type definitions for the D&D 5e SRD API JSON format.
//!
//! These types mirror the REST payloads for races, classes, backgrounds and
//! equipment categories. They are used for deserialization and then converted
//! to the catalog port records.
//!
//! Option lists are kept as raw `serde_json::Value`s and decoded one entry at
//! a time: a `null` entry or an option type we do not understand becomes
//! [`SourceOption::Unsupported`] instead of failing the whole payload.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use charforge_domain::{SourceChoice, SourceOption, SourceOptionSet};

use crate::infrastructure::ports::{
    AbilityBonusOptions, AbilityBonusRecord, BackgroundRecord, CatalogReference, ClassRecord,
    EquipmentCategory, EquipmentGrant, RaceRecord,
};

/// `{index, name, url}` reference.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiReference {
    pub index: String,
    #[serde(default)]
    pub name: String,
}

impl From<ApiReference> for CatalogReference {
    fn from(r: ApiReference) -> Self {
        CatalogReference::new(r.index, r.name)
    }
}

/// Response of every list endpoint.
#[derive(Debug, Deserialize)]
pub struct ApiReferenceList {
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub results: Vec<ApiReference>,
}

impl ApiReferenceList {
    pub fn into_references(self) -> Vec<CatalogReference> {
        self.results.into_iter().map(Into::into).collect()
    }
}

/// A player decision in catalog form.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiChoice {
    #[serde(default)]
    pub desc: Option<String>,
    #[serde(default, deserialize_with = "saturating_i64")]
    pub choose: i64,
    #[serde(default)]
    pub from: Value,
}

impl ApiChoice {
    pub fn into_source(self) -> SourceChoice {
        let description = self.desc.unwrap_or_default();
        SourceChoice::new(description, self.choose, decode_option_set(&self.from))
    }
}

/// Known `option_type` shapes. Anything else lands in `Other`.
#[derive(Debug, Deserialize)]
#[serde(tag = "option_type", rename_all = "snake_case")]
enum ApiOption {
    Reference {
        item: ApiReference,
    },
    CountedReference {
        #[serde(default = "default_count", deserialize_with = "saturating_i64")]
        count: i64,
        of: ApiReference,
    },
    Multiple {
        #[serde(default)]
        items: Vec<Value>,
    },
    Choice {
        choice: ApiChoice,
    },
    #[serde(other)]
    Other,
}

fn default_count() -> i64 {
    1
}

/// Read any JSON number as `i64`, saturating instead of failing.
///
/// The catalog does not bound its integers; clamping to the canonical range
/// happens later, so here it is enough never to reject a value. Non-numbers
/// read as 0.
fn saturating_i64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    Ok(saturate(&Value::deserialize(deserializer)?))
}

fn saturate(value: &Value) -> i64 {
    let Value::Number(n) = value else {
        return 0;
    };
    n.as_i64()
        .or_else(|| n.as_u64().map(|_| i64::MAX))
        // `as` saturates float to int conversions, NaN becomes 0
        .or_else(|| n.as_f64().map(|f| f as i64))
        .unwrap_or_default()
}

fn decode_option_set(from: &Value) -> SourceOptionSet {
    let set_type = from.get("option_set_type").and_then(Value::as_str);
    match set_type {
        Some("equipment_category") => {
            let category = from
                .get("equipment_category")
                .cloned()
                .and_then(|v| serde_json::from_value::<ApiReference>(v).ok());
            match category {
                Some(c) => SourceOptionSet::EquipmentCategory {
                    category_id: c.index,
                    name: c.name,
                },
                None => SourceOptionSet::Options(Vec::new()),
            }
        }
        Some("resource_list") => SourceOptionSet::ResourceList {
            url: from
                .get("resource_list_url")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
        },
        _ => {
            let options = from
                .get("options")
                .and_then(Value::as_array)
                .map(|options| options.iter().map(decode_option).collect())
                .unwrap_or_default();
            SourceOptionSet::Options(options)
        }
    }
}

/// Decode one option entry, never failing.
pub fn decode_option(value: &Value) -> SourceOption {
    if value.is_null() {
        return SourceOption::unsupported("null");
    }

    match serde_json::from_value::<ApiOption>(value.clone()) {
        Ok(ApiOption::Reference { item }) => SourceOption::reference(item.index, item.name),
        Ok(ApiOption::CountedReference { count, of }) => {
            SourceOption::counted(of.index, of.name, count)
        }
        Ok(ApiOption::Multiple { items }) => SourceOption::Bundle {
            items: items.iter().map(decode_option).collect(),
        },
        Ok(ApiOption::Choice { choice }) => SourceOption::nested(choice.into_source()),
        Ok(ApiOption::Other) | Err(_) => {
            let kind = value
                .get("option_type")
                .and_then(Value::as_str)
                .unwrap_or("unknown");
            SourceOption::unsupported(kind)
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ApiAbilityBonus {
    pub ability_score: ApiReference,
    #[serde(default, deserialize_with = "saturating_i64")]
    pub bonus: i64,
}

impl From<ApiAbilityBonus> for AbilityBonusRecord {
    fn from(b: ApiAbilityBonus) -> Self {
        AbilityBonusRecord {
            ability: b.ability_score.into(),
            bonus: b.bonus,
        }
    }
}

fn decode_ability_bonus_options(choice: &ApiChoice) -> AbilityBonusOptions {
    let options = choice
        .from
        .get("options")
        .and_then(Value::as_array)
        .map(|options| {
            options
                .iter()
                .filter_map(|o| serde_json::from_value::<ApiAbilityBonus>(o.clone()).ok())
                .map(Into::into)
                .collect()
        })
        .unwrap_or_default();

    AbilityBonusOptions {
        choose: choice.choose,
        options,
    }
}

/// A race in API format.
#[derive(Debug, Deserialize)]
pub struct ApiRace {
    pub index: String,
    pub name: String,
    #[serde(default, deserialize_with = "saturating_i64")]
    pub speed: i64,
    #[serde(default)]
    pub size: String,
    #[serde(default)]
    pub ability_bonuses: Vec<ApiAbilityBonus>,
    #[serde(default)]
    pub ability_bonus_options: Option<ApiChoice>,
    #[serde(default)]
    pub starting_proficiencies: Vec<ApiReference>,
    #[serde(default)]
    pub starting_proficiency_options: Option<ApiChoice>,
    #[serde(default)]
    pub languages: Vec<ApiReference>,
    #[serde(default)]
    pub language_options: Option<ApiChoice>,
    #[serde(default)]
    pub traits: Vec<ApiReference>,
    #[serde(default)]
    pub subraces: Vec<ApiReference>,
}

impl ApiRace {
    pub fn into_record(self) -> RaceRecord {
        RaceRecord {
            ability_bonus_options: self
                .ability_bonus_options
                .as_ref()
                .map(decode_ability_bonus_options),
            index: self.index,
            name: self.name,
            speed: self.speed,
            size: self.size,
            ability_bonuses: self.ability_bonuses.into_iter().map(Into::into).collect(),
            starting_proficiencies: references(self.starting_proficiencies),
            starting_proficiency_options: self
                .starting_proficiency_options
                .map(ApiChoice::into_source),
            languages: references(self.languages),
            language_options: self.language_options.map(ApiChoice::into_source),
            traits: references(self.traits),
            subraces: references(self.subraces),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ApiEquipmentGrant {
    pub equipment: ApiReference,
    #[serde(default = "default_count", deserialize_with = "saturating_i64")]
    pub quantity: i64,
}

impl From<ApiEquipmentGrant> for EquipmentGrant {
    fn from(g: ApiEquipmentGrant) -> Self {
        EquipmentGrant {
            equipment: g.equipment.into(),
            quantity: g.quantity,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ApiSpellcasting {
    pub spellcasting_ability: ApiReference,
}

/// A class in API format.
#[derive(Debug, Deserialize)]
pub struct ApiClass {
    pub index: String,
    pub name: String,
    #[serde(default, deserialize_with = "saturating_i64")]
    pub hit_die: i64,
    #[serde(default)]
    pub proficiency_choices: Vec<ApiChoice>,
    #[serde(default)]
    pub proficiencies: Vec<ApiReference>,
    #[serde(default)]
    pub saving_throws: Vec<ApiReference>,
    #[serde(default)]
    pub starting_equipment: Vec<ApiEquipmentGrant>,
    #[serde(default)]
    pub starting_equipment_options: Vec<ApiChoice>,
    #[serde(default)]
    pub subclasses: Vec<ApiReference>,
    #[serde(default)]
    pub spellcasting: Option<ApiSpellcasting>,
}

impl ApiClass {
    pub fn into_record(self) -> ClassRecord {
        ClassRecord {
            index: self.index,
            name: self.name,
            hit_die: self.hit_die,
            proficiency_choices: choices(self.proficiency_choices),
            proficiencies: references(self.proficiencies),
            saving_throws: references(self.saving_throws),
            starting_equipment: self.starting_equipment.into_iter().map(Into::into).collect(),
            starting_equipment_options: choices(self.starting_equipment_options),
            subclasses: references(self.subclasses),
            spellcasting_ability: self.spellcasting.map(|s| s.spellcasting_ability.into()),
        }
    }
}

/// A background in API format.
#[derive(Debug, Deserialize)]
pub struct ApiBackground {
    pub index: String,
    pub name: String,
    #[serde(default)]
    pub starting_proficiencies: Vec<ApiReference>,
    #[serde(default)]
    pub language_options: Option<ApiChoice>,
    #[serde(default)]
    pub starting_equipment: Vec<ApiEquipmentGrant>,
    #[serde(default)]
    pub starting_equipment_options: Vec<ApiChoice>,
}

impl ApiBackground {
    pub fn into_record(self) -> BackgroundRecord {
        BackgroundRecord {
            index: self.index,
            name: self.name,
            starting_proficiencies: references(self.starting_proficiencies),
            language_options: self.language_options.map(ApiChoice::into_source),
            starting_equipment: self.starting_equipment.into_iter().map(Into::into).collect(),
            starting_equipment_options: choices(self.starting_equipment_options),
        }
    }
}

/// An equipment category in API format.
#[derive(Debug, Deserialize)]
pub struct ApiEquipmentCategory {
    pub index: String,
    pub name: String,
    #[serde(default)]
    pub equipment: Vec<ApiReference>,
}

impl ApiEquipmentCategory {
    pub fn into_record(self) -> EquipmentCategory {
        EquipmentCategory {
            index: self.index,
            name: self.name,
            equipment: references(self.equipment),
        }
    }
}

fn references(refs: Vec<ApiReference>) -> Vec<CatalogReference> {
    refs.into_iter().map(Into::into).collect()
}

fn choices(choices: Vec<ApiChoice>) -> Vec<SourceChoice> {
    choices.into_iter().map(ApiChoice::into_source).collect()
}
