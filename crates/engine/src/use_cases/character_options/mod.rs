//! Character option use cases.
//!
//! Fetch races, classes and backgrounds from the catalog and hand them back as
//! aggregates with every player decision normalized into canonical choices.
//! Class equipment choices are additionally expanded, so the player picks
//! from concrete items.

mod convert;
mod error;

use std::sync::Arc;

use charforge_domain::{BackgroundData, ChoiceNormalizer, ClassData, DomainError, RaceData};

use crate::infrastructure::ports::CatalogPort;
use crate::use_cases::catalog_loader::load_all;
use crate::use_cases::choices::CategoryExpander;

pub use error::CharacterOptionsError;

pub struct CharacterOptions {
    catalog: Arc<dyn CatalogPort>,
    normalizer: Arc<ChoiceNormalizer>,
    expander: CategoryExpander,
}

impl CharacterOptions {
    pub fn new(catalog: Arc<dyn CatalogPort>, normalizer: Arc<ChoiceNormalizer>) -> Self {
        let expander = CategoryExpander::new(catalog.clone());
        Self {
            catalog,
            normalizer,
            expander,
        }
    }

    pub async fn get_race(&self, id: &str) -> Result<RaceData, CharacterOptionsError> {
        let id = require_id("race", id)?;
        let record = self.catalog.get_race(id).await?;
        Ok(convert::race_data(&self.normalizer, record))
    }

    pub async fn get_class(&self, id: &str) -> Result<ClassData, CharacterOptionsError> {
        let id = require_id("class", id)?;
        let record = self.catalog.get_class(id).await?;
        let class = convert::class_data(&self.normalizer, record);
        Ok(expand_equipment(&self.expander, class).await)
    }

    pub async fn get_background(&self, id: &str) -> Result<BackgroundData, CharacterOptionsError> {
        let id = require_id("background", id)?;
        let record = self.catalog.get_background(id).await?;
        Ok(convert::background_data(&self.normalizer, record))
    }

    /// Every race, in catalog order. Fails if any single race fails.
    pub async fn list_races(&self) -> Result<Vec<RaceData>, CharacterOptionsError> {
        let refs = self.catalog.list_races().await?;
        let catalog = self.catalog.clone();
        let normalizer = self.normalizer.clone();

        let races = load_all(&refs, move |id| {
            let catalog = catalog.clone();
            let normalizer = normalizer.clone();
            async move {
                let record = catalog.get_race(&id).await?;
                Ok(convert::race_data(&normalizer, record))
            }
        })
        .await?;

        tracing::debug!(count = races.len(), "Loaded races");
        Ok(races)
    }

    /// Every class, in catalog order, with equipment choices expanded.
    pub async fn list_classes(&self) -> Result<Vec<ClassData>, CharacterOptionsError> {
        let refs = self.catalog.list_classes().await?;
        let catalog = self.catalog.clone();
        let normalizer = self.normalizer.clone();
        let expander = self.expander.clone();

        let classes = load_all(&refs, move |id| {
            let catalog = catalog.clone();
            let normalizer = normalizer.clone();
            let expander = expander.clone();
            async move {
                let record = catalog.get_class(&id).await?;
                let class = convert::class_data(&normalizer, record);
                Ok(expand_equipment(&expander, class).await)
            }
        })
        .await?;

        tracing::debug!(count = classes.len(), "Loaded classes");
        Ok(classes)
    }

    pub async fn list_backgrounds(&self) -> Result<Vec<BackgroundData>, CharacterOptionsError> {
        let refs = self.catalog.list_backgrounds().await?;
        let catalog = self.catalog.clone();
        let normalizer = self.normalizer.clone();

        let backgrounds = load_all(&refs, move |id| {
            let catalog = catalog.clone();
            let normalizer = normalizer.clone();
            async move {
                let record = catalog.get_background(&id).await?;
                Ok(convert::background_data(&normalizer, record))
            }
        })
        .await?;

        tracing::debug!(count = backgrounds.len(), "Loaded backgrounds");
        Ok(backgrounds)
    }
}

fn require_id<'a>(kind: &str, id: &'a str) -> Result<&'a str, DomainError> {
    let id = id.trim();
    if id.is_empty() {
        return Err(DomainError::validation(format!("{kind} id must not be empty")));
    }
    Ok(id)
}

async fn expand_equipment(expander: &CategoryExpander, mut class: ClassData) -> ClassData {
    let choices = std::mem::take(&mut class.equipment_choices);
    let mut expanded = Vec::with_capacity(choices.len());
    for choice in choices {
        expanded.push(expander.expand_choice(choice).await);
    }
    class.equipment_choices = expanded;
    class
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::{
        AbilityBonusOptions, AbilityBonusRecord, BackgroundRecord, CatalogError, CatalogReference,
        ClassRecord, EquipmentCategory, EquipmentGrant, MockCatalogPort, RaceRecord,
    };
    use crate::use_cases::catalog_loader::LoadError;
    use charforge_domain::{
        BundleItem, ChoiceOption, ChoiceType, OptionSet, SourceChoice, SourceOption,
        SourceOptionSet,
    };

    fn reference(index: &str, name: &str) -> CatalogReference {
        CatalogReference::new(index, name)
    }

    fn half_elf() -> RaceRecord {
        RaceRecord {
            index: "half-elf".into(),
            name: "Half-Elf".into(),
            speed: 30,
            size: "Medium".into(),
            ability_bonuses: vec![AbilityBonusRecord {
                ability: reference("cha", "CHA"),
                bonus: 2,
            }],
            ability_bonus_options: Some(AbilityBonusOptions {
                choose: 2,
                options: vec![
                    AbilityBonusRecord {
                        ability: reference("str", "STR"),
                        bonus: 1,
                    },
                    AbilityBonusRecord {
                        ability: reference("dex", "DEX"),
                        bonus: 1,
                    },
                ],
            }),
            starting_proficiencies: vec![],
            starting_proficiency_options: Some(SourceChoice::new(
                "Choose two skills",
                2,
                SourceOptionSet::Options(vec![
                    SourceOption::reference("skill-arcana", "Skill: Arcana"),
                    SourceOption::unsupported("null"),
                    SourceOption::reference("skill-history", "Skill: History"),
                ]),
            )),
            languages: vec![reference("common", "Common"), reference("elvish", "Elvish")],
            language_options: Some(SourceChoice::new(
                "one extra language",
                1,
                SourceOptionSet::ResourceList {
                    url: "/api/2014/languages".into(),
                },
            )),
            traits: vec![reference("darkvision", "Darkvision")],
            subraces: vec![],
        }
    }

    fn fighter() -> ClassRecord {
        ClassRecord {
            index: "fighter".into(),
            name: "Fighter".into(),
            hit_die: 10,
            proficiency_choices: vec![SourceChoice::new(
                "Choose two skills",
                2,
                SourceOptionSet::Options(vec![
                    SourceOption::reference("skill-athletics", "Skill: Athletics"),
                    SourceOption::reference("skill-survival", "Skill: Survival"),
                ]),
            )],
            proficiencies: vec![reference("all-armor", "All armor")],
            saving_throws: vec![reference("str", "STR"), reference("con", "CON")],
            starting_equipment: vec![],
            starting_equipment_options: vec![SourceChoice::new(
                "(a) a martial weapon and a shield or (b) two martial weapons",
                1,
                SourceOptionSet::Options(vec![SourceOption::Bundle {
                    items: vec![
                        SourceOption::counted("shield", "Shield", 1),
                        SourceOption::nested(SourceChoice::new(
                            "a martial weapon",
                            1,
                            SourceOptionSet::Options(vec![]),
                        )),
                    ],
                }]),
            )],
            subclasses: vec![reference("champion", "Champion")],
            spellcasting_ability: None,
        }
    }

    fn acolyte() -> BackgroundRecord {
        BackgroundRecord {
            index: "acolyte".into(),
            name: "Acolyte".into(),
            starting_proficiencies: vec![reference("skill-insight", "Skill: Insight")],
            language_options: Some(SourceChoice::new(
                "two languages",
                2,
                SourceOptionSet::ResourceList {
                    url: "/api/2014/languages".into(),
                },
            )),
            starting_equipment: vec![EquipmentGrant {
                equipment: reference("clothes-common", "Clothes, common"),
                quantity: 1,
            }],
            starting_equipment_options: vec![SourceChoice::new(
                "a holy symbol",
                1,
                SourceOptionSet::EquipmentCategory {
                    category_id: "holy-symbols".into(),
                    name: "Holy Symbols".into(),
                },
            )],
        }
    }

    fn use_case(catalog: MockCatalogPort) -> CharacterOptions {
        CharacterOptions::new(Arc::new(catalog), Arc::new(ChoiceNormalizer::default()))
    }

    #[tokio::test]
    async fn get_race_normalizes_choices() {
        let mut catalog = MockCatalogPort::new();
        catalog
            .expect_get_race()
            .withf(|id| id == "half-elf")
            .returning(|_| Ok(half_elf()));

        let race = use_case(catalog).get_race("half-elf").await.unwrap();

        assert_eq!(race.speed, 30);
        assert_eq!(race.ability_bonuses[0].ability_id, "cha");
        let bonus_choice = race.ability_bonus_choice.as_ref().unwrap();
        assert_eq!(bonus_choice.choose, 2);
        assert_eq!(bonus_choice.options.len(), 2);

        assert_eq!(race.proficiency_choices.len(), 1);
        let proficiency = &race.proficiency_choices[0];
        assert_eq!(proficiency.id, "half-elf_proficiency_1");
        assert_eq!(proficiency.choice_type, ChoiceType::Skill);
        assert_eq!(proficiency.choose_count, 2);
        assert_eq!(
            proficiency.option_set,
            OptionSet::ExplicitOptions {
                options: vec![
                    ChoiceOption::item("skill-arcana", "Skill: Arcana"),
                    ChoiceOption::item("skill-history", "Skill: History"),
                ]
            }
        );

        let language = race.language_choice.as_ref().unwrap();
        assert_eq!(language.id, "half-elf_language_1");
        assert_eq!(language.choice_type, ChoiceType::Language);
        assert_eq!(language.option_set, OptionSet::category("languages"));
    }

    #[tokio::test]
    async fn get_race_is_idempotent() {
        let mut catalog = MockCatalogPort::new();
        catalog.expect_get_race().returning(|_| Ok(half_elf()));

        let options = use_case(catalog);
        let first = serde_json::to_string(&options.get_race("half-elf").await.unwrap()).unwrap();
        let second = serde_json::to_string(&options.get_race("half-elf").await.unwrap()).unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn blank_id_is_rejected_without_catalog_call() {
        let catalog = MockCatalogPort::new();

        let err = use_case(catalog).get_race("  ").await.unwrap_err();
        assert!(matches!(
            err,
            CharacterOptionsError::Domain(DomainError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn unknown_race_is_not_found() {
        let mut catalog = MockCatalogPort::new();
        catalog
            .expect_get_race()
            .returning(|id| Err(CatalogError::not_found("race", id)));

        let err = use_case(catalog).get_race("dragonborn").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn get_class_expands_nested_equipment_categories() {
        let mut catalog = MockCatalogPort::new();
        catalog
            .expect_get_class()
            .withf(|id| id == "fighter")
            .returning(|_| Ok(fighter()));
        catalog
            .expect_get_equipment_category()
            .withf(|id| id == "martial-weapons")
            .times(1)
            .returning(|id| {
                Ok(EquipmentCategory {
                    index: id.to_string(),
                    name: "Martial Weapons".into(),
                    equipment: vec![
                        reference("longsword", "Longsword"),
                        reference("warhammer", "Warhammer"),
                    ],
                })
            });

        let class = use_case(catalog).get_class("fighter").await.unwrap();

        assert_eq!(class.hit_die, 10);
        assert!(!class.is_spellcaster());
        assert_eq!(class.proficiency_choices[0].id, "fighter_proficiency_1");
        assert_eq!(class.equipment_choices.len(), 1);

        let choice = &class.equipment_choices[0];
        assert_eq!(choice.id, "fighter_equipment_1");
        let OptionSet::ExplicitOptions { options } = &choice.option_set else {
            panic!("expected explicit options");
        };
        let ChoiceOption::ItemBundle { items } = &options[0] else {
            panic!("expected bundle");
        };
        let BundleItem::ChoiceItem { choice: nested } = &items[1] else {
            panic!("expected nested choice");
        };
        assert_eq!(nested.id, "nested_martial-weapons_a_martial_weapon");
        assert_eq!(
            nested.option_set,
            OptionSet::ExplicitOptions {
                options: vec![
                    ChoiceOption::item("longsword", "Longsword"),
                    ChoiceOption::item("warhammer", "Warhammer"),
                ]
            }
        );
    }

    #[tokio::test]
    async fn get_class_survives_failed_expansion() {
        let mut catalog = MockCatalogPort::new();
        catalog.expect_get_class().returning(|_| Ok(fighter()));
        catalog
            .expect_get_equipment_category()
            .returning(|_| Err(CatalogError::Unavailable));

        let class = use_case(catalog).get_class("fighter").await.unwrap();

        let OptionSet::ExplicitOptions { options } = &class.equipment_choices[0].option_set else {
            panic!("expected explicit options");
        };
        let ChoiceOption::ItemBundle { items } = &options[0] else {
            panic!("expected bundle");
        };
        let BundleItem::ChoiceItem { choice: nested } = &items[1] else {
            panic!("expected nested choice");
        };
        assert_eq!(
            nested.option_set,
            OptionSet::ExplicitOptions {
                options: vec![ChoiceOption::item(
                    "choose-martial-weapons",
                    "Choose from martial-weapons"
                )]
            }
        );
    }

    #[tokio::test]
    async fn get_background_keeps_category_references() {
        let mut catalog = MockCatalogPort::new();
        catalog
            .expect_get_background()
            .returning(|_| Ok(acolyte()));

        let background = use_case(catalog).get_background("acolyte").await.unwrap();

        assert_eq!(background.skill_proficiencies[0].item_id, "skill-insight");
        assert_eq!(background.starting_equipment[0].quantity, 1);
        assert_eq!(
            background.language_choice.as_ref().map(|c| c.choose_count),
            Some(2)
        );
        assert_eq!(
            background.equipment_choices[0].option_set,
            OptionSet::category("holy-symbols")
        );
    }

    #[tokio::test]
    async fn list_races_preserves_catalog_order() {
        let mut catalog = MockCatalogPort::new();
        catalog.expect_list_races().returning(|| {
            Ok(vec![
                reference("half-elf", "Half-Elf"),
                reference("dwarf", "Dwarf"),
            ])
        });
        catalog.expect_get_race().returning(|id| {
            let mut race = half_elf();
            race.index = id.to_string();
            Ok(race)
        });

        let races = use_case(catalog).list_races().await.unwrap();
        let ids: Vec<&str> = races.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["half-elf", "dwarf"]);
        assert_eq!(races[1].proficiency_choices[0].id, "dwarf_proficiency_1");
    }

    #[tokio::test]
    async fn list_classes_fails_when_any_class_fails() {
        let mut catalog = MockCatalogPort::new();
        catalog.expect_list_classes().returning(|| {
            Ok(vec![reference("fighter", "Fighter"), reference("wizard", "Wizard")])
        });
        catalog.expect_get_class().returning(|id| {
            if id == "wizard" {
                Err(CatalogError::request_failed("timeout"))
            } else {
                Ok(fighter())
            }
        });
        catalog
            .expect_get_equipment_category()
            .returning(|id| {
                Ok(EquipmentCategory {
                    index: id.to_string(),
                    name: id.to_string(),
                    equipment: vec![reference("longsword", "Longsword")],
                })
            });

        let err = use_case(catalog).list_classes().await.unwrap_err();
        let CharacterOptionsError::Load(load) = &err else {
            panic!("expected load error, got {err:?}");
        };
        assert_eq!(load.reference_id(), Some("wizard"));
        assert!(matches!(load, LoadError::Fetch { .. }));
    }

    #[tokio::test]
    async fn list_backgrounds_propagates_list_failure() {
        let mut catalog = MockCatalogPort::new();
        catalog
            .expect_list_backgrounds()
            .returning(|| Err(CatalogError::Unavailable));

        let err = use_case(catalog).list_backgrounds().await.unwrap_err();
        assert!(matches!(
            err,
            CharacterOptionsError::Catalog(CatalogError::Unavailable)
        ));
    }
}
