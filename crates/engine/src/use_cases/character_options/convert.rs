//! Catalog records -> character option aggregates.
//!
//! Pure apart from logging. Equipment expansion is async and happens in the
//! use case after conversion.

use charforge_domain::value_objects::{clamp_i32, positive_count};
use charforge_domain::{
    AbilityBonus, AbilityBonusChoice, BackgroundData, Choice, ChoiceNormalizer, ChoiceType, ClassData,
    CountedItemReference, ItemReference, RaceData, SourceChoice,
};

use crate::infrastructure::ports::{
    AbilityBonusRecord, BackgroundRecord, CatalogReference, ClassRecord, EquipmentGrant,
    RaceRecord,
};

pub(super) const PROFICIENCY_FIELD: &str = "proficiency";
pub(super) const LANGUAGE_FIELD: &str = "language";
pub(super) const EQUIPMENT_FIELD: &str = "equipment";

pub(super) fn race_data(normalizer: &ChoiceNormalizer, record: RaceRecord) -> RaceData {
    let proficiency_choices = record
        .starting_proficiency_options
        .iter()
        .enumerate()
        .filter_map(|(index, choice)| {
            log_dropped(&record.index, PROFICIENCY_FIELD, choice);
            normalizer.normalize_choice(
                choice,
                &record.index,
                PROFICIENCY_FIELD,
                index,
                ChoiceType::for_proficiency_choice(choice),
            )
        })
        .collect();

    let language_choice = language_choice(normalizer, &record.index, record.language_options.as_ref());

    RaceData {
        speed: clamp_i32(record.speed),
        size: record.size,
        ability_bonuses: record.ability_bonuses.into_iter().map(ability_bonus).collect(),
        ability_bonus_choice: record
            .ability_bonus_options
            .filter(|o| !o.options.is_empty())
            .map(|o| AbilityBonusChoice {
                choose: positive_count(o.choose),
                options: o.options.into_iter().map(ability_bonus).collect(),
            }),
        starting_proficiencies: item_references(record.starting_proficiencies),
        languages: item_references(record.languages),
        traits: item_references(record.traits),
        subraces: item_references(record.subraces),
        proficiency_choices,
        language_choice,
        id: record.index,
        name: record.name,
    }
}

/// Class with proficiency and equipment choices normalized but not expanded.
pub(super) fn class_data(normalizer: &ChoiceNormalizer, record: ClassRecord) -> ClassData {
    let proficiency_choices = record
        .proficiency_choices
        .iter()
        .enumerate()
        .filter_map(|(index, choice)| {
            log_dropped(&record.index, PROFICIENCY_FIELD, choice);
            normalizer.normalize_choice(
                choice,
                &record.index,
                PROFICIENCY_FIELD,
                index,
                ChoiceType::for_proficiency_choice(choice),
            )
        })
        .collect();

    let equipment_choices = equipment_choices(
        normalizer,
        &record.index,
        &record.starting_equipment_options,
    );

    ClassData {
        hit_die: clamp_i32(record.hit_die),
        saving_throws: item_references(record.saving_throws),
        proficiencies: item_references(record.proficiencies),
        starting_equipment: counted_references(record.starting_equipment),
        subclasses: item_references(record.subclasses),
        spellcasting_ability: record.spellcasting_ability.map(item_reference),
        proficiency_choices,
        equipment_choices,
        id: record.index,
        name: record.name,
    }
}

pub(super) fn background_data(
    normalizer: &ChoiceNormalizer,
    record: BackgroundRecord,
) -> BackgroundData {
    let language_choice = language_choice(normalizer, &record.index, record.language_options.as_ref());
    let equipment_choices = equipment_choices(
        normalizer,
        &record.index,
        &record.starting_equipment_options,
    );

    BackgroundData {
        skill_proficiencies: item_references(record.starting_proficiencies),
        starting_equipment: counted_references(record.starting_equipment),
        language_choice,
        equipment_choices,
        id: record.index,
        name: record.name,
    }
}

fn language_choice(
    normalizer: &ChoiceNormalizer,
    base_id: &str,
    choice: Option<&SourceChoice>,
) -> Option<Choice> {
    let choice = choice?;
    log_dropped(base_id, LANGUAGE_FIELD, choice);
    normalizer.normalize_choice(choice, base_id, LANGUAGE_FIELD, 0, ChoiceType::Language)
}

fn equipment_choices(
    normalizer: &ChoiceNormalizer,
    base_id: &str,
    choices: &[SourceChoice],
) -> Vec<Choice> {
    for choice in choices {
        log_dropped(base_id, EQUIPMENT_FIELD, choice);
    }
    normalizer.normalize_choices(choices, base_id, EQUIPMENT_FIELD, ChoiceType::Equipment)
}

fn log_dropped(base_id: &str, field: &str, choice: &SourceChoice) {
    let dropped = choice.unsupported_count();
    if dropped > 0 {
        tracing::debug!(
            base_id,
            field,
            dropped,
            description = %choice.description,
            "Dropped unsupported catalog options"
        );
    }
}

fn ability_bonus(record: AbilityBonusRecord) -> AbilityBonus {
    AbilityBonus {
        ability_id: record.ability.index,
        bonus: clamp_i32(record.bonus),
    }
}

fn item_reference(reference: CatalogReference) -> ItemReference {
    ItemReference {
        item_id: reference.index,
        name: reference.name,
    }
}

fn item_references(references: Vec<CatalogReference>) -> Vec<ItemReference> {
    references.into_iter().map(item_reference).collect()
}

fn counted_references(grants: Vec<EquipmentGrant>) -> Vec<CountedItemReference> {
    grants
        .into_iter()
        .map(|grant| CountedItemReference {
            item_id: grant.equipment.index,
            name: grant.equipment.name,
            quantity: positive_count(grant.quantity),
        })
        .collect()
}
