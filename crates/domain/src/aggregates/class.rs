//! Class aggregate.

use serde::{Deserialize, Serialize};

use crate::choices::{Choice, CountedItemReference, ItemReference};

/// A playable class with its normalized choices.
///
/// `equipment_choices` are eagerly expanded by the conversion layer: category
/// references are replaced with the category's concrete members, so players
/// pick directly from items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassData {
    pub id: String,
    pub name: String,
    pub hit_die: i32,
    pub saving_throws: Vec<ItemReference>,
    pub proficiencies: Vec<ItemReference>,
    pub starting_equipment: Vec<CountedItemReference>,
    pub subclasses: Vec<ItemReference>,
    pub spellcasting_ability: Option<ItemReference>,
    pub proficiency_choices: Vec<Choice>,
    pub equipment_choices: Vec<Choice>,
}

impl ClassData {
    pub fn is_spellcaster(&self) -> bool {
        self.spellcasting_ability.is_some()
    }

    /// Every top-level choice a player makes for this class.
    pub fn choices(&self) -> impl Iterator<Item = &Choice> {
        self.proficiency_choices
            .iter()
            .chain(self.equipment_choices.iter())
    }
}
