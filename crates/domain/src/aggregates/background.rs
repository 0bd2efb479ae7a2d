use serde::{Deserialize, Serialize};

use crate::choices::{Choice, CountedItemReference, ItemReference};

/// A character background with its normalized choices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackgroundData {
    pub id: String,
    pub name: String,
    pub skill_proficiencies: Vec<ItemReference>,
    pub starting_equipment: Vec<CountedItemReference>,
    pub language_choice: Option<Choice>,
    pub equipment_choices: Vec<Choice>,
}

impl BackgroundData {
    pub fn choices(&self) -> impl Iterator<Item = &Choice> {
        self.language_choice
            .iter()
            .chain(self.equipment_choices.iter())
    }
}
