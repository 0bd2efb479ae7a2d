//! Race aggregate.

use serde::{Deserialize, Serialize};

use crate::choices::{Choice, ItemReference};

/// A fixed or selectable bonus to one ability score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityBonus {
    /// Ability score id, e.g. `dex`.
    pub ability_id: String,
    pub bonus: i32,
}

/// "Pick `choose` of these ability bonuses" (e.g. half-elf: two +1s).
///
/// Not a [`Choice`]: ability increases are not one of the canonical choice
/// types, and the bonus amount has to travel with each option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityBonusChoice {
    pub choose: i32,
    pub options: Vec<AbilityBonus>,
}

/// A playable race with its normalized choices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RaceData {
    pub id: String,
    pub name: String,
    pub speed: i32,
    pub size: String,
    pub ability_bonuses: Vec<AbilityBonus>,
    pub ability_bonus_choice: Option<AbilityBonusChoice>,
    pub starting_proficiencies: Vec<ItemReference>,
    pub languages: Vec<ItemReference>,
    pub traits: Vec<ItemReference>,
    pub subraces: Vec<ItemReference>,
    pub proficiency_choices: Vec<Choice>,
    pub language_choice: Option<Choice>,
}

impl RaceData {
    /// Every top-level choice a player makes for this race.
    pub fn choices(&self) -> impl Iterator<Item = &Choice> {
        self.proficiency_choices
            .iter()
            .chain(self.language_choice.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::choices::{ChoiceType, OptionSet};

    #[test]
    fn choices_include_language_choice() {
        let language = Choice {
            id: "human_language_1".into(),
            description: "one extra language".into(),
            choice_type: ChoiceType::Language,
            choose_count: 1,
            option_set: OptionSet::category("languages"),
        };
        let race = RaceData {
            id: "human".into(),
            name: "Human".into(),
            speed: 30,
            size: "Medium".into(),
            ability_bonuses: vec![],
            ability_bonus_choice: None,
            starting_proficiencies: vec![],
            languages: vec![],
            traits: vec![],
            subraces: vec![],
            proficiency_choices: vec![],
            language_choice: Some(language),
        };

        let ids: Vec<&str> = race.choices().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["human_language_1"]);
    }
}
