//! Inferring the canonical type of a catalog proficiency choice.
//!
//! The catalog tags every proficiency pick as just "proficiencies", whether
//! it offers skills, tools, or weapons. The item ids and description are the
//! only signal.

use super::canonical::ChoiceType;
use super::source::SourceChoice;

const TOOL_MARKERS: &[&str] = &[
    "instrument",
    "tool",
    "supplies",
    "kit",
    "gaming",
    "utensils",
];
const ARMOR_MARKERS: &[&str] = &["armor", "shield"];
const WEAPON_MARKERS: &[&str] = &["weapon"];

impl ChoiceType {
    /// Best-guess type for a proficiency choice.
    ///
    /// All-`skill-*` option ids mean [`ChoiceType::Skill`]; otherwise tools,
    /// then armor, then weapons are looked for in the description and ids.
    /// Anything unrecognized stays a skill choice.
    pub fn for_proficiency_choice(choice: &SourceChoice) -> Self {
        let ids = choice.reference_ids();
        if !ids.is_empty() && ids.iter().all(|id| id.starts_with("skill-")) {
            return Self::Skill;
        }

        let haystack = std::iter::once(choice.description.as_str())
            .chain(ids.iter().copied())
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase();
        let mentions = |markers: &[&str]| markers.iter().any(|m| haystack.contains(m));

        if mentions(TOOL_MARKERS) {
            Self::Tool
        } else if mentions(ARMOR_MARKERS) {
            Self::ArmorProficiency
        } else if mentions(WEAPON_MARKERS) {
            Self::WeaponProficiency
        } else {
            Self::Skill
        }
    }
}
