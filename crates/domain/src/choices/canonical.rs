//! Canonical choice tree.
//!
//! Every player decision in the system is expressed with these types, however
//! the rules catalog happened to describe it. The serialized form is what gets
//! persisted and sent to clients, so field names and variant tags are a stable
//! schema: rename nothing here without a migration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;

/// What kind of thing a choice grants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChoiceType {
    Equipment,
    Skill,
    Tool,
    Language,
    WeaponProficiency,
    ArmorProficiency,
    Spell,
    Feat,
}

impl ChoiceType {
    /// Every choice type, in wire order.
    pub const ALL: [ChoiceType; 8] = [
        Self::Equipment,
        Self::Skill,
        Self::Tool,
        Self::Language,
        Self::WeaponProficiency,
        Self::ArmorProficiency,
        Self::Spell,
        Self::Feat,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Equipment => "equipment",
            Self::Skill => "skill",
            Self::Tool => "tool",
            Self::Language => "language",
            Self::WeaponProficiency => "weapon-proficiency",
            Self::ArmorProficiency => "armor-proficiency",
            Self::Spell => "spell",
            Self::Feat => "feat",
        }
    }
}

impl fmt::Display for ChoiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChoiceType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == wanted)
            .ok_or_else(|| DomainError::parse(format!("Unknown choice type: {}", s)))
    }
}

/// A normalized player decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    pub id: String,
    pub description: String,
    #[serde(rename = "type")]
    pub choice_type: ChoiceType,
    pub choose_count: i32,
    pub option_set: OptionSet,
}

impl Choice {
    /// Ids of this choice and every choice nested beneath it, depth-first.
    pub fn ids(&self) -> Vec<&str> {
        let mut ids = Vec::new();
        self.collect_ids(&mut ids);
        ids
    }

    fn collect_ids<'a>(&'a self, ids: &mut Vec<&'a str>) {
        ids.push(self.id.as_str());
        if let OptionSet::ExplicitOptions { options } = &self.option_set {
            for option in options {
                match option {
                    ChoiceOption::NestedChoice { choice } => choice.collect_ids(ids),
                    ChoiceOption::ItemBundle { items } => {
                        for item in items {
                            if let BundleItem::ChoiceItem { choice } = item {
                                choice.collect_ids(ids);
                            }
                        }
                    }
                    ChoiceOption::ItemReference(_) | ChoiceOption::CountedItemReference(_) => {}
                }
            }
        }
    }
}

/// Where a choice's options come from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OptionSet {
    /// The options are listed in full.
    ExplicitOptions { options: Vec<ChoiceOption> },
    /// Any member of a named category, minus the excluded ids.
    CategoryReference {
        category_id: String,
        #[serde(default)]
        exclude_ids: Vec<String>,
    },
}

impl OptionSet {
    pub fn category(category_id: impl Into<String>) -> Self {
        Self::CategoryReference {
            category_id: category_id.into(),
            exclude_ids: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemReference {
    pub item_id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountedItemReference {
    pub item_id: String,
    pub name: String,
    pub quantity: i32,
}

/// One selectable option of a choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChoiceOption {
    ItemReference(ItemReference),
    CountedItemReference(CountedItemReference),
    /// Several items granted together. Never empty; build with [`ChoiceOption::bundle`].
    ItemBundle { items: Vec<BundleItem> },
    NestedChoice { choice: Box<Choice> },
}

impl ChoiceOption {
    pub fn item(item_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self::ItemReference(ItemReference {
            item_id: item_id.into(),
            name: name.into(),
        })
    }

    pub fn counted(item_id: impl Into<String>, name: impl Into<String>, quantity: i32) -> Self {
        Self::CountedItemReference(CountedItemReference {
            item_id: item_id.into(),
            name: name.into(),
            quantity,
        })
    }

    /// Build a bundle, or `None` if there is nothing in it.
    pub fn bundle(items: Vec<BundleItem>) -> Option<Self> {
        if items.is_empty() {
            None
        } else {
            Some(Self::ItemBundle { items })
        }
    }

    pub fn nested(choice: Choice) -> Self {
        Self::NestedChoice {
            choice: Box::new(choice),
        }
    }

    /// The concrete item id this option stands for, if it is a single item.
    pub fn item_id(&self) -> Option<&str> {
        match self {
            Self::ItemReference(item) => Some(&item.item_id),
            Self::CountedItemReference(item) => Some(&item.item_id),
            Self::ItemBundle { .. } | Self::NestedChoice { .. } => None,
        }
    }
}

/// One entry of an [`ChoiceOption::ItemBundle`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BundleItem {
    ConcreteItem(CountedItemReference),
    ChoiceItem { choice: Box<Choice> },
}
