//! Source-side option trees, as decoded from the rules catalog.
//!
//! These mirror the catalog's loose shapes closely enough that decoding is a
//! straight mapping. They are read-only inputs to [`ChoiceNormalizer`] and are
//! discarded once the canonical tree has been built.
//!
//! Counts are kept as `i64` here; the catalog does not bound them, so clamping
//! happens during normalization.
//!
//! [`ChoiceNormalizer`]: super::ChoiceNormalizer

/// A player decision as the catalog describes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceChoice {
    /// Free-text description, e.g. "(a) a martial weapon and a shield or (b) two martial weapons".
    pub description: String,
    /// How many options the player picks. Unbounded in the source data.
    pub choose: i64,
    /// Where the options come from.
    pub from: SourceOptionSet,
}

impl SourceChoice {
    pub fn new(description: impl Into<String>, choose: i64, from: SourceOptionSet) -> Self {
        Self {
            description: description.into(),
            choose,
            from,
        }
    }

    /// Item ids of every plain or counted reference in this choice, depth-first.
    pub fn reference_ids(&self) -> Vec<&str> {
        let mut ids = Vec::new();
        if let SourceOptionSet::Options(options) = &self.from {
            for option in options {
                option.collect_reference_ids(&mut ids);
            }
        }
        ids
    }

    /// Number of nodes anywhere in this choice the normalizer will drop as
    /// unrecognized.
    pub fn unsupported_count(&self) -> usize {
        match &self.from {
            SourceOptionSet::Options(options) => {
                options.iter().map(SourceOption::unsupported_count).sum()
            }
            _ => 0,
        }
    }
}

/// The pool a source choice draws from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceOptionSet {
    /// An explicit list of options.
    Options(Vec<SourceOption>),
    /// "Any item from this equipment category".
    EquipmentCategory { category_id: String, name: String },
    /// "Any entry of this catalog resource", identified by its URL.
    ResourceList { url: String },
}

impl SourceOptionSet {
    /// The category id this set names directly, if any.
    ///
    /// Resource lists carry the id as the last URL segment
    /// (`/api/equipment-categories/holy-symbols` -> `holy-symbols`).
    pub fn category_id(&self) -> Option<&str> {
        let id = match self {
            Self::Options(_) => return None,
            Self::EquipmentCategory { category_id, .. } => category_id.as_str(),
            Self::ResourceList { url } => url.trim_end_matches('/').rsplit('/').next()?,
        };
        let id = id.trim();
        if id.is_empty() {
            None
        } else {
            Some(id)
        }
    }
}

/// One raw way to satisfy part of a choice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceOption {
    /// A single named item.
    Reference { item_id: String, name: String },
    /// A named item with an explicit quantity.
    CountedReference {
        item_id: String,
        name: String,
        count: i64,
    },
    /// Items granted together, e.g. "a shield and a martial weapon".
    Bundle { items: Vec<SourceOption> },
    /// A choice appearing as an option inside another choice or bundle.
    NestedChoice(Box<SourceChoice>),
    /// Anything the decoder did not recognize, including `null` entries.
    Unsupported { kind: String },
}

impl SourceOption {
    pub fn reference(item_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self::Reference {
            item_id: item_id.into(),
            name: name.into(),
        }
    }

    pub fn counted(item_id: impl Into<String>, name: impl Into<String>, count: i64) -> Self {
        Self::CountedReference {
            item_id: item_id.into(),
            name: name.into(),
            count,
        }
    }

    pub fn nested(choice: SourceChoice) -> Self {
        Self::NestedChoice(Box::new(choice))
    }

    pub fn unsupported(kind: impl Into<String>) -> Self {
        Self::Unsupported { kind: kind.into() }
    }

    fn collect_reference_ids<'a>(&'a self, ids: &mut Vec<&'a str>) {
        match self {
            Self::Reference { item_id, .. } | Self::CountedReference { item_id, .. } => {
                ids.push(item_id.as_str())
            }
            Self::Bundle { items } => {
                for item in items {
                    item.collect_reference_ids(ids);
                }
            }
            Self::NestedChoice(choice) => ids.extend(choice.reference_ids()),
            Self::Unsupported { .. } => {}
        }
    }

    fn unsupported_count(&self) -> usize {
        match self {
            Self::Reference { .. } | Self::CountedReference { .. } => 0,
            Self::Bundle { items } => items.iter().map(Self::unsupported_count).sum(),
            Self::NestedChoice(choice) => choice.unsupported_count(),
            Self::Unsupported { .. } => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_id_from_equipment_category() {
        let set = SourceOptionSet::EquipmentCategory {
            category_id: "martial-weapons".into(),
            name: "Martial Weapons".into(),
        };
        assert_eq!(set.category_id(), Some("martial-weapons"));
    }

    #[test]
    fn category_id_from_resource_list_url() {
        let set = SourceOptionSet::ResourceList {
            url: "/api/equipment-categories/holy-symbols/".into(),
        };
        assert_eq!(set.category_id(), Some("holy-symbols"));
    }

    #[test]
    fn blank_category_id_is_none() {
        let set = SourceOptionSet::EquipmentCategory {
            category_id: "  ".into(),
            name: String::new(),
        };
        assert_eq!(set.category_id(), None);
        assert_eq!(SourceOptionSet::Options(vec![]).category_id(), None);
    }

    #[test]
    fn reference_ids_walk_bundles_and_nested_choices() {
        let choice = SourceChoice::new(
            "pick",
            1,
            SourceOptionSet::Options(vec![
                SourceOption::reference("skill-history", "Skill: History"),
                SourceOption::Bundle {
                    items: vec![
                        SourceOption::counted("dagger", "Dagger", 2),
                        SourceOption::nested(SourceChoice::new(
                            "inner",
                            1,
                            SourceOptionSet::Options(vec![SourceOption::reference(
                                "lute", "Lute",
                            )]),
                        )),
                    ],
                },
            ]),
        );

        assert_eq!(choice.reference_ids(), vec!["skill-history", "dagger", "lute"]);
    }

    #[test]
    fn unsupported_nodes_are_counted_at_any_depth() {
        let choice = SourceChoice::new(
            "pick",
            1,
            SourceOptionSet::Options(vec![
                SourceOption::unsupported("null"),
                SourceOption::Bundle {
                    items: vec![SourceOption::unsupported("ideal")],
                },
            ]),
        );
        assert_eq!(choice.unsupported_count(), 2);
    }
}
