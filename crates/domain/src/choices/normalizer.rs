//! Source option trees -> canonical choice trees.
//!
//! The walk is synchronous and purely structural: each source node maps to at
//! most one canonical node, built bottom-up, and nothing is shared between
//! branches. Malformed input never fails the walk. Unrecognized nodes are
//! dropped and bundles left empty by that are dropped with them.

use crate::value_objects::positive_count;

use super::canonical::{
    BundleItem, Choice, ChoiceOption, ChoiceType, CountedItemReference, OptionSet,
};
use super::classifier::{CategoryClassifier, DEFAULT_CATEGORY_ID};
use super::ids::{nested_choice_id, slug, top_level_choice_id};
use super::source::{SourceChoice, SourceOption, SourceOptionSet};

/// Category label used in nested ids when the nested choice lists its options
/// explicitly instead of drawing from a category.
const EXPLICIT_NESTED_LABEL: &str = "options";

/// Converts catalog option trees into canonical [`Choice`] trees.
#[derive(Debug, Clone)]
pub struct ChoiceNormalizer {
    classifier: CategoryClassifier,
    default_category: String,
}

impl Default for ChoiceNormalizer {
    fn default() -> Self {
        Self::new(CategoryClassifier::default(), DEFAULT_CATEGORY_ID)
    }
}

impl ChoiceNormalizer {
    pub fn new(classifier: CategoryClassifier, default_category: impl Into<String>) -> Self {
        Self {
            classifier,
            default_category: default_category.into(),
        }
    }

    /// Normalize a list of top-level choices of one type.
    ///
    /// Ids are positional (`{base_id}_{field}_{n}`), so a choice dropped as
    /// unusable does not shift the ids of its siblings.
    pub fn normalize_choices(
        &self,
        choices: &[SourceChoice],
        base_id: &str,
        field: &str,
        choice_type: ChoiceType,
    ) -> Vec<Choice> {
        choices
            .iter()
            .enumerate()
            .filter_map(|(index, choice)| {
                self.normalize_choice(choice, base_id, field, index, choice_type)
            })
            .collect()
    }

    /// Normalize one top-level choice.
    ///
    /// A choice naming a category and listing no options becomes a
    /// `CategoryReference`; otherwise every listed option is normalized into
    /// `ExplicitOptions`. Returns `None` when nothing selectable survives.
    pub fn normalize_choice(
        &self,
        choice: &SourceChoice,
        base_id: &str,
        field: &str,
        index: usize,
        choice_type: ChoiceType,
    ) -> Option<Choice> {
        let option_set = match (&choice.from, named_category(&choice.from)) {
            (_, Some(category_id)) => OptionSet::category(category_id),
            (SourceOptionSet::Options(options), None) => {
                let options = self.normalize_options(options, choice_type);
                if options.is_empty() {
                    return None;
                }
                OptionSet::ExplicitOptions { options }
            }
            // A category-style set whose id is blank
            (_, None) => OptionSet::category(self.category_for(&choice.description)),
        };

        Some(Choice {
            id: top_level_choice_id(base_id, field, index),
            description: choice.description.clone(),
            choice_type,
            choose_count: positive_count(choice.choose),
            option_set,
        })
    }

    /// Normalize a single option. `None` means the option is dropped.
    pub fn normalize_option(
        &self,
        option: &SourceOption,
        choice_type: ChoiceType,
    ) -> Option<ChoiceOption> {
        match option {
            SourceOption::Reference { item_id, name } => {
                let item_id = slug(item_id, '-');
                if item_id.is_empty() {
                    return None;
                }
                Some(ChoiceOption::item(item_id, name.clone()))
            }
            SourceOption::CountedReference { .. } => self
                .concrete_item(option)
                .map(ChoiceOption::CountedItemReference),
            SourceOption::Bundle { items } => {
                ChoiceOption::bundle(self.normalize_bundle_items(items, choice_type))
            }
            SourceOption::NestedChoice(nested) => Some(ChoiceOption::nested(
                self.synthesize_nested_choice(nested, choice_type),
            )),
            SourceOption::Unsupported { .. } => None,
        }
    }

    fn normalize_options(&self, options: &[SourceOption], choice_type: ChoiceType) -> Vec<ChoiceOption> {
        options
            .iter()
            .filter_map(|option| self.normalize_option(option, choice_type))
            .collect()
    }

    fn normalize_bundle_items(&self, items: &[SourceOption], choice_type: ChoiceType) -> Vec<BundleItem> {
        let mut out = Vec::with_capacity(items.len());
        for item in items {
            match item {
                SourceOption::Reference { .. } | SourceOption::CountedReference { .. } => {
                    if let Some(concrete) = self.concrete_item(item) {
                        out.push(BundleItem::ConcreteItem(concrete));
                    }
                }
                SourceOption::NestedChoice(nested) => out.push(BundleItem::ChoiceItem {
                    choice: Box::new(self.synthesize_nested_choice(nested, choice_type)),
                }),
                // A bundle inside a bundle grants everything in it, same as flat.
                SourceOption::Bundle { items } => {
                    out.extend(self.normalize_bundle_items(items, choice_type))
                }
                SourceOption::Unsupported { .. } => {}
            }
        }
        out
    }

    /// A reference of either kind as a counted item; plain references count one.
    fn concrete_item(&self, option: &SourceOption) -> Option<CountedItemReference> {
        let (item_id, name, count) = match option {
            SourceOption::Reference { item_id, name } => (item_id, name, 1),
            SourceOption::CountedReference {
                item_id,
                name,
                count,
            } => (item_id, name, *count),
            _ => return None,
        };
        let item_id = slug(item_id, '-');
        if item_id.is_empty() {
            return None;
        }
        Some(CountedItemReference {
            item_id,
            name: name.clone(),
            quantity: positive_count(count),
        })
    }

    /// Build the canonical choice for a choice that appeared as an option.
    ///
    /// Resolution order for its option set: a category recognized from the
    /// description, then a category the source names directly, then the
    /// source's explicit options, then the default category.
    ///
    /// The explicit-options step departs from the plain rule that an
    /// unclassified nested choice points at the default category. A source
    /// that already lists concrete options keeps them, under the `options`
    /// id label (`nested_options_…`), rather than being widened to a
    /// `CategoryReference` on the default category. The default category is
    /// used only when nothing else resolves.
    fn synthesize_nested_choice(&self, source: &SourceChoice, choice_type: ChoiceType) -> Choice {
        let classified = self.classifier.classify(&source.description).map(str::to_string);
        let named = named_category(&source.from);

        let (label, option_set) = match classified.or(named) {
            Some(category_id) => (category_id.clone(), OptionSet::category(category_id)),
            None => {
                let options = match &source.from {
                    SourceOptionSet::Options(options) => self.normalize_options(options, choice_type),
                    _ => Vec::new(),
                };
                if options.is_empty() {
                    let category_id = self.default_category.clone();
                    (category_id.clone(), OptionSet::category(category_id))
                } else {
                    (
                        EXPLICIT_NESTED_LABEL.to_string(),
                        OptionSet::ExplicitOptions { options },
                    )
                }
            }
        };

        Choice {
            id: nested_choice_id(&label, &source.description),
            description: source.description.clone(),
            choice_type,
            choose_count: positive_count(source.choose),
            option_set,
        }
    }

    fn category_for(&self, description: &str) -> String {
        self.classifier
            .classify(description)
            .map(str::to_string)
            .unwrap_or_else(|| self.default_category.clone())
    }
}

/// Category id a source option set names directly, slugged; `None` if blank.
fn named_category(from: &SourceOptionSet) -> Option<String> {
    from.category_id()
        .map(|id| slug(id, '-'))
        .filter(|id| !id.is_empty())
}
