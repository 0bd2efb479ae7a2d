//! Category expansion.
//!
//! Resolves an equipment category id into the concrete items it contains, so
//! players pick from items instead of from an opaque category. Expansion is
//! the one fallible remote step of normalization; a failure degrades to a
//! single placeholder option and never aborts the surrounding conversion.

use std::sync::Arc;

use futures_util::future::{BoxFuture, FutureExt};

use charforge_domain::{BundleItem, Choice, ChoiceOption, OptionSet};

use crate::infrastructure::ports::{CatalogError, CatalogPort};

/// Why a category could not be expanded.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExpandFailure {
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error("category has no members")]
    Empty,
}

/// A failed expansion together with the placeholder to use instead.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Failed to expand equipment category {category_id}: {reason}")]
pub struct ExpandError {
    category_id: String,
    choose_count: i32,
    #[source]
    reason: ExpandFailure,
}

impl ExpandError {
    pub fn category_id(&self) -> &str {
        &self.category_id
    }

    pub fn reason(&self) -> &ExpandFailure {
        &self.reason
    }

    /// Single-option stand-in the UI can still render: `choose-{category}`.
    pub fn placeholder(&self) -> Vec<ChoiceOption> {
        placeholder_options(&self.category_id, self.choose_count)
    }

    pub fn into_placeholder(self) -> Vec<ChoiceOption> {
        self.placeholder()
    }
}

fn placeholder_options(category_id: &str, choose_count: i32) -> Vec<ChoiceOption> {
    let item_id = format!("choose-{category_id}");
    let name = format!("Choose from {category_id}");
    if choose_count > 1 {
        vec![ChoiceOption::counted(item_id, name, choose_count)]
    } else {
        vec![ChoiceOption::item(item_id, name)]
    }
}

/// Expands category references through the catalog.
#[derive(Clone)]
pub struct CategoryExpander {
    catalog: Arc<dyn CatalogPort>,
}

impl CategoryExpander {
    pub fn new(catalog: Arc<dyn CatalogPort>) -> Self {
        Self { catalog }
    }

    /// One `ItemReference` per member of `category_id`.
    ///
    /// On failure the returned error carries the placeholder; callers log it
    /// and carry on with [`ExpandError::into_placeholder`].
    pub async fn expand(
        &self,
        category_id: &str,
        choose_count: i32,
    ) -> Result<Vec<ChoiceOption>, ExpandError> {
        let failed = |reason: ExpandFailure| ExpandError {
            category_id: category_id.to_string(),
            choose_count,
            reason,
        };

        let category = self
            .catalog
            .get_equipment_category(category_id)
            .await
            .map_err(|e| failed(e.into()))?;

        if category.equipment.is_empty() {
            return Err(failed(ExpandFailure::Empty));
        }

        Ok(category
            .equipment
            .into_iter()
            .map(|item| ChoiceOption::item(item.index, item.name))
            .collect())
    }

    /// Replace every `CategoryReference` in `choice`, at any depth, with the
    /// category's members as explicit options.
    ///
    /// Excluded ids are filtered out. Failures are logged and replaced by the
    /// placeholder, so this never fails.
    pub fn expand_choice(&self, choice: Choice) -> BoxFuture<'_, Choice> {
        async move {
            let Choice {
                id,
                description,
                choice_type,
                choose_count,
                option_set,
            } = choice;

            let options = match option_set {
                OptionSet::CategoryReference {
                    category_id,
                    exclude_ids,
                } => {
                    self.expand_category(&id, &category_id, &exclude_ids, choose_count)
                        .await
                }
                OptionSet::ExplicitOptions { options } => {
                    let mut expanded = Vec::with_capacity(options.len());
                    for option in options {
                        expanded.push(self.expand_option(option).await);
                    }
                    expanded
                }
            };

            Choice {
                id,
                description,
                choice_type,
                choose_count,
                option_set: OptionSet::ExplicitOptions { options },
            }
        }
        .boxed()
    }

    async fn expand_category(
        &self,
        choice_id: &str,
        category_id: &str,
        exclude_ids: &[String],
        choose_count: i32,
    ) -> Vec<ChoiceOption> {
        match self.expand(category_id, choose_count).await {
            Ok(options) => {
                let remaining: Vec<ChoiceOption> = options
                    .into_iter()
                    .filter(|o| !o.item_id().is_some_and(|id| exclude_ids.iter().any(|x| x == id)))
                    .collect();
                if remaining.is_empty() {
                    tracing::warn!(
                        choice_id,
                        category_id,
                        "Every category member is excluded, using placeholder"
                    );
                    return placeholder_options(category_id, choose_count);
                }
                remaining
            }
            Err(e) => {
                tracing::warn!(
                    choice_id,
                    category_id = %e.category_id(),
                    error = %e,
                    "Category expansion failed, using placeholder"
                );
                e.into_placeholder()
            }
        }
    }

    async fn expand_option(&self, option: ChoiceOption) -> ChoiceOption {
        match option {
            ChoiceOption::NestedChoice { choice } => {
                ChoiceOption::nested(self.expand_choice(*choice).await)
            }
            ChoiceOption::ItemBundle { items } => {
                let mut expanded = Vec::with_capacity(items.len());
                for item in items {
                    expanded.push(match item {
                        BundleItem::ChoiceItem { choice } => BundleItem::ChoiceItem {
                            choice: Box::new(self.expand_choice(*choice).await),
                        },
                        concrete @ BundleItem::ConcreteItem(_) => concrete,
                    });
                }
                ChoiceOption::ItemBundle { items: expanded }
            }
            other @ (ChoiceOption::ItemReference(_) | ChoiceOption::CountedItemReference(_)) => {
                other
            }
        }
    }
}
