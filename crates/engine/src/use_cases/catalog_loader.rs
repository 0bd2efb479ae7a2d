//! Concurrent fan-out/fan-in catalog loading.
//!
//! One task per reference, results returned in reference order whatever the
//! completion order. Loading is all-or-nothing: the first failure aborts the
//! tasks still in flight and is returned as the only error.

use std::future::Future;

use tokio::task::JoinSet;

use crate::infrastructure::ports::{CatalogError, CatalogReference};

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Failed to load {reference_id}: {source}")]
    Fetch {
        reference_id: String,
        #[source]
        source: CatalogError,
    },

    /// A worker panicked or was cancelled before reporting.
    #[error("Catalog load task failed: {message}")]
    TaskFailed { message: String },
}

impl LoadError {
    /// Id of the reference whose fetch failed, when known.
    pub fn reference_id(&self) -> Option<&str> {
        match self {
            Self::Fetch { reference_id, .. } => Some(reference_id),
            Self::TaskFailed { .. } => None,
        }
    }
}

/// Fetch every reference concurrently with `fetch`.
pub async fn load_all<T, F, Fut>(refs: &[CatalogReference], fetch: F) -> Result<Vec<T>, LoadError>
where
    T: Send + 'static,
    F: Fn(String) -> Fut,
    Fut: Future<Output = Result<T, CatalogError>> + Send + 'static,
{
    let mut tasks = JoinSet::new();
    for (index, reference) in refs.iter().enumerate() {
        let id = reference.index.clone();
        let fut = fetch(id.clone());
        tasks.spawn(async move { (index, id, fut.await) });
    }

    let mut slots: Vec<Option<T>> = std::iter::repeat_with(|| None).take(refs.len()).collect();

    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((index, _, Ok(value))) => slots[index] = Some(value),
            Ok((_, reference_id, Err(source))) => {
                tasks.abort_all();
                tracing::warn!(reference_id = %reference_id, error = %source, "Catalog load failed");
                return Err(LoadError::Fetch {
                    reference_id,
                    source,
                });
            }
            Err(e) => {
                tasks.abort_all();
                return Err(LoadError::TaskFailed {
                    message: e.to_string(),
                });
            }
        }
    }

    slots
        .into_iter()
        .collect::<Option<Vec<T>>>()
        .ok_or_else(|| LoadError::TaskFailed {
            message: "a worker finished without a result".to_string(),
        })
}
