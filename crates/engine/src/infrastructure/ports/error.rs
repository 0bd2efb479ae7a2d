//! Error types for port operations.

/// Rules catalog errors with context for debugging.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    /// Entity not found - includes resource kind and ID for actionable error messages.
    #[error("{resource} not found: {id}")]
    NotFound { resource: &'static str, id: String },

    /// Transport-level failure or a non-success status other than 404.
    #[error("Catalog request failed: {0}")]
    RequestFailed(String),

    /// The catalog answered with a body that could not be decoded.
    #[error("Invalid catalog response: {0}")]
    InvalidResponse(String),

    #[error("Catalog unavailable")]
    Unavailable,
}

impl CatalogError {
    /// Create a NotFound error with resource and ID context.
    pub fn not_found(resource: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            resource,
            id: id.to_string(),
        }
    }

    pub fn request_failed(message: impl ToString) -> Self {
        Self::RequestFailed(message.to_string())
    }

    pub fn invalid_response(message: impl ToString) -> Self {
        Self::InvalidResponse(message.to_string())
    }

    /// Check if this is a NotFound error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
