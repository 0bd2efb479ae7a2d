use charforge_domain::DomainError;

use crate::infrastructure::ports::CatalogError;
use crate::use_cases::catalog_loader::LoadError;

#[derive(Debug, thiserror::Error)]
pub enum CharacterOptionsError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl CharacterOptionsError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Catalog(e) if e.is_not_found())
    }
}
