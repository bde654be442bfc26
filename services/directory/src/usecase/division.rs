use staffdesk_domain::filter::Filter;
use staffdesk_domain::pagination::{Page, PageRequest};

use crate::domain::repository::DivisionRepository;
use crate::domain::types::Division;
use crate::error::DirectoryError;

// ── ListDivisions ────────────────────────────────────────────────────────────

pub struct ListDivisionsUseCase<R: DivisionRepository> {
    pub repo: R,
}

impl<R: DivisionRepository> ListDivisionsUseCase<R> {
    /// An absent name skips the clause, an empty one matches every division.
    pub async fn execute(
        &self,
        name: &Filter,
        page: PageRequest,
    ) -> Result<Page<Division>, DirectoryError> {
        self.repo.list(name.criterion(), page.clamped()).await
    }
}
