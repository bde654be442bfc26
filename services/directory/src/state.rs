use crate::infra::backend::{AdminRepo, Backend, DivisionRepo, EmployeeRepo, TokenRepo};
use crate::infra::storage::LocalImageStore;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub backend: Backend,
    pub images: LocalImageStore,
    /// Lifetime of newly issued tokens, `None` for no expiry.
    pub token_ttl: Option<chrono::Duration>,
}

impl AppState {
    pub fn admin_repo(&self) -> AdminRepo {
        self.backend.admin_repo()
    }

    pub fn token_repo(&self) -> TokenRepo {
        self.backend.token_repo()
    }

    pub fn division_repo(&self) -> DivisionRepo {
        self.backend.division_repo()
    }

    pub fn employee_repo(&self) -> EmployeeRepo {
        self.backend.employee_repo()
    }

    pub fn image_store(&self) -> LocalImageStore {
        self.images.clone()
    }
}
