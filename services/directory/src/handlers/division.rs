use axum::extract::{Query, State};
use serde::{Deserialize, Serialize};

use staffdesk_core::envelope::Envelope;
use staffdesk_domain::filter::Filter;
use staffdesk_domain::id::DivisionId;
use staffdesk_domain::pagination::PageRequest;

use crate::domain::types::Division;
use crate::error::DirectoryError;
use crate::identity::Authenticated;
use crate::state::AppState;
use crate::usecase::division::ListDivisionsUseCase;

#[derive(Debug, Clone, Serialize)]
pub struct DivisionResponse {
    pub id: DivisionId,
    pub name: String,
}

impl From<Division> for DivisionResponse {
    fn from(division: Division) -> Self {
        Self {
            id: division.id,
            name: division.name,
        }
    }
}

// ── GET /api/divisions ───────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct DivisionListQuery {
    pub name: Option<String>,
    pub page: Option<String>,
}

#[derive(Serialize)]
pub struct DivisionsData {
    pub divisions: Vec<DivisionResponse>,
}

pub async fn list_divisions(
    _auth: Authenticated,
    State(state): State<AppState>,
    Query(query): Query<DivisionListQuery>,
) -> Result<Envelope<DivisionsData>, DirectoryError> {
    let usecase = ListDivisionsUseCase {
        repo: state.division_repo(),
    };
    let page = usecase
        .execute(
            &Filter::from_query(query.name),
            PageRequest::from_query(query.page.as_deref()),
        )
        .await?;
    let divisions = page.items.into_iter().map(DivisionResponse::from).collect();
    Ok(
        Envelope::with_data("Divisions retrieved successfully", DivisionsData { divisions })
            .paginated(page.meta),
    )
}
