use axum::{
    extract::{
        Multipart, Path, Query, State,
        multipart::{MultipartError, MultipartRejection},
    },
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use staffdesk_core::envelope::Envelope;
use staffdesk_domain::filter::Filter;
use staffdesk_domain::id::EmployeeId;
use staffdesk_domain::pagination::PageRequest;

use crate::domain::repository::ImageStore;
use crate::domain::types::{Employee, EmployeeForm, ImageUpload};
use crate::error::DirectoryError;
use crate::handlers::division::DivisionResponse;
use crate::identity::Authenticated;
use crate::state::AppState;
use crate::usecase::employee::{
    CreateEmployeeUseCase, DeleteEmployeeUseCase, EmployeeFilters, ListEmployeesUseCase,
    UpdateEmployeeUseCase,
};

fn malformed(e: MultipartError) -> DirectoryError {
    DirectoryError::BadRequest(e.body_text())
}

/// Collect the known form fields. Unknown parts such as `_method` are skipped.
///
/// A request that is not multipart at all carries no fields.
async fn read_form(
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<EmployeeForm, DirectoryError> {
    let mut multipart = match multipart {
        Ok(multipart) => multipart,
        Err(MultipartRejection::InvalidBoundary(_)) => return Ok(EmployeeForm::default()),
        Err(e) => return Err(DirectoryError::BadRequest(e.body_text())),
    };
    let mut form = EmployeeForm::default();
    while let Some(field) = multipart.next_field().await.map_err(malformed)? {
        let Some(name) = field.name().map(str::to_owned) else {
            continue;
        };
        match name.as_str() {
            "image" => {
                let bytes = field.bytes().await.map_err(malformed)?;
                // An empty file part is how browsers send "no file chosen".
                if !bytes.is_empty() {
                    form.image = Some(ImageUpload { bytes });
                }
            }
            "name" => form.name = Some(field.text().await.map_err(malformed)?),
            "phone" => form.phone = Some(field.text().await.map_err(malformed)?),
            "division" => form.division = Some(field.text().await.map_err(malformed)?),
            "position" => form.position = Some(field.text().await.map_err(malformed)?),
            _ => {}
        }
    }
    Ok(form)
}

/// Unparseable ids cannot name an existing employee.
fn parse_employee_id(raw: &str) -> Result<EmployeeId, DirectoryError> {
    raw.parse().map_err(|_| DirectoryError::EmployeeNotFound)
}

#[derive(Serialize)]
pub struct EmployeeResponse {
    pub id: EmployeeId,
    /// Public URL of the photo.
    pub image: Option<String>,
    pub name: String,
    pub phone: String,
    pub division: DivisionResponse,
    pub position: String,
}

impl EmployeeResponse {
    fn new(employee: Employee, images: &impl ImageStore) -> Self {
        Self {
            id: employee.id,
            image: images.resolve_url(employee.image.as_deref()),
            name: employee.name,
            phone: employee.phone,
            division: employee.division.into(),
            position: employee.position,
        }
    }
}

// ── GET /api/employees ───────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct EmployeeListQuery {
    pub name: Option<String>,
    pub division_id: Option<String>,
    pub page: Option<String>,
}

#[derive(Serialize)]
pub struct EmployeesData {
    pub employees: Vec<EmployeeResponse>,
}

pub async fn list_employees(
    _auth: Authenticated,
    State(state): State<AppState>,
    Query(query): Query<EmployeeListQuery>,
) -> Result<Envelope<EmployeesData>, DirectoryError> {
    let usecase = ListEmployeesUseCase {
        employees: state.employee_repo(),
    };
    let filters = EmployeeFilters {
        name: Filter::from_query(query.name),
        division_id: Filter::from_query(query.division_id),
    };
    let page = usecase
        .execute(&filters, PageRequest::from_query(query.page.as_deref()))
        .await?;
    let images = state.image_store();
    let employees = page
        .items
        .into_iter()
        .map(|e| EmployeeResponse::new(e, &images))
        .collect();
    Ok(
        Envelope::with_data("Employees retrieved successfully", EmployeesData { employees })
            .paginated(page.meta),
    )
}

// ── POST /api/employees ──────────────────────────────────────────────────────

pub async fn create_employee(
    _auth: Authenticated,
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<(StatusCode, Envelope), DirectoryError> {
    let form = read_form(multipart).await?;
    let usecase = CreateEmployeeUseCase {
        employees: state.employee_repo(),
        divisions: state.division_repo(),
        images: state.image_store(),
    };
    usecase.execute(form).await?;
    Ok((
        StatusCode::CREATED,
        Envelope::ok("Employee created successfully"),
    ))
}

// ── PUT|POST /api/employees/{id} ─────────────────────────────────────────────

pub async fn update_employee(
    _auth: Authenticated,
    State(state): State<AppState>,
    Path(id): Path<String>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Envelope, DirectoryError> {
    let id = parse_employee_id(&id)?;
    let form = read_form(multipart).await?;
    let usecase = UpdateEmployeeUseCase {
        employees: state.employee_repo(),
        divisions: state.division_repo(),
        images: state.image_store(),
    };
    usecase.execute(id, form).await?;
    Ok(Envelope::ok("Employee updated successfully"))
}

// ── DELETE /api/employees/{id} ───────────────────────────────────────────────

pub async fn delete_employee(
    _auth: Authenticated,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Envelope, DirectoryError> {
    let id = parse_employee_id(&id)?;
    let usecase = DeleteEmployeeUseCase {
        employees: state.employee_repo(),
        images: state.image_store(),
    };
    usecase.execute(id).await?;
    Ok(Envelope::ok("Employee deleted successfully"))
}
