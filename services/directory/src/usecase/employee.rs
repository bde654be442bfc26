use anyhow::anyhow;
use bytes::Bytes;
use chrono::Utc;
use tracing::{info, warn};

use staffdesk_domain::filter::Filter;
use staffdesk_domain::id::{DivisionId, EmployeeId};
use staffdesk_domain::pagination::{Page, PageRequest};

use crate::domain::image::{self, ImageFormat};
use crate::domain::repository::{DivisionRepository, EmployeeRepository, ImageStore};
use crate::domain::types::{
    EMPLOYEE_IMAGE_CATEGORY, Employee, EmployeeChanges, EmployeeForm, NAME_MAX_CHARS,
    NewEmployee, PHONE_MAX_CHARS, POSITION_MAX_CHARS,
};
use crate::error::{DirectoryError, ValidationErrors};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    /// Every field required.
    Create,
    /// Absent keys are skipped, present keys must still be valid.
    Update,
}

struct Photo {
    bytes: Bytes,
    format: ImageFormat,
}

/// Form fields that passed validation. `None` means "not supplied".
struct CheckedForm {
    name: Option<String>,
    phone: Option<String>,
    division_id: Option<DivisionId>,
    position: Option<String>,
    photo: Option<Photo>,
}

fn check_text(
    errors: &mut ValidationErrors,
    field: &'static str,
    label: &str,
    raw: Option<String>,
    max_chars: usize,
    mode: Mode,
) -> Option<String> {
    let Some(raw) = raw else {
        if mode == Mode::Create {
            errors.add(field, format!("{label} is required"));
        }
        return None;
    };
    let value = raw.trim();
    if value.is_empty() {
        errors.add(field, format!("{label} is required"));
        return None;
    }
    if value.chars().count() > max_chars {
        errors.add(
            field,
            format!("{label} may not be greater than {max_chars} characters"),
        );
        return None;
    }
    Some(value.to_owned())
}

/// Validate every field and report all failures at once.
async fn check_form<D: DivisionRepository>(
    divisions: &D,
    form: EmployeeForm,
    mode: Mode,
) -> Result<CheckedForm, DirectoryError> {
    let mut errors = ValidationErrors::default();

    let name = check_text(&mut errors, "name", "Name", form.name, NAME_MAX_CHARS, mode);
    let phone = check_text(
        &mut errors,
        "phone",
        "Phone number",
        form.phone,
        PHONE_MAX_CHARS,
        mode,
    );
    let position = check_text(
        &mut errors,
        "position",
        "Position",
        form.position,
        POSITION_MAX_CHARS,
        mode,
    );

    let division_id = match form.division.as_deref().map(str::trim) {
        None if mode == Mode::Update => None,
        None | Some("") => {
            errors.add("division", "Division must be selected");
            None
        }
        Some(raw) => {
            let known = match raw.parse::<DivisionId>() {
                Ok(id) => divisions.exists(id).await?.then_some(id),
                Err(_) => None,
            };
            if known.is_none() {
                errors.add("division", "Division not found");
            }
            known
        }
    };

    let photo = match form.image {
        None => {
            if mode == Mode::Create {
                errors.add("image", "Photo is required");
            }
            None
        }
        Some(upload) => match image::inspect(&upload.bytes) {
            Ok(format) => Some(Photo {
                bytes: upload.bytes,
                format,
            }),
            Err(rejection) => {
                errors.add("image", rejection.to_string());
                None
            }
        },
    };

    errors.into_result()?;
    Ok(CheckedForm {
        name,
        phone,
        division_id,
        position,
        photo,
    })
}

/// Remove an image whose owner is gone or replaced. Failures only leave an orphan file.
async fn discard_image<I: ImageStore>(images: &I, reference: &str, employee_id: EmployeeId) {
    if let Err(e) = images.delete(reference).await {
        warn!(
            error = %e,
            employee_id = %employee_id,
            reference,
            "failed to delete stored image"
        );
    }
}

// ── ListEmployees ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct EmployeeFilters {
    pub name: Filter,
    pub division_id: Filter,
}

pub struct ListEmployeesUseCase<E: EmployeeRepository> {
    pub employees: E,
}

impl<E: EmployeeRepository> ListEmployeesUseCase<E> {
    pub async fn execute(
        &self,
        filters: &EmployeeFilters,
        page: PageRequest,
    ) -> Result<Page<Employee>, DirectoryError> {
        let page = page.clamped();
        // A present division filter is an exact match, so a blank or malformed id
        // can only match nothing.
        let division_id = match &filters.division_id {
            Filter::Absent => None,
            Filter::Empty => return Ok(Page::empty(page)),
            Filter::Value(raw) => match raw.parse::<DivisionId>() {
                Ok(id) => Some(id),
                Err(_) => return Ok(Page::empty(page)),
            },
        };
        self.employees
            .list(filters.name.criterion(), division_id, page)
            .await
    }
}

// ── CreateEmployee ───────────────────────────────────────────────────────────

pub struct CreateEmployeeUseCase<E: EmployeeRepository, D: DivisionRepository, I: ImageStore> {
    pub employees: E,
    pub divisions: D,
    pub images: I,
}

impl<E: EmployeeRepository, D: DivisionRepository, I: ImageStore> CreateEmployeeUseCase<E, D, I> {
    pub async fn execute(&self, form: EmployeeForm) -> Result<EmployeeId, DirectoryError> {
        let checked = check_form(&self.divisions, form, Mode::Create).await?;
        let (Some(name), Some(phone), Some(division_id), Some(position), Some(photo)) = (
            checked.name,
            checked.phone,
            checked.division_id,
            checked.position,
            checked.photo,
        ) else {
            return Err(anyhow!("validated employee form is incomplete").into());
        };

        let id = EmployeeId::generate();
        let reference = self
            .images
            .store(&photo.bytes, photo.format, EMPLOYEE_IMAGE_CATEGORY)
            .await?;
        let employee = NewEmployee {
            id,
            image: Some(reference.clone()),
            name,
            phone,
            division_id,
            position,
            created_at: Utc::now(),
        };
        if let Err(e) = self.employees.create(&employee).await {
            discard_image(&self.images, &reference, id).await;
            return Err(e);
        }
        info!(employee_id = %id, division_id = %division_id, "employee created");
        Ok(id)
    }
}

// ── UpdateEmployee ───────────────────────────────────────────────────────────

pub struct UpdateEmployeeUseCase<E: EmployeeRepository, D: DivisionRepository, I: ImageStore> {
    pub employees: E,
    pub divisions: D,
    pub images: I,
}

impl<E: EmployeeRepository, D: DivisionRepository, I: ImageStore> UpdateEmployeeUseCase<E, D, I> {
    /// Replace supplied fields. A new photo is stored before the row is written and
    /// the previous one is removed only after the write succeeds.
    pub async fn execute(&self, id: EmployeeId, form: EmployeeForm) -> Result<(), DirectoryError> {
        let existing = self
            .employees
            .find_by_id(id)
            .await?
            .ok_or(DirectoryError::EmployeeNotFound)?;
        let checked = check_form(&self.divisions, form, Mode::Update).await?;

        let new_image = match &checked.photo {
            Some(photo) => Some(
                self.images
                    .store(&photo.bytes, photo.format, EMPLOYEE_IMAGE_CATEGORY)
                    .await?,
            ),
            None => None,
        };
        let changes = EmployeeChanges {
            name: checked.name,
            phone: checked.phone,
            division_id: checked.division_id,
            position: checked.position,
            image: new_image.clone(),
        };
        if changes.is_empty() {
            return Ok(());
        }

        let written = self.employees.update(id, &changes).await;
        if !matches!(written, Ok(true)) {
            if let Some(reference) = &new_image {
                discard_image(&self.images, reference, id).await;
            }
            return match written {
                Err(e) => Err(e),
                _ => Err(DirectoryError::EmployeeNotFound),
            };
        }

        if new_image.is_some() {
            if let Some(old) = existing.image.as_deref() {
                discard_image(&self.images, old, id).await;
            }
        }
        info!(
            employee_id = %id,
            image_replaced = new_image.is_some(),
            "employee updated"
        );
        Ok(())
    }
}

// ── DeleteEmployee ───────────────────────────────────────────────────────────

pub struct DeleteEmployeeUseCase<E: EmployeeRepository, I: ImageStore> {
    pub employees: E,
    pub images: I,
}

impl<E: EmployeeRepository, I: ImageStore> DeleteEmployeeUseCase<E, I> {
    pub async fn execute(&self, id: EmployeeId) -> Result<(), DirectoryError> {
        let existing = self
            .employees
            .find_by_id(id)
            .await?
            .ok_or(DirectoryError::EmployeeNotFound)?;
        if !self.employees.delete(id).await? {
            return Err(DirectoryError::EmployeeNotFound);
        }
        if let Some(reference) = existing.image.as_deref() {
            discard_image(&self.images, reference, id).await;
        }
        info!(employee_id = %id, "employee deleted");
        Ok(())
    }
}
