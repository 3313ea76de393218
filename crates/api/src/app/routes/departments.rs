use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    response::IntoResponse,
    routing::get,
};

use payroll_core::DepartmentId;
use payroll_infra::{DirectoryError, EmployeeDirectory};

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_departments))
        .route("/:id/employees", get(list_employees))
}

pub async fn list_departments(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.directory().departments() {
        Ok(departments) => {
            let items: Vec<dto::DepartmentResponse> = departments.iter().map(Into::into).collect();
            Json(serde_json::json!({ "items": items })).into_response()
        }
        Err(e) => errors::directory_error_to_response(e),
    }
}

pub async fn list_employees(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let department_id: DepartmentId = match errors::parse_id(&id, "department") {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    let directory = services.directory();
    let department = match directory.find_department(department_id) {
        Ok(Some(d)) => d,
        Ok(None) => {
            return errors::directory_error_to_response(DirectoryError::UnknownDepartment(
                department_id,
            ));
        }
        Err(e) => return errors::directory_error_to_response(e),
    };

    match directory.list_by_department(department_id) {
        Ok(employees) => {
            let mut items: Vec<dto::EmployeeResponse> = employees.iter().map(Into::into).collect();
            items.sort_by(|a, b| a.name.cmp(&b.name));
            Json(dto::DepartmentEmployeesResponse {
                department: (&department).into(),
                employee_count: items.len(),
                items,
            })
            .into_response()
        }
        Err(e) => errors::directory_error_to_response(e),
    }
}
