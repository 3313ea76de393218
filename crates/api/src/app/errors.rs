use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use payroll_infra::{AdjustmentError, DirectoryError, LedgerError};

pub fn adjustment_error_to_response(err: AdjustmentError) -> axum::response::Response {
    let message = err.to_string();
    match err {
        AdjustmentError::Validation(msg) => {
            json_error(StatusCode::BAD_REQUEST, "validation_error", msg)
        }
        AdjustmentError::DepartmentNotFound(_) => {
            json_error(StatusCode::NOT_FOUND, "not_found", message)
        }
        AdjustmentError::ConcurrentModification(_) => {
            json_error(StatusCode::CONFLICT, "conflict", message)
        }
        AdjustmentError::DuplicateAdjustment { applied_at, .. } => (
            StatusCode::CONFLICT,
            axum::Json(json!({
                "error": "duplicate_adjustment",
                "message": message,
                "applied_at": applied_at,
            })),
        )
            .into_response(),
        AdjustmentError::PartialFailure {
            failed_employee,
            inconsistent,
            ..
        } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            axum::Json(json!({
                "error": "partial_failure",
                "message": message,
                "failed_employee": failed_employee,
                "inconsistent": inconsistent,
            })),
        )
            .into_response(),
        AdjustmentError::Cancelled { inconsistent, .. } => (
            StatusCode::SERVICE_UNAVAILABLE,
            axum::Json(json!({
                "error": "cancelled",
                "message": message,
                "inconsistent": inconsistent,
            })),
        )
            .into_response(),
        AdjustmentError::InvariantViolation(msg) => {
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "invariant_violation", msg)
        }
        AdjustmentError::Directory(e) => directory_error_to_response(e),
        AdjustmentError::Ledger(e) => ledger_error_to_response(e),
    }
}

pub fn directory_error_to_response(err: DirectoryError) -> axum::response::Response {
    match err {
        DirectoryError::UnknownDepartment(_) | DirectoryError::NotFound(_) => {
            json_error(StatusCode::NOT_FOUND, "not_found", err.to_string())
        }
        DirectoryError::Invalid(msg) => json_error(StatusCode::BAD_REQUEST, "validation_error", msg),
        DirectoryError::Conflict(msg) => json_error(StatusCode::CONFLICT, "conflict", msg),
        DirectoryError::Unavailable(msg) => {
            json_error(StatusCode::BAD_GATEWAY, "directory_unavailable", msg)
        }
    }
}

pub fn ledger_error_to_response(err: LedgerError) -> axum::response::Response {
    match err {
        LedgerError::Unavailable(msg) => {
            json_error(StatusCode::BAD_GATEWAY, "ledger_unavailable", msg)
        }
        other => json_error(StatusCode::INTERNAL_SERVER_ERROR, "ledger_error", other.to_string()),
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

/// Parse a path/query identifier, answering 400 `invalid_id` on failure.
pub fn parse_id<T: std::str::FromStr>(raw: &str, what: &str) -> Result<T, axum::response::Response> {
    raw.parse().map_err(|_| {
        json_error(
            StatusCode::BAD_REQUEST,
            "invalid_id",
            format!("invalid {what} id"),
        )
    })
}
