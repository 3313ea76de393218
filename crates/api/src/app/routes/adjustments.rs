use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Query, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};

use payroll_core::DepartmentId;
use payroll_infra::{AdjustmentLedger, adjustment_stats};

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", post(apply_adjustment).get(list_adjustments))
        .route("/preview", post(preview_adjustment))
        .route("/stats", get(get_stats))
}

fn parse_request(
    body: Result<Json<dto::AdjustmentRequest>, JsonRejection>,
) -> Result<(DepartmentId, i64), axum::response::Response> {
    let Json(body) = body.map_err(|e| {
        errors::json_error(StatusCode::BAD_REQUEST, "validation_error", e.body_text())
    })?;
    let department_id = errors::parse_id(&body.department_id, "department")?;
    Ok((department_id, body.performance_score))
}

pub async fn apply_adjustment(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<dto::AdjustmentRequest>, JsonRejection>,
) -> axum::response::Response {
    let (department_id, score) = match parse_request(body) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.executor().apply_adjustment(department_id, score) {
        Ok(result) => (
            StatusCode::OK,
            Json(dto::AdjustmentResponse::from_result(&result, false)),
        )
            .into_response(),
        Err(e) => errors::adjustment_error_to_response(e),
    }
}

pub async fn preview_adjustment(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<dto::AdjustmentRequest>, JsonRejection>,
) -> axum::response::Response {
    let (department_id, score) = match parse_request(body) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.executor().preview(department_id, score) {
        Ok(result) => Json(dto::AdjustmentResponse::from_result(&result, true)).into_response(),
        Err(e) => errors::adjustment_error_to_response(e),
    }
}

pub async fn list_adjustments(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<dto::HistoryQuery>,
) -> axum::response::Response {
    let events = match query.department_id.as_deref() {
        Some(raw) => {
            let department_id: DepartmentId = match errors::parse_id(raw, "department") {
                Ok(v) => v,
                Err(resp) => return resp,
            };
            services.ledger().list_by_department(department_id)
        }
        None => services.ledger().list_all(),
    };

    match events {
        Ok(events) => Json(dto::AdjustmentHistoryResponse::from_events(&events)).into_response(),
        Err(e) => errors::ledger_error_to_response(e),
    }
}

pub async fn get_stats(Extension(services): Extension<Arc<AppServices>>) -> axum::response::Response {
    match adjustment_stats(services.ledger()) {
        Ok(stats) => Json::<dto::AdjustmentStatsResponse>(stats).into_response(),
        Err(e) => errors::ledger_error_to_response(e),
    }
}
