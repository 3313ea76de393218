use std::sync::Arc;

use chrono::{Months, Utc};
use payroll_api::app::{build_app, services::AppServices};
use payroll_compensation::{Department, Employee};
use payroll_core::{DepartmentId, EmployeeId, Money};
use reqwest::StatusCode;
use serde_json::json;

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn(services: AppServices) -> Self {
        // Build app (same router as prod), but bind to an ephemeral port.
        let app = build_app(Arc::new(services));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn add_department(services: &AppServices, code: &str) -> DepartmentId {
    let department = Department::new(DepartmentId::new(), format!("Dept {code}"), code).unwrap();
    let id = department.id_typed();
    services.directory().insert_department(department).unwrap();
    id
}

fn add_employee(
    services: &AppServices,
    department_id: DepartmentId,
    name: &str,
    salary_major: i64,
    years_ago: u32,
) -> EmployeeId {
    let joined = Utc::now()
        .date_naive()
        .checked_sub_months(Months::new(years_ago * 12))
        .unwrap();
    let employee = Employee::new(
        EmployeeId::new(),
        name,
        format!("{}@example.com", name.to_lowercase()),
        Money::from_major(salary_major).unwrap(),
        joined,
        department_id,
    )
    .unwrap();
    let id = employee.id_typed();
    services.directory().insert_employee(employee).unwrap();
    id
}

/// One department (`D1`) with the two-employee example roster.
fn seeded() -> (AppServices, DepartmentId) {
    let services = AppServices::default();
    let d1 = add_department(&services, "D1");
    add_employee(&services, d1, "Ada", 100_000, 6);
    add_employee(&services, d1, "Bob", 190_000, 2);
    (services, d1)
}

async fn post_json(
    client: &reqwest::Client,
    url: String,
    body: serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let res = client.post(url).json(&body).send().await.unwrap();
    let status = res.status();
    (status, res.json().await.unwrap())
}

async fn get_json(client: &reqwest::Client, url: String) -> (StatusCode, serde_json::Value) {
    let res = client.get(url).send().await.unwrap();
    let status = res.status();
    (status, res.json().await.unwrap())
}

#[tokio::test]
async fn health_is_ok() {
    let srv = TestServer::spawn(AppServices::default()).await;

    let res = reqwest::get(format!("{}/health", srv.base_url)).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn adjustment_lifecycle_apply_history_stats() {
    let (services, d1) = seeded();
    let srv = TestServer::spawn(services).await;
    let client = reqwest::Client::new();

    // Apply
    let (status, body) = post_json(
        &client,
        format!("{}/adjustments", srv.base_url),
        json!({ "department_id": d1.to_string(), "performance_score": 95 }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["employees_affected"], 2);
    assert_eq!(body["preview"], false);

    let adjustments = body["adjustments"].as_array().unwrap();
    let by_old = |old: &str| {
        adjustments
            .iter()
            .find(|a| a["old_salary"] == old)
            .unwrap()
            .clone()
    };
    let ada = by_old("100000.00");
    assert_eq!(ada["new_salary"], "120000.00");
    assert_eq!(ada["percent_applied"], 20);
    assert_eq!(ada["tier"], "excellent");
    assert_eq!(ada["tenure_bonus"], true);
    let bob = by_old("190000.00");
    assert_eq!(bob["new_salary"], "200000.00");
    assert_eq!(bob["percent_applied"], 15);
    assert_eq!(bob["capped"], true);

    // Directory reflects the new salaries
    let (status, body) = get_json(
        &client,
        format!("{}/departments/{}/employees", srv.base_url, d1),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["employee_count"], 2);
    let salaries: Vec<&str> = body["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["salary"].as_str().unwrap())
        .collect();
    assert_eq!(salaries, vec!["120000.00", "200000.00"]);

    // History
    let (status, body) = get_json(&client, format!("{}/adjustments", srv.base_url)).await;
    assert_eq!(status, StatusCode::OK);
    let items = body["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["department_id"], d1.to_string());
    assert_eq!(items[0]["performance_score"], 95);
    assert_eq!(items[0]["employees_affected"], 2);

    // Stats
    let (status, body) = get_json(&client, format!("{}/adjustments/stats", srv.base_url)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_adjustments"], 1);
    assert_eq!(body["total_employees_affected"], 2);
    assert_eq!(body["excellent_adjustments"], 1);
    assert_eq!(body["average_performance_score"], 95.0);
}

#[tokio::test]
async fn preview_changes_nothing() {
    let (services, d1) = seeded();
    let srv = TestServer::spawn(services).await;
    let client = reqwest::Client::new();

    let (status, body) = post_json(
        &client,
        format!("{}/adjustments/preview", srv.base_url),
        json!({ "department_id": d1.to_string(), "performance_score": 80 }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["preview"], true);
    assert_eq!(body["employees_affected"], 2);

    let (_, body) = get_json(&client, format!("{}/adjustments", srv.base_url)).await;
    assert!(body["items"].as_array().unwrap().is_empty());

    let (_, body) = get_json(
        &client,
        format!("{}/departments/{}/employees", srv.base_url, d1),
    )
    .await;
    assert_eq!(body["items"][0]["salary"], "100000.00");
}

#[tokio::test]
async fn history_can_be_filtered_by_department() {
    let (services, d1) = seeded();
    let other = add_department(&services, "D2");
    add_employee(&services, other, "Cy", 50_000, 1);
    let srv = TestServer::spawn(services).await;
    let client = reqwest::Client::new();

    for dept in [d1, other] {
        let (status, _) = post_json(
            &client,
            format!("{}/adjustments", srv.base_url),
            json!({ "department_id": dept.to_string(), "performance_score": 75 }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, body) = get_json(
        &client,
        format!("{}/adjustments?department_id={}", srv.base_url, other),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let items = body["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["department_id"], other.to_string());
}

#[tokio::test]
async fn errors_map_to_status_codes() {
    let (services, d1) = seeded();
    let srv = TestServer::spawn(services).await;
    let client = reqwest::Client::new();
    let url = format!("{}/adjustments", srv.base_url);

    // Out-of-range score
    let (status, body) = post_json(
        &client,
        url.clone(),
        json!({ "department_id": d1.to_string(), "performance_score": 101 }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");

    // Unknown department
    let (status, body) = post_json(
        &client,
        url.clone(),
        json!({ "department_id": DepartmentId::new().to_string(), "performance_score": 80 }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");

    // Fractional score
    let (status, body) = post_json(
        &client,
        url.clone(),
        json!({ "department_id": d1.to_string(), "performance_score": 95.5 }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");

    // Malformed id
    let (status, body) = post_json(
        &client,
        url.clone(),
        json!({ "department_id": "not-a-uuid", "performance_score": 80 }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_id");

    // Missing field
    let (status, body) = post_json(&client, url.clone(), json!({ "performance_score": 80 })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");

    // Duplicate submission
    let request = json!({ "department_id": d1.to_string(), "performance_score": 80 });
    let (status, _) = post_json(&client, url.clone(), request.clone()).await;
    assert_eq!(status, StatusCode::OK);
    let (status, body) = post_json(&client, url.clone(), request).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "duplicate_adjustment");

    // Unknown department on the read side
    let (status, _) = get_json(
        &client,
        format!("{}/departments/{}/employees", srv.base_url, DepartmentId::new()),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn empty_department_records_nothing() {
    let services = AppServices::default();
    let empty = add_department(&services, "EMPTY");
    let srv = TestServer::spawn(services).await;
    let client = reqwest::Client::new();

    let (status, body) = post_json(
        &client,
        format!("{}/adjustments", srv.base_url),
        json!({ "department_id": empty.to_string(), "performance_score": 90 }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["employees_affected"], 0);

    let (_, body) = get_json(&client, format!("{}/adjustments/stats", srv.base_url)).await;
    assert_eq!(body["total_adjustments"], 0);
    assert!(body["average_performance_score"].is_null());
}
