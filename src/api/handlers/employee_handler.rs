//! Employee handlers.

use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Json, Response},
    routing::{delete, get, post, put},
    Router,
};

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::{
    AssignmentOutcome, CreateEmployee, Employee, EmployeeFilter, EmployeeListing, Skill,
    UpdateEmployee,
};
use crate::errors::AppResult;
use crate::types::{Created, MessageResponse, SwapRequiredResponse};

pub fn employee_read_routes() -> Router<AppState> {
    Router::new()
        .route("/employees", get(list_employees))
        .route("/employee_skills/:id", get(employee_skills))
}

pub fn employee_admin_routes() -> Router<AppState> {
    Router::new()
        .route("/add_employee", post(add_employee))
        .route("/update_employee/:id", put(update_employee))
        .route("/delete_employee/:id", delete(delete_employee))
}

/// List employees with their CE, sector and skills
#[utoipa::path(
    get,
    path = "/employees",
    tag = "Employees",
    params(
        ("ce_id" = Option<i32>, Query, description = "Only employees of this CE"),
        ("search" = Option<String>, Query, description = "Name fragment")
    ),
    responses(
        (status = 200, description = "Employees", body = [EmployeeListing]),
        (status = 401, description = "Missing or invalid token")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_employees(
    State(state): State<AppState>,
    Query(filter): Query<EmployeeFilter>,
) -> AppResult<Json<Vec<EmployeeListing>>> {
    Ok(Json(state.employee_service.list_employees(filter).await?))
}

/// Skills of one employee
#[utoipa::path(
    get,
    path = "/employee_skills/{id}",
    tag = "Employees",
    params(("id" = i32, Path, description = "Employee id")),
    responses(
        (status = 200, description = "Skills", body = [Skill]),
        (status = 404, description = "Employee not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn employee_skills(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Vec<Skill>>> {
    Ok(Json(state.employee_service.employee_skills(id).await?))
}

#[utoipa::path(
    post,
    path = "/add_employee",
    tag = "Employees",
    request_body = CreateEmployee,
    responses(
        (status = 201, description = "Employee created", body = Employee),
        (status = 400, description = "Validation error"),
        (status = 404, description = "CE, sector or skill not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn add_employee(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateEmployee>,
) -> AppResult<Created<Employee>> {
    Ok(Created(state.employee_service.create_employee(payload).await?))
}

/// Change name, position or skills.
///
/// When the target position is held by someone else and `swap` is false,
/// nothing is written and the occupant is returned with `requiresSwap`.
#[utoipa::path(
    put,
    path = "/update_employee/{id}",
    tag = "Employees",
    params(("id" = i32, Path, description = "Employee id")),
    request_body = UpdateEmployee,
    responses(
        (status = 200, description = "Employee updated, or swap confirmation needed", body = Employee),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Employee, CE, sector or skill not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_employee(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<UpdateEmployee>,
) -> AppResult<Response> {
    let response = match state.employee_service.update_employee(id, payload).await? {
        AssignmentOutcome::Updated(employee) => Json(employee).into_response(),
        AssignmentOutcome::SwapRequired { existing } => {
            Json(SwapRequiredResponse::new(existing)).into_response()
        }
    };
    Ok(response)
}

#[utoipa::path(
    delete,
    path = "/delete_employee/{id}",
    tag = "Employees",
    params(("id" = i32, Path, description = "Employee id")),
    responses(
        (status = 200, description = "Employee deleted", body = MessageResponse),
        (status = 404, description = "Employee not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_employee(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<MessageResponse>> {
    state.employee_service.delete_employee(id).await?;
    Ok(Json(MessageResponse::new("Employee deleted")))
}
