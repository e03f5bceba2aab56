//! Planning handlers.

use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::{delete, get, post, put},
    Router,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::{
    AddCePlanning, AddPlanning, BulkReassign, Planning, PlanningView, PopulateYear,
    ShiftTypeChange, UpdateCeStatus, UpdatePlanning,
};
use crate::errors::AppResult;
use crate::types::{CountResponse, Created, MessageResponse};

#[derive(Debug, Deserialize)]
pub struct PlanningQuery {
    pub week: Option<i32>,
    pub year: Option<i32>,
}

/// Outcome of a weekend rebuild
#[derive(Debug, Serialize, ToSchema)]
pub struct ShiftTypeResponse {
    pub message: String,
    pub removed: u64,
    pub created: u64,
}

pub fn planning_read_routes() -> Router<AppState> {
    Router::new().route("/planning", get(get_plannings))
}

pub fn planning_admin_routes() -> Router<AppState> {
    Router::new()
        .route("/add_planning", post(add_planning))
        .route("/update_planning/:id", put(update_planning))
        .route("/delete_planning/:id", delete(delete_planning))
        .route("/add_ce_planning", post(add_ce_planning))
        .route("/update_ce_planning/:id", put(update_ce_planning))
        .route("/delete_ce_planning/:id", delete(delete_ce_planning))
        .route("/populate_yearly_planning", post(populate_yearly_planning))
        .route("/update_planning_shift_type", post(update_planning_shift_type))
        .route("/bulk_update_planning", post(bulk_update_planning))
}

/// Planning rows of one ISO week
#[utoipa::path(
    get,
    path = "/planning",
    tag = "Planning",
    params(
        ("week" = i32, Query, description = "ISO week number"),
        ("year" = Option<i32>, Query, description = "ISO year filter")
    ),
    responses(
        (status = 200, description = "Rows ordered by date then shift", body = [PlanningView]),
        (status = 400, description = "Invalid week parameter"),
        (status = 401, description = "Missing or invalid token")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_plannings(
    State(state): State<AppState>,
    Query(query): Query<PlanningQuery>,
) -> AppResult<Json<Vec<PlanningView>>> {
    let rows = state
        .planning_service
        .get_plannings(query.week, query.year)
        .await?;
    Ok(Json(rows))
}

/// Add an employee planning entry
#[utoipa::path(
    post,
    path = "/add_planning",
    tag = "Planning",
    request_body = AddPlanning,
    responses(
        (status = 201, description = "Entry created", body = Planning),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "Sector or employee not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn add_planning(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<AddPlanning>,
) -> AppResult<Created<Planning>> {
    Ok(Created(state.planning_service.add_planning(payload).await?))
}

/// Set status and optional substitute of an entry
#[utoipa::path(
    put,
    path = "/update_planning/{id}",
    tag = "Planning",
    params(("id" = i32, Path, description = "Planning entry id")),
    request_body = UpdatePlanning,
    responses(
        (status = 200, description = "Entry updated", body = Planning),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Entry or substitute not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_planning(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<UpdatePlanning>,
) -> AppResult<Json<Planning>> {
    Ok(Json(state.planning_service.update_planning(id, payload).await?))
}

/// Delete an employee planning entry
#[utoipa::path(
    delete,
    path = "/delete_planning/{id}",
    tag = "Planning",
    params(("id" = i32, Path, description = "Planning entry id")),
    responses(
        (status = 200, description = "Entry deleted", body = MessageResponse),
        (status = 400, description = "Entry is a CE slot"),
        (status = 404, description = "Entry not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_planning(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<MessageResponse>> {
    state.planning_service.delete_planning(id).await?;
    Ok(Json(MessageResponse::new("Planning entry deleted")))
}

/// Add a CE slot; every employee of the CE gets a row
#[utoipa::path(
    post,
    path = "/add_ce_planning",
    tag = "Planning",
    request_body = AddCePlanning,
    responses(
        (status = 201, description = "CE slot created", body = Planning),
        (status = 400, description = "Validation error"),
        (status = 404, description = "CE not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn add_ce_planning(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<AddCePlanning>,
) -> AppResult<Created<Planning>> {
    Ok(Created(state.planning_service.add_ce_planning(payload).await?))
}

/// Set the status of a CE slot
#[utoipa::path(
    put,
    path = "/update_ce_planning/{id}",
    tag = "Planning",
    params(("id" = i32, Path, description = "CE slot id")),
    request_body = UpdateCeStatus,
    responses(
        (status = 200, description = "Slot updated", body = Planning),
        (status = 400, description = "Not a CE slot"),
        (status = 404, description = "Slot not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_ce_planning(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<UpdateCeStatus>,
) -> AppResult<Json<Planning>> {
    Ok(Json(state.planning_service.update_ce_status(id, payload).await?))
}

/// Delete a CE slot and the employee rows on it
#[utoipa::path(
    delete,
    path = "/delete_ce_planning/{id}",
    tag = "Planning",
    params(("id" = i32, Path, description = "CE slot id")),
    responses(
        (status = 200, description = "Slot deleted", body = CountResponse),
        (status = 400, description = "Not a CE slot"),
        (status = 404, description = "Slot not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_ce_planning(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<CountResponse>> {
    let cascaded = state.planning_service.delete_ce_planning(id).await?;
    Ok(Json(CountResponse::new("CE planning deleted", cascaded)))
}

/// Generate the rotation for every CE over a year
#[utoipa::path(
    post,
    path = "/populate_yearly_planning",
    tag = "Planning",
    request_body = PopulateYear,
    responses(
        (status = 200, description = "Rows created; not idempotent", body = CountResponse),
        (status = 400, description = "Validation error")
    ),
    security(("bearer_auth" = []))
)]
pub async fn populate_yearly_planning(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<PopulateYear>,
) -> AppResult<Json<CountResponse>> {
    let created = state
        .planning_service
        .populate_yearly_planning(payload.year)
        .await?;
    Ok(Json(CountResponse::new(
        format!("Planning populated for {}", payload.year),
        created,
    )))
}

/// Rebuild the weekend of a week for a shift type
#[utoipa::path(
    post,
    path = "/update_planning_shift_type",
    tag = "Planning",
    request_body = ShiftTypeChange,
    responses(
        (status = 200, description = "Weekend rebuilt", body = ShiftTypeResponse),
        (status = 400, description = "Unknown shift type or week"),
        (status = 404, description = "Covering CE not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_planning_shift_type(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<ShiftTypeChange>,
) -> AppResult<Json<ShiftTypeResponse>> {
    let label = payload.shift_type.trim().to_string();
    let week = payload.week;
    let rebuild = state
        .planning_service
        .update_planning_shift_type(payload)
        .await?;

    Ok(Json(ShiftTypeResponse {
        message: format!("Week {} set to {}", week, label),
        removed: rebuild.removed,
        created: rebuild.created,
    }))
}

/// Move an employee's rows from a date onwards to a new CE and sector
#[utoipa::path(
    post,
    path = "/bulk_update_planning",
    tag = "Planning",
    request_body = BulkReassign,
    responses(
        (status = 200, description = "Rows updated", body = CountResponse),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Employee not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn bulk_update_planning(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<BulkReassign>,
) -> AppResult<Json<CountResponse>> {
    let moved = state.planning_service.bulk_update_planning(payload).await?;
    Ok(Json(CountResponse::new("Planning updated", moved)))
}
