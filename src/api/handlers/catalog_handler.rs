//! Handlers for skills, CEs, sectors and reservists.

use axum::{
    extract::{Path, State},
    response::Json,
    routing::{delete, get, post, put},
    Router,
};

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::{
    Ce, NameInput, Reservist, ReservistInput, Sector, SectorInput, SectorSkillLink, Skill,
};
use crate::errors::AppResult;
use crate::types::{Created, MessageResponse};

pub fn catalog_read_routes() -> Router<AppState> {
    Router::new()
        .route("/skills", get(list_skills))
        .route("/ces", get(list_ces))
        .route("/sectors", get(list_sectors))
        .route("/sector_required_skills", get(sector_required_skills))
        .route("/reservists", get(list_reservists))
}

pub fn catalog_admin_routes() -> Router<AppState> {
    Router::new()
        .route("/add_skill", post(add_skill))
        .route("/update_skill/:id", put(update_skill))
        .route("/delete_skill/:id", delete(delete_skill))
        .route("/add_ce", post(add_ce))
        .route("/update_ce/:id", put(update_ce))
        .route("/delete_ce/:id", delete(delete_ce))
        .route("/add_sector", post(add_sector))
        .route("/update_sector/:id", put(update_sector))
        .route("/delete_sector/:id", delete(delete_sector))
        .route("/add_reservist", post(add_reservist))
        .route("/update_reservist/:id", put(update_reservist))
        .route("/delete_reservist/:id", delete(delete_reservist))
}

// =============================================================================
// Skills
// =============================================================================

pub async fn list_skills(State(state): State<AppState>) -> AppResult<Json<Vec<Skill>>> {
    Ok(Json(state.catalog_service.list_skills().await?))
}

pub async fn add_skill(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<NameInput>,
) -> AppResult<Created<Skill>> {
    Ok(Created(state.catalog_service.create_skill(payload).await?))
}

pub async fn update_skill(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<NameInput>,
) -> AppResult<Json<Skill>> {
    Ok(Json(state.catalog_service.update_skill(id, payload).await?))
}

pub async fn delete_skill(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<MessageResponse>> {
    state.catalog_service.delete_skill(id).await?;
    Ok(Json(MessageResponse::new("Skill deleted")))
}

// =============================================================================
// CEs
// =============================================================================

pub async fn list_ces(State(state): State<AppState>) -> AppResult<Json<Vec<Ce>>> {
    Ok(Json(state.catalog_service.list_ces().await?))
}

pub async fn add_ce(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<NameInput>,
) -> AppResult<Created<Ce>> {
    Ok(Created(state.catalog_service.create_ce(payload).await?))
}

pub async fn update_ce(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<NameInput>,
) -> AppResult<Json<Ce>> {
    Ok(Json(state.catalog_service.update_ce(id, payload).await?))
}

pub async fn delete_ce(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<MessageResponse>> {
    state.catalog_service.delete_ce(id).await?;
    Ok(Json(MessageResponse::new("CE deleted")))
}

// =============================================================================
// Sectors
// =============================================================================

pub async fn list_sectors(State(state): State<AppState>) -> AppResult<Json<Vec<Sector>>> {
    Ok(Json(state.catalog_service.list_sectors().await?))
}

/// Raw sector to skill link rows
pub async fn sector_required_skills(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<SectorSkillLink>>> {
    Ok(Json(state.catalog_service.sector_required_skills().await?))
}

pub async fn add_sector(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<SectorInput>,
) -> AppResult<Created<Sector>> {
    Ok(Created(state.catalog_service.create_sector(payload).await?))
}

pub async fn update_sector(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<SectorInput>,
) -> AppResult<Json<Sector>> {
    Ok(Json(state.catalog_service.update_sector(id, payload).await?))
}

pub async fn delete_sector(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<MessageResponse>> {
    state.catalog_service.delete_sector(id).await?;
    Ok(Json(MessageResponse::new("Sector deleted")))
}

// =============================================================================
// Reservists
// =============================================================================

pub async fn list_reservists(State(state): State<AppState>) -> AppResult<Json<Vec<Reservist>>> {
    Ok(Json(state.catalog_service.list_reservists().await?))
}

pub async fn add_reservist(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<ReservistInput>,
) -> AppResult<Created<Reservist>> {
    Ok(Created(state.catalog_service.create_reservist(payload).await?))
}

pub async fn update_reservist(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<ReservistInput>,
) -> AppResult<Json<Reservist>> {
    Ok(Json(state.catalog_service.update_reservist(id, payload).await?))
}

pub async fn delete_reservist(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<MessageResponse>> {
    state.catalog_service.delete_reservist(id).await?;
    Ok(Json(MessageResponse::new("Reservist deleted")))
}
