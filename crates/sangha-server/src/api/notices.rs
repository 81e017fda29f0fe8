use crate::auth::Principal;
use crate::error::Result;
use crate::models::{CreateNotice, Designation, UpdateNotice};
use crate::state::AppState;
use axum::{extract::State, Json};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

const NOTICE_ROLES: [Designation; 2] = [Designation::President, Designation::Secretary];

/// Public notice board, newest first.
pub async fn list(State(state): State<AppState>) -> Result<Json<Value>> {
    let notices = state.notice_service.list_all().await?;
    Ok(Json(json!({ "success": true, "data": notices })))
}

pub async fn create(
    State(state): State<AppState>,
    principal: Principal,
    Json(input): Json<CreateNotice>,
) -> Result<Json<Value>> {
    let actor = principal.authorize(&state, &NOTICE_ROLES).await?;

    let notice = state
        .notice_service
        .create(input, &actor.display_name, &actor.designation)
        .await?;

    Ok(Json(json!({ "success": true, "data": notice })))
}

pub async fn update(
    State(state): State<AppState>,
    principal: Principal,
    Json(input): Json<UpdateNotice>,
) -> Result<Json<Value>> {
    principal.authorize(&state, &NOTICE_ROLES).await?;

    let notice = state.notice_service.update(input).await?;
    Ok(Json(json!({ "success": true, "data": notice })))
}

#[derive(Debug, Deserialize)]
pub struct DeleteRequest {
    pub id: Uuid,
}

pub async fn remove(
    State(state): State<AppState>,
    principal: Principal,
    Json(input): Json<DeleteRequest>,
) -> Result<Json<Value>> {
    principal.authorize(&state, &NOTICE_ROLES).await?;

    state.notice_service.delete(input.id).await?;
    Ok(Json(json!({ "success": true, "message": "Deleted" })))
}
