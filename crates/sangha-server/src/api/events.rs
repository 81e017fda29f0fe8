use crate::auth::Principal;
use crate::error::Result;
use crate::models::{CreateEvent, Designation, UpdateEvent};
use crate::state::AppState;
use axum::{extract::State, Json};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

const EVENT_ROLES: [Designation; 2] = [Designation::President, Designation::Secretary];

/// Public events listing, ordered by date.
pub async fn list(State(state): State<AppState>) -> Result<Json<Value>> {
    let events = state.event_service.list_all().await?;
    Ok(Json(json!({ "success": true, "data": events })))
}

pub async fn create(
    State(state): State<AppState>,
    principal: Principal,
    Json(input): Json<CreateEvent>,
) -> Result<Json<Value>> {
    principal.authorize(&state, &EVENT_ROLES).await?;

    let event = state.event_service.create(input).await?;
    Ok(Json(json!({ "success": true, "data": event })))
}

pub async fn update(
    State(state): State<AppState>,
    principal: Principal,
    Json(input): Json<UpdateEvent>,
) -> Result<Json<Value>> {
    principal.authorize(&state, &EVENT_ROLES).await?;

    let event = state.event_service.update(input).await?;
    Ok(Json(json!({ "success": true, "data": event })))
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
    principal.authorize(&state, &EVENT_ROLES).await?;

    state.event_service.delete(input.id).await?;
    Ok(Json(json!({ "success": true, "message": "Deleted" })))
}
