use crate::auth::Principal;
use crate::error::{AppError, Result};
use crate::models::{JoinApplication, UpdateProfile};
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};

/// Public application intake. The new record always starts Pending with the
/// plain Member designation; an admin notification goes out after the write.
pub async fn join(
    State(state): State<AppState>,
    Json(input): Json<JoinApplication>,
) -> Result<(StatusCode, Json<Value>)> {
    let member = state.member_service.create_application(input).await?;
    state.mailer.send_admin_notification(&member);

    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "data": member })),
    ))
}

pub async fn me(State(state): State<AppState>, principal: Principal) -> Result<Json<Value>> {
    let Principal::Member(id) = principal else {
        return Err(AppError::Forbidden);
    };

    let member = state.member_service.get_by_id(id).await?;
    Ok(Json(json!({ "success": true, "data": member })))
}

pub async fn update_profile(
    State(state): State<AppState>,
    principal: Principal,
    Json(input): Json<UpdateProfile>,
) -> Result<Json<Value>> {
    let Principal::Member(id) = principal else {
        return Err(AppError::Forbidden);
    };

    let member = state.member_service.update_profile(id, input).await?;
    Ok(Json(json!({ "success": true, "data": member })))
}
