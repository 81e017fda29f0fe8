use crate::auth::Principal;
use crate::error::Result;
use crate::models::{InviteMember, MemberStatus, StatusUpdate};
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};

/// Full member listing for the admin dashboard. Carries the same gate as
/// the mutating routes.
pub async fn list_members(
    State(state): State<AppState>,
    principal: Principal,
) -> Result<Json<Value>> {
    principal.authorize(&state, &[]).await?;

    let members = state.member_service.list_all().await?;
    Ok(Json(json!({ "success": true, "data": members })))
}

/// Approve/reject transition. The notification email is dispatched after
/// the status write commits and never blocks or fails the response.
pub async fn update_member_status(
    State(state): State<AppState>,
    principal: Principal,
    Json(input): Json<StatusUpdate>,
) -> Result<Json<Value>> {
    principal.authorize(&state, &[]).await?;

    let target_status = input.status;
    let change = state.member_service.update_status(input).await?;

    if let Some(credentials) = &change.credentials {
        state.mailer.send_approval(&change.member, credentials);
    } else if target_status == MemberStatus::Rejected {
        state.mailer.send_rejection(&change.member);
    }

    Ok(Json(json!({ "success": true, "data": change.member })))
}

/// Direct member creation at Approved, with credentials issued and emailed
/// immediately.
pub async fn invite(
    State(state): State<AppState>,
    principal: Principal,
    Json(input): Json<InviteMember>,
) -> Result<(StatusCode, Json<Value>)> {
    principal.authorize(&state, &[]).await?;

    let (member, credentials) = state.member_service.invite(input).await?;
    state.mailer.send_invitation(&member, &credentials);

    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "data": member })),
    ))
}
