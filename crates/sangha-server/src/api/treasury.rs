use crate::auth::Principal;
use crate::error::Result;
use crate::models::{CreateTransaction, Designation};
use crate::services::treasury::summarize;
use crate::state::AppState;
use axum::{extract::State, Json};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

const LEDGER_ROLES: [Designation; 2] = [Designation::Treasurer, Designation::President];

/// Ledger listing with the derived totals recomputed on every read.
pub async fn list(State(state): State<AppState>, principal: Principal) -> Result<Json<Value>> {
    principal.authorize(&state, &LEDGER_ROLES).await?;

    let transactions = state.treasury_service.list_all().await?;
    let summary = summarize(&transactions);

    Ok(Json(json!({
        "success": true,
        "data": {
            "transactions": transactions,
            "summary": summary,
        }
    })))
}

pub async fn create(
    State(state): State<AppState>,
    principal: Principal,
    Json(input): Json<CreateTransaction>,
) -> Result<Json<Value>> {
    let actor = principal.authorize(&state, &LEDGER_ROLES).await?;

    let transaction = state
        .treasury_service
        .create(input, &actor.display_name)
        .await?;

    Ok(Json(json!({ "success": true, "data": transaction })))
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
    principal.authorize(&state, &LEDGER_ROLES).await?;

    state.treasury_service.delete(input.id).await?;
    Ok(Json(json!({ "success": true, "message": "Deleted" })))
}
