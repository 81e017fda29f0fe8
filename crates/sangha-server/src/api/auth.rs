use crate::auth::{admin_cookie, member_cookie, AdminLoginRequest, LoginRequest};
use crate::error::{AppError, Result};
use crate::services::member::ResetOutcome;
use crate::state::AppState;
use axum::{extract::State, Json};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;
use subtle::ConstantTimeEq;

/// Shared-passphrase login establishing an admin session (1 day). The
/// comparison is constant-time, like the hash verification on the member
/// surface.
pub async fn admin_login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(input): Json<AdminLoginRequest>,
) -> Result<(CookieJar, Json<Value>)> {
    let supplied = input.password.as_bytes();
    let expected = state.config.admin_password.as_bytes();
    if !bool::from(supplied.ct_eq(expected)) {
        return Err(AppError::Unauthorized);
    }

    let jar = jar.add(admin_cookie(&state.config.session_secret)?);
    Ok((jar, Json(json!({ "success": true }))))
}

/// Member-portal login establishing a member session (7 days).
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(input): Json<LoginRequest>,
) -> Result<(CookieJar, Json<Value>)> {
    let member = state
        .member_service
        .verify_login(&input.username, &input.password)
        .await?;

    let jar = jar.add(member_cookie(member.id, &state.config.session_secret)?);
    Ok((jar, Json(json!({ "success": true }))))
}

#[derive(Debug, Deserialize)]
pub struct ForgotPasswordRequest {
    pub identifier: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    pub identifier: String,
    pub otp: String,
    pub new_password: String,
}

pub async fn forgot_password(
    State(state): State<AppState>,
    Json(input): Json<ForgotPasswordRequest>,
) -> Result<Json<Value>> {
    match state
        .member_service
        .begin_password_reset(&input.identifier)
        .await?
    {
        ResetOutcome::UnknownIdentifier => {
            // Same response shape as the issued case, behind an artificial
            // delay, so callers cannot enumerate accounts.
            tokio::time::sleep(Duration::from_secs(1)).await;
            Ok(Json(
                json!({ "success": true, "message": "If account exists, OTP sent." }),
            ))
        }
        ResetOutcome::OtpIssued { member, email, otp } => {
            state.mailer.send_otp(email, &member.full_name, &otp);
            Ok(Json(
                json!({ "success": true, "message": "If account exists, OTP sent." }),
            ))
        }
    }
}

pub async fn reset_password(
    State(state): State<AppState>,
    Json(input): Json<ResetPasswordRequest>,
) -> Result<Json<Value>> {
    state
        .member_service
        .complete_password_reset(&input.identifier, &input.otp, &input.new_password)
        .await?;

    Ok(Json(
        json!({ "success": true, "message": "Password updated successfully" }),
    ))
}
