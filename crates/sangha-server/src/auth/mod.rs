use crate::error::{AppError, Result};
use crate::models::{Designation, Member, MemberStatus};
use crate::state::AppState;
use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const SESSION_COOKIE: &str = "session";

const ADMIN_SESSION_HOURS: i64 = 24;
const MEMBER_SESSION_HOURS: i64 = 24 * 7;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // "admin" or a member id
    pub admin: bool,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    fn new(sub: String, admin: bool, expires_in_hours: i64) -> Self {
        let now = Utc::now();
        Self {
            sub,
            admin,
            exp: (now + Duration::hours(expires_in_hours)).timestamp(),
            iat: now.timestamp(),
        }
    }
}

/// The authenticated caller. Both credential surfaces (shared admin
/// passphrase, per-member login) resolve into this before any
/// authorization decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Principal {
    /// Shared-passphrase administrative session; passes every role gate.
    Admin,
    Member(Uuid),
}

pub fn create_admin_token(secret: &str) -> Result<String> {
    let claims = Claims::new("admin".to_string(), true, ADMIN_SESSION_HOURS);
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;
    Ok(token)
}

pub fn create_member_token(member_id: Uuid, secret: &str) -> Result<String> {
    let claims = Claims::new(member_id.to_string(), false, MEMBER_SESSION_HOURS);
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;
    Ok(token)
}

pub fn verify_token(token: &str, secret: &str) -> Result<Principal> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )?;

    let claims = token_data.claims;
    if claims.admin {
        Ok(Principal::Admin)
    } else {
        let id = Uuid::parse_str(&claims.sub).map_err(|_| AppError::Unauthorized)?;
        Ok(Principal::Member(id))
    }
}

/// Http-only session cookie carrying the signed token. `max_age` is the
/// cookie's lifetime in hours, matching the token expiry.
pub fn session_cookie(token: String, max_age_hours: i64) -> Cookie<'static> {
    let mut cookie = Cookie::new(SESSION_COOKIE, token);
    cookie.set_http_only(true);
    cookie.set_path("/");
    cookie.set_same_site(SameSite::Lax);
    cookie.set_max_age(time::Duration::hours(max_age_hours));
    cookie
}

pub fn admin_cookie(secret: &str) -> Result<Cookie<'static>> {
    Ok(session_cookie(create_admin_token(secret)?, ADMIN_SESSION_HOURS))
}

pub fn member_cookie(member_id: Uuid, secret: &str) -> Result<Cookie<'static>> {
    Ok(session_cookie(
        create_member_token(member_id, secret)?,
        MEMBER_SESSION_HOURS,
    ))
}

impl FromRequestParts<AppState> for Principal {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> std::result::Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = jar
            .get(SESSION_COOKIE)
            .map(|c| c.value().to_string())
            .ok_or(AppError::Unauthorized)?;

        verify_token(&token, &state.config.session_secret)
    }
}

/// A principal resolved against the member store, ready for audit snapshots
/// (display name, designation at action time).
#[derive(Debug, Clone)]
pub struct Actor {
    pub member: Option<Member>,
    pub display_name: String,
    pub designation: String,
}

impl Principal {
    /// Resolves the session to the member record. Admin sessions have no
    /// member identity and are rejected here.
    pub async fn require_member(&self, state: &AppState) -> Result<Member> {
        match self {
            Principal::Admin => Err(AppError::Forbidden),
            Principal::Member(id) => {
                let member = state
                    .member_service
                    .find_by_id(*id)
                    .await?
                    .ok_or(AppError::Unauthorized)?;
                if member.status != MemberStatus::Approved {
                    return Err(AppError::Forbidden);
                }
                Ok(member)
            }
        }
    }

    /// The unified role gate: the designation is re-read from the store on
    /// every call, so a role change takes effect on the next request. The
    /// admin principal passes every gate; an empty allow-list therefore
    /// means admin-only.
    pub async fn authorize(&self, state: &AppState, allowed: &[Designation]) -> Result<Actor> {
        match self {
            Principal::Admin => Ok(Actor {
                member: None,
                display_name: "Admin".to_string(),
                designation: "Admin".to_string(),
            }),
            Principal::Member(_) => {
                let member = self.require_member(state).await?;
                if !allowed.contains(&member.designation) {
                    return Err(AppError::Forbidden);
                }
                Ok(Actor {
                    display_name: member.full_name.clone(),
                    designation: member.designation.as_str().to_string(),
                    member: Some(member),
                })
            }
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct AdminLoginRequest {
    pub password: String,
}
