use crate::error::{AppError, Result};
use crate::models::{
    Designation, InviteMember, JoinApplication, Member, MemberStatus, StatusUpdate, UpdateProfile,
};
use crate::services::credentials;
use argon2::{
    password_hash::{rand_core::OsRng, SaltString},
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
};
use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

/// Raw generated credentials, surfaced exactly once so the caller can put
/// them in the approval/invitation email. Only the hash is persisted.
#[derive(Debug, Clone)]
pub struct RawCredentials {
    pub username: String,
    pub password: String,
}

/// Result of an approve/reject transition.
#[derive(Debug)]
pub struct StatusChange {
    pub member: Member,
    /// Present only when this call generated credentials (first approval).
    pub credentials: Option<RawCredentials>,
}

/// Outcome of a forgot-password request.
#[derive(Debug)]
pub enum ResetOutcome {
    /// No member matched; the caller must not be able to distinguish this
    /// from the issued case.
    UnknownIdentifier,
    OtpIssued {
        member: Member,
        email: String,
        otp: String,
    },
}

#[derive(Clone)]
pub struct MemberService {
    db: SqlitePool,
}

impl MemberService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// Creates a Pending member from a self-submitted application. The
    /// designation is forced to Member regardless of the payload.
    pub async fn create_application(&self, input: JoinApplication) -> Result<Member> {
        let now = Utc::now();
        let member = sqlx::query_as::<_, Member>(
            r#"
            INSERT INTO members (id, full_name, guardian_name, dob, blood_group, phone, email,
                                 address, status, designation, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&input.full_name)
        .bind(&input.guardian_name)
        .bind(input.dob)
        .bind(&input.blood_group)
        .bind(&input.phone)
        .bind(&input.email)
        .bind(&input.address)
        .bind(MemberStatus::Pending)
        .bind(Designation::Member)
        .bind(now)
        .bind(now)
        .fetch_one(&self.db)
        .await?;

        Ok(member)
    }

    /// Full member listing for the admin dashboard, Pending applications
    /// grouped ahead by status, newest first within each group.
    pub async fn list_all(&self) -> Result<Vec<Member>> {
        let members = sqlx::query_as::<_, Member>(
            r#"
            SELECT * FROM members
            ORDER BY CASE status WHEN 'Pending' THEN 0 ELSE 1 END, created_at DESC
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(members)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Member>> {
        let member = sqlx::query_as::<_, Member>("SELECT * FROM members WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.db)
            .await?;

        Ok(member)
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Member> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Member not found".to_string()))
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<Member>> {
        let member = sqlx::query_as::<_, Member>("SELECT * FROM members WHERE username = $1")
            .bind(username)
            .fetch_optional(&self.db)
            .await?;

        Ok(member)
    }

    /// Looks a member up by username or email, for the password-reset flow.
    pub async fn find_by_identifier(&self, identifier: &str) -> Result<Option<Member>> {
        let member = sqlx::query_as::<_, Member>(
            "SELECT * FROM members WHERE username = $1 OR email = $1",
        )
        .bind(identifier)
        .fetch_optional(&self.db)
        .await?;

        Ok(member)
    }

    /// Approve/reject transition. First approval derives credentials and
    /// returns the raw pair for the notification email; re-approving an
    /// already-Approved member changes nothing. Rejection only flips the
    /// status.
    pub async fn update_status(&self, input: StatusUpdate) -> Result<StatusChange> {
        let member = self.get_by_id(input.id).await?;

        if input.status == MemberStatus::Approved && member.status != MemberStatus::Approved {
            let username = credentials::derive_username(&member.full_name, Some(&member.phone));

            if self.username_taken(&username, member.id).await? {
                return Err(AppError::Conflict(format!(
                    "Username '{username}' is already taken; resolve manually"
                )));
            }

            let password = credentials::generate_password(&member.full_name, member.dob);
            let password_hash = hash_password(&password)?;

            let updated = sqlx::query_as::<_, Member>(
                r#"
                UPDATE members
                SET status = $2, username = $3, password_hash = $4, updated_at = $5
                WHERE id = $1
                RETURNING *
                "#,
            )
            .bind(member.id)
            .bind(MemberStatus::Approved)
            .bind(&username)
            .bind(&password_hash)
            .bind(Utc::now())
            .fetch_one(&self.db)
            .await?;

            return Ok(StatusChange {
                member: updated,
                credentials: Some(RawCredentials { username, password }),
            });
        }

        let updated = sqlx::query_as::<_, Member>(
            "UPDATE members SET status = $2, updated_at = $3 WHERE id = $1 RETURNING *",
        )
        .bind(member.id)
        .bind(input.status)
        .bind(Utc::now())
        .fetch_one(&self.db)
        .await?;

        Ok(StatusChange {
            member: updated,
            credentials: None,
        })
    }

    /// Invite path: the member is created directly at Approved with
    /// credentials already issued. Missing optional fields get placeholder
    /// values so the record stays complete.
    pub async fn invite(&self, input: InviteMember) -> Result<(Member, RawCredentials)> {
        let dob = input.dob.unwrap_or_else(|| Utc::now().date_naive());
        let username = credentials::derive_username(&input.full_name, input.phone.as_deref());

        if self.username_taken(&username, Uuid::nil()).await? {
            return Err(AppError::Conflict(format!(
                "Username '{username}' is already taken; resolve manually"
            )));
        }

        let password = credentials::generate_password(&input.full_name, dob);
        let password_hash = hash_password(&password)?;
        let now = Utc::now();

        let member = sqlx::query_as::<_, Member>(
            r#"
            INSERT INTO members (id, full_name, guardian_name, dob, blood_group, phone, email,
                                 address, status, username, password_hash, designation,
                                 created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&input.full_name)
        .bind(input.guardian_name.as_deref().unwrap_or("N/A"))
        .bind(dob)
        .bind(&input.blood_group)
        .bind(input.phone.as_deref().unwrap_or("N/A"))
        .bind(&input.email)
        .bind(input.address.as_deref().unwrap_or("N/A"))
        .bind(MemberStatus::Approved)
        .bind(&username)
        .bind(&password_hash)
        .bind(input.designation.unwrap_or_default())
        .bind(now)
        .bind(now)
        .fetch_one(&self.db)
        .await?;

        Ok((member, RawCredentials { username, password }))
    }

    /// Member-portal login: verifies credentials against the stored hash,
    /// then requires Approved status. Wrong username and wrong password are
    /// indistinguishable to the caller.
    pub async fn verify_login(&self, username: &str, password: &str) -> Result<Member> {
        let member = self
            .find_by_username(username)
            .await?
            .ok_or(AppError::Unauthorized)?;

        let hash = member.password_hash.as_deref().ok_or(AppError::Unauthorized)?;
        let parsed_hash = PasswordHash::new(hash)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Invalid password hash: {}", e)))?;

        Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .map_err(|_| AppError::Unauthorized)?;

        if member.status != MemberStatus::Approved {
            return Err(AppError::Forbidden);
        }

        Ok(member)
    }

    /// Self-service profile edit. Username changes enforce uniqueness;
    /// email and designation cannot be touched through this path.
    pub async fn update_profile(&self, id: Uuid, input: UpdateProfile) -> Result<Member> {
        let current = self.get_by_id(id).await?;

        if let Some(username) = &input.username {
            if current.username.as_deref() != Some(username.as_str())
                && self.username_taken(username, id).await?
            {
                return Err(AppError::Conflict("Username is already taken".to_string()));
            }
        }

        let member = sqlx::query_as::<_, Member>(
            r#"
            UPDATE members
            SET full_name = COALESCE($2, full_name),
                guardian_name = COALESCE($3, guardian_name),
                username = COALESCE($4, username),
                phone = COALESCE($5, phone),
                address = COALESCE($6, address),
                blood_group = COALESCE($7, blood_group),
                dob = COALESCE($8, dob),
                updated_at = $9
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&input.full_name)
        .bind(&input.guardian_name)
        .bind(&input.username)
        .bind(&input.phone)
        .bind(&input.address)
        .bind(&input.blood_group)
        .bind(input.dob)
        .bind(Utc::now())
        .fetch_one(&self.db)
        .await?;

        Ok(member)
    }

    /// Replaces the stored password hash. Used by the reset flow.
    pub async fn set_password(&self, id: Uuid, new_password: &str) -> Result<()> {
        let password_hash = hash_password(new_password)?;
        sqlx::query(
            r#"
            UPDATE members
            SET password_hash = $2, reset_otp = NULL, reset_otp_expires = NULL, updated_at = $3
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(&password_hash)
        .bind(Utc::now())
        .execute(&self.db)
        .await?;

        Ok(())
    }

    /// Starts a password reset: stores a one-time code with a 10 minute
    /// expiry. The unknown-identifier case is reported as an outcome, not an
    /// error, so the handler can shape it as a generic success
    /// (anti-enumeration). A matching member with no email on file is a
    /// distinct, actionable failure.
    pub async fn begin_password_reset(&self, identifier: &str) -> Result<ResetOutcome> {
        let Some(member) = self.find_by_identifier(identifier).await? else {
            return Ok(ResetOutcome::UnknownIdentifier);
        };

        let Some(email) = member.email.clone() else {
            return Err(AppError::BadRequest(
                "No email linked to this account. Contact Admin.".to_string(),
            ));
        };

        let otp = credentials::generate_otp();
        let expires = Utc::now() + chrono::Duration::minutes(10);

        sqlx::query(
            "UPDATE members SET reset_otp = $2, reset_otp_expires = $3, updated_at = $4 WHERE id = $1",
        )
        .bind(member.id)
        .bind(&otp)
        .bind(expires)
        .bind(Utc::now())
        .execute(&self.db)
        .await?;

        Ok(ResetOutcome::OtpIssued {
            member,
            email,
            otp,
        })
    }

    /// Completes a reset. Succeeds only when the identifier matches, the
    /// stored code equals the supplied one, and the expiry has not elapsed;
    /// the code is cleared on success (single use). Every failure collapses
    /// into the same generic error.
    pub async fn complete_password_reset(
        &self,
        identifier: &str,
        otp: &str,
        new_password: &str,
    ) -> Result<()> {
        let invalid = || AppError::BadRequest("Invalid or expired OTP".to_string());

        let member = self
            .find_by_identifier(identifier)
            .await?
            .ok_or_else(invalid)?;

        let stored = member.reset_otp.as_deref().ok_or_else(invalid)?;
        let expires = member.reset_otp_expires.ok_or_else(invalid)?;

        if stored != otp || Utc::now() >= expires {
            return Err(invalid());
        }

        self.set_password(member.id, new_password).await
    }

    async fn username_taken(&self, username: &str, exclude: Uuid) -> Result<bool> {
        let taken: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM members WHERE username = $1 AND id != $2)",
        )
        .bind(username)
        .bind(exclude)
        .fetch_one(&self.db)
        .await?;

        Ok(taken)
    }
}

pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Password hashing failed: {}", e)))?
        .to_string();
    Ok(hash)
}
