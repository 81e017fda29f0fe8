use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Application review state. Self-applications start Pending; invited
/// members are created directly at Approved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, Default)]
pub enum MemberStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

/// Organizational role, the sole authorization attribute for member sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, Default)]
pub enum Designation {
    #[default]
    Member,
    President,
    Secretary,
    Treasurer,
    #[serde(rename = "Assistant Secretary")]
    #[sqlx(rename = "Assistant Secretary")]
    AssistantSecretary,
    #[serde(rename = "Executive Member")]
    #[sqlx(rename = "Executive Member")]
    ExecutiveMember,
}

impl Designation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Designation::Member => "Member",
            Designation::President => "President",
            Designation::Secretary => "Secretary",
            Designation::Treasurer => "Treasurer",
            Designation::AssistantSecretary => "Assistant Secretary",
            Designation::ExecutiveMember => "Executive Member",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: Uuid,
    pub full_name: String,
    pub guardian_name: String,
    pub dob: NaiveDate,
    pub blood_group: Option<String>,
    pub phone: String,
    pub email: Option<String>,
    pub address: String,
    pub status: MemberStatus,
    pub username: Option<String>,
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,
    pub designation: Designation,
    #[serde(skip_serializing)]
    pub reset_otp: Option<String>,
    #[serde(skip_serializing)]
    pub reset_otp_expires: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Self-submitted membership application.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinApplication {
    pub full_name: String,
    pub guardian_name: String,
    pub dob: NaiveDate,
    pub blood_group: Option<String>,
    pub phone: String,
    pub email: Option<String>,
    pub address: String,
}

/// Admin-initiated invitation; most fields are optional and fall back to
/// placeholder values on creation.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InviteMember {
    pub full_name: String,
    pub guardian_name: Option<String>,
    pub dob: Option<NaiveDate>,
    pub blood_group: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub designation: Option<Designation>,
}

/// Self-service profile edit. Email and designation are immutable here.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfile {
    pub full_name: Option<String>,
    pub guardian_name: Option<String>,
    pub username: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub blood_group: Option<String>,
    pub dob: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    pub id: Uuid,
    pub status: MemberStatus,
}
