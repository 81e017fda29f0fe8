use crate::mail::{Mailer, MailerConfig};
use crate::services::{
    event::EventService, gallery::GalleryService, member::MemberService, notice::NoticeService,
    treasury::TreasuryService,
};
use crate::storage::ObjectStorage;
use sqlx::SqlitePool;

#[derive(Clone)]
pub struct Config {
    pub bind_address: String,
    pub database_url: String,
    pub session_secret: String,
    /// Shared administrative passphrase; the second credential surface
    /// feeding the same role gate as member logins.
    pub admin_password: String,
    pub club_name: String,
    pub smtp_host: Option<String>,
    pub smtp_username: String,
    pub smtp_password: String,
    pub mail_from: String,
    pub admin_email: Option<String>,
    pub storage_bucket: Option<String>,
    pub storage_public_url: Option<String>,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        let database_url =
            std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:sangha.db".to_string());

        let session_secret = std::env::var("SESSION_SECRET").unwrap_or_else(|_| {
            tracing::warn!("SESSION_SECRET not set, using default (insecure for production!)");
            "dev-secret-change-in-production".to_string()
        });

        let admin_password = std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| {
            tracing::warn!("ADMIN_PASSWORD not set, using default (insecure for production!)");
            "admin".to_string()
        });

        let bind_address =
            std::env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

        let club_name = std::env::var("CLUB_NAME").unwrap_or_else(|_| "Sangha".to_string());

        Ok(Config {
            bind_address,
            database_url,
            session_secret,
            admin_password,
            club_name,
            smtp_host: std::env::var("SMTP_HOST").ok(),
            smtp_username: std::env::var("SMTP_USERNAME").unwrap_or_default(),
            smtp_password: std::env::var("SMTP_PASSWORD").unwrap_or_default(),
            mail_from: std::env::var("MAIL_FROM")
                .unwrap_or_else(|_| "Sangha <noreply@example.org>".to_string()),
            admin_email: std::env::var("ADMIN_EMAIL").ok(),
            storage_bucket: std::env::var("STORAGE_BUCKET").ok(),
            storage_public_url: std::env::var("STORAGE_PUBLIC_URL").ok(),
        })
    }

    pub fn mailer_config(&self) -> MailerConfig {
        MailerConfig {
            smtp_host: self.smtp_host.clone(),
            smtp_username: self.smtp_username.clone(),
            smtp_password: self.smtp_password.clone(),
            from_address: self.mail_from.clone(),
            admin_address: self.admin_email.clone(),
            club_name: self.club_name.clone(),
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub db: SqlitePool,
    pub member_service: MemberService,
    pub treasury_service: TreasuryService,
    pub notice_service: NoticeService,
    pub event_service: EventService,
    pub gallery_service: GalleryService,
    pub mailer: Mailer,
    pub storage: ObjectStorage,
}

impl AppState {
    pub fn new(config: Config, db: SqlitePool, mailer: Mailer, storage: ObjectStorage) -> Self {
        let member_service = MemberService::new(db.clone());
        let treasury_service = TreasuryService::new(db.clone());
        let notice_service = NoticeService::new(db.clone());
        let event_service = EventService::new(db.clone());
        let gallery_service = GalleryService::new(db.clone());

        Self {
            config,
            db,
            member_service,
            treasury_service,
            notice_service,
            event_service,
            gallery_service,
            mailer,
            storage,
        }
    }
}
