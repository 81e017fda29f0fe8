//! Outbound transactional email.
//!
//! Dispatch is decoupled from request handling: senders spawn a task after
//! the state write has committed, and delivery failures are logged, never
//! surfaced into the triggering response. Without SMTP configuration the
//! mailer runs disabled and only logs what it would have sent.

pub mod templates;

use crate::models::Member;
use crate::services::member::RawCredentials;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

#[derive(Clone)]
pub struct MailerConfig {
    pub smtp_host: Option<String>,
    pub smtp_username: String,
    pub smtp_password: String,
    pub from_address: String,
    pub admin_address: Option<String>,
    pub club_name: String,
}

#[derive(Clone)]
pub struct Mailer {
    transport: Option<AsyncSmtpTransport<Tokio1Executor>>,
    from_address: String,
    admin_address: Option<String>,
    club_name: String,
}

impl Mailer {
    pub fn new(config: MailerConfig) -> anyhow::Result<Self> {
        let transport = match &config.smtp_host {
            Some(host) => {
                let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(host)?
                    .credentials(Credentials::new(
                        config.smtp_username.clone(),
                        config.smtp_password.clone(),
                    ))
                    .build();
                Some(transport)
            }
            None => {
                tracing::warn!("SMTP not configured; outbound email is disabled");
                None
            }
        };

        Ok(Self {
            transport,
            from_address: config.from_address,
            admin_address: config.admin_address,
            club_name: config.club_name,
        })
    }

    pub fn send_approval(&self, member: &Member, credentials: &RawCredentials) {
        let Some(to) = member.email.clone() else { return };
        let body = templates::approval(
            &self.club_name,
            &member.full_name,
            &credentials.username,
            &credentials.password,
        );
        self.send_later(
            to,
            format!("Welcome to {} - Membership Approved", self.club_name),
            body,
            ContentType::TEXT_HTML,
        );
    }

    pub fn send_rejection(&self, member: &Member) {
        let Some(to) = member.email.clone() else { return };
        let body = templates::rejection(&self.club_name, &member.full_name);
        self.send_later(
            to,
            format!("Update on your {} membership application", self.club_name),
            body,
            ContentType::TEXT_HTML,
        );
    }

    pub fn send_invitation(&self, member: &Member, credentials: &RawCredentials) {
        let Some(to) = member.email.clone() else { return };
        let body = templates::invitation(
            &self.club_name,
            &member.full_name,
            &credentials.username,
            &credentials.password,
        );
        self.send_later(
            to,
            format!("Special membership invitation - {}", self.club_name),
            body,
            ContentType::TEXT_HTML,
        );
    }

    pub fn send_otp(&self, to: String, name: &str, code: &str) {
        let body = templates::otp(&self.club_name, name, code);
        self.send_later(
            to,
            format!("Password reset OTP - {}", self.club_name),
            body,
            ContentType::TEXT_HTML,
        );
    }

    /// Notifies the configured admin address of a new application.
    pub fn send_admin_notification(&self, applicant: &Member) {
        let Some(to) = self.admin_address.clone() else { return };
        let body = templates::admin_notification(
            &applicant.full_name,
            &applicant.phone,
            &applicant.address,
            applicant.blood_group.as_deref().unwrap_or("-"),
        );
        self.send_later(
            to,
            format!("New member application: {}", applicant.full_name),
            body,
            ContentType::TEXT_PLAIN,
        );
    }

    /// Queues a message on a detached task. Failures are logged; callers
    /// never wait on the relay.
    fn send_later(&self, to: String, subject: String, body: String, content_type: ContentType) {
        let mailer = self.clone();
        tokio::spawn(async move {
            if let Err(e) = mailer.deliver(&to, &subject, body, content_type).await {
                tracing::error!(to = %to, subject = %subject, "Email delivery failed: {:?}", e);
            }
        });
    }

    async fn deliver(
        &self,
        to: &str,
        subject: &str,
        body: String,
        content_type: ContentType,
    ) -> anyhow::Result<()> {
        let Some(transport) = &self.transport else {
            tracing::info!(to = %to, subject = %subject, "Email suppressed (mailer disabled)");
            return Ok(());
        };

        let message = Message::builder()
            .from(self.from_address.parse()?)
            .to(to.parse()?)
            .subject(subject)
            .header(content_type)
            .body(body)?;

        transport.send(message).await?;
        tracing::info!(to = %to, subject = %subject, "Email sent");
        Ok(())
    }
}
