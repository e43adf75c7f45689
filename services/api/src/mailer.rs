//! Verification email delivery
//!
//! The mailer is an explicitly constructed dependency living in `AppState`,
//! not a process global. It posts a JSON payload to an HTTP mail relay.
//! Delivery failure is the caller's problem to log only: registration never
//! blocks on, or fails because of, email delivery.

use anyhow::Result;
use reqwest::Client;
use serde_json::json;
use tracing::info;

use crate::models::User;

/// Mailer configuration
#[derive(Debug, Clone)]
pub struct MailerConfig {
    /// HTTP endpoint of the mail relay
    pub endpoint: String,
    /// From address for outgoing mail
    pub from_address: String,
    /// Optional bearer credential for the relay
    pub api_key: Option<String>,
    /// Base URL embedded in verification links
    pub verify_base_url: String,
}

impl MailerConfig {
    /// Create a new MailerConfig from environment variables
    ///
    /// Returns `None` when `MAIL_ENDPOINT` is unset, which disables mail
    /// delivery entirely.
    ///
    /// # Environment Variables
    /// - `MAIL_ENDPOINT`: HTTP endpoint of the mail relay
    /// - `MAIL_FROM`: from address (default: "noreply@localhost")
    /// - `MAIL_API_KEY`: optional bearer credential
    /// - `VERIFY_BASE_URL`: base URL for verification links
    ///   (default: "http://localhost:3000")
    pub fn from_env() -> Option<Self> {
        let endpoint = std::env::var("MAIL_ENDPOINT").ok()?;

        let from_address =
            std::env::var("MAIL_FROM").unwrap_or_else(|_| "noreply@localhost".to_string());
        let api_key = std::env::var("MAIL_API_KEY").ok();
        let verify_base_url = std::env::var("VERIFY_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:3000".to_string());

        Some(MailerConfig {
            endpoint,
            from_address,
            api_key,
            verify_base_url,
        })
    }
}

/// Mail relay client
#[derive(Clone)]
pub struct Mailer {
    http: Client,
    config: MailerConfig,
}

impl Mailer {
    /// Create a new mailer
    pub fn new(config: MailerConfig) -> Self {
        Self {
            http: Client::new(),
            config,
        }
    }

    /// Send the email-verification message for a freshly registered user
    ///
    /// The link embeds the user's public uuid; possession of the link is
    /// what proves control of the mailbox.
    pub async fn send_verification_email(&self, user: &User) -> Result<()> {
        let verify_link = format!(
            "{}/auth/verify_email/{}",
            self.config.verify_base_url, user.user_uuid
        );

        let body = json!({
            "from": self.config.from_address,
            "to": user.user_email,
            "subject": "Verify your email",
            "html": format!(
                "<p>Hi {},</p>\
                 <p>Click <a href=\"{}\">here</a> to verify your email address.</p>",
                user.user_name, verify_link
            ),
        });

        let mut request = self.http.post(&self.config.endpoint).json(&body);
        if let Some(api_key) = &self.config.api_key {
            request = request.bearer_auth(api_key);
        }

        request.send().await?.error_for_status()?;

        info!("Verification email sent to user {}", user.user_uuid);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_mailer_config_disabled_without_endpoint() {
        unsafe {
            std::env::remove_var("MAIL_ENDPOINT");
        }

        assert!(MailerConfig::from_env().is_none());
    }

    #[test]
    #[serial]
    fn test_mailer_config_from_env() {
        unsafe {
            std::env::set_var("MAIL_ENDPOINT", "http://localhost:9000/send");
            std::env::set_var("MAIL_FROM", "noreply@flashcards.test");
            std::env::remove_var("MAIL_API_KEY");
            std::env::remove_var("VERIFY_BASE_URL");
        }

        let config = MailerConfig::from_env().unwrap();
        assert_eq!(config.endpoint, "http://localhost:9000/send");
        assert_eq!(config.from_address, "noreply@flashcards.test");
        assert!(config.api_key.is_none());
        assert_eq!(config.verify_base_url, "http://localhost:3000");

        unsafe {
            std::env::remove_var("MAIL_ENDPOINT");
            std::env::remove_var("MAIL_FROM");
        }
    }
}
