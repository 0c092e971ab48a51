use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::AppError;
use crate::forms::schemas::FormSubmission;

/// Notification body sent to the third-party form relay.
///
/// The submitted fields sit at the top level next to the relay's own
/// underscore-prefixed metadata keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelaySubmission {
    #[serde(flatten)]
    pub fields: serde_json::Map<String, serde_json::Value>,
    #[serde(rename = "_subject")]
    pub subject: String,
    #[serde(rename = "_replyto")]
    pub reply_to: String,
    #[serde(rename = "_format")]
    pub format: String,
}

/// Settings shared by every relayed notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelaySettings {
    /// Prepended to every subject line, e.g. `[Sala Academy]`.
    pub subject_prefix: String,
}

impl Default for RelaySettings {
    fn default() -> Self {
        Self {
            subject_prefix: "[Sala Academy]".to_string(),
        }
    }
}

impl RelaySubmission {
    pub fn from_submission(submission: &FormSubmission, settings: &RelaySettings) -> Self {
        let mut subject = submission.kind().subject().to_string();
        if let FormSubmission::Enrollment(form) = submission {
            subject = format!("{subject}: {}", form.program_id.trim());
        }
        let prefix = settings.subject_prefix.trim();
        if !prefix.is_empty() {
            subject = format!("{prefix} {subject}");
        }

        Self {
            fields: submission.fields(),
            subject,
            reply_to: submission.reply_to().to_string(),
            format: "plain".to_string(),
        }
    }
}

/// Delivers validated submissions to whoever turns them into email.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FormRelay: Send + Sync {
    /// Send one submission. Exactly one attempt is made.
    async fn deliver(&self, submission: &RelaySubmission) -> Result<(), AppError>;
}

/// Relay that POSTs JSON to a hosted form endpoint.
pub struct HttpFormRelay {
    client: reqwest::Client,
    endpoint: Url,
}

impl HttpFormRelay {
    pub fn new(endpoint: Url, timeout: Duration) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build relay client: {}", e)))?;
        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl FormRelay for HttpFormRelay {
    async fn deliver(&self, submission: &RelaySubmission) -> Result<(), AppError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(submission)
            .send()
            .await
            .map_err(|e| AppError::Relay(format!("Failed to reach form relay: {}", e)))?;

        let status = response.status();
        if status.is_success() {
            tracing::debug!(%status, subject = %submission.subject, "Form relay accepted submission");
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        let snippet: String = body.chars().take(200).collect();
        tracing::warn!(%status, body = %snippet, "Form relay rejected submission");
        Err(AppError::Relay(format!("Form relay responded with {}", status)))
    }
}

/// Accepts everything and only logs it. Used when no endpoint is configured.
#[derive(Debug, Default)]
pub struct LogOnlyRelay;

#[async_trait]
impl FormRelay for LogOnlyRelay {
    async fn deliver(&self, submission: &RelaySubmission) -> Result<(), AppError> {
        tracing::info!(
            subject = %submission.subject,
            reply_to = %submission.reply_to,
            fields = submission.fields.len(),
            "No form relay configured; submission logged only"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::schemas::{ContactForm, EnrollmentForm, NewsletterForm};
    use crate::i18n::locale::Locale;

    fn newsletter() -> FormSubmission {
        FormSubmission::Newsletter(NewsletterForm {
            email: "reader@example.com".to_string(),
            locale: Locale::Km,
        })
    }

    #[test]
    fn test_payload_carries_relay_metadata() {
        let payload = RelaySubmission::from_submission(&newsletter(), &RelaySettings::default());
        let json = serde_json::to_value(&payload).unwrap();

        assert_eq!(json["_subject"], "[Sala Academy] New newsletter subscriber");
        assert_eq!(json["_replyto"], "reader@example.com");
        assert_eq!(json["_format"], "plain");
        assert_eq!(json["email"], "reader@example.com");
        assert_eq!(json["locale"], "km");
    }

    #[test]
    fn test_enrollment_subject_names_program() {
        let submission = FormSubmission::Enrollment(EnrollmentForm {
            full_name: "Dara Kim".to_string(),
            email: "dara@example.com".to_string(),
            phone: "012 345 678".to_string(),
            program_id: "full-stack-web".to_string(),
            preferred_schedule: "evening".to_string(),
            message: String::new(),
            accept_terms: true,
        });
        let payload = RelaySubmission::from_submission(
            &submission,
            &RelaySettings {
                subject_prefix: String::new(),
            },
        );
        assert_eq!(payload.subject, "New enrollment application: full-stack-web");
    }

    #[test]
    fn test_reply_to_is_trimmed() {
        let submission = FormSubmission::Contact(ContactForm {
            name: "Sokha".to_string(),
            email: "  sokha@example.com ".to_string(),
            phone: String::new(),
            subject: "Hello".to_string(),
            message: "I have a question about fees.".to_string(),
        });
        let payload = RelaySubmission::from_submission(&submission, &RelaySettings::default());
        assert_eq!(payload.reply_to, "sokha@example.com");
    }

    #[tokio::test]
    async fn test_log_only_relay_accepts() {
        let payload = RelaySubmission::from_submission(&newsletter(), &RelaySettings::default());
        assert!(LogOnlyRelay.deliver(&payload).await.is_ok());
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_relay_error() {
        // Port 9 (discard) on localhost is closed in test environments.
        let relay = HttpFormRelay::new(
            Url::parse("http://127.0.0.1:9/submit").unwrap(),
            Duration::from_secs(2),
        )
        .unwrap();
        let payload = RelaySubmission::from_submission(&newsletter(), &RelaySettings::default());
        let err = relay.deliver(&payload).await.unwrap_err();
        assert!(matches!(err, AppError::Relay(_)));
    }
}
