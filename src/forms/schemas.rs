use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::validation::{FieldError, ValidationErrors};
use crate::content::store::ContentStore;
use crate::i18n::locale::Locale;

/// Time slots an applicant can ask for.
pub const SCHEDULE_OPTIONS: &[&str] = &["morning", "afternoon", "evening", "weekend"];

/// General enquiry from the contact page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    /// Optional; validated only when present.
    #[serde(default)]
    pub phone: String,
    pub subject: String,
    pub message: String,
}

impl ContactForm {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if errors.require("name", &self.name) {
            errors.length("name", &self.name, 2, 80);
        }
        if errors.require("email", &self.email) {
            errors.email("email", &self.email);
        }
        if !self.phone.trim().is_empty() {
            errors.phone("phone", &self.phone);
        }
        if errors.require("subject", &self.subject) {
            errors.length("subject", &self.subject, 3, 120);
        }
        if errors.require("message", &self.message) {
            errors.length("message", &self.message, 10, 2000);
        }

        errors.into_result()
    }
}

/// Application for a seat in a program.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrollmentForm {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub program_id: String,
    /// One of [`SCHEDULE_OPTIONS`].
    pub preferred_schedule: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub accept_terms: bool,
}

impl EnrollmentForm {
    /// Field rules that need no content lookups.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if errors.require("full_name", &self.full_name) {
            errors.length("full_name", &self.full_name, 2, 80);
        }
        if errors.require("email", &self.email) {
            errors.email("email", &self.email);
        }
        if errors.require("phone", &self.phone) {
            errors.phone("phone", &self.phone);
        }
        errors.require("program_id", &self.program_id);
        if errors.require("preferred_schedule", &self.preferred_schedule) {
            errors.one_of("preferred_schedule", &self.preferred_schedule, SCHEDULE_OPTIONS);
        }
        if !self.message.trim().is_empty() {
            errors.length("message", &self.message, 0, 1000);
        }
        errors.accepted("accept_terms", self.accept_terms);

        errors.into_result()
    }

    /// Field rules plus the program reference check.
    pub fn validate_with(&self, store: &ContentStore) -> Result<(), ValidationErrors> {
        let mut errors = self.validate().err().unwrap_or_default();
        if !self.program_id.trim().is_empty() && store.program(self.program_id.trim()).is_none() {
            errors.add("program_id", FieldError::UnknownOption);
        }
        errors.into_result()
    }
}

/// Newsletter sign-up from the footer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsletterForm {
    pub email: String,
    /// Language the subscriber wants to receive.
    #[serde(default)]
    pub locale: Locale,
}

impl NewsletterForm {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if errors.require("email", &self.email) {
            errors.email("email", &self.email);
        }
        errors.into_result()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormKind {
    Contact,
    Enrollment,
    Newsletter,
}

impl FormKind {
    pub fn key(&self) -> &'static str {
        match self {
            FormKind::Contact => "contact",
            FormKind::Enrollment => "enrollment",
            FormKind::Newsletter => "newsletter",
        }
    }

    /// Subject line of the relayed notification.
    pub fn subject(&self) -> &'static str {
        match self {
            FormKind::Contact => "New contact enquiry",
            FormKind::Enrollment => "New enrollment application",
            FormKind::Newsletter => "New newsletter subscriber",
        }
    }
}

/// Any form the site accepts, tagged by `kind` on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FormSubmission {
    Contact(ContactForm),
    Enrollment(EnrollmentForm),
    Newsletter(NewsletterForm),
}

impl FormSubmission {
    pub fn kind(&self) -> FormKind {
        match self {
            FormSubmission::Contact(_) => FormKind::Contact,
            FormSubmission::Enrollment(_) => FormKind::Enrollment,
            FormSubmission::Newsletter(_) => FormKind::Newsletter,
        }
    }

    pub fn validate(&self, store: &ContentStore) -> Result<(), ValidationErrors> {
        match self {
            FormSubmission::Contact(form) => form.validate(),
            FormSubmission::Enrollment(form) => form.validate_with(store),
            FormSubmission::Newsletter(form) => form.validate(),
        }
    }

    /// Address replies to the notification should go to.
    pub fn reply_to(&self) -> &str {
        match self {
            FormSubmission::Contact(form) => form.email.trim(),
            FormSubmission::Enrollment(form) => form.email.trim(),
            FormSubmission::Newsletter(form) => form.email.trim(),
        }
    }

    /// The submitted fields as a flat JSON object, without the `kind` tag.
    pub fn fields(&self) -> serde_json::Map<String, serde_json::Value> {
        let value = match self {
            FormSubmission::Contact(form) => serde_json::to_value(form),
            FormSubmission::Enrollment(form) => serde_json::to_value(form),
            FormSubmission::Newsletter(form) => serde_json::to_value(form),
        };
        match value {
            Ok(serde_json::Value::Object(map)) => map,
            _ => serde_json::Map::new(),
        }
    }
}

/// Acknowledgement returned once the relay accepted a submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionReceipt {
    pub id: String,
    pub kind: FormKind,
    pub received_at: DateTime<Utc>,
}
