use std::collections::BTreeMap;
use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::i18n::locale::Locale;
use crate::i18n::messages::{t, tf};

/// Phone numbers: optional leading `+`, then digits and common separators.
static PHONE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\+?[\d\s\-().]{7,20}$").expect("phone pattern is valid")
});

/// Why a single field was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum FieldError {
    Required,
    InvalidEmail,
    InvalidPhone,
    TooShort { min: usize },
    TooLong { max: usize },
    MustAccept,
    UnknownOption,
}

impl FieldError {
    pub fn message_key(&self) -> &'static str {
        match self {
            FieldError::Required => "forms.error.required",
            FieldError::InvalidEmail => "forms.error.invalid_email",
            FieldError::InvalidPhone => "forms.error.invalid_phone",
            FieldError::TooShort { .. } => "forms.error.too_short",
            FieldError::TooLong { .. } => "forms.error.too_long",
            FieldError::MustAccept => "forms.error.must_accept",
            FieldError::UnknownOption => "forms.error.unknown_option",
        }
    }

    /// Localized text shown under the field.
    pub fn message(&self, locale: Locale) -> String {
        match self {
            FieldError::TooShort { min } => {
                tf(locale, self.message_key(), &[("min", min.to_string())])
            }
            FieldError::TooLong { max } => {
                tf(locale, self.message_key(), &[("max", max.to_string())])
            }
            _ => t(locale, self.message_key()).to_string(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldError::Required => write!(f, "required"),
            FieldError::InvalidEmail => write!(f, "invalid email"),
            FieldError::InvalidPhone => write!(f, "invalid phone number"),
            FieldError::TooShort { min } => write!(f, "shorter than {} characters", min),
            FieldError::TooLong { max } => write!(f, "longer than {} characters", max),
            FieldError::MustAccept => write!(f, "must be accepted"),
            FieldError::UnknownOption => write!(f, "unknown option"),
        }
    }
}

/// Field-level validation failures, keyed by field name.
///
/// Only the first failure per field is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, FieldError>);

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|(field, err)| format!("{field}: {err}"))
            .collect();
        f.write_str(&parts.join(", "))
    }
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: &str) -> Option<FieldError> {
        self.0.get(field).copied()
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, FieldError)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn add(&mut self, field: &str, error: FieldError) {
        self.0.entry(field.to_string()).or_insert(error);
    }

    /// `Ok(())` when no field failed.
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }

    /// Non-blank. Returns whether the check passed.
    pub fn require(&mut self, field: &str, value: &str) -> bool {
        if value.trim().is_empty() {
            self.add(field, FieldError::Required);
            false
        } else {
            true
        }
    }

    /// Trimmed length in characters within `min..=max`.
    pub fn length(&mut self, field: &str, value: &str, min: usize, max: usize) -> bool {
        let len = value.trim().chars().count();
        if len < min {
            self.add(field, FieldError::TooShort { min });
            false
        } else if len > max {
            self.add(field, FieldError::TooLong { max });
            false
        } else {
            true
        }
    }

    pub fn email(&mut self, field: &str, value: &str) -> bool {
        if is_email(value) {
            true
        } else {
            self.add(field, FieldError::InvalidEmail);
            false
        }
    }

    pub fn phone(&mut self, field: &str, value: &str) -> bool {
        if is_phone(value) {
            true
        } else {
            self.add(field, FieldError::InvalidPhone);
            false
        }
    }

    pub fn accepted(&mut self, field: &str, value: bool) -> bool {
        if !value {
            self.add(field, FieldError::MustAccept);
        }
        value
    }

    pub fn one_of(&mut self, field: &str, value: &str, options: &[&str]) -> bool {
        if options.contains(&value.trim()) {
            true
        } else {
            self.add(field, FieldError::UnknownOption);
            false
        }
    }
}

/// Check if a string is an email address
pub fn is_email(text: &str) -> bool {
    validator::validate_email(text.trim())
}

/// Check if a string looks like a phone number with 7 to 15 digits
pub fn is_phone(text: &str) -> bool {
    let trimmed = text.trim();
    if !PHONE_REGEX.is_match(trimmed) {
        return false;
    }
    let digits = trimmed.chars().filter(|c| c.is_ascii_digit()).count();
    (7..=15).contains(&digits)
}
