use std::fmt::Display;

/// Lifecycle of one form on the page.
///
/// `Success` is terminal. An error can be dismissed back to `Idle`, after
/// which the visitor may submit again; nothing is retried automatically.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FormStatus {
    #[default]
    Idle,
    Submitting,
    Success,
    Error(String),
}

impl FormStatus {
    /// Enter `Submitting`. Refused while a request is in flight or after success.
    pub fn begin(&mut self) -> bool {
        match self {
            FormStatus::Idle | FormStatus::Error(_) => {
                *self = FormStatus::Submitting;
                true
            }
            FormStatus::Submitting | FormStatus::Success => false,
        }
    }

    /// Record the outcome of the in-flight request.
    pub fn finish<T, E: Display>(&mut self, result: Result<T, E>) {
        if *self != FormStatus::Submitting {
            return;
        }
        *self = match result {
            Ok(_) => FormStatus::Success,
            Err(e) => FormStatus::Error(e.to_string()),
        };
    }

    /// Hide an error message.
    pub fn dismiss(&mut self) {
        if matches!(self, FormStatus::Error(_)) {
            *self = FormStatus::Idle;
        }
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self, FormStatus::Submitting)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, FormStatus::Success)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            FormStatus::Error(msg) => Some(msg),
            _ => None,
        }
    }
}
