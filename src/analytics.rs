//! Thin wrapper over the tag-manager global.
//!
//! In the browser events go to `window.gtag` when the tag manager script is
//! loaded and are dropped otherwise. During server rendering they are only
//! logged.

use serde_json::{json, Value};

use crate::forms::schemas::FormKind;
use crate::i18n::locale::Locale;

#[derive(Debug, Clone, PartialEq)]
pub enum AnalyticsEvent {
    PageView { path: String, locale: Locale },
    Search { page: &'static str, term: String },
    FilterChange { page: &'static str, filter: &'static str, value: String },
    FormSubmitted { kind: FormKind },
    FormFailed { kind: FormKind },
    LocaleSwitched { from: Locale, to: Locale },
}

impl AnalyticsEvent {
    /// Event name as the tag manager receives it.
    pub fn name(&self) -> &'static str {
        match self {
            AnalyticsEvent::PageView { .. } => "page_view",
            AnalyticsEvent::Search { .. } => "search",
            AnalyticsEvent::FilterChange { .. } => "filter_change",
            AnalyticsEvent::FormSubmitted { .. } => "form_submit",
            AnalyticsEvent::FormFailed { .. } => "form_error",
            AnalyticsEvent::LocaleSwitched { .. } => "locale_switch",
        }
    }

    pub fn params(&self) -> Value {
        match self {
            AnalyticsEvent::PageView { path, locale } => {
                json!({ "page_path": path, "language": locale.code() })
            }
            AnalyticsEvent::Search { page, term } => {
                json!({ "page": page, "search_term": term })
            }
            AnalyticsEvent::FilterChange { page, filter, value } => {
                json!({ "page": page, "filter": filter, "value": value })
            }
            AnalyticsEvent::FormSubmitted { kind } | AnalyticsEvent::FormFailed { kind } => {
                json!({ "form": kind.key() })
            }
            AnalyticsEvent::LocaleSwitched { from, to } => {
                json!({ "from": from.code(), "to": to.code() })
            }
        }
    }
}

/// Record `event`. Never fails.
pub fn track(event: AnalyticsEvent) {
    #[cfg(feature = "hydrate")]
    send_to_gtag(&event);

    #[cfg(not(feature = "hydrate"))]
    tracing::debug!(event = event.name(), params = %event.params(), "analytics");
}

#[cfg(feature = "hydrate")]
fn send_to_gtag(event: &AnalyticsEvent) {
    use serde::Serialize;
    use wasm_bindgen::{JsCast, JsValue};

    let Some(window) = web_sys::window() else {
        return;
    };
    let Ok(gtag) = js_sys::Reflect::get(&window, &JsValue::from_str("gtag")) else {
        return;
    };
    let Some(gtag) = gtag.dyn_ref::<js_sys::Function>() else {
        return;
    };
    let params = event
        .params()
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .unwrap_or(JsValue::UNDEFINED);
    let _ = gtag.call3(
        &JsValue::NULL,
        &JsValue::from_str("event"),
        &JsValue::from_str(event.name()),
        &params,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_params() {
        let event = AnalyticsEvent::FilterChange {
            page: "faq",
            filter: "category",
            value: "payment".to_string(),
        };
        assert_eq!(event.name(), "filter_change");
        assert_eq!(event.params()["value"], "payment");

        let event = AnalyticsEvent::FormSubmitted {
            kind: FormKind::Enrollment,
        };
        assert_eq!(event.params()["form"], "enrollment");
    }

    #[test]
    fn test_track_without_tag_manager_is_silent() {
        track(AnalyticsEvent::LocaleSwitched {
            from: Locale::En,
            to: Locale::Km,
        });
    }
}
