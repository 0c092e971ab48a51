//! Contact, enrollment and newsletter forms.
//!
//! Each form validates in the browser with the same rules the server applies,
//! then posts through the `submit_form` server function, which validates again
//! and hands the submission to the configured relay.

use leptos::prelude::*;
use leptos::server_fn::codec::Json;
use leptos_router::hooks::use_query_map;
use serde::{Deserialize, Serialize};

use crate::analytics::{track, AnalyticsEvent};
use crate::components::layout::use_locale;
use crate::content::store::ContentStore;
use crate::forms::schemas::{
    ContactForm, EnrollmentForm, FormSubmission, NewsletterForm, SubmissionReceipt, SCHEDULE_OPTIONS,
};
use crate::forms::status::FormStatus;
use crate::forms::validation::ValidationErrors;
use crate::i18n::locale::Locale;
use crate::i18n::messages::t;

/// Result of a submission that reached the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SubmitOutcome {
    Accepted(SubmissionReceipt),
    /// Server-side validation disagreed with the browser.
    Rejected(ValidationErrors),
}

#[server(name = SubmitForm, prefix = "/api", input = Json)]
pub async fn submit_form(submission: FormSubmission) -> Result<SubmitOutcome, ServerFnError> {
    use crate::api::forms::process_submission;
    use crate::app::AppState;
    use crate::error::AppError;

    let state = use_context::<AppState>()
        .ok_or_else(|| ServerFnError::new("AppState not found in context"))?;

    match process_submission(
        state.content.as_ref(),
        state.relay.as_ref(),
        &state.relay_settings,
        submission,
    )
    .await
    {
        Ok(receipt) => Ok(SubmitOutcome::Accepted(receipt)),
        Err(AppError::Validation(errors)) => Ok(SubmitOutcome::Rejected(errors)),
        Err(e) => Err(ServerFnError::new(e.to_string())),
    }
}

/// Reactive state shared by every form on the page.
#[derive(Debug, Clone, Copy)]
struct FormState {
    status: RwSignal<FormStatus>,
    errors: RwSignal<ValidationErrors>,
}

impl FormState {
    fn new() -> Self {
        Self {
            status: RwSignal::new(FormStatus::default()),
            errors: RwSignal::new(ValidationErrors::new()),
        }
    }

    /// Validate locally, then send at most one request at a time.
    fn submit(self, submission: FormSubmission, locale: Locale) {
        let kind = submission.kind();
        if let Err(errors) = submission.validate(ContentStore::embedded()) {
            self.errors.set(errors);
            return;
        }
        self.errors.set(ValidationErrors::new());
        if !self.status.try_update(|s| s.begin()).unwrap_or(false) {
            return;
        }

        leptos::task::spawn_local(async move {
            let outcome = submit_form(submission).await;
            let result = match outcome {
                Ok(SubmitOutcome::Accepted(_)) => {
                    track(AnalyticsEvent::FormSubmitted { kind });
                    Ok(())
                }
                Ok(SubmitOutcome::Rejected(errors)) => {
                    self.errors.set(errors);
                    Err(t(locale, "forms.status.invalid"))
                }
                Err(e) => {
                    leptos::logging::warn!("Form submission failed: {e}");
                    track(AnalyticsEvent::FormFailed { kind });
                    Err(t(locale, "forms.status.failed"))
                }
            };
            self.status.update(|s| s.finish(result));
        });
    }
}

#[component]
fn Field(
    label_key: &'static str,
    name: &'static str,
    #[prop(default = "text")] input_type: &'static str,
    #[prop(optional)] required: bool,
    #[prop(optional)] multiline: bool,
    value: Signal<String>,
    on_input: Callback<String>,
    errors: RwSignal<ValidationErrors>,
) -> impl IntoView {
    let locale = use_locale();
    let input = if multiline {
        view! {
            <textarea
                id=name
                name=name
                rows="5"
                prop:value=value
                on:input=move |ev| on_input.run(event_target_value(&ev))
            />
        }
        .into_any()
    } else {
        view! {
            <input
                id=name
                name=name
                type=input_type
                prop:value=value
                on:input=move |ev| on_input.run(event_target_value(&ev))
            />
        }
        .into_any()
    };

    view! {
        <div class="field" class:invalid=move || errors.with(|e| e.get(name).is_some())>
            <label for=name>
                {move || t(locale.get(), label_key)}
                {required.then_some(" *")}
            </label>
            {input}
            <FieldMessage name=name errors=errors/>
        </div>
    }
}

#[component]
fn FieldMessage(name: &'static str, errors: RwSignal<ValidationErrors>) -> impl IntoView {
    let locale = use_locale();
    move || {
        errors
            .with(|e| e.get(name))
            .map(|error| view! { <p class="field-error">{error.message(locale.get())}</p> })
    }
}

/// Error banner with a dismiss button, or the success message.
#[component]
fn StatusBanner(status: RwSignal<FormStatus>, success_key: &'static str) -> impl IntoView {
    let locale = use_locale();
    move || {
        let current = status.get();
        if current.is_success() {
            Some(view! { <div class="alert alert-success">{t(locale.get(), success_key)}</div> }.into_any())
        } else {
            current.error().map(|message| {
                let message = message.to_string();
                view! {
                    <div class="alert alert-error" role="alert">
                        <span>{message}</span>
                        <button
                            class="dismiss"
                            aria-label=t(locale.get(), "forms.dismiss")
                            on:click=move |_| status.update(|s| s.dismiss())
                        >
                            "×"
                        </button>
                    </div>
                }
                .into_any()
            })
        }
    }
}

#[component]
fn SubmitButton(status: RwSignal<FormStatus>, label_key: &'static str) -> impl IntoView {
    let locale = use_locale();
    view! {
        <button
            type="submit"
            class="btn btn-primary"
            disabled=move || status.with(|s| s.is_submitting() || s.is_success())
        >
            {move || {
                if status.with(|s| s.is_submitting()) {
                    t(locale.get(), "forms.sending")
                } else {
                    t(locale.get(), label_key)
                }
            }}
        </button>
    }
}

#[component]
pub fn ContactFormView() -> impl IntoView {
    let locale = use_locale();
    let form = RwSignal::new(ContactForm::default());
    let state = FormState::new();

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        state.submit(FormSubmission::Contact(form.get_untracked()), locale.get_untracked());
    };

    view! {
        <form class="form contact-form" on:submit=on_submit novalidate>
            <StatusBanner status=state.status success_key="forms.contact.success"/>
            <Field
                label_key="forms.name"
                name="name"
                required=true
                value=Signal::derive(move || form.with(|f| f.name.clone()))
                on_input=Callback::new(move |v: String| form.update(|f| f.name = v))
                errors=state.errors
            />
            <Field
                label_key="forms.email"
                name="email"
                input_type="email"
                required=true
                value=Signal::derive(move || form.with(|f| f.email.clone()))
                on_input=Callback::new(move |v: String| form.update(|f| f.email = v))
                errors=state.errors
            />
            <Field
                label_key="forms.phone"
                name="phone"
                input_type="tel"
                value=Signal::derive(move || form.with(|f| f.phone.clone()))
                on_input=Callback::new(move |v: String| form.update(|f| f.phone = v))
                errors=state.errors
            />
            <Field
                label_key="forms.subject"
                name="subject"
                required=true
                value=Signal::derive(move || form.with(|f| f.subject.clone()))
                on_input=Callback::new(move |v: String| form.update(|f| f.subject = v))
                errors=state.errors
            />
            <Field
                label_key="forms.message"
                name="message"
                required=true
                multiline=true
                value=Signal::derive(move || form.with(|f| f.message.clone()))
                on_input=Callback::new(move |v: String| form.update(|f| f.message = v))
                errors=state.errors
            />
            <SubmitButton status=state.status label_key="forms.contact.submit"/>
        </form>
    }
}

#[component]
pub fn EnrollmentFormView() -> impl IntoView {
    let locale = use_locale();
    let store = ContentStore::embedded();

    // `?program=<id>` from a program page preselects that program.
    let preselected = use_query_map()
        .with_untracked(|q| q.get("program"))
        .filter(|id| store.program(id).is_some())
        .unwrap_or_default();

    let form = RwSignal::new(EnrollmentForm {
        program_id: preselected,
        ..Default::default()
    });
    let state = FormState::new();

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        state.submit(FormSubmission::Enrollment(form.get_untracked()), locale.get_untracked());
    };

    view! {
        <form class="form enrollment-form" on:submit=on_submit novalidate>
            <StatusBanner status=state.status success_key="forms.enroll.success"/>
            <Field
                label_key="forms.full_name"
                name="full_name"
                required=true
                value=Signal::derive(move || form.with(|f| f.full_name.clone()))
                on_input=Callback::new(move |v: String| form.update(|f| f.full_name = v))
                errors=state.errors
            />
            <Field
                label_key="forms.email"
                name="email"
                input_type="email"
                required=true
                value=Signal::derive(move || form.with(|f| f.email.clone()))
                on_input=Callback::new(move |v: String| form.update(|f| f.email = v))
                errors=state.errors
            />
            <Field
                label_key="forms.phone"
                name="phone"
                input_type="tel"
                required=true
                value=Signal::derive(move || form.with(|f| f.phone.clone()))
                on_input=Callback::new(move |v: String| form.update(|f| f.phone = v))
                errors=state.errors
            />
            <div class="field" class:invalid=move || state.errors.with(|e| e.get("program_id").is_some())>
                <label for="program_id">{move || t(locale.get(), "forms.program")} " *"</label>
                <select
                    id="program_id"
                    prop:value=move || form.with(|f| f.program_id.clone())
                    on:change=move |ev| form.update(|f| f.program_id = event_target_value(&ev))
                >
                    <option value="">{move || t(locale.get(), "forms.choose")}</option>
                    {store
                        .programs()
                        .iter()
                        .map(|p| view! { <option value=p.id.clone()>{move || p.title.get(locale.get()).to_string()}</option> })
                        .collect_view()}
                </select>
                <FieldMessage name="program_id" errors=state.errors/>
            </div>
            <div class="field" class:invalid=move || state.errors.with(|e| e.get("preferred_schedule").is_some())>
                <label for="preferred_schedule">{move || t(locale.get(), "forms.schedule")} " *"</label>
                <select
                    id="preferred_schedule"
                    prop:value=move || form.with(|f| f.preferred_schedule.clone())
                    on:change=move |ev| form.update(|f| f.preferred_schedule = event_target_value(&ev))
                >
                    <option value="">{move || t(locale.get(), "forms.choose")}</option>
                    {SCHEDULE_OPTIONS
                        .iter()
                        .map(|option| {
                            let key = schedule_label_key(option);
                            view! { <option value=*option>{move || t(locale.get(), key)}</option> }
                        })
                        .collect_view()}
                </select>
                <FieldMessage name="preferred_schedule" errors=state.errors/>
            </div>
            <Field
                label_key="forms.message"
                name="message"
                multiline=true
                value=Signal::derive(move || form.with(|f| f.message.clone()))
                on_input=Callback::new(move |v: String| form.update(|f| f.message = v))
                errors=state.errors
            />
            <div class="field checkbox" class:invalid=move || state.errors.with(|e| e.get("accept_terms").is_some())>
                <label>
                    <input
                        type="checkbox"
                        prop:checked=move || form.with(|f| f.accept_terms)
                        on:change=move |ev| form.update(|f| f.accept_terms = event_target_checked(&ev))
                    />
                    {move || t(locale.get(), "forms.accept_terms")}
                </label>
                <FieldMessage name="accept_terms" errors=state.errors/>
            </div>
            <SubmitButton status=state.status label_key="forms.enroll.submit"/>
        </form>
    }
}

/// Catalog key of a schedule option's label.
fn schedule_label_key(option: &str) -> &'static str {
    match option {
        "morning" => "forms.schedule.morning",
        "afternoon" => "forms.schedule.afternoon",
        "evening" => "forms.schedule.evening",
        _ => "forms.schedule.weekend",
    }
}

#[component]
pub fn NewsletterSignup() -> impl IntoView {
    let locale = use_locale();
    let email = RwSignal::new(String::new());
    let state = FormState::new();

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let locale = locale.get_untracked();
        let form = NewsletterForm {
            email: email.get_untracked(),
            locale,
        };
        state.submit(FormSubmission::Newsletter(form), locale);
    };

    view! {
        <form class="newsletter-form" on:submit=on_submit novalidate>
            <StatusBanner status=state.status success_key="forms.newsletter.success"/>
            <input
                type="email"
                placeholder=move || t(locale.get(), "forms.email")
                prop:value=email
                on:input=move |ev| email.set(event_target_value(&ev))
            />
            <SubmitButton status=state.status label_key="forms.newsletter.submit"/>
            <FieldMessage name="email" errors=state.errors/>
        </form>
    }
}
