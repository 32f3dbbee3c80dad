//! Custom-design wizard route handlers.
//!
//! The wizard walks through four steps (contact, design, measurements,
//! final details). Each POST merges whatever fields the current page
//! carried before moving, so nothing typed is lost to navigation. The
//! terminal submits mirror checkout: build the request message, redirect to
//! the external channel, and reset the form whether or not the customer
//! follows through over there.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Multipart, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::instrument;

use amara_core::{CustomOrderForm, ReferenceFile};

use crate::error::AppError;
use crate::filters;
use crate::services::handoff::{
    self, custom_summary, email_custom_message, whatsapp_custom_message,
};
use crate::state::AppState;

/// Fields a wizard page may post. Every field is optional: each step's page
/// only carries its own inputs. `action` is the navigation direction and is
/// never merged into the form.
#[derive(Debug, Default, Deserialize)]
pub struct WizardFields {
    /// "next" or "back"; absent on terminal submits.
    pub action: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub design_type: Option<String>,
    pub color: Option<String>,
    pub fabric: Option<String>,
    pub occasion: Option<String>,
    pub size: Option<String>,
    pub budget: Option<String>,
    pub timeline: Option<String>,
    pub special_requests: Option<String>,
    pub bust: Option<String>,
    pub waist: Option<String>,
    pub hips: Option<String>,
    pub length: Option<String>,
    pub sleeves: Option<String>,
}

impl WizardFields {
    /// Merge posted values into the form. A posted-but-blank field
    /// overwrites: the customer cleared it.
    fn merge_into(self, form: &mut CustomOrderForm) {
        fn set(target: &mut String, value: Option<String>) {
            if let Some(value) = value {
                *target = value;
            }
        }

        set(&mut form.name, self.name);
        set(&mut form.email, self.email);
        set(&mut form.phone, self.phone);
        set(&mut form.design_type, self.design_type);
        set(&mut form.color, self.color);
        set(&mut form.fabric, self.fabric);
        set(&mut form.occasion, self.occasion);
        set(&mut form.size, self.size);
        set(&mut form.budget, self.budget);
        set(&mut form.timeline, self.timeline);
        set(&mut form.special_requests, self.special_requests);
        set(&mut form.measurements.bust, self.bust);
        set(&mut form.measurements.waist, self.waist);
        set(&mut form.measurements.hips, self.hips);
        set(&mut form.measurements.length, self.length);
        set(&mut form.measurements.sleeves, self.sleeves);
    }
}

// Select options offered by the wizard pages.
const DESIGN_TYPES: &[&str] = &[
    "traditional",
    "modern",
    "embroidered",
    "kimono",
    "butterfly",
    "kaftan",
    "custom",
];
const COLORS: &[&str] = &[
    "black",
    "navy",
    "brown",
    "grey",
    "beige",
    "burgundy",
    "emerald",
    "dusty-rose",
    "custom",
];
const FABRICS: &[&str] = &["crepe", "chiffon", "silk", "cotton", "linen", "jersey"];
const OCCASIONS: &[&str] = &["daily", "formal", "wedding", "religious", "work", "special"];
const SIZE_OPTIONS: &[&str] = &["XS", "S", "M", "L", "XL", "XXL", "custom"];
const BUDGETS: &[&str] = &["150-250", "250-400", "400-600", "600-800", "800+"];
const TIMELINES: &[&str] = &["2-3 weeks", "3-4 weeks", "1-2 months", "flexible"];

/// Wizard page template.
#[derive(Template, WebTemplate)]
#[template(path = "custom_design/show.html")]
pub struct CustomDesignTemplate {
    pub store_name: String,
    pub cart_count: u32,
    pub step: u8,
    pub step_title: &'static str,
    pub is_terminal: bool,
    pub form: CustomOrderForm,
    pub file_names: Vec<String>,
    pub error: Option<&'static str>,
    pub design_types: &'static [&'static str],
    pub colors: &'static [&'static str],
    pub fabrics: &'static [&'static str],
    pub occasions: &'static [&'static str],
    pub size_options: &'static [&'static str],
    pub budgets: &'static [&'static str],
    pub timelines: &'static [&'static str],
}

fn render(state: &AppState, error: Option<&'static str>) -> CustomDesignTemplate {
    let form = state.wizard().clone();
    CustomDesignTemplate {
        store_name: state.config().store_name.clone(),
        cart_count: state.cart().count(),
        step: form.step().number(),
        step_title: form.step().title(),
        is_terminal: form.step().is_terminal(),
        file_names: form.files.iter().map(|file| file.name.clone()).collect(),
        form,
        error,
        design_types: DESIGN_TYPES,
        colors: COLORS,
        fabrics: FABRICS,
        occasions: OCCASIONS,
        size_options: SIZE_OPTIONS,
        budgets: BUDGETS,
        timelines: TIMELINES,
    }
}

/// Display the wizard at its current step.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> impl IntoResponse {
    render(&state, None)
}

/// Merge the posted fields, then move one step forward or back. Movement
/// clamps at both ends, so stray posts cannot escape steps 1 through 4.
#[instrument(skip(state, form))]
pub async fn navigate(
    State(state): State<AppState>,
    Form(form): Form<WizardFields>,
) -> Redirect {
    {
        let mut wizard = state.wizard();
        let action = form.action.clone();
        form.merge_into(&mut wizard);
        match action.as_deref() {
            Some("back") => wizard.prev_step(),
            _ => wizard.next_step(),
        }
    }
    Redirect::to("/custom-design")
}

/// Attach design-reference files (multipart). Only the filename and length
/// are recorded; the bytes are dropped. Attachment is append-only.
#[instrument(skip(state, multipart))]
pub async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Redirect, AppError> {
    let mut files = Vec::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let Some(name) = field.file_name().map(ToOwned::to_owned) else {
            continue;
        };
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        files.push(ReferenceFile {
            name,
            size_bytes: u64::try_from(data.len()).unwrap_or(0),
        });
    }

    if !files.is_empty() {
        tracing::info!(count = files.len(), "Reference files attached");
        state.wizard().attach_files(files);
    }

    Ok(Redirect::to("/custom-design"))
}

/// The two external channels a custom request can be handed off to.
#[derive(Debug, Clone, Copy)]
enum Channel {
    WhatsApp,
    Email,
}

/// Terminal submit: merge the final page's fields, validate the three
/// required ones, build the request message, reset the whole form, and
/// redirect to the deep link. Like checkout, the reset is unconditional.
fn submit(state: &AppState, fields: WizardFields, channel: Channel) -> Response {
    let config = state.config();
    let outcome = {
        let mut wizard = state.wizard();
        if !wizard.step().is_terminal() {
            Outcome::NotAtFinalStep
        } else {
            fields.merge_into(&mut wizard);
            if wizard.validate_for_submit().is_err() {
                Outcome::MissingFields
            } else {
                let summary = custom_summary(&wizard);
                let url = match channel {
                    Channel::WhatsApp => handoff::whatsapp_link(
                        &config.handoff.whatsapp_number,
                        &whatsapp_custom_message(&config.store_name, &summary),
                    ),
                    Channel::Email => {
                        let (subject, body) = email_custom_message(&config.store_name, &summary);
                        handoff::mailto_link(&config.handoff.order_email, &subject, &body)
                    }
                };
                wizard.reset();
                Outcome::Dispatched(url)
            }
        }
    };

    match outcome {
        Outcome::NotAtFinalStep => Redirect::to("/custom-design").into_response(),
        Outcome::MissingFields => {
            render(state, Some("Please fill in all required fields")).into_response()
        }
        Outcome::Dispatched(url) => {
            tracing::info!(channel = ?channel, "Custom request handed off, form reset");
            Redirect::to(&url).into_response()
        }
    }
}

enum Outcome {
    NotAtFinalStep,
    MissingFields,
    Dispatched(String),
}

/// Submit the custom request via WhatsApp.
#[instrument(skip(state, form))]
pub async fn submit_whatsapp(
    State(state): State<AppState>,
    Form(form): Form<WizardFields>,
) -> Response {
    submit(&state, form, Channel::WhatsApp)
}

/// Submit the custom request via email.
#[instrument(skip(state, form))]
pub async fn submit_email(
    State(state): State<AppState>,
    Form(form): Form<WizardFields>,
) -> Response {
    submit(&state, form, Channel::Email)
}
