//! Checkout route handlers.
//!
//! Checkout collects contact and shipping fields, shows the order summary at
//! the configured tax rate, and completes by handing the order off to
//! WhatsApp or the customer's mail client. The cart is cleared the moment
//! the redirect is issued: there is no delivery confirmation, so a customer
//! who abandons the external app has already lost the cart. That is the
//! storefront's long-standing behavior, kept on purpose.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::instrument;

use crate::filters;
use crate::routes::cart::CartView;
use crate::services::handoff::{
    self, OrderContact, OrderTotals, email_order_message, whatsapp_order_message,
};
use crate::state::AppState;

/// Checkout form data: contact, shipping, and free-text notes.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CheckoutForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub postal_code: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub notes: String,
}

impl CheckoutForm {
    /// Require non-empty email, first name, last name, phone, and address.
    ///
    /// Field formats are not checked (no email regex, no phone pattern);
    /// the order desk follows up over the chosen channel anyway.
    fn validate(&self) -> Result<(), &'static str> {
        let required = [
            &self.email,
            &self.first_name,
            &self.last_name,
            &self.phone,
            &self.address,
        ];
        if required.iter().any(|field| field.trim().is_empty()) {
            Err("Please fill in all required fields")
        } else {
            Ok(())
        }
    }

    fn into_contact(self) -> OrderContact {
        OrderContact {
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            phone: self.phone,
            address: self.address,
            city: self.city,
            postal_code: self.postal_code,
            country: self.country,
            notes: self.notes,
        }
    }
}

/// Checkout page template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/show.html")]
pub struct CheckoutTemplate {
    pub store_name: String,
    pub cart_count: u32,
    pub cart: CartView,
    pub subtotal: String,
    pub tax: String,
    pub total: String,
    pub error: Option<&'static str>,
}

fn render(state: &AppState, error: Option<&'static str>) -> CheckoutTemplate {
    let (cart, totals) = {
        let cart = state.cart();
        (
            CartView::from(&*cart),
            OrderTotals::compute(&cart, state.config().tax_rate),
        )
    };

    CheckoutTemplate {
        store_name: state.config().store_name.clone(),
        cart_count: cart.item_count,
        cart,
        subtotal: totals.subtotal.display(),
        tax: totals.tax.display(),
        total: totals.total.display(),
        error,
    }
}

/// Display the checkout page.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> impl IntoResponse {
    render(&state, None)
}

/// The two external channels an order can be handed off to.
#[derive(Debug, Clone, Copy)]
enum Channel {
    WhatsApp,
    Email,
}

/// Validate, build the order message, clear the cart, and redirect to the
/// external deep link. Fire-and-forget: the clear happens on dispatch
/// intent, not on confirmed delivery.
fn submit(state: &AppState, form: CheckoutForm, channel: Channel) -> Response {
    if let Err(message) = form.validate() {
        return render(state, Some(message)).into_response();
    }

    let config = state.config();
    // Build the link and clear under one lock; render() takes the lock
    // itself, so it must not be called while the cart is held.
    let url = {
        let mut cart = state.cart();
        if cart.is_empty() {
            None
        } else {
            let totals = OrderTotals::compute(&cart, config.tax_rate);
            let summary = handoff::order_summary(&form.into_contact(), &cart, &totals);
            let url = match channel {
                Channel::WhatsApp => handoff::whatsapp_link(
                    &config.handoff.whatsapp_number,
                    &whatsapp_order_message(&config.store_name, &summary),
                ),
                Channel::Email => {
                    let (subject, body) = email_order_message(&config.store_name, &summary);
                    handoff::mailto_link(&config.handoff.order_email, &subject, &body)
                }
            };
            cart.clear();
            Some(url)
        }
    };

    let Some(url) = url else {
        return render(state, Some("Your cart is empty")).into_response();
    };

    tracing::info!(channel = ?channel, "Order handed off, cart cleared");
    Redirect::to(&url).into_response()
}

/// Complete the order via WhatsApp.
#[instrument(skip(state, form))]
pub async fn submit_whatsapp(
    State(state): State<AppState>,
    Form(form): Form<CheckoutForm>,
) -> Response {
    submit(&state, form, Channel::WhatsApp)
}

/// Complete the order via email.
#[instrument(skip(state, form))]
pub async fn submit_email(
    State(state): State<AppState>,
    Form(form): Form<CheckoutForm>,
) -> Response {
    submit(&state, form, Channel::Email)
}
