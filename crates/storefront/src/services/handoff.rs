//! Order handoff via external messaging channels.
//!
//! There is no payment processor behind this storefront: completing an order
//! means generating a pre-filled message and sending the customer to
//! WhatsApp or their mail client with it. This module builds the message
//! bodies and the deep links. Dispatch is fire-and-forget: once the link is
//! issued there is no callback, no retry, and no way to know whether the
//! order was actually sent.

use amara_core::{Cart, CustomOrderForm, Price};
use rust_decimal::Decimal;

/// Customer contact and shipping fields collected at checkout.
#[derive(Debug, Clone, Default)]
pub struct OrderContact {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub postal_code: String,
    pub country: String,
    pub notes: String,
}

/// Order totals at the configured tax rate.
///
/// One rate feeds both the rendered summary and the outgoing message, so
/// the two can never disagree.
#[derive(Debug, Clone, Copy)]
pub struct OrderTotals {
    pub subtotal: Price,
    pub tax: Price,
    pub total: Price,
}

impl OrderTotals {
    /// Compute totals for the cart at the given tax rate, rounded to two
    /// decimal places.
    #[must_use]
    pub fn compute(cart: &Cart, tax_rate: Decimal) -> Self {
        let subtotal = cart.subtotal();
        let tax = Price::new(
            (subtotal.amount * tax_rate).round_dp(2),
            subtotal.currency_code,
        );
        Self {
            subtotal,
            tax,
            total: subtotal + tax,
        }
    }
}

// =============================================================================
// Message Bodies
// =============================================================================

/// Format the checkout order into the text block embedded in both channels.
#[must_use]
pub fn order_summary(contact: &OrderContact, cart: &Cart, totals: &OrderTotals) -> String {
    let mut out = String::new();

    out.push_str("Customer Information:\n");
    out.push_str(&format!(
        "Name: {} {}\n",
        contact.first_name, contact.last_name
    ));
    out.push_str(&format!("Email: {}\n", contact.email));
    out.push_str(&format!("Phone: {}\n", contact.phone));
    out.push_str(&format!(
        "Address: {}, {}, {}, {}\n",
        contact.address, contact.city, contact.postal_code, contact.country
    ));
    if !contact.notes.trim().is_empty() {
        out.push_str(&format!("Notes: {}\n", contact.notes));
    }

    out.push_str("\nOrder Details:\n");
    for line in cart.items() {
        out.push_str(&format!(
            "- {} (Size: {}, Qty: {}) - {}\n",
            line.product.name,
            line.size,
            line.quantity,
            line.line_total().display()
        ));
    }

    out.push_str(&format!("\nSubtotal: {}\n", totals.subtotal.display()));
    out.push_str(&format!("Tax: {}\n", totals.tax.display()));
    out.push_str(&format!("Total: {}", totals.total.display()));

    out
}

/// Format the custom-order form into the text block embedded in both
/// channels. Attached files appear by filename only; their content never
/// leaves the customer's machine.
#[must_use]
pub fn custom_summary(form: &CustomOrderForm) -> String {
    let mut out = String::new();

    out.push_str("Custom Abaya Design Request\n\n");

    out.push_str("Customer Information:\n");
    out.push_str(&format!("Name: {}\n", form.name));
    out.push_str(&format!("Email: {}\n", form.email));
    out.push_str(&format!("Phone: {}\n", form.phone));

    out.push_str("\nDesign Specifications:\n");
    out.push_str(&format!("Design Type: {}\n", form.design_type));
    out.push_str(&format!("Color: {}\n", form.color));
    out.push_str(&format!("Size: {}\n", form.size));
    out.push_str(&format!("Fabric: {}\n", form.fabric));
    out.push_str(&format!("Occasion: {}\n", form.occasion));

    out.push_str("\nMeasurements:\n");
    out.push_str(&format!("Bust: {}\"\n", form.measurements.bust));
    out.push_str(&format!("Waist: {}\"\n", form.measurements.waist));
    out.push_str(&format!("Hips: {}\"\n", form.measurements.hips));
    out.push_str(&format!("Length: {}\"\n", form.measurements.length));
    out.push_str(&format!("Sleeve Length: {}\"\n", form.measurements.sleeves));

    out.push_str(&format!("\nBudget Range: {}\n", form.budget));
    out.push_str(&format!("Timeline: {}\n", form.timeline));

    out.push_str(&format!("\nSpecial Requests:\n{}\n", form.special_requests));

    if form.files.is_empty() {
        out.push_str("\nNo reference files uploaded");
    } else {
        let names: Vec<&str> = form.files.iter().map(|file| file.name.as_str()).collect();
        out.push_str(&format!("\nReference Files: {}", names.join(", ")));
    }

    out
}

/// Wrap a checkout summary in the WhatsApp greeting.
#[must_use]
pub fn whatsapp_order_message(store_name: &str, summary: &str) -> String {
    format!("Hello! I would like to place an order from {store_name}:\n\n{summary}")
}

/// Subject and body for the checkout email channel.
#[must_use]
pub fn email_order_message(store_name: &str, summary: &str) -> (String, String) {
    (
        format!("New Order from {store_name} Website"),
        format!(
            "Dear {store_name} Team,\n\nI would like to place the following order:\n\n{summary}\n\nPlease confirm the order and payment details.\n\nThank you!"
        ),
    )
}

/// Wrap a custom-design summary in the WhatsApp greeting.
#[must_use]
pub fn whatsapp_custom_message(store_name: &str, summary: &str) -> String {
    format!("Hello! I would like to request a custom abaya design:\n\n{summary}")
}

/// Subject and body for the custom-design email channel.
#[must_use]
pub fn email_custom_message(store_name: &str, summary: &str) -> (String, String) {
    (
        format!("Custom Abaya Design Request - {store_name}"),
        format!(
            "Dear {store_name} Team,\n\nI would like to request a custom abaya design with the following specifications:\n\n{summary}\n\nPlease contact me to discuss the design details and pricing.\n\nThank you!"
        ),
    )
}

// =============================================================================
// Deep Links
// =============================================================================

/// Build a WhatsApp deep link carrying the message.
#[must_use]
pub fn whatsapp_link(number: &str, message: &str) -> String {
    format!("https://wa.me/{number}?text={}", urlencoding::encode(message))
}

/// Build a mailto deep link carrying subject and body.
#[must_use]
pub fn mailto_link(recipient: &str, subject: &str, body: &str) -> String {
    format!(
        "mailto:{recipient}?subject={}&body={}",
        urlencoding::encode(subject),
        urlencoding::encode(body)
    )
}
