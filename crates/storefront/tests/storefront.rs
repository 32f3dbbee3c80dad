//! Router-level tests.
//!
//! These drive the real router in-process with `tower::ServiceExt::oneshot`,
//! covering the storefront flows end to end: browsing, cart round trips,
//! the checkout handoff, and the custom-design wizard.

#![allow(clippy::unwrap_used)]

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use tower::ServiceExt;

use amara_storefront::catalog::Catalog;
use amara_storefront::config::{HandoffConfig, StorefrontConfig};
use amara_storefront::state::AppState;

const TEST_CATALOG: &str = r#"[
    {
        "id": "abaya-a",
        "name": "Abaya A",
        "description": "Test abaya.",
        "price": { "amount": "100.00" },
        "image": "/static/images/products/abaya-a.jpg"
    },
    {
        "id": "abaya-b",
        "name": "Abaya B",
        "description": "Another test abaya.",
        "price": { "amount": "80.50" },
        "image": "/static/images/products/abaya-b.jpg"
    }
]"#;

fn test_app() -> Router {
    let config = StorefrontConfig {
        host: "127.0.0.1".parse().unwrap(),
        port: 0,
        catalog_path: "unused".into(),
        store_name: "Amara Abayas".to_string(),
        handoff: HandoffConfig {
            whatsapp_number: "971521234567".to_string(),
            order_email: "orders@amara-abayas.com".to_string(),
        },
        tax_rate: "0.05".parse().unwrap(),
        sentry_dsn: None,
    };
    let catalog = Catalog::from_json(TEST_CATALOG).unwrap();
    amara_storefront::app(AppState::new(config, catalog))
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn post_form(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn location(response: &axum::response::Response) -> String {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

#[tokio::test]
async fn health_is_ok() {
    let app = test_app();
    let response = app.oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "ok");
}

#[tokio::test]
async fn home_and_listing_render() {
    let app = test_app();

    let response = app.clone().oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("Abaya A"));

    let response = app.oneshot(get("/products")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("AED 80.50"));
}

#[tokio::test]
async fn unknown_product_renders_not_found_page() {
    let app = test_app();
    let response = app.oneshot(get("/products/no-such-abaya")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_text(response).await;
    assert!(body.contains("Product Not Found"));
    assert!(body.contains("/products"));
}

#[tokio::test]
async fn cart_round_trip_updates_count_and_subtotal() {
    let app = test_app();

    // Two adds of the same (product, size) merge into one line.
    for _ in 0..2 {
        let response = app
            .clone()
            .oneshot(post_form("/cart/add", "product_id=abaya-a&size=M&quantity=1"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response
                .headers()
                .get("HX-Trigger")
                .and_then(|v| v.to_str().ok()),
            Some("cart-updated")
        );
    }

    let response = app.clone().oneshot(get("/cart/count")).await.unwrap();
    assert!(body_text(response).await.contains('2'));

    // A different size is a distinct line.
    app.clone()
        .oneshot(post_form("/cart/add", "product_id=abaya-a&size=L&quantity=1"))
        .await
        .unwrap();

    let response = app.clone().oneshot(get("/cart")).await.unwrap();
    let body = body_text(response).await;
    assert!(body.contains("Size: M"));
    assert!(body.contains("Size: L"));
    assert!(body.contains("AED 300.00"));

    // Driving a quantity to zero removes the line.
    let response = app
        .clone()
        .oneshot(post_form(
            "/cart/update",
            "product_id=abaya-a&size=M&quantity=0",
        ))
        .await
        .unwrap();
    let body = body_text(response).await;
    assert!(!body.contains("Size: M"));
    assert!(body.contains("AED 100.00"));

    let response = app.oneshot(get("/cart/count")).await.unwrap();
    assert!(body_text(response).await.contains('1'));
}

#[tokio::test]
async fn add_unknown_product_is_rejected() {
    let app = test_app();
    let response = app
        .oneshot(post_form("/cart/add", "product_id=ghost&size=M"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

const CHECKOUT_FIELDS: &str = "email=aisha%40example.com&phone=%2B971501234567\
&first_name=Aisha&last_name=Rahman&address=12+Palm+Street";

#[tokio::test]
async fn checkout_whatsapp_redirects_and_clears_cart() {
    let app = test_app();

    app.clone()
        .oneshot(post_form("/cart/add", "product_id=abaya-a&size=M&quantity=2"))
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(post_form("/checkout/whatsapp", CHECKOUT_FIELDS))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let target = location(&response);
    assert!(target.starts_with("https://wa.me/971521234567?text="));
    // Subtotal 200.00 plus the configured 5% tax.
    assert!(target.contains("Subtotal%3A%20AED%20200.00"));
    assert!(target.contains("Tax%3A%20AED%2010.00"));
    assert!(target.contains("Total%3A%20AED%20210.00"));

    // Cleared on dispatch, before any external confirmation.
    let response = app.oneshot(get("/cart/count")).await.unwrap();
    assert!(body_text(response).await.contains('0'));
}

#[tokio::test]
async fn checkout_email_redirects_to_mailto() {
    let app = test_app();

    app.clone()
        .oneshot(post_form("/cart/add", "product_id=abaya-b&size=S&quantity=1"))
        .await
        .unwrap();

    let response = app
        .oneshot(post_form("/checkout/email", CHECKOUT_FIELDS))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let target = location(&response);
    assert!(target.starts_with("mailto:orders@amara-abayas.com?subject="));
    assert!(target.contains("&body="));
}

#[tokio::test]
async fn checkout_blocks_on_missing_required_field() {
    let app = test_app();

    app.clone()
        .oneshot(post_form("/cart/add", "product_id=abaya-a&size=M&quantity=1"))
        .await
        .unwrap();

    // No phone.
    let response = app
        .clone()
        .oneshot(post_form(
            "/checkout/whatsapp",
            "email=aisha%40example.com&first_name=Aisha&last_name=Rahman&address=12+Palm+Street",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("Please fill in all required fields"));

    // The cart survives a blocked submission.
    let response = app.oneshot(get("/cart/count")).await.unwrap();
    assert!(body_text(response).await.contains('1'));
}

#[tokio::test]
async fn checkout_with_empty_cart_does_not_redirect() {
    let app = test_app();
    let response = app
        .oneshot(post_form("/checkout/whatsapp", CHECKOUT_FIELDS))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("No items to checkout"));
}

async fn advance_wizard_to_summary(app: &Router) {
    // Step 1 -> 2 carries the contact fields; the rest just move.
    app.clone()
        .oneshot(post_form(
            "/custom-design",
            "action=next&name=Aisha+Rahman&email=aisha%40example.com",
        ))
        .await
        .unwrap();
    app.clone()
        .oneshot(post_form("/custom-design", "action=next&design_type=embroidered"))
        .await
        .unwrap();
    app.clone()
        .oneshot(post_form("/custom-design", "action=next"))
        .await
        .unwrap();
}

#[tokio::test]
async fn wizard_walks_steps_and_clamps() {
    let app = test_app();

    let response = app.clone().oneshot(get("/custom-design")).await.unwrap();
    assert!(body_text(response).await.contains("Personal Information"));

    // Back at step 1 is a no-op.
    app.clone()
        .oneshot(post_form("/custom-design", "action=back"))
        .await
        .unwrap();
    let response = app.clone().oneshot(get("/custom-design")).await.unwrap();
    assert!(body_text(response).await.contains("Personal Information"));

    advance_wizard_to_summary(&app).await;

    // Next at step 4 is a no-op.
    app.clone()
        .oneshot(post_form("/custom-design", "action=next"))
        .await
        .unwrap();
    let response = app.oneshot(get("/custom-design")).await.unwrap();
    // Askama escapes the ampersand in the step title.
    assert!(body_text(response).await.contains("Final Details &amp; Submit"));
}

#[tokio::test]
async fn wizard_submit_with_minimal_fields_resets_form() {
    let app = test_app();
    advance_wizard_to_summary(&app).await;

    // Only name, email, and design type are filled; everything else the
    // earlier pages mark as required stays blank.
    let response = app
        .clone()
        .oneshot(post_form("/custom-design/whatsapp", ""))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let target = location(&response);
    assert!(target.starts_with("https://wa.me/971521234567?text="));
    assert!(target.contains("Custom%20Abaya%20Design%20Request"));
    assert!(target.contains("No%20reference%20files%20uploaded"));

    // The whole form is back at its initial state.
    let response = app.oneshot(get("/custom-design")).await.unwrap();
    let body = body_text(response).await;
    assert!(body.contains("Personal Information"));
    assert!(!body.contains("Aisha Rahman"));
}

#[tokio::test]
async fn wizard_submit_blocks_without_design_type() {
    let app = test_app();

    app.clone()
        .oneshot(post_form(
            "/custom-design",
            "action=next&name=Aisha&email=aisha%40example.com",
        ))
        .await
        .unwrap();
    app.clone()
        .oneshot(post_form("/custom-design", "action=next"))
        .await
        .unwrap();
    app.clone()
        .oneshot(post_form("/custom-design", "action=next"))
        .await
        .unwrap();

    let response = app
        .oneshot(post_form("/custom-design/email", ""))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("Please fill in all required fields"));
}

#[tokio::test]
async fn wizard_submit_before_final_step_is_redirected_back() {
    let app = test_app();
    let response = app
        .oneshot(post_form("/custom-design/whatsapp", "name=A&email=b&design_type=c"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/custom-design");
}

#[tokio::test]
async fn reviews_filter_and_submission_notice() {
    let app = test_app();

    // The "All Ratings" option submits an empty rating value.
    let response = app
        .clone()
        .oneshot(get("/reviews?rating=&sort=newest"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.clone().oneshot(get("/reviews?rating=4")).await.unwrap();
    let body = body_text(response).await;
    assert!(body.contains("Beautiful Fabric"));
    assert!(!body.contains("Absolutely Beautiful!"));

    let response = app
        .oneshot(post_form(
            "/reviews",
            "name=Aisha&email=aisha%40example.com&rating=5&title=Lovely&review=Great+abaya&product=Abaya+A",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        body_text(response)
            .await
            .contains("It will be published after moderation.")
    );
}

#[tokio::test]
async fn wizard_upload_attaches_reference_files() {
    let app = test_app();
    advance_wizard_to_summary(&app).await;

    let boundary = "reference-file-boundary";
    let body = format!(
        "--{boundary}\r\n\
         Content-Disposition: form-data; name=\"references\"; filename=\"sketch.pdf\"\r\n\
         Content-Type: application/pdf\r\n\r\n\
         not a real pdf\r\n\
         --{boundary}--\r\n"
    );
    let request = Request::builder()
        .method("POST")
        .uri("/custom-design/upload")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(body))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let response = app.clone().oneshot(get("/custom-design")).await.unwrap();
    assert!(body_text(response).await.contains("sketch.pdf"));

    // The attached filename rides along in the outgoing message.
    let response = app
        .oneshot(post_form("/custom-design/whatsapp", ""))
        .await
        .unwrap();
    assert!(location(&response).contains("sketch.pdf"));
}

