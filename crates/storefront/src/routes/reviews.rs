//! Customer reviews page.
//!
//! Reviews are a static in-memory list; filtering, sorting, and the rating
//! aggregates are computed per request. The submission form performs no
//! persistence: posting a review only returns the moderation notice.

use askama::Template;
use askama_web::WebTemplate;
use axum::{Form, extract::Query, extract::State, response::IntoResponse};
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::instrument;

use crate::filters;
use crate::state::AppState;

/// A customer review for display.
#[derive(Clone)]
pub struct Review {
    pub reviewer_name: String,
    pub rating: u8,
    pub title: String,
    pub body: String,
    pub product_name: String,
    pub date: NaiveDate,
    pub helpful: u32,
    pub verified: bool,
}

impl Review {
    /// Date formatted for display (e.g. "2024-05-15").
    #[must_use]
    pub fn date_display(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}

/// Static review data (can be replaced with dynamic data later).
#[must_use]
pub fn all_reviews() -> Vec<Review> {
    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
    }

    vec![
        Review {
            reviewer_name: "Aisha Rahman".to_string(),
            rating: 5,
            title: "Absolutely Beautiful!".to_string(),
            body: "I ordered the Elegant Flow Abaya and it exceeded my expectations. The quality is outstanding and the fit is perfect. The fabric is so comfortable and the design is exactly what I was looking for. Will definitely order again!".to_string(),
            product_name: "Elegant Flow Abaya".to_string(),
            date: date(2024, 5, 15),
            helpful: 12,
            verified: true,
        },
        Review {
            reviewer_name: "Fatima Al-Zahra".to_string(),
            rating: 5,
            title: "Perfect for Special Occasions".to_string(),
            body: "The Black Lace Sleeve Abaya is stunning! I wore it to a wedding and received so many compliments. The lace detailing is exquisite and the overall quality is top-notch. Shipping was fast too!".to_string(),
            product_name: "Black Lace Sleeve Abaya".to_string(),
            date: date(2024, 5, 10),
            helpful: 8,
            verified: true,
        },
        Review {
            reviewer_name: "Mariam Hassan".to_string(),
            rating: 4,
            title: "Great Quality, Love the Color".to_string(),
            body: "The Sage Green Belted Abaya is beautiful and well-made. The color is exactly as shown in the pictures. Only reason for 4 stars instead of 5 is that it runs slightly large, but still very happy with my purchase.".to_string(),
            product_name: "Sage Green Belted Abaya".to_string(),
            date: date(2024, 5, 8),
            helpful: 6,
            verified: true,
        },
        Review {
            reviewer_name: "Khadija Ahmed".to_string(),
            rating: 5,
            title: "Excellent Customer Service".to_string(),
            body: "Not only is the abaya beautiful, but the customer service was exceptional. I had questions about sizing and they were so helpful. The custom design service is amazing too - they really listen to what you want.".to_string(),
            product_name: "Custom Design Service".to_string(),
            date: date(2024, 5, 5),
            helpful: 15,
            verified: true,
        },
        Review {
            reviewer_name: "Zainab Ali".to_string(),
            rating: 5,
            title: "My Go-To Brand Now".to_string(),
            body: "I've ordered three abayas from Amara and each one has been perfect. The quality is consistent, the designs are modern yet modest, and the prices are reasonable. This is definitely my go-to brand now!".to_string(),
            product_name: "Multiple Products".to_string(),
            date: date(2024, 5, 1),
            helpful: 20,
            verified: true,
        },
        Review {
            reviewer_name: "Amina Yusuf".to_string(),
            rating: 4,
            title: "Beautiful Fabric".to_string(),
            body: "The fabric quality is really impressive. It's soft, breathable, and drapes beautifully. The only minor issue was with the delivery time, but it was worth the wait. The abaya is exactly what I wanted.".to_string(),
            product_name: "Light Khaki Open Abaya".to_string(),
            date: date(2024, 4, 28),
            helpful: 4,
            verified: true,
        },
    ]
}

/// Sort order for the review list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ReviewSort {
    #[default]
    Newest,
    Helpful,
}

/// Filter and sort query parameters.
#[derive(Debug, Deserialize, Default)]
pub struct ReviewQuery {
    /// Only show reviews with exactly this star rating. The "All Ratings"
    /// option submits an empty value, which must read as no filter.
    #[serde(default, deserialize_with = "empty_as_none")]
    pub rating: Option<u8>,
    #[serde(default)]
    pub sort: ReviewSort,
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<u8>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref() {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

/// Apply filter and sort to the review list.
#[must_use]
pub fn filter_and_sort(mut reviews: Vec<Review>, query: &ReviewQuery) -> Vec<Review> {
    if let Some(rating) = query.rating {
        reviews.retain(|review| review.rating == rating);
    }
    match query.sort {
        ReviewSort::Newest => reviews.sort_by(|a, b| b.date.cmp(&a.date)),
        ReviewSort::Helpful => reviews.sort_by(|a, b| b.helpful.cmp(&a.helpful)),
    }
    reviews
}

/// Per-star counts for the rating breakdown bars, 5 stars first.
#[derive(Clone)]
pub struct StarCount {
    pub stars: u8,
    pub count: usize,
    pub percent: u32,
}

fn star_counts(reviews: &[Review]) -> Vec<StarCount> {
    (1..=5u8)
        .rev()
        .map(|stars| {
            let count = reviews.iter().filter(|r| r.rating == stars).count();
            #[allow(clippy::cast_possible_truncation)]
            let percent = if reviews.is_empty() {
                0
            } else {
                (count * 100 / reviews.len()) as u32
            };
            StarCount {
                stars,
                count,
                percent,
            }
        })
        .collect()
}

fn average_rating(reviews: &[Review]) -> String {
    if reviews.is_empty() {
        return "0.0".to_string();
    }
    let sum: u32 = reviews.iter().map(|r| u32::from(r.rating)).sum();
    #[allow(clippy::cast_precision_loss)]
    let average = f64::from(sum) / reviews.len() as f64;
    format!("{average:.1}")
}

/// One option in the star-rating filter dropdown.
#[derive(Clone)]
pub struct FilterOption {
    pub stars: u8,
    pub selected: bool,
}

/// Reviews page template.
#[derive(Template, WebTemplate)]
#[template(path = "reviews/index.html")]
pub struct ReviewsTemplate {
    pub store_name: String,
    pub cart_count: u32,
    pub reviews: Vec<Review>,
    pub average: String,
    pub total: usize,
    pub breakdown: Vec<StarCount>,
    pub filter_options: Vec<FilterOption>,
    pub notice: Option<String>,
}

fn render(state: &AppState, query: &ReviewQuery, notice: Option<String>) -> ReviewsTemplate {
    let all = all_reviews();
    let breakdown = star_counts(&all);
    let average = average_rating(&all);
    let total = all.len();

    ReviewsTemplate {
        store_name: state.config().store_name.clone(),
        cart_count: state.cart().count(),
        reviews: filter_and_sort(all, query),
        average,
        total,
        breakdown,
        filter_options: (1..=5u8)
            .rev()
            .map(|stars| FilterOption {
                stars,
                selected: query.rating == Some(stars),
            })
            .collect(),
        notice,
    }
}

/// Display the reviews page.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<ReviewQuery>,
) -> impl IntoResponse {
    render(&state, &query, None)
}

/// Review submission form data. Accepted and discarded: there is no review
/// store and no moderation pipeline behind this form.
#[derive(Debug, Deserialize)]
pub struct ReviewForm {
    pub name: String,
    pub email: String,
    pub rating: u8,
    pub title: String,
    pub review: String,
    pub product: String,
}

/// Accept a review submission and answer with the moderation notice.
#[instrument(skip(state, form), fields(product = %form.product))]
pub async fn submit(
    State(state): State<AppState>,
    Form(form): Form<ReviewForm>,
) -> impl IntoResponse {
    tracing::info!(reviewer = %form.name, rating = form.rating, "Review submitted");
    render(
        &state,
        &ReviewQuery::default(),
        Some("Thank you for your review! It will be published after moderation.".to_string()),
    )
}
