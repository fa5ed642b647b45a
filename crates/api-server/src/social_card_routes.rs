//! Social card API routes.
//!
//! One analysis fetch per request, rendered as a JSON card, Reddit comment or
//! Discord embed.

use analysis_core::normalize_ticker;
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use social_cards::{render, CardData, CardFormat};

use crate::{AppError, AppState};

#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct SocialCardQuery {
    /// Stock ticker, e.g. `AAPL` or `$aapl`.
    #[serde(default)]
    pub ticker: Option<String>,
    /// `json` (default), `reddit` or `discord`. Unknown values render JSON.
    #[serde(default)]
    pub format: Option<String>,
}

pub fn social_card_routes() -> Router<AppState> {
    Router::new().route("/api/social-card", get(get_social_card))
}

#[utoipa::path(
    get,
    path = "/api/social-card",
    params(SocialCardQuery),
    responses(
        (status = 200, description = "Rendered card (JSON, Reddit markdown or Discord embed)"),
        (status = 400, description = "Missing ticker"),
        (status = 404, description = "Unknown ticker, proxied from the analysis API")
    ),
    tag = "Share"
)]
pub async fn get_social_card(
    State(state): State<AppState>,
    query: Result<Query<SocialCardQuery>, QueryRejection>,
) -> Result<Response, AppError> {
    let Query(query) = query.map_err(|rejection| {
        AppError::with_status(
            StatusCode::BAD_REQUEST,
            anyhow::anyhow!("Invalid query: {}", rejection.body_text()),
        )
    })?;
    let ticker = query
        .ticker
        .as_deref()
        .and_then(normalize_ticker)
        .ok_or_else(|| {
            AppError::with_status(
                StatusCode::BAD_REQUEST,
                anyhow::anyhow!("Missing required parameter: ticker"),
            )
        })?;
    let format = CardFormat::parse(query.format.as_deref());

    tracing::info!("Generating {:?} social card for {}", format, ticker);

    let analysis = state
        .cards
        .analyze(&ticker)
        .await
        .map_err(|e| AppError::from_analysis(&ticker, e))?;

    let card = CardData::from_analysis(&analysis);
    let body = render(format, &card, &state.branding)
        .to_body()
        .map_err(|e| anyhow::anyhow!("Failed to serialize card for {}: {}", ticker, e))?;

    Ok(([(header::CONTENT_TYPE, format.content_type())], body).into_response())
}
