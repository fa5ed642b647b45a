//! Open Graph image route. Always answers 200 with an image.

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};

use crate::AppState;

/// Cache policy for a successfully rendered card.
pub const CACHE_RENDERED: &str = "public, max-age=3600, s-maxage=3600, stale-while-revalidate=86400";
/// Placeholders must not be cached, so a recovered backend is picked up.
pub const CACHE_FALLBACK: &str = "no-store";

pub fn og_image_routes() -> Router<AppState> {
    Router::new().route("/api/og-image/:ticker", get(get_og_image))
}

#[utoipa::path(
    get,
    path = "/api/og-image/{ticker}",
    params(("ticker" = String, Path, description = "Stock ticker symbol")),
    responses((status = 200, description = "1200x630 PNG share image, or a branded placeholder")),
    tag = "Share"
)]
pub async fn get_og_image(State(state): State<AppState>, Path(ticker): Path<String>) -> Response {
    let image = og_renderer::generate(state.images.as_ref(), &ticker, &state.branding).await;
    let cache_control = if image.fallback { CACHE_FALLBACK } else { CACHE_RENDERED };

    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, og_renderer::CONTENT_TYPE),
            (header::CACHE_CONTROL, cache_control),
        ],
        image.png,
    )
        .into_response()
}
