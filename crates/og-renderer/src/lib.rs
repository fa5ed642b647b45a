//! Open Graph share image rendering.
//!
//! Cards are laid out as 1200x630 SVG with the plotters SVG backend, then
//! rasterized to PNG with resvg using bundled fonts. [`generate`] never
//! fails: any fetch or render error yields the branded placeholder instead.

mod raster;
mod render;
mod text;

pub use raster::{png_dimensions, svg_to_png};
pub use render::{render_card, render_placeholder, HEIGHT, WIDTH};
pub use text::{headline_lines, truncate_headline, wrap_lines, HEADLINE_MAX_CHARS};

use analysis_core::{normalize_ticker, AnalysisError, AnalysisProvider};
use social_cards::{Branding, CardData};

pub const CONTENT_TYPE: &str = "image/png";

/// Last-resort 1200x630 image used if the placeholder itself cannot be drawn.
pub const STATIC_PLACEHOLDER_PNG: &[u8] = include_bytes!("../assets/placeholder.png");

/// A rendered share image.
#[derive(Debug, Clone)]
pub struct OgImage {
    pub png: Vec<u8>,
    /// True when the placeholder was served instead of the analysis card.
    pub fallback: bool,
}

impl OgImage {
    pub fn placeholder(branding: &Branding) -> Self {
        let png = render_placeholder(branding)
            .and_then(|svg| svg_to_png(&svg))
            .unwrap_or_else(|e| {
                tracing::error!("Placeholder render failed: {}", e);
                STATIC_PLACEHOLDER_PNG.to_vec()
            });
        Self { png, fallback: true }
    }
}

/// Fetch the analysis for `ticker` and render its share image.
pub async fn generate(
    provider: &dyn AnalysisProvider,
    ticker: &str,
    branding: &Branding,
) -> OgImage {
    match try_generate(provider, ticker, branding).await {
        Ok(png) => OgImage { png, fallback: false },
        Err(e) => {
            tracing::error!("OG image generation failed for {}: {}", ticker, e);
            OgImage::placeholder(branding)
        }
    }
}

async fn try_generate(
    provider: &dyn AnalysisProvider,
    ticker: &str,
    branding: &Branding,
) -> Result<Vec<u8>, AnalysisError> {
    let ticker = normalize_ticker(strip_image_extension(ticker))
        .ok_or_else(|| AnalysisError::InvalidPayload("empty ticker".to_string()))?;
    let analysis = provider.analyze(&ticker).await?;
    let card = CardData::from_analysis(&analysis);
    svg_to_png(&render_card(&card, branding)?)
}

/// Crawlers sometimes request `/api/og-image/AAPL.png`.
fn strip_image_extension(ticker: &str) -> &str {
    for ext in [".png", ".svg", ".PNG", ".SVG"] {
        if let Some(stripped) = ticker.strip_suffix(ext) {
            return stripped;
        }
    }
    ticker
}

#[cfg(test)]
mod tests {
    use super::*;
    use analysis_core::{AnalysisMode, AnalysisResult, Confidence, Metrics, Signal};
    use async_trait::async_trait;
    use rust_decimal_macros::dec;
    use std::sync::Mutex;

    struct RecordingProvider {
        seen: Mutex<Vec<String>>,
        fail: bool,
    }

    impl RecordingProvider {
        fn new(fail: bool) -> Self {
            Self { seen: Mutex::new(Vec::new()), fail }
        }
    }

    #[async_trait]
    impl AnalysisProvider for RecordingProvider {
        async fn analyze(&self, ticker: &str) -> Result<AnalysisResult, AnalysisError> {
            self.seen.lock().unwrap().push(ticker.to_string());
            if self.fail {
                return Err(AnalysisError::Transport("connection refused".to_string()));
            }
            Ok(AnalysisResult {
                ticker: ticker.to_string(),
                company_name: None,
                current_price: Some(dec!(42.10)),
                analysis_mode: AnalysisMode::Growth,
                metrics: Metrics { peg_ratio: Some(0.68), ..Default::default() },
                signal: Signal::Buy,
                confidence: Confidence::High,
                headline: Some("$AMD: GROWTH BUY! PEG ratio of 0.68.".to_string()),
                anchor: None,
                share_urls: None,
                data_quality: None,
                warnings: Vec::new(),
                timestamp: None,
            })
        }
    }

    #[tokio::test]
    async fn test_generate_renders_analysis() {
        let provider = RecordingProvider::new(false);
        let image = generate(&provider, "amd.png", &Branding::default()).await;

        assert!(!image.fallback);
        assert_eq!(png_dimensions(&image.png), Some((WIDTH, HEIGHT)));
        assert_eq!(provider.seen.lock().unwrap().clone(), vec!["AMD".to_string()]);
    }

    #[tokio::test]
    async fn test_generate_falls_back_on_provider_error() {
        let provider = RecordingProvider::new(true);
        let image = generate(&provider, "AMD", &Branding::default()).await;

        assert!(image.fallback);
        assert_eq!(png_dimensions(&image.png), Some((WIDTH, HEIGHT)));
    }

    #[tokio::test]
    async fn test_generate_blank_ticker_skips_fetch() {
        let provider = RecordingProvider::new(false);
        let image = generate(&provider, "  ", &Branding::default()).await;

        assert!(image.fallback);
        assert!(provider.seen.lock().unwrap().is_empty());
    }

    #[test]
    fn test_static_placeholder_dimensions() {
        assert_eq!(png_dimensions(STATIC_PLACEHOLDER_PNG), Some((WIDTH, HEIGHT)));
    }

    #[test]
    fn test_placeholder_differs_from_static_fallback() {
        let image = OgImage::placeholder(&Branding::default());
        assert!(image.fallback);
        assert_eq!(png_dimensions(&image.png), Some((WIDTH, HEIGHT)));
        assert_ne!(image.png, STATIC_PLACEHOLDER_PNG);
    }
}
