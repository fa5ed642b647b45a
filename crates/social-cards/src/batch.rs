use analysis_core::AnalysisProvider;

use crate::card::{Branding, CardData};
use crate::formats::{render, CardFormat, RenderedCard};

/// Render cards for several tickers one after another.
///
/// Tickers whose analysis fails are logged and skipped. JSON and Discord
/// batches become a JSON array; Reddit comments are separated by a rule.
pub async fn render_batch(
    provider: &dyn AnalysisProvider,
    tickers: &[String],
    format: CardFormat,
    branding: &Branding,
) -> Result<String, serde_json::Error> {
    let mut rendered = Vec::with_capacity(tickers.len());

    for ticker in tickers {
        tracing::info!("Analyzing {}...", ticker);
        match provider.analyze(ticker).await {
            Ok(analysis) => {
                let card = CardData::from_analysis(&analysis);
                rendered.push(render(format, &card, branding));
            }
            Err(e) => tracing::warn!("Error analyzing {}: {}", ticker, e),
        }
    }

    match format {
        CardFormat::Reddit => Ok(rendered
            .into_iter()
            .filter_map(|r| match r {
                RenderedCard::Reddit(text) => Some(text),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("\n\n---\n\n")),
        CardFormat::Json | CardFormat::Discord => {
            let values = rendered
                .into_iter()
                .map(|r| match r {
                    RenderedCard::Json(card) => serde_json::to_value(card),
                    RenderedCard::Discord(embed) => serde_json::to_value(embed),
                    RenderedCard::Reddit(text) => Ok(serde_json::Value::String(text)),
                })
                .collect::<Result<Vec<_>, _>>()?;
            serde_json::to_string_pretty(&values)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use analysis_core::{
        AnalysisError, AnalysisMode, AnalysisResult, Confidence, Metrics, Signal,
    };
    use async_trait::async_trait;

    struct FixtureProvider;

    #[async_trait]
    impl AnalysisProvider for FixtureProvider {
        async fn analyze(&self, ticker: &str) -> Result<AnalysisResult, AnalysisError> {
            if ticker == "FAIL" {
                return Err(AnalysisError::Upstream {
                    status: 404,
                    message: Some("not found".to_string()),
                });
            }
            Ok(AnalysisResult {
                ticker: ticker.to_string(),
                company_name: None,
                current_price: None,
                analysis_mode: AnalysisMode::Growth,
                metrics: Metrics { peg_ratio: Some(0.9), ..Default::default() },
                signal: Signal::Buy,
                confidence: Confidence::High,
                headline: None,
                anchor: None,
                share_urls: None,
                data_quality: None,
                warnings: Vec::new(),
                timestamp: None,
            })
        }
    }

    fn tickers(list: &[&str]) -> Vec<String> {
        list.iter().map(|t| t.to_string()).collect()
    }

    #[tokio::test]
    async fn test_json_batch_skips_failures() {
        let out = render_batch(
            &FixtureProvider,
            &tickers(&["NVDA", "FAIL", "AMD"]),
            CardFormat::Json,
            &Branding::default(),
        )
        .await
        .unwrap();

        let parsed: Vec<serde_json::Value> = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0]["ticker"], "NVDA");
        assert_eq!(parsed[1]["ticker"], "AMD");
    }

    #[tokio::test]
    async fn test_reddit_batch_is_separated_by_rules() {
        let out = render_batch(
            &FixtureProvider,
            &tickers(&["NVDA", "AMD"]),
            CardFormat::Reddit,
            &Branding::default(),
        )
        .await
        .unwrap();

        assert_eq!(out.matches("\n\n---\n\n").count(), 1);
        assert!(out.contains("$NVDA Analysis"));
        assert!(out.contains("$AMD Analysis"));
    }

    #[tokio::test]
    async fn test_discord_batch_is_array_of_embeds() {
        let out = render_batch(
            &FixtureProvider,
            &tickers(&["MSFT"]),
            CardFormat::Discord,
            &Branding::default(),
        )
        .await
        .unwrap();

        let parsed: Vec<serde_json::Value> = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed[0]["title"], "$MSFT - BUY");
        assert_eq!(parsed[0]["color"], 0x10B981);
    }
}
