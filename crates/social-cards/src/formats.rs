use analysis_core::{AnalysisMode, Confidence, ShareUrls, Signal};
use chrono::{DateTime, SecondsFormat, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::card::{Branding, CardData};

/// Output format requested by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CardFormat {
    #[default]
    Json,
    Reddit,
    Discord,
}

impl CardFormat {
    /// Unknown or missing values fall through to [`CardFormat::Json`].
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
            Some("reddit") => CardFormat::Reddit,
            Some("discord") => CardFormat::Discord,
            _ => CardFormat::Json,
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            CardFormat::Reddit => "text/plain; charset=utf-8",
            CardFormat::Json | CardFormat::Discord => "application/json",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeyMetric {
    pub label: String,
    pub value: String,
}

/// Generic structured card.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonCard {
    pub ticker: String,
    pub company_name: Option<String>,
    pub signal: Signal,
    pub signal_label: &'static str,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub price: Option<Decimal>,
    pub analysis_mode: AnalysisMode,
    pub headline: Option<String>,
    pub key_metric: KeyMetric,
    pub confidence: Confidence,
    pub confidence_tier: u8,
    pub color: &'static str,
    pub emoji: &'static str,
    pub reasoning: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anchor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub share_urls: Option<ShareUrls>,
    pub footer: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiscordField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiscordFooter {
    pub text: String,
}

/// Discord embed object, shaped like the webhook API expects.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiscordEmbed {
    pub title: String,
    pub description: String,
    pub color: u32,
    pub fields: Vec<DiscordField>,
    pub footer: DiscordFooter,
    pub timestamp: String,
}

#[derive(Debug, Clone)]
pub enum RenderedCard {
    Json(JsonCard),
    Reddit(String),
    Discord(DiscordEmbed),
}

impl RenderedCard {
    /// Response body: pretty JSON for the structured formats, raw text for Reddit.
    pub fn to_body(&self) -> Result<String, serde_json::Error> {
        match self {
            RenderedCard::Json(card) => serde_json::to_string_pretty(card),
            RenderedCard::Reddit(text) => Ok(text.clone()),
            RenderedCard::Discord(embed) => serde_json::to_string_pretty(embed),
        }
    }
}

pub fn render(format: CardFormat, card: &CardData, branding: &Branding) -> RenderedCard {
    match format {
        CardFormat::Json => RenderedCard::Json(render_json(card, branding)),
        CardFormat::Reddit => RenderedCard::Reddit(render_reddit(card, branding)),
        CardFormat::Discord => RenderedCard::Discord(render_discord(card, branding, Utc::now())),
    }
}

pub fn render_json(card: &CardData, branding: &Branding) -> JsonCard {
    JsonCard {
        ticker: card.ticker.clone(),
        company_name: card.company_name.clone(),
        signal: card.signal,
        signal_label: card.signal.to_label(),
        price: card.price,
        analysis_mode: card.mode,
        headline: card.headline.clone(),
        key_metric: KeyMetric {
            label: card.metric_label().to_string(),
            value: card.metric_value().to_string(),
        },
        confidence: card.confidence,
        confidence_tier: card.confidence.tier(),
        color: card.style.hex_color,
        emoji: card.style.emoji,
        reasoning: card.reasoning.clone(),
        anchor: card.anchor.clone(),
        share_urls: card.share_urls.clone(),
        footer: branding.tagline(),
    }
}

/// Markdown comment for Reddit. Lines ending in two spaces are hard breaks.
pub fn render_reddit(card: &CardData, branding: &Branding) -> String {
    let mut lines = vec![
        format!("**{} ${} Analysis**", card.style.emoji, card.ticker),
        String::new(),
        format!(
            "**Signal:** {} | Confidence: {}  ",
            card.signal.to_label(),
            card.confidence_bar()
        ),
    ];
    if let Some(price) = card.price_text() {
        lines.push(format!("**Price:** {}  ", price));
    }
    if let Some(metric) = &card.metric {
        lines.push(format!("**{}:** {}", metric.card_label(), metric.value));
    }
    lines.push(String::new());
    lines.push(card.summary().to_string());
    lines.push(String::new());
    lines.push(format!("*Analysis: {}*  ", card.mode.description()));
    lines.push(format!("^({})", branding.tagline()));

    lines.join("\n")
}

pub fn render_discord(card: &CardData, branding: &Branding, now: DateTime<Utc>) -> DiscordEmbed {
    let mut fields = Vec::with_capacity(3);
    if let Some(price) = card.price_text() {
        fields.push(DiscordField { name: "Price".to_string(), value: price, inline: true });
    }
    if let Some(metric) = &card.metric {
        fields.push(DiscordField {
            name: metric.card_label().to_string(),
            value: metric.value.clone(),
            inline: true,
        });
    }
    fields.push(DiscordField {
        name: "Confidence".to_string(),
        value: card.confidence.capitalized().to_string(),
        inline: true,
    });

    DiscordEmbed {
        title: format!("${} - {}", card.ticker, card.signal.to_label()),
        description: card.summary().to_string(),
        color: card.style.discord_color,
        fields,
        footer: DiscordFooter {
            text: format!("{} \u{2022} {}", card.mode.description(), branding.domain),
        },
        timestamp: now.to_rfc3339_opts(SecondsFormat::Secs, true),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use analysis_core::{AnalysisResult, Metrics};
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn analysis(signal: Signal) -> AnalysisResult {
        AnalysisResult {
            ticker: "AAPL".to_string(),
            company_name: Some("Apple Inc".to_string()),
            current_price: Some(dec!(189.5)),
            analysis_mode: AnalysisMode::Value,
            metrics: Metrics {
                compression_pct: Some(-15.2),
                trailing_pe: Some(29.1),
                ..Default::default()
            },
            signal,
            confidence: Confidence::Medium,
            headline: None,
            anchor: Some("Growing profits 1.2x would return AAPL to fair value".to_string()),
            share_urls: None,
            data_quality: None,
            warnings: Vec::new(),
            timestamp: None,
        }
    }

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 12, 2, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_format_parse_defaults_to_json() {
        assert_eq!(CardFormat::parse(None), CardFormat::Json);
        assert_eq!(CardFormat::parse(Some("json")), CardFormat::Json);
        assert_eq!(CardFormat::parse(Some("REDDIT")), CardFormat::Reddit);
        assert_eq!(CardFormat::parse(Some("discord")), CardFormat::Discord);
        assert_eq!(CardFormat::parse(Some("twitter")), CardFormat::Json);
        assert_eq!(CardFormat::parse(Some("")), CardFormat::Json);
    }

    #[test]
    fn test_content_types() {
        assert_eq!(CardFormat::Json.content_type(), "application/json");
        assert_eq!(CardFormat::Discord.content_type(), "application/json");
        assert!(CardFormat::Reddit.content_type().starts_with("text/plain"));
    }

    #[test]
    fn test_json_card_fields() {
        let card = CardData::from_analysis(&analysis(Signal::StrongBuy));
        let json = serde_json::to_value(render_json(&card, &Branding::default())).unwrap();

        assert_eq!(json["ticker"], "AAPL");
        assert_eq!(json["signal"], "STRONG_BUY");
        assert_eq!(json["signalLabel"], "STRONG BUY");
        assert_eq!(json["price"], 189.5);
        assert_eq!(json["analysisMode"], "VALUE (P/E Compression)");
        assert_eq!(json["keyMetric"]["label"], "P/E Compression");
        assert_eq!(json["keyMetric"]["value"], "-15.2%");
        assert_eq!(json["confidence"], "medium");
        assert_eq!(json["confidenceTier"], 2);
        assert_eq!(json["color"], "#10b981");
        assert!(json["footer"].as_str().unwrap().starts_with("stocksignal.app"));
        assert!(json.get("shareUrls").is_none());
        assert!(json.get("anchor").is_some());
    }

    #[test]
    fn test_reddit_comment_layout() {
        let card = CardData::from_analysis(&analysis(Signal::Buy));
        let text = render_reddit(&card, &Branding::default());
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "**\u{1F680} $AAPL Analysis**");
        assert_eq!(lines[2], "**Signal:** BUY | Confidence: \u{2588}\u{2588}\u{25AF}  ");
        assert_eq!(lines[3], "**Price:** $189.50  ");
        assert_eq!(lines[4], "**P/E Compression:** -15.2%");
        assert!(text.contains("*Analysis: VALUE (P/E Compression)*"));
        assert!(text.ends_with("^(stocksignal.app \u{2022} Free \u{2022} No signup required)"));
    }

    #[test]
    fn test_reddit_omits_missing_metric_and_price() {
        let mut a = analysis(Signal::Hold);
        a.metrics = Metrics::default();
        a.current_price = None;
        let text = render_reddit(&CardData::from_analysis(&a), &Branding::default());
        assert!(!text.contains("**Price:**"));
        assert!(!text.contains("P/E Compression:**"));
        assert!(!text.contains("N/A"));
    }

    #[test]
    fn test_discord_embed_shape() {
        let card = CardData::from_analysis(&analysis(Signal::StrongSell));
        let embed = render_discord(&card, &Branding::default(), fixed_now());

        assert_eq!(embed.title, "$AAPL - STRONG SELL");
        assert_eq!(embed.color, 0xEF4444);
        assert_eq!(embed.fields.len(), 3);
        assert_eq!(embed.fields[0].name, "Price");
        assert_eq!(embed.fields[0].value, "$189.50");
        assert_eq!(embed.fields[1].name, "P/E Compression");
        assert_eq!(embed.fields[1].value, "-15.2%");
        assert_eq!(embed.fields[2].name, "Confidence");
        assert_eq!(embed.fields[2].value, "Medium");
        assert!(embed.fields.iter().all(|f| f.inline));
        assert_eq!(embed.footer.text, "VALUE (P/E Compression) \u{2022} stocksignal.app");
        assert_eq!(embed.timestamp, "2025-12-02T12:00:00Z");
    }

    #[test]
    fn test_discord_description_prefers_headline() {
        let mut a = analysis(Signal::Buy);
        a.headline = Some("$AAPL: BUY signal detected.".to_string());
        let embed = render_discord(&CardData::from_analysis(&a), &Branding::default(), fixed_now());
        assert_eq!(embed.description, "$AAPL: BUY signal detected.");
    }

    #[test]
    fn test_discord_colors_follow_buckets() {
        for signal in Signal::ALL {
            let embed = render_discord(
                &CardData::from_analysis(&analysis(signal)),
                &Branding::default(),
                fixed_now(),
            );
            let expected = match signal.bucket() {
                analysis_core::SignalBucket::Buy => 0x10B981,
                analysis_core::SignalBucket::Sell => 0xEF4444,
                analysis_core::SignalBucket::Hold => 0xF59E0B,
            };
            assert_eq!(embed.color, expected, "{signal:?}");
        }
    }

    #[test]
    fn test_json_and_discord_agree() {
        let card = CardData::from_analysis(&analysis(Signal::Buy));
        let json = render_json(&card, &Branding::default());
        let embed = render_discord(&card, &Branding::default(), fixed_now());

        assert!(embed.title.ends_with(json.signal_label));
        let price_field = embed.fields.iter().find(|f| f.name == "Price").unwrap();
        assert_eq!(price_field.value, format!("${:.2}", json.price.unwrap()));
        let metric_field = embed.fields.iter().find(|f| f.name == json.key_metric.label).unwrap();
        assert_eq!(metric_field.value, json.key_metric.value);
    }
}
