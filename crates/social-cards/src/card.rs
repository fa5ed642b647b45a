use analysis_core::{AnalysisMode, AnalysisResult, Confidence, ShareUrls, Signal};
use rust_decimal::Decimal;

use crate::metric::{select_metric, MetricDisplay};
use crate::reasoning::synthesize_reasoning;
use crate::style::{signal_style, SignalStyle};

/// Site branding shared by every rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Branding {
    pub domain: String,
}

impl Branding {
    pub fn new(domain: impl Into<String>) -> Self {
        Self { domain: domain.into() }
    }

    /// `stocksignal.app • Free • No signup required`
    pub fn tagline(&self) -> String {
        format!("{} \u{2022} Free \u{2022} No signup required", self.domain)
    }

    pub fn url(&self) -> String {
        format!("https://{}", self.domain)
    }
}

impl Default for Branding {
    fn default() -> Self {
        Self::new("stocksignal.app")
    }
}

/// Presentation-normalized projection of an analysis result.
///
/// Built once per request; every output format reads from the same values.
#[derive(Debug, Clone)]
pub struct CardData {
    pub ticker: String,
    pub company_name: Option<String>,
    pub signal: Signal,
    pub style: &'static SignalStyle,
    pub price: Option<Decimal>,
    pub mode: AnalysisMode,
    pub metric: Option<MetricDisplay>,
    pub confidence: Confidence,
    pub headline: Option<String>,
    pub reasoning: String,
    pub anchor: Option<String>,
    pub share_urls: Option<ShareUrls>,
}

impl CardData {
    pub fn from_analysis(analysis: &AnalysisResult) -> Self {
        Self {
            ticker: analysis.ticker.trim().to_uppercase(),
            company_name: analysis.company_name.clone(),
            signal: analysis.signal,
            style: signal_style(analysis.signal),
            price: analysis.current_price.map(|p| p.round_dp(2)),
            mode: analysis.analysis_mode,
            metric: select_metric(analysis.analysis_mode, &analysis.metrics),
            confidence: analysis.confidence,
            headline: analysis.headline().map(str::to_string),
            reasoning: synthesize_reasoning(analysis),
            anchor: analysis.anchor.clone(),
            share_urls: analysis.share_urls.clone(),
        }
    }

    /// Headline when present, otherwise the synthesized reasoning.
    pub fn summary(&self) -> &str {
        self.headline.as_deref().unwrap_or(&self.reasoning)
    }

    /// `$114.30`
    pub fn price_text(&self) -> Option<String> {
        self.price.map(|p| format!("${:.2}", p))
    }

    /// Filled blocks for the tier, padded to three cells: `██▯`.
    pub fn confidence_bar(&self) -> String {
        let tier = self.confidence.tier() as usize;
        format!("{}{}", "\u{2588}".repeat(tier), "\u{25AF}".repeat(3 - tier))
    }

    pub fn metric_label(&self) -> &str {
        self.metric.as_ref().map(|m| m.card_label()).unwrap_or("")
    }

    pub fn metric_value(&self) -> &str {
        self.metric.as_ref().map(|m| m.value.as_str()).unwrap_or("")
    }
}
