use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

/// Trading signal produced by the valuation engine.
///
/// The wire value is matched case-insensitively with `_`, `-` or a space
/// between words. `DATA_ERROR` and anything unrecognized become
/// [`Signal::DataError`], which presents in the hold bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Signal {
    StrongBuy,
    Buy,
    Hold,
    Sell,
    StrongSell,
    DataError,
}

impl Signal {
    pub const ALL: [Signal; 6] = [
        Signal::StrongBuy,
        Signal::Buy,
        Signal::Hold,
        Signal::Sell,
        Signal::StrongSell,
        Signal::DataError,
    ];

    pub fn parse(raw: &str) -> Self {
        let normalized: String = raw
            .trim()
            .chars()
            .map(|c| match c {
                ' ' | '-' => '_',
                c => c.to_ascii_uppercase(),
            })
            .collect();

        match normalized.as_str() {
            "STRONG_BUY" => Signal::StrongBuy,
            "BUY" => Signal::Buy,
            "HOLD" => Signal::Hold,
            "SELL" => Signal::Sell,
            "STRONG_SELL" => Signal::StrongSell,
            _ => Signal::DataError,
        }
    }

    /// Canonical wire form, e.g. `STRONG_BUY`.
    pub fn as_code(&self) -> &'static str {
        match self {
            Signal::StrongBuy => "STRONG_BUY",
            Signal::Buy => "BUY",
            Signal::Hold => "HOLD",
            Signal::Sell => "SELL",
            Signal::StrongSell => "STRONG_SELL",
            Signal::DataError => "DATA_ERROR",
        }
    }

    /// Human-readable label for the signal
    pub fn to_label(&self) -> &'static str {
        match self {
            Signal::StrongBuy => "STRONG BUY",
            Signal::Buy => "BUY",
            Signal::Hold => "HOLD",
            Signal::Sell => "SELL",
            Signal::StrongSell => "STRONG SELL",
            Signal::DataError => "DATA ERROR",
        }
    }

    pub fn bucket(&self) -> SignalBucket {
        match self {
            Signal::StrongBuy | Signal::Buy => SignalBucket::Buy,
            Signal::Sell | Signal::StrongSell => SignalBucket::Sell,
            Signal::Hold | Signal::DataError => SignalBucket::Hold,
        }
    }
}

impl From<String> for Signal {
    fn from(raw: String) -> Self {
        Signal::parse(&raw)
    }
}

impl From<Signal> for String {
    fn from(signal: Signal) -> Self {
        signal.as_code().to_string()
    }
}

impl std::fmt::Display for Signal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.to_label())
    }
}

/// Three-way grouping that drives color, emoji and gradient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignalBucket {
    Buy,
    Sell,
    Hold,
}

/// Valuation methodology that produced the signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum AnalysisMode {
    Value,
    Growth,
    HyperGrowth,
}

impl AnalysisMode {
    /// Accepts both the bare mode (`GROWTH`) and the descriptive form the
    /// analysis API emits (`GROWTH (PEG Ratio)`).
    pub fn parse(raw: &str) -> Option<Self> {
        let head = raw
            .trim()
            .split(|c: char| c.is_whitespace() || c == '(')
            .next()
            .unwrap_or("")
            .to_ascii_uppercase()
            .replace('-', "_");

        match head.as_str() {
            "VALUE" => Some(AnalysisMode::Value),
            "GROWTH" => Some(AnalysisMode::Growth),
            "HYPER_GROWTH" | "HYPERGROWTH" => Some(AnalysisMode::HyperGrowth),
            _ => None,
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            AnalysisMode::Value => "VALUE",
            AnalysisMode::Growth => "GROWTH",
            AnalysisMode::HyperGrowth => "HYPER_GROWTH",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            AnalysisMode::Value => "VALUE (P/E Compression)",
            AnalysisMode::Growth => "GROWTH (PEG Ratio)",
            AnalysisMode::HyperGrowth => "HYPER_GROWTH (Price/Sales)",
        }
    }
}

impl TryFrom<String> for AnalysisMode {
    type Error = String;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        AnalysisMode::parse(&raw).ok_or_else(|| format!("unknown analysis mode: {raw}"))
    }
}

impl From<AnalysisMode> for String {
    fn from(mode: AnalysisMode) -> Self {
        mode.description().to_string()
    }
}

impl std::fmt::Display for AnalysisMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.description())
    }
}

/// Confidence ordinal, displayed as a 1-3 bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

impl Confidence {
    pub fn tier(&self) -> u8 {
        match self {
            Confidence::Low => 1,
            Confidence::Medium => 2,
            Confidence::High => 3,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Confidence::Low => "low",
            Confidence::Medium => "medium",
            Confidence::High => "high",
        }
    }

    pub fn capitalized(&self) -> &'static str {
        match self {
            Confidence::Low => "Low",
            Confidence::Medium => "Medium",
            Confidence::High => "High",
        }
    }
}

impl From<String> for Confidence {
    fn from(raw: String) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "high" => Confidence::High,
            "medium" => Confidence::Medium,
            _ => Confidence::Low,
        }
    }
}

impl From<Confidence> for String {
    fn from(confidence: Confidence) -> Self {
        confidence.as_str().to_string()
    }
}

/// Mode-specific metrics. Any field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    #[serde(default, deserialize_with = "lenient_f64", skip_serializing_if = "Option::is_none")]
    pub compression_pct: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64", skip_serializing_if = "Option::is_none")]
    pub peg_ratio: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64", skip_serializing_if = "Option::is_none")]
    pub price_to_sales: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64", skip_serializing_if = "Option::is_none")]
    pub trailing_pe: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64", skip_serializing_if = "Option::is_none")]
    pub forward_pe: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64", skip_serializing_if = "Option::is_none")]
    pub implied_growth_pct: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64", skip_serializing_if = "Option::is_none")]
    pub earnings_growth_pct: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64", skip_serializing_if = "Option::is_none")]
    pub revenue_growth_pct: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64", skip_serializing_if = "Option::is_none")]
    pub profit_margin_pct: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64", skip_serializing_if = "Option::is_none")]
    pub rule_of_40_score: Option<f64>,
}

/// Accepts numbers, numeric strings and null. Anything else, or a
/// non-finite value, reads as absent.
fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value
        .and_then(|v| v.as_f64().or_else(|| v.as_str().and_then(|s| s.trim().parse().ok())))
        .filter(|v| v.is_finite()))
}

/// Pre-formatted share links supplied by the analysis API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShareUrls {
    pub twitter: String,
    pub linkedin: String,
    pub copy_text: String,
}

/// Analysis payload returned by `GET /api/analyze/{ticker}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub ticker: String,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub current_price: Option<Decimal>,
    pub analysis_mode: AnalysisMode,
    #[serde(default)]
    pub metrics: Metrics,
    pub signal: Signal,
    #[serde(default = "default_confidence")]
    pub confidence: Confidence,
    #[serde(default)]
    pub headline: Option<String>,
    #[serde(default)]
    pub anchor: Option<String>,
    #[serde(default)]
    pub share_urls: Option<ShareUrls>,
    #[serde(default)]
    pub data_quality: Option<String>,
    #[serde(default)]
    pub warnings: Vec<String>,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

fn default_confidence() -> Confidence {
    Confidence::Low
}

impl AnalysisResult {
    /// Headline when the API supplied a non-blank one.
    pub fn headline(&self) -> Option<&str> {
        self.headline
            .as_deref()
            .map(str::trim)
            .filter(|h| !h.is_empty())
    }
}

/// Trims, drops a leading `$` and upper-cases. Returns `None` for blank input.
pub fn normalize_ticker(raw: &str) -> Option<String> {
    let ticker = raw.trim().trim_start_matches('$').trim();
    if ticker.is_empty() {
        None
    } else {
        Some(ticker.to_uppercase())
    }
}
