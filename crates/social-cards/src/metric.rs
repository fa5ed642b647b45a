use analysis_core::{AnalysisMode, Metrics};
use serde::Serialize;

/// Which metric was picked for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    Compression,
    PegRatio,
    PriceToSales,
    TrailingPe,
}

impl MetricKind {
    /// Label used on cards.
    pub fn card_label(&self) -> &'static str {
        match self {
            MetricKind::Compression => "P/E Compression",
            MetricKind::PegRatio => "PEG Ratio",
            MetricKind::PriceToSales => "Price/Sales",
            MetricKind::TrailingPe => "P/E Ratio",
        }
    }

    /// Shorter label used on the share image.
    pub fn image_label(&self) -> &'static str {
        match self {
            MetricKind::Compression => "Compression",
            MetricKind::PegRatio => "PEG Ratio",
            MetricKind::PriceToSales => "Price/Sales",
            MetricKind::TrailingPe => "P/E Ratio",
        }
    }
}

/// A metric value already formatted for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricDisplay {
    pub kind: MetricKind,
    pub value: String,
}

impl MetricDisplay {
    pub fn card_label(&self) -> &'static str {
        self.kind.card_label()
    }

    /// `Compression: -15.2%`
    pub fn image_line(&self) -> String {
        format!("{}: {}", self.kind.image_label(), self.value)
    }
}

/// Pick the metric to highlight.
///
/// The mode decides first: VALUE shows compression, GROWTH shows PEG,
/// HYPER_GROWTH shows price-to-sales. If that field is missing the trailing
/// P/E is used, and if that is missing too there is nothing to show.
pub fn select_metric(mode: AnalysisMode, metrics: &Metrics) -> Option<MetricDisplay> {
    let primary = match mode {
        AnalysisMode::Value => metrics
            .compression_pct
            .map(|v| (MetricKind::Compression, format!("{:+.1}%", v))),
        AnalysisMode::Growth => metrics
            .peg_ratio
            .map(|v| (MetricKind::PegRatio, format!("{:.2}", v))),
        AnalysisMode::HyperGrowth => metrics
            .price_to_sales
            .map(|v| (MetricKind::PriceToSales, format!("{:.2}x", v))),
    };

    primary
        .or_else(|| {
            metrics
                .trailing_pe
                .map(|v| (MetricKind::TrailingPe, format!("{:.1}", v)))
        })
        .map(|(kind, value)| MetricDisplay { kind, value })
}
