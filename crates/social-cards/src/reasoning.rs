use analysis_core::{AnalysisMode, AnalysisResult, SignalBucket};

/// One-paragraph explanation used when the analysis carries no headline.
pub fn synthesize_reasoning(analysis: &AnalysisResult) -> String {
    let bucket = analysis.signal.bucket();
    let metrics = &analysis.metrics;

    let text = match analysis.analysis_mode {
        AnalysisMode::Value => metrics.compression_pct.map(|c| match bucket {
            SignalBucket::Buy => format!(
                "Market expects earnings growth. Forward P/E compressed {:.1}%, indicating undervaluation relative to growth prospects.",
                c.abs()
            ),
            SignalBucket::Sell => format!(
                "Market expects earnings decline. Forward P/E expanded {:.1}%, suggesting overvaluation at current levels.",
                c.abs()
            ),
            SignalBucket::Hold => format!(
                "P/E compression of {:.1}% suggests neutral outlook. Fairly valued at current price.",
                c
            ),
        }),
        AnalysisMode::Growth => metrics.peg_ratio.map(|peg| match bucket {
            SignalBucket::Buy => format!(
                "PEG ratio of {peg:.2} means you're paying ${peg:.2} per 1% of growth. Attractive valuation for growth rate."
            ),
            SignalBucket::Sell => format!(
                "PEG ratio of {peg:.2} suggests you're overpaying for growth. High valuation relative to earnings growth rate."
            ),
            SignalBucket::Hold => format!(
                "PEG ratio of {peg:.2} indicates fair valuation. Price aligned with growth expectations."
            ),
        }),
        AnalysisMode::HyperGrowth => metrics.price_to_sales.map(|ps| {
            let ro40 = metrics.rule_of_40_score;
            match (bucket, ro40) {
                (SignalBucket::Buy, Some(r)) => format!(
                    "P/S of {ps:.1} with Rule of 40 score {r:.0} shows strong fundamentals. Reasonable valuation for high-growth profile."
                ),
                (SignalBucket::Buy, None) => format!(
                    "P/S of {ps:.1} is a reasonable valuation for this high-growth profile."
                ),
                (SignalBucket::Sell, _) if ps > 15.0 => format!(
                    "P/S ratio of {ps:.1} is excessive. Valuation too rich even considering high growth potential."
                ),
                (SignalBucket::Sell, Some(r)) => format!(
                    "Rule of 40 score {r:.0} shows weak fundamentals. Growth + profitability metrics concerning."
                ),
                (SignalBucket::Sell, None) => format!(
                    "P/S of {ps:.1} is not supported by the growth and profitability profile."
                ),
                (SignalBucket::Hold, Some(r)) => format!(
                    "P/S {ps:.1} and Rule of 40 score {r:.0} show mixed signals. Fairly valued at current levels."
                ),
                (SignalBucket::Hold, None) => format!(
                    "P/S of {ps:.1} shows mixed signals. Fairly valued at current levels."
                ),
            }
        }),
    };

    text.unwrap_or_else(|| {
        format!(
            "Analysis suggests {} signal based on current valuation metrics.",
            analysis.signal.to_label().to_lowercase()
        )
    })
}
