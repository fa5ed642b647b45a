//! Social card formatting.
//!
//! Projects an [`analysis_core::AnalysisResult`] into [`CardData`] and renders
//! it as a JSON card, a Reddit comment or a Discord embed.

pub mod batch;
pub mod card;
pub mod formats;
pub mod metric;
pub mod reasoning;
pub mod style;

pub use batch::render_batch;
pub use card::{Branding, CardData};
pub use formats::{
    render, render_discord, render_json, render_reddit, CardFormat, DiscordEmbed, DiscordField,
    DiscordFooter, JsonCard, KeyMetric, RenderedCard,
};
pub use metric::{select_metric, MetricDisplay, MetricKind};
pub use reasoning::synthesize_reasoning;
pub use style::{bucket_style, signal_style, Rgb, SignalStyle};
