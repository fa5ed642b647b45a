use analysis_core::{Signal, SignalBucket};

/// 8-bit RGB triple.
pub type Rgb = (u8, u8, u8);

/// Presentation tuple for one signal bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignalStyle {
    pub bucket: SignalBucket,
    pub emoji: &'static str,
    /// Monochrome stand-in for `emoji` in rasterized images, which carry no
    /// color emoji font.
    pub marker: &'static str,
    pub discord_color: u32,
    pub hex_color: &'static str,
    pub gradient_start: Rgb,
    pub gradient_end: Rgb,
}

const BUY_STYLE: SignalStyle = SignalStyle {
    bucket: SignalBucket::Buy,
    emoji: "\u{1F680}",
    marker: "\u{25B2}",
    discord_color: 0x10B981,
    hex_color: "#10b981",
    // emerald-500 -> teal-500
    gradient_start: (0x10, 0xB9, 0x81),
    gradient_end: (0x14, 0xB8, 0xA6),
};

const SELL_STYLE: SignalStyle = SignalStyle {
    bucket: SignalBucket::Sell,
    emoji: "\u{1F4C9}",
    marker: "\u{25BC}",
    discord_color: 0xEF4444,
    hex_color: "#ef4444",
    // red-500 -> rose-500
    gradient_start: (0xEF, 0x44, 0x44),
    gradient_end: (0xF4, 0x3F, 0x5E),
};

const HOLD_STYLE: SignalStyle = SignalStyle {
    bucket: SignalBucket::Hold,
    emoji: "\u{2696}\u{FE0F}",
    marker: "\u{25C6}",
    discord_color: 0xF59E0B,
    hex_color: "#f59e0b",
    // amber-500 -> orange-500
    gradient_start: (0xF5, 0x9E, 0x0B),
    gradient_end: (0xF9, 0x73, 0x16),
};

pub fn bucket_style(bucket: SignalBucket) -> &'static SignalStyle {
    match bucket {
        SignalBucket::Buy => &BUY_STYLE,
        SignalBucket::Sell => &SELL_STYLE,
        SignalBucket::Hold => &HOLD_STYLE,
    }
}

pub fn signal_style(signal: Signal) -> &'static SignalStyle {
    bucket_style(signal.bucket())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_signal_maps_to_its_bucket_style() {
        for signal in Signal::ALL {
            let style = signal_style(signal);
            assert_eq!(style.bucket, signal.bucket());
            let expected = match signal {
                Signal::StrongBuy | Signal::Buy => 0x10B981,
                Signal::Sell | Signal::StrongSell => 0xEF4444,
                Signal::Hold | Signal::DataError => 0xF59E0B,
            };
            assert_eq!(style.discord_color, expected, "{signal:?}");
        }
    }

    #[test]
    fn test_hex_color_matches_discord_color() {
        for bucket in [SignalBucket::Buy, SignalBucket::Sell, SignalBucket::Hold] {
            let style = bucket_style(bucket);
            assert_eq!(style.hex_color, format!("#{:06x}", style.discord_color));
            let (r, g, b) = style.gradient_start;
            assert_eq!(((r as u32) << 16) | ((g as u32) << 8) | b as u32, style.discord_color);
        }
    }

    #[test]
    fn test_bucket_emoji_and_marker() {
        let cases = [
            (SignalBucket::Buy, "\u{1F680}", "\u{25B2}"),
            (SignalBucket::Sell, "\u{1F4C9}", "\u{25BC}"),
            (SignalBucket::Hold, "\u{2696}\u{FE0F}", "\u{25C6}"),
        ];
        for (bucket, emoji, marker) in cases {
            let style = bucket_style(bucket);
            assert_eq!(style.emoji, emoji, "{bucket:?}");
            assert_eq!(style.marker, marker, "{bucket:?}");
        }
        assert_eq!(signal_style(Signal::DataError).emoji, "\u{2696}\u{FE0F}");
    }
}
