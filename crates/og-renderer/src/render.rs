use analysis_core::AnalysisError;
use plotters::coord::Shift;
use plotters::drawing::{DrawingArea, DrawingAreaErrorKind};
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::{FontDesc, FontFamily, FontStyle, TextStyle};
use social_cards::{Branding, CardData, Rgb};

use crate::text::headline_lines;

pub const WIDTH: u32 = 1200;
pub const HEIGHT: u32 = 630;

/// Vertical bands used to approximate the linear gradient.
const GRADIENT_BANDS: i32 = 120;
const HEADLINE_LINE_CHARS: usize = 48;

const PLACEHOLDER_START: Rgb = (0x1E, 0x29, 0x3B);
const PLACEHOLDER_END: Rgb = (0x4F, 0x46, 0xE5);
const INK: RGBColor = RGBColor(0x0F, 0x17, 0x2A);

type Canvas<'a> = DrawingArea<SVGBackend<'a>, Shift>;

fn render_err<E: std::error::Error + Send + Sync>(e: DrawingAreaErrorKind<E>) -> AnalysisError {
    AnalysisError::Render(e.to_string())
}

fn rgb((r, g, b): Rgb) -> RGBColor {
    RGBColor(r, g, b)
}

fn lerp(a: u8, b: u8, t: f64) -> u8 {
    (a as f64 + (b as f64 - a as f64) * t).round() as u8
}

fn draw_gradient(root: &Canvas<'_>, start: Rgb, end: Rgb) -> Result<(), AnalysisError> {
    let band_width = WIDTH as i32 / GRADIENT_BANDS;
    for i in 0..GRADIENT_BANDS {
        let t = i as f64 / (GRADIENT_BANDS - 1) as f64;
        let color = RGBColor(
            lerp(start.0, end.0, t),
            lerp(start.1, end.1, t),
            lerp(start.2, end.2, t),
        );
        let x0 = i * band_width;
        let x1 = if i == GRADIENT_BANDS - 1 { WIDTH as i32 } else { x0 + band_width };
        root.draw(&Rectangle::new([(x0, 0), (x1, HEIGHT as i32)], color.filled()))
            .map_err(render_err)?;
    }
    Ok(())
}

fn text_style(size: u32, bold: bool, color: &RGBColor, h_pos: HPos) -> TextStyle<'static> {
    let weight = if bold { FontStyle::Bold } else { FontStyle::Normal };
    FontDesc::new(FontFamily::SansSerif, size as f64, weight)
        .color(color)
        .pos(Pos::new(h_pos, VPos::Center))
}

fn centered(size: u32, bold: bool, color: &RGBColor) -> TextStyle<'static> {
    text_style(size, bold, color, HPos::Center)
}

/// Three rising bars followed by the wordmark.
fn draw_brand_header(root: &Canvas<'_>) -> Result<(), AnalysisError> {
    for (i, height) in [14, 24, 34].into_iter().enumerate() {
        let x0 = 60 + i as i32 * 12;
        root.draw(&Rectangle::new([(x0, 77 - height), (x0 + 8, 77)], WHITE.filled()))
            .map_err(render_err)?;
    }
    let style = text_style(34, true, &WHITE, HPos::Left);
    root.draw_text("StockSignal", &style, (104, 60))
        .map_err(render_err)
}

fn draw_footer(root: &Canvas<'_>, branding: &Branding) -> Result<(), AnalysisError> {
    root.draw_text(
        &branding.domain,
        &centered(28, false, &WHITE),
        (WIDTH as i32 / 2, 590),
    )
    .map_err(render_err)
}

/// Draw the share image for one analysis.
pub fn render_card(card: &CardData, branding: &Branding) -> Result<String, AnalysisError> {
    let style = card.style;
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (WIDTH, HEIGHT)).into_drawing_area();
        draw_gradient(&root, style.gradient_start, style.gradient_end)?;
        draw_brand_header(&root)?;

        let center_x = WIDTH as i32 / 2;
        root.draw_text(
            &format!("${}", card.ticker),
            &centered(112, true, &WHITE),
            (center_x, 165),
        )
        .map_err(render_err)?;

        root.draw(&Rectangle::new([(240, 240), (960, 330)], WHITE.mix(0.92).filled()))
            .map_err(render_err)?;
        root.draw_text(
            &format!("{} {}", style.marker, card.signal.to_label()),
            &centered(56, true, &rgb(style.gradient_start)),
            (center_x, 285),
        )
        .map_err(render_err)?;

        if let Some(headline) = card.headline.as_deref() {
            for (i, line) in headline_lines(headline, HEADLINE_LINE_CHARS, 2).iter().enumerate() {
                root.draw_text(line, &centered(30, false, &WHITE), (center_x, 385 + 40 * i as i32))
                    .map_err(render_err)?;
            }
        }

        if let Some(metric) = &card.metric {
            root.draw_text(
                &metric.image_line(),
                &centered(38, true, &WHITE),
                (center_x, 500),
            )
            .map_err(render_err)?;
        }

        draw_footer(&root, branding)?;
        root.present().map_err(render_err)?;
    }
    Ok(svg)
}

/// Generic branded image served when an analysis card cannot be produced.
pub fn render_placeholder(branding: &Branding) -> Result<String, AnalysisError> {
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (WIDTH, HEIGHT)).into_drawing_area();
        draw_gradient(&root, PLACEHOLDER_START, PLACEHOLDER_END)?;
        draw_brand_header(&root)?;

        let center_x = WIDTH as i32 / 2;
        root.draw_text("StockSignal", &centered(96, true, &WHITE), (center_x, 260))
            .map_err(render_err)?;
        root.draw(&Rectangle::new([(300, 330), (900, 400)], WHITE.mix(0.92).filled()))
            .map_err(render_err)?;
        root.draw_text(
            "P/E valuation signals in seconds",
            &centered(32, false, &INK),
            (center_x, 365),
        )
        .map_err(render_err)?;

        draw_footer(&root, branding)?;
        root.present().map_err(render_err)?;
    }
    Ok(svg)
}
