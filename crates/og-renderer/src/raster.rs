use std::sync::{Arc, OnceLock};

use analysis_core::AnalysisError;
use resvg::tiny_skia::{Pixmap, Transform};
use resvg::usvg::{self, fontdb};

/// Family the bundled faces register under; generic `sans-serif` resolves to it.
const FONT_FAMILY: &str = "DejaVu Sans";
const FONT_REGULAR: &[u8] = include_bytes!("../assets/fonts/DejaVuSans.ttf");
const FONT_BOLD: &[u8] = include_bytes!("../assets/fonts/DejaVuSans-Bold.ttf");

static FONTS: OnceLock<Arc<fontdb::Database>> = OnceLock::new();

/// Font database built once from the bundled faces. System fonts are never
/// consulted, so output is the same on every host.
fn fonts() -> Arc<fontdb::Database> {
    FONTS
        .get_or_init(|| {
            let mut db = fontdb::Database::new();
            db.load_font_data(FONT_REGULAR.to_vec());
            db.load_font_data(FONT_BOLD.to_vec());
            db.set_sans_serif_family(FONT_FAMILY);
            Arc::new(db)
        })
        .clone()
}

/// Rasterize an SVG document to PNG at its intrinsic size.
pub fn svg_to_png(svg: &str) -> Result<Vec<u8>, AnalysisError> {
    let options = usvg::Options {
        font_family: FONT_FAMILY.to_string(),
        fontdb: fonts(),
        ..usvg::Options::default()
    };
    let tree = usvg::Tree::from_str(svg, &options)
        .map_err(|e| AnalysisError::Render(format!("svg parse: {e}")))?;

    let size = tree.size().to_int_size();
    let mut pixmap = Pixmap::new(size.width(), size.height())
        .ok_or_else(|| AnalysisError::Render("empty canvas".to_string()))?;
    resvg::render(&tree, Transform::default(), &mut pixmap.as_mut());

    pixmap
        .encode_png()
        .map_err(|e| AnalysisError::Render(format!("png encode: {e}")))
}

/// Width and height from a PNG header, if `bytes` is a PNG.
pub fn png_dimensions(bytes: &[u8]) -> Option<(u32, u32)> {
    const SIGNATURE: &[u8] = b"\x89PNG\r\n\x1a\n";
    if bytes.len() < 24 || !bytes.starts_with(SIGNATURE) || &bytes[12..16] != b"IHDR" {
        return None;
    }
    let width = u32::from_be_bytes(bytes[16..20].try_into().ok()?);
    let height = u32::from_be_bytes(bytes[20..24].try_into().ok()?);
    Some((width, height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_svg_to_png_keeps_dimensions() {
        let svg = r##"<svg width="120" height="63" viewBox="0 0 120 63" xmlns="http://www.w3.org/2000/svg">
<rect width="120" height="63" fill="#10b981"/>
<text x="60" y="40" text-anchor="middle" font-family="sans-serif" font-size="20">AMD</text>
</svg>"##;
        let png = svg_to_png(svg).unwrap();
        assert_eq!(png_dimensions(&png), Some((120, 63)));
    }

    #[test]
    fn test_svg_to_png_rejects_garbage() {
        assert!(matches!(svg_to_png("not an svg"), Err(AnalysisError::Render(_))));
    }

    #[test]
    fn test_bundled_fonts_are_registered() {
        let db = fonts();
        let families: Vec<String> = db
            .faces()
            .flat_map(|face| face.families.iter().map(|(name, _)| name.clone()))
            .collect();
        assert!(families.iter().any(|f| f == FONT_FAMILY));
        assert_eq!(db.len(), 2);
    }

    #[test]
    fn test_png_dimensions_rejects_non_png() {
        assert_eq!(png_dimensions(b"<svg/>"), None);
        assert_eq!(png_dimensions(&[]), None);
    }
}
