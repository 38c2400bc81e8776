//! QR code generation: SVG data URLs and grayscale rasters.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use image::{GrayImage, ImageEncoder, Luma};
use qrcode::render::svg;
use qrcode::{Color, EcLevel, QrCode};
use tracing::debug;

use crate::{ImageEngineError, Result};

/// Error correction used for every symbol.
const EC_LEVEL: EcLevel = EcLevel::M;

/// Quiet zone width in modules, as drawn by the qrcode renderer.
const QUIET_ZONE_MODULES: u32 = 4;

const SVG_DATA_URL_PREFIX: &str = "data:image/svg+xml;base64,";

/// Rendering options. Two equal styles always produce identical output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrStyle {
    /// Pixels per module.
    pub module_size: u32,
    /// Whether to surround the symbol with a 4-module light border.
    pub quiet_zone: bool,
    /// Dark module color (SVG only).
    pub dark: String,
    /// Light module color (SVG only).
    pub light: String,
}

impl Default for QrStyle {
    fn default() -> Self {
        Self {
            module_size: 8,
            quiet_zone: true,
            dark: "#000000".into(),
            light: "#ffffff".into(),
        }
    }
}

impl QrStyle {
    pub fn with_module_size(mut self, module_size: u32) -> Self {
        self.module_size = module_size.max(1);
        self
    }

    pub fn with_quiet_zone(mut self, quiet_zone: bool) -> Self {
        self.quiet_zone = quiet_zone;
        self
    }
}

/// Encode the payload into a QR symbol at the fixed error-correction level.
fn encode(payload: &str) -> Result<QrCode> {
    if payload.is_empty() {
        return Err(ImageEngineError::EmptyPayload);
    }
    let code = QrCode::with_error_correction_level(payload.as_bytes(), EC_LEVEL)?;
    debug!(
        modules = code.width(),
        bytes = payload.len(),
        "Encoded QR symbol"
    );
    Ok(code)
}

/// Render the payload as an SVG document.
pub fn render_svg(payload: &str, style: &QrStyle) -> Result<String> {
    let code = encode(payload)?;
    let size = style.module_size.max(1);
    Ok(code
        .render::<svg::Color>()
        .quiet_zone(style.quiet_zone)
        .module_dimensions(size, size)
        .dark_color(svg::Color(style.dark.as_str()))
        .light_color(svg::Color(style.light.as_str()))
        .build())
}

/// Render the payload as a `data:image/svg+xml;base64,...` URL.
pub fn svg_data_url(payload: &str, style: &QrStyle) -> Result<String> {
    let svg = render_svg(payload, style)?;
    let encoded = STANDARD.encode(svg.as_bytes());
    Ok(format!("{SVG_DATA_URL_PREFIX}{encoded}"))
}

/// Render the payload as a black-on-white grayscale image.
pub fn render_luma(payload: &str, style: &QrStyle) -> Result<GrayImage> {
    let code = encode(payload)?;
    let modules = code.to_colors();
    let module_count = code.width() as u32;

    let scale = style.module_size.max(1);
    let border = if style.quiet_zone { QUIET_ZONE_MODULES } else { 0 };
    let img_size = (module_count + border * 2) * scale;

    let mut img = GrayImage::from_pixel(img_size, img_size, Luma([255u8]));

    for (i, color) in modules.iter().enumerate() {
        if *color != Color::Dark {
            continue;
        }
        let x = (i as u32) % module_count + border;
        let y = (i as u32) / module_count + border;
        for dx in 0..scale {
            for dy in 0..scale {
                img.put_pixel(x * scale + dx, y * scale + dy, Luma([0u8]));
            }
        }
    }

    Ok(img)
}

/// Render the payload as PNG bytes.
pub fn render_png(payload: &str, style: &QrStyle) -> Result<Vec<u8>> {
    let img = render_luma(payload, style)?;
    let mut png_bytes: Vec<u8> = Vec::new();
    image::codecs::png::PngEncoder::new(&mut png_bytes)
        .write_image(
            img.as_raw(),
            img.width(),
            img.height(),
            image::ExtendedColorType::L8,
        )
        .map_err(|e| ImageEngineError::Png(e.to_string()))?;
    Ok(png_bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAYLOAD: &str =
        "00020101021230370016A000000677010111011300669888700755406129.005802TH530376463042B48";

    fn decode_svg(url: &str) -> String {
        let encoded = url.strip_prefix(SVG_DATA_URL_PREFIX).unwrap();
        String::from_utf8(STANDARD.decode(encoded).unwrap()).unwrap()
    }

    /// Paint the rectangles of the path filled with `dark` onto a white canvas.
    fn rasterize_svg(svg: &str, dark: &str) -> GrayImage {
        let size = |attr: &str| -> u32 {
            let re = regex::Regex::new(&format!(r#"<svg[^>]*\s{attr}="(\d+)""#)).unwrap();
            re.captures(svg).unwrap()[1].parse().unwrap()
        };
        let mut img = GrayImage::from_pixel(size("width"), size("height"), Luma([255]));

        let path_re = regex::Regex::new(r"<path[^>]*>").unwrap();
        let fill = format!(r#"fill="{dark}""#);
        let path = path_re
            .find_iter(svg)
            .map(|m| m.as_str())
            .find(|p| p.contains(&fill))
            .expect("no path drawn in the dark color");
        let d_re = regex::Regex::new(r#"\sd="([^"]*)""#).unwrap();
        let d = d_re.captures(path).unwrap()[1].to_string();

        let rect_re = regex::Regex::new(r"M(\d+) (\d+)h(\d+)v(\d+)").unwrap();
        for c in rect_re.captures_iter(&d) {
            let [x, y, w, h] = [1, 2, 3, 4].map(|i| c[i].parse::<u32>().unwrap());
            for py in y..y + h {
                for px in x..x + w {
                    img.put_pixel(px, py, Luma([0]));
                }
            }
        }
        img
    }

    fn scan(img: &GrayImage) -> String {
        let mut prepared = rqrr::PreparedImage::prepare_from_greyscale(
            img.width() as usize,
            img.height() as usize,
            |x, y| img.get_pixel(x as u32, y as u32).0[0],
        );
        let grids = prepared.detect_grids();
        assert_eq!(grids.len(), 1, "expected exactly one symbol");
        let (_meta, content) = grids[0].decode().unwrap();
        content
    }

    #[test]
    fn svg_data_url_has_prefix() {
        let url = svg_data_url(PAYLOAD, &QrStyle::default()).unwrap();
        assert!(url.starts_with("data:image/svg+xml;base64,"));
        let svg = decode_svg(&url);
        assert!(svg.contains("<svg"));
        assert!(svg.contains("#000000"));
        assert!(svg.contains("#ffffff"));
    }

    #[test]
    fn svg_is_deterministic() {
        let style = QrStyle::default();
        assert_eq!(
            svg_data_url(PAYLOAD, &style).unwrap(),
            svg_data_url(PAYLOAD, &style).unwrap()
        );
    }

    #[test]
    fn svg_uses_custom_colors() {
        let style = QrStyle {
            dark: "#0f172a".into(),
            light: "#f8fafc".into(),
            ..QrStyle::default()
        };
        let svg = render_svg(PAYLOAD, &style).unwrap();
        assert!(svg.contains("#0f172a"));
        assert!(svg.contains("#f8fafc"));
    }

    #[test]
    fn empty_payload_is_rejected() {
        let style = QrStyle::default();
        assert!(matches!(svg_data_url("", &style), Err(ImageEngineError::EmptyPayload)));
        assert!(matches!(render_png("", &style), Err(ImageEngineError::EmptyPayload)));
    }

    #[test]
    fn oversized_payload_fails_to_encode() {
        // Byte-mode capacity at level M tops out at 2331 bytes
        let huge = "A".repeat(4000);
        assert!(matches!(
            svg_data_url(&huge, &QrStyle::default()),
            Err(ImageEngineError::Encode(_))
        ));
    }

    #[test]
    fn svg_data_url_scans_back_to_payload() {
        let style = QrStyle::default().with_module_size(4);
        let svg = decode_svg(&svg_data_url(PAYLOAD, &style).unwrap());
        let img = rasterize_svg(&svg, &style.dark);
        assert_eq!(scan(&img), PAYLOAD);
    }

    #[test]
    fn raster_scans_back_to_payload() {
        let img = render_luma(PAYLOAD, &QrStyle::default().with_module_size(4)).unwrap();
        assert_eq!(scan(&img), PAYLOAD);
    }

    #[test]
    fn raster_size_includes_quiet_zone() {
        let code = QrCode::with_error_correction_level(PAYLOAD.as_bytes(), EC_LEVEL).unwrap();
        let modules = code.width() as u32;

        let style = QrStyle::default().with_module_size(3);
        let with_border = render_luma(PAYLOAD, &style).unwrap();
        assert_eq!(with_border.width(), (modules + 8) * 3);
        assert_eq!(with_border.width(), with_border.height());

        let bare = render_luma(PAYLOAD, &style.with_quiet_zone(false)).unwrap();
        assert_eq!(bare.width(), modules * 3);
    }

    #[test]
    fn png_has_magic_bytes() {
        let png = render_png(PAYLOAD, &QrStyle::default()).unwrap();
        assert!(png.len() > 8);
        assert_eq!(&png[..4], &[0x89, b'P', b'N', b'G']);
    }

    #[test]
    fn module_size_is_clamped() {
        let style = QrStyle::default().with_module_size(0);
        assert_eq!(style.module_size, 1);
        assert!(render_luma(PAYLOAD, &style).is_ok());
    }
}
