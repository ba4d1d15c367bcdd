use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use qrcode::render::svg;
use qrcode::{EcLevel, QrCode};
use serde::Serialize;

/// Public link and its QR code, printed on the report for authenticity checks.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Verification {
    pub verification_url: String,
    /// `data:` URL of the SVG code, empty when generation failed.
    pub qr_code: String,
}

pub fn verification_url(base_url: &str, report_id: &str) -> String {
    format!(
        "{}/api/reports/public/{}/pdf",
        base_url.trim_end_matches('/'),
        report_id
    )
}

/// Encode `url` at error correction level H.
pub fn encode_qr(url: &str) -> Result<QrCode, String> {
    QrCode::with_error_correction_level(url.as_bytes(), EcLevel::H)
        .map_err(|e| format!("QR generation failed: {e}"))
}

/// Render the verification QR code as an SVG string at least `width` px square.
pub fn generate_qr_svg(url: &str, width: u32) -> Result<String, String> {
    let code = encode_qr(url)?;

    let svg_string = code
        .render::<svg::Color>()
        .min_dimensions(width, width)
        .dark_color(svg::Color("#000000"))
        .light_color(svg::Color("#ffffff"))
        .quiet_zone(true)
        .build();

    Ok(svg_string)
}

pub fn svg_data_url(svg: &str) -> String {
    format!("data:image/svg+xml;base64,{}", STANDARD.encode(svg))
}

/// Build the verification block. A QR failure is logged and leaves the
/// code empty; the link itself is always present.
pub fn build_verification(base_url: &str, report_id: &str, qr_width: u32) -> Verification {
    let url = verification_url(base_url, report_id);
    let qr_code = match generate_qr_svg(&url, qr_width) {
        Ok(svg) => svg_data_url(&svg),
        Err(e) => {
            tracing::warn!(report_id, error = %e, "Continuing without verification QR code");
            String::new()
        }
    };
    Verification {
        verification_url: url,
        qr_code,
    }
}
