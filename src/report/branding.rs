//! Letterhead, signature block and styling for a lab's reports.
//!
//! Each displayed field is looked up in a fixed order of sources (report
//! settings, then the lab record, then a generic default) and the first
//! source holding visible text wins.

use serde::Serialize;

use crate::models::lab::configured;
use crate::models::{FooterSettings, HeaderSettings, Lab, StylingSettings};

pub const DEFAULT_LAB_NAME: &str = "Pathology Laboratory";
pub const DEFAULT_DOCTOR_NAME: &str = "Dr. Consultant";
pub const DEFAULT_VERIFIED_BY: &str = "Authorized Signatory";
pub const DEFAULT_DESIGNATION: &str = "Pathologist";

pub const DEFAULT_PRIMARY_COLOR: &str = "#2c3e50";
pub const DEFAULT_SECONDARY_COLOR: &str = "#7f8c8d";
pub const DEFAULT_FONT_FAMILY: &str = "Arial, sans-serif";
pub const DEFAULT_FONT_SIZE: u32 = 12;

/// First source holding non-blank text.
pub fn first_configured<'a>(sources: &[Option<&'a str>]) -> Option<&'a str> {
    sources
        .iter()
        .copied()
        .flatten()
        .map(str::trim)
        .find(|s| !s.is_empty())
}

fn resolve(sources: &[Option<&str>], default: &str) -> String {
    first_configured(sources).unwrap_or(default).to_string()
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderBranding {
    pub show_header: bool,
    pub lab_name: String,
    pub doctor_name: String,
    pub lab_address: String,
    pub lab_phone: String,
    pub lab_email: String,
    pub header_image: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FooterBranding {
    pub show_footer: bool,
    pub verified_by: String,
    pub designation: String,
    pub signature: String,
    pub footer_image: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Styling {
    pub primary_color: String,
    pub secondary_color: String,
    pub font_family: String,
    pub font_size: u32,
}

/// The header is shown only when requested and the lab has set up at least
/// one identifying header field.
pub fn resolve_header(settings: &HeaderSettings, lab: &Lab, requested: bool) -> HeaderBranding {
    HeaderBranding {
        show_header: requested && settings.is_configured(),
        lab_name: resolve(&[configured(&settings.lab_name), Some(lab.name.as_str())], DEFAULT_LAB_NAME),
        doctor_name: resolve(&[configured(&settings.doctor_name)], DEFAULT_DOCTOR_NAME),
        lab_address: resolve(&[configured(&settings.address), Some(lab.address.as_str())], ""),
        lab_phone: resolve(&[configured(&settings.phone), Some(lab.phone.as_str())], ""),
        lab_email: resolve(&[configured(&settings.email), Some(lab.email.as_str())], ""),
        header_image: resolve(&[configured(&settings.header_image)], ""),
    }
}

pub fn resolve_footer(settings: &FooterSettings, requested: bool) -> FooterBranding {
    FooterBranding {
        show_footer: requested && settings.is_configured(),
        verified_by: resolve(&[configured(&settings.verified_by)], DEFAULT_VERIFIED_BY),
        designation: resolve(&[configured(&settings.designation)], DEFAULT_DESIGNATION),
        signature: resolve(&[configured(&settings.signature)], ""),
        footer_image: resolve(&[configured(&settings.footer_image)], ""),
    }
}

pub fn resolve_styling(settings: &StylingSettings) -> Styling {
    Styling {
        primary_color: resolve(&[configured(&settings.primary_color)], DEFAULT_PRIMARY_COLOR),
        secondary_color: resolve(&[configured(&settings.secondary_color)], DEFAULT_SECONDARY_COLOR),
        font_family: resolve(&[configured(&settings.font_family)], DEFAULT_FONT_FAMILY),
        font_size: settings.font_size.filter(|s| *s > 0).unwrap_or(DEFAULT_FONT_SIZE),
    }
}
