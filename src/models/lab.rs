use serde::{Deserialize, Serialize};

/// The lab entity itself, as stored alongside the tenant account.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Lab {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
}

/// Per-lab report branding and styling. Every field is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LabReportSettings {
    pub lab_id: String,
    pub header: HeaderSettings,
    pub footer: FooterSettings,
    pub styling: StylingSettings,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HeaderSettings {
    pub lab_name: Option<String>,
    pub doctor_name: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub header_image: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FooterSettings {
    pub verified_by: Option<String>,
    pub designation: Option<String>,
    pub signature: Option<String>,
    pub footer_image: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StylingSettings {
    pub primary_color: Option<String>,
    pub secondary_color: Option<String>,
    pub font_family: Option<String>,
    pub font_size: Option<u32>,
}

/// `Some` only when the field holds visible text.
pub(crate) fn configured(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

impl HeaderSettings {
    /// A lab "has a header" once any of its identifying fields is set.
    pub fn is_configured(&self) -> bool {
        [&self.header_image, &self.lab_name, &self.doctor_name]
            .into_iter()
            .any(|f| configured(f).is_some())
    }
}

impl FooterSettings {
    pub fn is_configured(&self) -> bool {
        [&self.signature, &self.footer_image]
            .into_iter()
            .any(|f| configured(f).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_settings_are_not_configured() {
        let settings = LabReportSettings::default();
        assert!(!settings.header.is_configured());
        assert!(!settings.footer.is_configured());
    }

    #[test]
    fn whitespace_does_not_count_as_configured() {
        let header = HeaderSettings {
            lab_name: Some("   ".into()),
            ..Default::default()
        };
        assert!(!header.is_configured());
    }

    #[test]
    fn address_alone_does_not_configure_header() {
        let header = HeaderSettings {
            address: Some("12 MG Road".into()),
            ..Default::default()
        };
        assert!(!header.is_configured());
    }

    #[test]
    fn signature_configures_footer() {
        let footer = FooterSettings {
            signature: Some("https://cdn.example/sig.png".into()),
            ..Default::default()
        };
        assert!(footer.is_configured());
    }

    #[test]
    fn settings_deserialize_from_camel_case() {
        let settings: LabReportSettings = serde_json::from_value(json!({
            "labId": "lab-1",
            "header": { "doctorName": "Dr. Rao", "headerImage": "https://cdn.example/h.png" },
            "styling": { "primaryColor": "#003366", "fontSize": 11 }
        }))
        .unwrap();
        assert_eq!(settings.header.doctor_name.as_deref(), Some("Dr. Rao"));
        assert_eq!(settings.styling.font_size, Some(11));
        assert!(settings.footer.verified_by.is_none());
    }
}
