use serde::Serialize;

use crate::config::RenderConfig;
use crate::models::{Lab, LabReportSettings, PatientInfo, Report, TestInfo};

use super::branding::{
    resolve_footer, resolve_header, resolve_styling, FooterBranding, HeaderBranding, Styling,
};
use super::dates::format_optional_date;
use super::error::ReportError;
use super::grouping::{build_groups, TemplateGroup};
use super::verification::{build_verification, Verification};

/// Caller's choice of letterhead. Both default to on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub show_header: bool,
    pub show_footer: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            show_header: true,
            show_footer: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientFields {
    pub patient_name: String,
    pub patient_age: String,
    pub patient_gender: String,
    pub patient_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestFields {
    pub test_name: String,
    pub test_category: String,
    pub sample_type: String,
    pub sample_collection_date: String,
    pub reference_doctor: String,
    pub report_date: String,
}

/// Everything the report template needs, as one flat JSON object.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderPayload {
    pub report_id: String,
    #[serde(flatten)]
    pub header: HeaderBranding,
    #[serde(flatten)]
    pub footer: FooterBranding,
    #[serde(flatten)]
    pub patient: PatientFields,
    #[serde(flatten)]
    pub test: TestFields,
    pub template_groups: Vec<TemplateGroup>,
    pub test_notes: String,
    pub abnormal_count: usize,
    #[serde(flatten)]
    pub styling: Styling,
    #[serde(flatten)]
    pub verification: Verification,
}

impl RenderPayload {
    pub fn to_json(&self) -> Result<String, ReportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn patient_fields(info: &PatientInfo) -> PatientFields {
    PatientFields {
        patient_name: info.name.trim().to_string(),
        patient_age: info.age.map(|a| a.to_string()).unwrap_or_default(),
        patient_gender: info.gender.map(|g| g.as_str().to_string()).unwrap_or_default(),
        patient_id: info.patient_id.trim().to_string(),
    }
}

fn test_fields(info: &TestInfo, created_at: Option<&str>) -> TestFields {
    TestFields {
        test_name: info.name.trim().to_string(),
        test_category: info.category.trim().to_string(),
        sample_type: info.sample_type.trim().to_string(),
        sample_collection_date: format_optional_date(info.sample_collection_date.as_deref()),
        reference_doctor: info.reference_doctor.trim().to_string(),
        report_date: format_optional_date(created_at),
    }
}

/// Assemble the render payload for one report.
///
/// The lab and its report settings are both required; a missing document
/// fails the whole render.
pub fn build_render_payload(
    report: &Report,
    lab: Option<&Lab>,
    settings: Option<&LabReportSettings>,
    options: RenderOptions,
    config: &RenderConfig,
) -> Result<RenderPayload, ReportError> {
    let lab = lab.ok_or_else(|| ReportError::LabNotFound(report.lab_id.clone()))?;
    let settings = settings.ok_or_else(|| ReportError::SettingsNotFound(report.lab_id.clone()))?;

    let template_groups = build_groups(report, &config.rules);
    let abnormal_count = template_groups.iter().map(|g| g.abnormal_count).sum();

    let payload = RenderPayload {
        report_id: report.id.clone(),
        header: resolve_header(&settings.header, lab, options.show_header),
        footer: resolve_footer(&settings.footer, options.show_footer),
        patient: patient_fields(&report.patient_info),
        test: test_fields(&report.test_info, report.created_at.as_deref()),
        template_groups,
        test_notes: report.test_notes.trim().to_string(),
        abnormal_count,
        styling: resolve_styling(&settings.styling),
        verification: build_verification(&config.public_base_url, &report.id, config.qr_width),
    };

    tracing::info!(
        report_id = %payload.report_id,
        groups = payload.template_groups.len(),
        abnormal = payload.abnormal_count,
        "Render payload built"
    );

    Ok(payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Gender, HeaderSettings, ReportResult};
    use crate::report::branding::{DEFAULT_DOCTOR_NAME, DEFAULT_FONT_SIZE};
    use serde_json::json;

    fn lab() -> Lab {
        Lab {
            id: "lab-1".into(),
            name: "Sunrise Diagnostics".into(),
            address: "12 MG Road, Pune".into(),
            phone: "020-5550100".into(),
            email: "desk@sunrise.example".into(),
        }
    }

    fn settings() -> LabReportSettings {
        LabReportSettings {
            lab_id: "lab-1".into(),
            header: HeaderSettings {
                header_image: Some("https://cdn.example/header.png".into()),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    fn report() -> Report {
        Report {
            id: "65f0c2a1".into(),
            lab_id: "lab-1".into(),
            patient_info: PatientInfo {
                name: "Asha Kulkarni".into(),
                age: Some(34.0),
                gender: Some(Gender::Female),
                patient_id: "P-0042".into(),
            },
            test_info: TestInfo {
                name: "Complete Blood Count".into(),
                sample_collection_date: Some("2024-03-07T09:15:00Z".into()),
                ..Default::default()
            },
            results: vec![
                ReportResult {
                    parameter_name: "Hemoglobin".into(),
                    value: "10.1".into(),
                    unit: "g/dL".into(),
                    reference_range: "M: 13-17; F: 12-15".into(),
                    ..Default::default()
                },
                ReportResult {
                    parameter_name: "Neutrophils".into(),
                    value: "62".into(),
                    unit: "%".into(),
                    reference_range: "40-70".into(),
                    ..Default::default()
                },
            ],
            test_notes: " Correlate clinically. ".into(),
            created_at: Some("2024-03-08T11:00:00.000Z".into()),
            ..Default::default()
        }
    }

    fn build(report: &Report) -> Result<RenderPayload, ReportError> {
        build_render_payload(
            report,
            Some(&lab()),
            Some(&settings()),
            RenderOptions::default(),
            &RenderConfig::default(),
        )
    }

    #[test]
    fn missing_lab_is_not_found() {
        let err = build_render_payload(
            &report(),
            None,
            Some(&settings()),
            RenderOptions::default(),
            &RenderConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, ReportError::LabNotFound(ref id) if id == "lab-1"));
    }

    #[test]
    fn missing_settings_is_not_found() {
        let err = build_render_payload(
            &report(),
            Some(&lab()),
            None,
            RenderOptions::default(),
            &RenderConfig::default(),
        )
        .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn payload_carries_patient_and_dates() {
        let payload = build(&report()).unwrap();
        assert_eq!(payload.patient.patient_name, "Asha Kulkarni");
        assert_eq!(payload.patient.patient_age, "34");
        assert_eq!(payload.patient.patient_gender, "female");
        assert_eq!(payload.test.sample_collection_date, "07/03/2024");
        assert_eq!(payload.test.report_date, "08/03/2024");
        assert_eq!(payload.test_notes, "Correlate clinically.");
    }

    #[test]
    fn payload_groups_and_flags() {
        let payload = build(&report()).unwrap();
        assert_eq!(payload.template_groups.len(), 1);
        let rows = &payload.template_groups[0].rows;
        assert_eq!(rows[0].name, "Hemoglobin");
        assert!(rows[0].is_abnormal);
        assert_eq!(rows[1].name, "Differential Count");
        assert_eq!(payload.abnormal_count, 1);
    }

    #[test]
    fn branding_falls_back_to_lab_and_defaults() {
        let payload = build(&report()).unwrap();
        assert!(payload.header.show_header);
        assert_eq!(payload.header.lab_name, "Sunrise Diagnostics");
        assert_eq!(payload.header.doctor_name, DEFAULT_DOCTOR_NAME);
        assert!(!payload.footer.show_footer);
        assert_eq!(payload.styling.font_size, DEFAULT_FONT_SIZE);
    }

    #[test]
    fn header_can_be_turned_off() {
        let payload = build_render_payload(
            &report(),
            Some(&lab()),
            Some(&settings()),
            RenderOptions {
                show_header: false,
                show_footer: true,
            },
            &RenderConfig::default(),
        )
        .unwrap();
        assert!(!payload.header.show_header);
    }

    #[test]
    fn verification_uses_configured_base_url() {
        let config = RenderConfig {
            public_base_url: "https://labs.example.com".into(),
            ..RenderConfig::default()
        };
        let payload =
            build_render_payload(&report(), Some(&lab()), Some(&settings()), RenderOptions::default(), &config)
                .unwrap();
        assert_eq!(
            payload.verification.verification_url,
            "https://labs.example.com/api/reports/public/65f0c2a1/pdf"
        );
        assert!(!payload.verification.qr_code.is_empty());
    }

    #[test]
    fn qr_failure_does_not_fail_render() {
        let config = RenderConfig {
            public_base_url: format!("https://{}.example.com", "x".repeat(2000)),
            ..RenderConfig::default()
        };
        let payload =
            build_render_payload(&report(), Some(&lab()), Some(&settings()), RenderOptions::default(), &config)
                .unwrap();
        assert!(payload.verification.qr_code.is_empty());
    }

    #[test]
    fn malformed_rows_do_not_fail_render() {
        let mut report = report();
        report.results.push(ReportResult::default());
        report.results.push(ReportResult {
            parameter_name: "Glucose".into(),
            value: "???".into(),
            reference_range: "70-".into(),
            ..Default::default()
        });
        let payload = build(&report).unwrap();
        assert_eq!(payload.template_groups[0].rows.len(), 5);
    }

    #[test]
    fn json_is_flat() {
        let payload = build(&report()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&payload.to_json().unwrap()).unwrap();
        assert_eq!(value["labName"], json!("Sunrise Diagnostics"));
        assert_eq!(value["showHeader"], json!(true));
        assert_eq!(value["patientName"], json!("Asha Kulkarni"));
        assert_eq!(value["primaryColor"], json!("#2c3e50"));
        assert_eq!(value["reportId"], json!("65f0c2a1"));
        assert!(value["qrCode"].as_str().unwrap().starts_with("data:image/svg+xml;base64,"));
        assert_eq!(value["templateGroups"][0]["rows"][0]["flag"], json!("low"));
        assert_eq!(value["templateGroups"][0]["rows"][1]["flag"], json!(null));
        assert_eq!(value["templateGroups"][0]["suppressUnitAndReference"], json!(false));
    }

    #[test]
    fn inputs_are_not_mutated() {
        let report = report();
        let before = serde_json::to_value(&report).unwrap();
        build(&report).unwrap();
        build(&report).unwrap();
        assert_eq!(serde_json::to_value(&report).unwrap(), before);
    }

    #[test]
    fn second_render_is_identical() {
        let report = report();
        assert_eq!(build(&report).unwrap(), build(&report).unwrap());
    }
}
