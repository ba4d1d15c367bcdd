//! Named test and parameter lists that change how a report is classified and laid out.
//!
//! These used to be literals scattered through the rendering code. They are
//! data here so a lab can extend them from a JSON file without code changes.

use std::path::Path;

use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum RulesError {
    #[error("Rules file load failed ({0}): {1}")]
    Load(String, String),

    #[error("Rules file parse failed ({0}): {1}")]
    Parse(String, String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReportRules {
    /// Parameters that never have an abnormal state.
    pub non_numeric_parameters: Vec<String>,
    /// Parameters whose reference range holds the single expected value.
    pub dropdown_parameters: Vec<String>,
    /// Test names whose table omits the unit and reference columns.
    pub suppressed_templates: Vec<String>,
    pub adult_age_years: f64,
    pub differential_header: String,
    pub differential_trigger: String,
}

impl Default for ReportRules {
    fn default() -> Self {
        Self {
            non_numeric_parameters: vec!["Blood Group".into()],
            dropdown_parameters: vec![
                "Blood Group".into(),
                "HBsAg test".into(),
                "HIV I".into(),
                "HIV II".into(),
                "RESULT".into(),
            ],
            suppressed_templates: vec![
                "blood group".into(),
                "vdrl test".into(),
                "hbsag test".into(),
                "hiv i & ii".into(),
                "widal test".into(),
                "urine pregnancy test".into(),
                "malaria parasite".into(),
            ],
            adult_age_years: 18.0,
            differential_header: "Differential Count".into(),
            differential_trigger: "neutrophils".into(),
        }
    }
}

fn contains_name(list: &[String], name: &str) -> bool {
    let name = name.trim();
    list.iter().any(|entry| entry.trim().eq_ignore_ascii_case(name))
}

impl ReportRules {
    /// Load rules from a JSON file. Missing keys keep their defaults.
    pub fn load(path: &Path) -> Result<Self, RulesError> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| RulesError::Load(path.display().to_string(), e.to_string()))?;
        serde_json::from_str(&json)
            .map_err(|e| RulesError::Parse(path.display().to_string(), e.to_string()))
    }

    pub fn is_non_numeric(&self, parameter: &str) -> bool {
        contains_name(&self.non_numeric_parameters, parameter)
    }

    pub fn is_dropdown(&self, parameter: &str) -> bool {
        contains_name(&self.dropdown_parameters, parameter)
    }

    pub fn suppresses_columns(&self, template_name: &str) -> bool {
        contains_name(&self.suppressed_templates, template_name)
    }

    pub fn is_differential_trigger(&self, parameter: &str) -> bool {
        parameter
            .trim()
            .eq_ignore_ascii_case(self.differential_trigger.trim())
    }

    pub fn is_differential_header(&self, parameter: &str) -> bool {
        parameter
            .trim()
            .eq_ignore_ascii_case(self.differential_header.trim())
    }
}
