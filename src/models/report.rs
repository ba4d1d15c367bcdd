use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::enums::Gender;

/// A stored report as handed over by the persistence layer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Report {
    #[serde(alias = "_id")]
    pub id: String,
    pub lab_id: String,
    pub patient_info: PatientInfo,
    pub test_info: TestInfo,
    pub results: Vec<ReportResult>,
    /// Notes keyed by template group id (or by stored template id for older reports).
    #[serde(deserialize_with = "deserialize_notes_map")]
    pub template_notes: BTreeMap<String, String>,
    #[serde(deserialize_with = "deserialize_lenient_string")]
    pub test_notes: String,
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PatientInfo {
    #[serde(deserialize_with = "deserialize_lenient_string")]
    pub name: String,
    #[serde(deserialize_with = "deserialize_lenient_number")]
    pub age: Option<f64>,
    #[serde(deserialize_with = "deserialize_gender")]
    pub gender: Option<Gender>,
    #[serde(deserialize_with = "deserialize_lenient_string")]
    pub patient_id: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TestInfo {
    #[serde(deserialize_with = "deserialize_lenient_string")]
    pub name: String,
    #[serde(deserialize_with = "deserialize_lenient_string")]
    pub category: String,
    #[serde(deserialize_with = "deserialize_lenient_string")]
    pub sample_type: String,
    pub sample_collection_date: Option<String>,
    #[serde(deserialize_with = "deserialize_lenient_string")]
    pub reference_doctor: String,
    #[serde(deserialize_with = "deserialize_lenient_number")]
    pub price: Option<f64>,
}

/// One row of a report's findings. Header rows are display-only dividers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReportResult {
    #[serde(deserialize_with = "deserialize_lenient_string")]
    pub parameter_name: String,
    #[serde(deserialize_with = "deserialize_lenient_string")]
    pub value: String,
    #[serde(deserialize_with = "deserialize_lenient_string")]
    pub unit: String,
    #[serde(deserialize_with = "deserialize_lenient_string")]
    pub reference_range: String,
    pub is_header: bool,
    pub is_subparameter: bool,
    pub template_group_id: Option<String>,
    /// Display name of the template this row came from.
    pub template_name: Option<String>,
    /// Stored template the group was instantiated from.
    pub template_id: Option<String>,
}

impl ReportResult {
    /// Group key, treating a blank id the same as a missing one.
    pub fn group_id(&self) -> Option<&str> {
        self.template_group_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
    }
}

// ─── Lenient deserializers ────────────────────────────────────────────────────

/// Accepts a string, a number, a bool or null. Anything else becomes empty.
fn deserialize_lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value_to_string(&value))
}

fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}

/// Accepts a number or a numeric string; anything else is unknown.
fn deserialize_lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|n| n.is_finite()))
}

fn deserialize_gender<'de, D>(deserializer: D) -> Result<Option<Gender>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_str().and_then(Gender::from_loose))
}

/// Notes arrive either as a JSON object or as an array of `[key, value]`
/// pairs (a serialized map). Both normalize to the same ordered map.
fn deserialize_notes_map<'de, D>(deserializer: D) -> Result<BTreeMap<String, String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let mut notes = BTreeMap::new();
    match value {
        Value::Object(map) => {
            for (key, note) in map {
                notes.insert(key, value_to_string(&note));
            }
        }
        Value::Array(entries) => {
            for entry in entries {
                match entry {
                    Value::Array(pair) if pair.len() == 2 => {
                        if let Some(key) = pair[0].as_str() {
                            notes.insert(key.to_string(), value_to_string(&pair[1]));
                        }
                    }
                    Value::Object(obj) => {
                        if let Some(key) = obj.get("key").and_then(Value::as_str) {
                            let note = obj.get("value").map(value_to_string).unwrap_or_default();
                            notes.insert(key.to_string(), note);
                        }
                    }
                    _ => {}
                }
            }
        }
        _ => {}
    }
    Ok(notes)
}
