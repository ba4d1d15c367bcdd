//! Splits a report's flat result rows into per-template sections.

use std::collections::HashMap;

use serde::Serialize;

use crate::classifier::{classify, ClassifyInput};
use crate::models::{PatientInfo, Report, ReportResult, ResultFlag};
use crate::rules::ReportRules;

use super::notes::resolve_group_notes;

/// Group id given to rows saved without one.
pub const LEGACY_GROUP_ID: &str = "legacy";

/// One display row. Header rows carry no flag.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedRow {
    pub name: String,
    pub value: String,
    pub unit: String,
    pub reference_range: String,
    pub flag: Option<ResultFlag>,
    pub is_abnormal: bool,
    pub is_header: bool,
    pub is_subparameter: bool,
}

impl RenderedRow {
    pub fn header(name: &str) -> Self {
        Self {
            name: name.to_string(),
            value: String::new(),
            unit: String::new(),
            reference_range: String::new(),
            flag: None,
            is_abnormal: false,
            is_header: true,
            is_subparameter: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateGroup {
    pub group_id: String,
    pub display_name: String,
    pub rows: Vec<RenderedRow>,
    pub group_notes: String,
    pub suppress_unit_and_reference: bool,
    pub abnormal_count: usize,
}

/// Rows sharing a group id, in the order they were stored.
#[derive(Debug)]
struct RowGroup<'a> {
    group_id: String,
    rows: Vec<&'a ReportResult>,
}

impl RowGroup<'_> {
    fn first_present<F>(&self, field: F) -> Option<&str>
    where
        F: Fn(&ReportResult) -> Option<&str>,
    {
        self.rows
            .iter()
            .filter_map(|row| field(*row))
            .map(str::trim)
            .find(|s| !s.is_empty())
    }
}

/// Partition rows by group id, keeping the order groups first appear in.
fn partition(results: &[ReportResult]) -> Vec<RowGroup<'_>> {
    let mut groups: Vec<RowGroup<'_>> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for row in results {
        let id = row.group_id().unwrap_or(LEGACY_GROUP_ID);
        let slot = *index.entry(id).or_insert_with(|| {
            groups.push(RowGroup {
                group_id: id.to_string(),
                rows: Vec::new(),
            });
            groups.len() - 1
        });
        groups[slot].rows.push(row);
    }

    groups
}

pub fn render_row(row: &ReportResult, patient: &PatientInfo, rules: &ReportRules) -> RenderedRow {
    let flag = (!row.is_header).then(|| {
        classify(
            &ClassifyInput {
                parameter_name: &row.parameter_name,
                value: &row.value,
                reference_range: &row.reference_range,
                gender: patient.gender,
                age: patient.age,
            },
            rules,
        )
    });

    RenderedRow {
        name: row.parameter_name.clone(),
        value: row.value.clone(),
        unit: row.unit.clone(),
        reference_range: row.reference_range.clone(),
        is_abnormal: flag.is_some_and(|f| f.is_abnormal()),
        flag,
        is_header: row.is_header,
        is_subparameter: row.is_subparameter,
    }
}

/// CBC convention: the neutrophil row opens the "Differential Count"
/// sub-panel. Insert that header before the first neutrophil row unless a
/// matching header already precedes it. Returns whether a row was added.
pub fn insert_differential_header(rows: &mut Vec<RenderedRow>, rules: &ReportRules) -> bool {
    let Some(position) = rows
        .iter()
        .position(|r| !r.is_header && rules.is_differential_trigger(&r.name))
    else {
        return false;
    };

    let already_present = rows[..position]
        .iter()
        .any(|r| r.is_header && rules.is_differential_header(&r.name));
    if already_present {
        return false;
    }

    rows.insert(position, RenderedRow::header(&rules.differential_header));
    true
}

/// Blank the unit and reference columns for display only.
pub fn suppress_columns(rows: &mut [RenderedRow]) {
    for row in rows {
        row.unit.clear();
        row.reference_range.clear();
    }
}

/// Build display groups for a report. Input rows are never modified.
pub fn build_groups(report: &Report, rules: &ReportRules) -> Vec<TemplateGroup> {
    partition(&report.results)
        .into_iter()
        .map(|group| {
            let display_name = group
                .first_present(|r| r.template_name.as_deref())
                .or_else(|| Some(report.test_info.name.trim()).filter(|s| !s.is_empty()))
                .unwrap_or(&group.group_id)
                .to_string();
            let template_id = group.first_present(|r| r.template_id.as_deref());

            let mut rows: Vec<RenderedRow> = group
                .rows
                .iter()
                .map(|row| render_row(row, &report.patient_info, rules))
                .collect();

            if insert_differential_header(&mut rows, rules) {
                tracing::debug!(group_id = %group.group_id, "Inserted differential count header");
            }

            let suppress = rules.suppresses_columns(&display_name);
            if suppress {
                suppress_columns(&mut rows);
            }

            TemplateGroup {
                group_notes: resolve_group_notes(&report.template_notes, &group.group_id, template_id),
                abnormal_count: rows.iter().filter(|r| r.is_abnormal).count(),
                group_id: group.group_id.clone(),
                display_name,
                rows,
                suppress_unit_and_reference: suppress,
            }
        })
        .collect()
}
