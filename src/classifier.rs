//! Abnormal-value flagging for a single report row.
//!
//! `classify` never fails: anything it cannot evaluate is reported as
//! normal so an oddly typed range never blocks a report.

pub mod number;
pub mod range;

use crate::models::{Gender, ResultFlag};
use crate::rules::ReportRules;

use range::RangeContext;

/// Everything `classify` looks at for one row.
#[derive(Debug, Clone, Copy)]
pub struct ClassifyInput<'a> {
    pub parameter_name: &'a str,
    pub value: &'a str,
    pub reference_range: &'a str,
    pub gender: Option<Gender>,
    pub age: Option<f64>,
}

pub fn classify(input: &ClassifyInput<'_>, rules: &ReportRules) -> ResultFlag {
    if rules.is_non_numeric(input.parameter_name) {
        return ResultFlag::Normal;
    }

    let value = input.value.trim();
    if value.is_empty() {
        return ResultFlag::Normal;
    }

    if rules.is_dropdown(input.parameter_name) {
        return classify_dropdown(value, input.reference_range);
    }

    let Some(number) = number::parse_value(value) else {
        tracing::debug!(parameter = input.parameter_name, value, "Value is not numeric");
        return ResultFlag::Normal;
    };

    let reference = input.reference_range.replace(',', "");
    let ctx = RangeContext {
        value: number,
        gender: input.gender,
        age: input.age,
        adult_age_years: rules.adult_age_years,
    };

    match range::evaluate(&reference, &ctx) {
        Some((rule, flag)) => {
            tracing::trace!(parameter = input.parameter_name, ?rule, %flag, "Range matched");
            flag
        }
        None => {
            if !reference.trim().is_empty() {
                tracing::debug!(
                    parameter = input.parameter_name,
                    range = %reference,
                    "Unrecognised reference range, treating as normal"
                );
            }
            ResultFlag::Normal
        }
    }
}

/// The reference holds the expected answer, e.g. "Negative". Any other
/// answer is out of range; there is no direction, so it is flagged high.
fn classify_dropdown(value: &str, reference_range: &str) -> ResultFlag {
    let expected = reference_range.trim().to_lowercase();
    if expected.is_empty() || value.to_lowercase() == expected {
        ResultFlag::Normal
    } else {
        ResultFlag::High
    }
}
