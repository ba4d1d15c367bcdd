//! Reference-range grammar.
//!
//! Lab staff type ranges as free text. Each [`RangeRule`] recognises one
//! shape; [`RANGE_RULES`] fixes their priority and the first rule that
//! recognises the text decides the flag.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::{Gender, ResultFlag};

/// Optionally negative decimal. A `-` only counts as a sign when it does not
/// follow a digit, so `10-20` stays a range and `-2 - 2` starts below zero.
const NUMBER: &str = r"(-?\d+(?:\.\d+)?|-?\.\d+)";
/// Range separator: hyphen, en or em dash.
const DASH: &str = r"\s*[-–—]\s*";

fn pattern(template: &str) -> Regex {
    let source = template.replace("{num}", NUMBER).replace("{dash}", DASH);
    Regex::new(&source).unwrap()
}

static ADULT_RANGE: LazyLock<Regex> =
    LazyLock::new(|| pattern(r"(?i)\badults?\b[^\d\n]*?{num}{dash}{num}"));
static CHILD_RANGE: LazyLock<Regex> =
    LazyLock::new(|| pattern(r"(?i)\bchild(?:ren)?\b[^\d\n]*?{num}{dash}{num}"));
static MALE_RANGE: LazyLock<Regex> =
    LazyLock::new(|| pattern(r"(?i)\bm(?:ale)?\s*:\s*{num}{dash}{num}"));
static FEMALE_RANGE: LazyLock<Regex> =
    LazyLock::new(|| pattern(r"(?i)\bf(?:emale)?\s*:\s*{num}{dash}{num}"));
static PLAIN_RANGE: LazyLock<Regex> =
    LazyLock::new(|| pattern(r"(?:^|[^\d.])\s*{num}{dash}{num}"));
static UP_TO: LazyLock<Regex> = LazyLock::new(|| pattern(r"(?i)\bup\s*to\s*{num}"));
static LESS_THAN: LazyLock<Regex> = LazyLock::new(|| pattern(r"<\s*{num}"));
static GREATER_THAN: LazyLock<Regex> = LazyLock::new(|| pattern(r">\s*{num}"));

/// Inclusive numeric interval. Bounds typed in reverse are swapped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    pub fn new(a: f64, b: f64) -> Self {
        if a <= b {
            Self { min: a, max: b }
        } else {
            Self { min: b, max: a }
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }

    pub fn flag(&self, value: f64) -> ResultFlag {
        if value < self.min {
            ResultFlag::Low
        } else if value > self.max {
            ResultFlag::High
        } else {
            ResultFlag::Normal
        }
    }

    pub fn union(&self, other: &Bounds) -> Bounds {
        Bounds {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }
}

/// What a rule needs to know about the patient and the recorded value.
#[derive(Debug, Clone, Copy)]
pub struct RangeContext {
    pub value: f64,
    pub gender: Option<Gender>,
    pub age: Option<f64>,
    pub adult_age_years: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeRule {
    /// `Adults 10-20` together with `Children 20-30`.
    AgeConditional,
    /// `M: 13-17; F: 12-15`.
    GenderSpecific,
    /// `10-20`, `10 – 20 g/dL`.
    Plain,
    /// `Up to 40`, `Upto 40`.
    UpTo,
    /// `< 200`.
    LessThan,
    /// `> 60`.
    GreaterThan,
}

pub const RANGE_RULES: [RangeRule; 6] = [
    RangeRule::AgeConditional,
    RangeRule::GenderSpecific,
    RangeRule::Plain,
    RangeRule::UpTo,
    RangeRule::LessThan,
    RangeRule::GreaterThan,
];

fn capture_bounds(regex: &Regex, text: &str) -> Option<Bounds> {
    let caps = regex.captures(text)?;
    let low = caps.get(1)?.as_str().parse::<f64>().ok()?;
    let high = caps.get(2)?.as_str().parse::<f64>().ok()?;
    Some(Bounds::new(low, high))
}

fn capture_limit(regex: &Regex, text: &str) -> Option<f64> {
    regex.captures(text)?.get(1)?.as_str().parse::<f64>().ok()
}

/// Either of two ranges is acceptable. Outside both, direction is taken
/// from the lower of the two minimums.
fn flag_either(value: f64, a: &Bounds, b: &Bounds) -> ResultFlag {
    if a.contains(value) || b.contains(value) {
        ResultFlag::Normal
    } else {
        a.union(b).flag(value)
    }
}

impl RangeRule {
    /// `None` when the text does not have this rule's shape.
    pub fn evaluate(self, range: &str, ctx: &RangeContext) -> Option<ResultFlag> {
        match self {
            Self::AgeConditional => {
                let adults = capture_bounds(&ADULT_RANGE, range)?;
                let children = capture_bounds(&CHILD_RANGE, range)?;
                Some(match ctx.age {
                    Some(age) if age >= ctx.adult_age_years => adults.flag(ctx.value),
                    Some(_) => children.flag(ctx.value),
                    None => flag_either(ctx.value, &adults, &children),
                })
            }
            Self::GenderSpecific => {
                let male = capture_bounds(&MALE_RANGE, range)?;
                let female = capture_bounds(&FEMALE_RANGE, range)?;
                Some(match ctx.gender {
                    Some(Gender::Male) => male.flag(ctx.value),
                    Some(Gender::Female) => female.flag(ctx.value),
                    Some(Gender::Other) | None => male.union(&female).flag(ctx.value),
                })
            }
            Self::Plain => capture_bounds(&PLAIN_RANGE, range).map(|b| b.flag(ctx.value)),
            Self::UpTo => capture_limit(&UP_TO, range).map(|limit| {
                if ctx.value <= limit {
                    ResultFlag::Normal
                } else {
                    ResultFlag::High
                }
            }),
            Self::LessThan => capture_limit(&LESS_THAN, range).map(|limit| {
                if ctx.value < limit {
                    ResultFlag::Normal
                } else {
                    ResultFlag::High
                }
            }),
            Self::GreaterThan => capture_limit(&GREATER_THAN, range).map(|limit| {
                if ctx.value > limit {
                    ResultFlag::Normal
                } else {
                    ResultFlag::Low
                }
            }),
        }
    }
}

/// Run the rules in priority order. Returns the rule that matched.
pub fn evaluate(range: &str, ctx: &RangeContext) -> Option<(RangeRule, ResultFlag)> {
    RANGE_RULES
        .iter()
        .find_map(|rule| rule.evaluate(range, ctx).map(|flag| (*rule, flag)))
}
