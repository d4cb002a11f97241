//! Free-text salary strings to yearly USD estimates.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::text::normalize;

static AMOUNT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+(?:\.\d+)?)\s*(k)?").unwrap());

const HOUR_TOKENS: &[&str] = &["/hr", "per hour", "hour"];
const MONTH_TOKENS: &[&str] = &["/month", "per month"];
const WEEK_TOKENS: &[&str] = &["/week", "per week"];

const HOURS_PER_YEAR: f64 = 2080.0;
const WEEKS_PER_YEAR: f64 = 52.0;
const MONTHS_PER_YEAR: f64 = 12.0;

/// Yearly bounds outside this range are treated as a bad parse.
pub const MIN_PLAUSIBLE_YEARLY: f64 = 15_000.0;
pub const MAX_PLAUSIBLE_YEARLY: f64 = 700_000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SalaryUnit {
    Hour,
    Week,
    Month,
    Year,
    Unknown,
}

impl SalaryUnit {
    pub fn as_str(self) -> &'static str {
        match self {
            SalaryUnit::Hour => "hour",
            SalaryUnit::Week => "week",
            SalaryUnit::Month => "month",
            SalaryUnit::Year => "year",
            SalaryUnit::Unknown => "unknown",
        }
    }

    /// Multiplier from this pay period to a year.
    pub fn yearly_factor(self) -> f64 {
        match self {
            SalaryUnit::Hour => HOURS_PER_YEAR,
            SalaryUnit::Week => WEEKS_PER_YEAR,
            SalaryUnit::Month => MONTHS_PER_YEAR,
            SalaryUnit::Year | SalaryUnit::Unknown => 1.0,
        }
    }
}

impl fmt::Display for SalaryUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parsed salary. `unit` is always set; the bounds are either both present
/// or both absent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SalaryEstimate {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub unit: SalaryUnit,
}

impl SalaryEstimate {
    fn unparsed(unit: SalaryUnit) -> Self {
        SalaryEstimate {
            min: None,
            max: None,
            unit,
        }
    }

    pub fn mid(&self) -> Option<f64> {
        match (self.min, self.max) {
            (Some(lo), Some(hi)) => Some((lo + hi) / 2.0),
            _ => None,
        }
    }
}

/// Parse a raw salary string into a yearly USD range.
///
/// Only the first two numbers are considered, so text such as
/// `"2024 bonus, 90k-110k"` yields a range built from `2024` and `90000`.
pub fn parse(raw: &str) -> SalaryEstimate {
    let cleaned = normalize(raw);
    if cleaned.is_empty() {
        return SalaryEstimate::unparsed(SalaryUnit::Unknown);
    }
    let text = cleaned.to_lowercase().replace(',', "");
    let unit = detect_unit(&text);

    let mut amounts = AMOUNT_RE.captures_iter(&text).filter_map(|caps| {
        let value: f64 = caps[1].parse().ok()?;
        Some(if caps.get(2).is_some() { value * 1000.0 } else { value })
    });

    let (lo, hi) = match (amounts.next(), amounts.next()) {
        (Some(a), Some(b)) => (a.min(b), a.max(b)),
        (Some(a), None) => (a, a),
        _ => return SalaryEstimate::unparsed(unit),
    };

    let factor = unit.yearly_factor();
    let (lo, hi) = (lo * factor, hi * factor);
    if lo < MIN_PLAUSIBLE_YEARLY || hi > MAX_PLAUSIBLE_YEARLY {
        return SalaryEstimate::unparsed(unit);
    }

    SalaryEstimate {
        min: Some(lo),
        max: Some(hi),
        unit,
    }
}

fn detect_unit(text: &str) -> SalaryUnit {
    let has_any = |tokens: &[&str]| tokens.iter().any(|t| text.contains(t));
    if has_any(HOUR_TOKENS) {
        SalaryUnit::Hour
    } else if has_any(MONTH_TOKENS) {
        SalaryUnit::Month
    } else if has_any(WEEK_TOKENS) {
        SalaryUnit::Week
    } else {
        SalaryUnit::Year
    }
}

// ── Tests ──
