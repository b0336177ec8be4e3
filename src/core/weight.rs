// CullTracker - core/weight.rs
//
// Weight string parsing and best-five scoring.
//
// Weights are stored exactly as typed and only parsed here, at read time.
// A string that does not parse is "not a number" (`None`) and is silently
// left out of the total; nothing in this module fails.

use crate::core::model::{UnitMode, WeightPart};
use crate::util::constants::{BEST_FISH_COUNT, OUNCES_PER_POUND};
use regex::Regex;
use std::sync::OnceLock;

/// Leading decimal number: optional sign, digits with optional fraction (or
/// a bare fraction), optional exponent. ASCII digits only.
fn leading_number() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[+-]?(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)(?:[eE][+-]?[0-9]+)?")
            .expect("leading number pattern is valid")
    })
}

/// Parse the longest numeric prefix after leading whitespace.
///
/// `"3.25"` and `"3.25 lbs"` both give 3.25; `""` and `"abc"` give `None`.
pub fn parse_leading_decimal(raw: &str) -> Option<f64> {
    let trimmed = raw.trim_start();
    let m = leading_number().find(trimmed)?;
    m.as_str().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse a whole token as a finite number. Surrounding whitespace is ignored.
fn parse_token(token: &str) -> Option<f64> {
    let token = token.trim();
    if token.is_empty() {
        return None;
    }
    token.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Split a `"<lbs> <oz>"` string at its first space.
///
/// A string without a space is all pounds; the ounces half is then empty.
pub fn split_lbs_oz(raw: &str) -> (&str, &str) {
    raw.split_once(' ').unwrap_or((raw, ""))
}

/// Convert a raw weight string to decimal pounds.
///
/// `LbsOz` rules: pounds must parse or the whole weight is `None`; ounces
/// that are missing, empty, or unparseable count as zero.
pub fn convert_to_decimal(raw: &str, unit: UnitMode) -> Option<f64> {
    match unit {
        UnitMode::Decimal => parse_leading_decimal(raw),
        UnitMode::LbsOz => {
            let (lbs, oz) = split_lbs_oz(raw);
            let lbs = parse_token(lbs)?;
            let oz = parse_token(oz).unwrap_or(0.0);
            Some(lbs + oz / OUNCES_PER_POUND)
        }
    }
}

/// Sum of the heaviest `BEST_FISH_COUNT` parseable weights.
pub fn best_five_value<'a, I>(weights: I, unit: UnitMode) -> f64
where
    I: IntoIterator<Item = &'a str>,
{
    let mut values: Vec<f64> = weights
        .into_iter()
        .filter_map(|w| convert_to_decimal(w, unit))
        .collect();
    values.sort_by(|a, b| b.total_cmp(a));
    values.iter().take(BEST_FISH_COUNT).sum()
}

/// Best-five total formatted to two decimals, e.g. `"16.00"`.
pub fn best_five_total<'a, I>(weights: I, unit: UnitMode) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    format_total(best_five_value(weights, unit))
}

/// Format pounds to exactly two decimals.
///
/// Exact ties at the third decimal round half away from zero, so a
/// 3 lb 2 oz fish (3.125) reads "3.13". `format!("{:.2}")` alone would give
/// "3.12".
pub fn format_total(value: f64) -> String {
    let cents = (value * 100.0).round();
    let rounded = cents / 100.0;
    // Avoid "-0.00" for tiny negative sums.
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    format!("{rounded:.2}")
}

/// Replace one half of a `"<lbs> <oz>"` string, keeping the other half.
///
/// Missing halves default to empty, so typing ounces first yields `" 4"`.
pub fn splice_weight_part(existing: Option<&str>, part: WeightPart, value: &str) -> String {
    let (lbs, oz) = existing.map(split_lbs_oz).unwrap_or(("", ""));
    match part {
        WeightPart::Pounds => format!("{value} {oz}"),
        WeightPart::Ounces => format!("{lbs} {value}"),
    }
}
