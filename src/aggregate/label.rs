//! Tooltip label formatting for the state map.
//!
//! Numbers are rendered in their natural float form: the shortest text that
//! round-trips, with integral values keeping a trailing `.0` (`2.0`, not `2`),
//! and scientific notation outside `[1e-4, 1e16)`. Only the bed utilization is
//! rounded (to two decimals) before rendering.

use crate::domain::MetricValues;
use crate::math::round_to;

/// Build the multi-line tooltip for one state.
///
/// ```text
/// NC
/// Bed Utilization 0.12
/// Staff Short Today 2.0
/// Staff Shortage Week 5.0
/// Covid Deaths 10.0
/// ```
pub fn format_state_label(state: &str, medians: &MetricValues) -> String {
    [
        state.to_string(),
        format!("Bed Utilization {}", natural_float(round_to(medians.bed_utilization, 2))),
        format!("Staff Short Today {}", natural_float(medians.staff_shortage_today)),
        format!("Staff Shortage Week {}", natural_float(medians.staff_shortage_week)),
        format!("Covid Deaths {}", natural_float(medians.deaths)),
    ]
    .join("\n")
}

/// Render a float the way a plain `str(float)` would.
pub fn natural_float(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let abs = value.abs();
    if abs != 0.0 && !(1e-4..1e16).contains(&abs) {
        return scientific(value);
    }
    if value.fract() == 0.0 {
        return format!("{value:.1}");
    }
    format!("{value}")
}

/// `1e-7` -> `1e-07`, `1.5e16` -> `1.5e+16`.
fn scientific(value: f64) -> String {
    let s = format!("{value:e}");
    let Some((mantissa, exp)) = s.split_once('e') else {
        return s;
    };
    let (sign, digits) = match exp.strip_prefix('-') {
        Some(d) => ('-', d),
        None => ('+', exp),
    };
    format!("{mantissa}e{sign}{digits:0>2}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_rounds_only_bed_utilization() {
        let medians = MetricValues {
            staff_shortage_today: 2.0,
            staff_shortage_week: 5.0,
            bed_utilization: 0.1234,
            deaths: 10.0,
        };
        assert_eq!(
            format_state_label("NC", &medians),
            "NC\nBed Utilization 0.12\nStaff Short Today 2.0\nStaff Shortage Week 5.0\nCovid Deaths 10.0"
        );
    }

    #[test]
    fn label_keeps_unrounded_fractions() {
        let medians = MetricValues {
            staff_shortage_today: 2.5,
            staff_shortage_week: 0.125,
            bed_utilization: 0.5,
            deaths: 10.75,
        };
        assert_eq!(
            format_state_label("SC", &medians),
            "SC\nBed Utilization 0.5\nStaff Short Today 2.5\nStaff Shortage Week 0.125\nCovid Deaths 10.75"
        );
    }

    #[test]
    fn natural_float_forms() {
        assert_eq!(natural_float(0.0), "0.0");
        assert_eq!(natural_float(-3.0), "-3.0");
        assert_eq!(natural_float(0.1), "0.1");
        assert_eq!(natural_float(1e-7), "1e-07");
        assert_eq!(natural_float(2.5e16), "2.5e+16");
        assert_eq!(natural_float(f64::NAN), "nan");
    }
}
