//! Multi-factor priority scoring for field visits
//!
//! Six independent scorers share a weight budget of 100:
//! season 22, payment timing 22, holder tier 20, business engagement 12,
//! cooperative awareness 12, support level 12. Every scorer tolerates
//! missing or malformed input by returning its empty-case value.

use crate::models::visit::{FactorScores, VisitRecord};
use crate::types::Cell;
use crate::validation::parse_day_count;

pub const WEIGHT_SEASON: f64 = 22.0;
pub const WEIGHT_PAYMENT: f64 = 22.0;
pub const WEIGHT_HOLDER: f64 = 20.0;
pub const WEIGHT_BUSINESS: f64 = 12.0;
pub const WEIGHT_SABHASAD: f64 = 12.0;
pub const WEIGHT_SUPPORT: f64 = 12.0;

/// Day-count brackets shared by the dispatch and demo counters:
/// (upper bound in days, points awarded).
pub const DAY_SCORE_BRACKETS: &[(f64, f64)] = &[(10.0, 22.0), (20.0, 18.0), (30.0, 13.0), (45.0, 7.0)];

/// Points for a counter beyond the last bracket.
pub const DAY_SCORE_BEYOND: f64 = 2.0;

/// Month names and abbreviations matched as substrings of the
/// delivery-period text. Longer aliases come first so a full name and
/// its abbreviation resolve to the same position.
const MONTH_LOOKUP: &[(&str, u32)] = &[
    ("january", 1),
    ("jan", 1),
    ("february", 2),
    ("feb", 2),
    ("march", 3),
    ("mar", 3),
    ("april", 4),
    ("apr", 4),
    ("may", 5),
    ("june", 6),
    ("jun", 6),
    ("july", 7),
    ("jul", 7),
    ("august", 8),
    ("aug", 8),
    ("september", 9),
    ("sept", 9),
    ("sep", 9),
    ("set", 9),
    ("october", 10),
    ("oct", 10),
    ("november", 11),
    ("nov", 11),
    ("december", 12),
    ("dec", 12),
];

/// Round to two decimals, matching spreadsheet-style rounding everywhere
/// a score is produced.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Circular distance between two months on the 12-month wheel.
pub fn month_distance(a: u32, b: u32) -> u32 {
    let d = a.abs_diff(b);
    d.min(12 - d)
}

/// Parse a free-text delivery period into the months it covers.
///
/// Matched months are ordered by where they first appear in the text; the
/// season is the inclusive range from the first-mentioned to the
/// last-mentioned month. When the end month precedes the start month
/// ("Nov-Feb"), the range wraps across year-end. Fewer than two distinct
/// months are returned as-is.
pub fn parse_season_months(period: &Cell) -> Vec<u32> {
    let Some(text) = period.render() else {
        return Vec::new();
    };
    let text = text.to_lowercase();

    // earliest mention of each distinct month
    let mut mentions: Vec<(usize, u32)> = Vec::new();
    for &(name, month) in MONTH_LOOKUP {
        if let Some(pos) = text.find(name) {
            match mentions.iter_mut().find(|(_, m)| *m == month) {
                Some(entry) => entry.0 = entry.0.min(pos),
                None => mentions.push((pos, month)),
            }
        }
    }
    mentions.sort_unstable();

    let months: Vec<u32> = mentions.into_iter().map(|(_, m)| m).collect();
    if months.len() < 2 {
        return months;
    }

    let start = months[0];
    let end = months[months.len() - 1];
    if end >= start {
        (start..=end).collect()
    } else {
        (start..=12).chain(1..=end).collect()
    }
}

/// Minimum circular distance from the current month to any season month.
/// An empty season is treated as maximally distant.
pub fn season_distance(current_month: u32, season: &[u32]) -> u32 {
    season
        .iter()
        .map(|&m| month_distance(current_month, m))
        .min()
        .unwrap_or(99)
}

/// Season score: full weight at the center of the demand window, decaying
/// with circular distance inside and outside the window.
pub fn score_season(period: &Cell, current_month: u32) -> f64 {
    let season = parse_season_months(period);
    if season.is_empty() {
        return 0.0;
    }

    let w = WEIGHT_SEASON;
    if season.contains(&current_month) {
        // Upper-middle element is the historical center choice for
        // even-length windows; kept for compatibility with prior runs.
        let center = season[season.len() / 2];
        match month_distance(current_month, center) {
            0 => w,
            1 => round2(w * 0.85),
            _ => round2(w * 0.73),
        }
    } else {
        match season_distance(current_month, &season) {
            1 => round2(w * 0.40),
            2 => round2(w * 0.20),
            3 => round2(w * 0.07),
            _ => 2.0,
        }
    }
}

fn day_bracket_points(days: f64) -> f64 {
    for &(max_days, points) in DAY_SCORE_BRACKETS {
        if days <= max_days {
            return points;
        }
    }
    DAY_SCORE_BEYOND
}

/// Payment-timing score combining the dispatch and demo day counters.
///
/// Dispatch carries double weight when both counters are present; a
/// demo-only reading is discounted to 70%.
pub fn score_payment(demo_days: &Cell, dispatch_days: &Cell) -> f64 {
    let dispatch = parse_day_count(dispatch_days).map(day_bracket_points);
    let demo = parse_day_count(demo_days).map(day_bracket_points);

    match (dispatch, demo) {
        (Some(d), Some(m)) => round2((2.0 * d + m) / 3.0),
        (Some(d), None) => round2(d),
        (None, Some(m)) => round2(m * 0.7),
        (None, None) => 0.0,
    }
}

/// Holder-tier score: exact match against H/M/L (or the full words).
pub fn score_holder(tier: &Cell) -> f64 {
    let Some(v) = tier.render() else {
        return 0.0;
    };
    match v.trim().to_uppercase().as_str() {
        "H" | "HIGH" => 20.0,
        "M" | "MEDIUM" => 10.0,
        "L" | "LOW" => 5.0,
        _ => 0.0,
    }
}

/// Ordered substring rules over an uppercased, trimmed value;
/// first match wins.
fn contains_score(value: &Cell, rules: &[(&str, f64)]) -> f64 {
    let Some(v) = value.render() else {
        return 0.0;
    };
    let v = v.trim().to_uppercase();
    for &(needle, points) in rules {
        if v.contains(needle) {
            return points;
        }
    }
    0.0
}

/// Business-engagement score. YES is checked before MID before NO.
pub fn score_business(current_business: &Cell) -> f64 {
    contains_score(
        current_business,
        &[("YES", WEIGHT_BUSINESS), ("MID", 7.0), ("NO", 0.0)],
    )
}

/// Cooperative-awareness score. NOT is checked before AWARE so
/// "not aware" never scores.
pub fn score_sabhasad(nature_sabhasad: &Cell) -> f64 {
    contains_score(nature_sabhasad, &[("NOT", 0.0), ("AWARE", WEIGHT_SABHASAD)])
}

/// Support-level score.
pub fn score_support(support: &Cell) -> f64 {
    contains_score(
        support,
        &[("HIGH", WEIGHT_SUPPORT), ("MEDIUM", 7.0), ("MED", 7.0), ("LOW", 2.0)],
    )
}

/// Score all six factors for one visit.
pub fn score_visit(visit: &VisitRecord, current_month: u32) -> FactorScores {
    FactorScores {
        season: score_season(&visit.delivery_period, current_month),
        payment: score_payment(&visit.demo_days, &visit.dispatch_days),
        holder: score_holder(&visit.holder_tier),
        business: score_business(&visit.current_business),
        sabhasad: score_sabhasad(&visit.nature_sabhasad),
        support: score_support(&visit.support),
    }
}
