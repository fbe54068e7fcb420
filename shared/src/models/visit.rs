//! Field-visit records and priority classification

use serde::Serialize;

use crate::types::Cell;

/// One field-visit row after positional column mapping.
///
/// Serde keys mirror the upstream spreadsheet export so scored output
/// stays wire-compatible with existing consumers.
#[derive(Debug, Clone, Serialize)]
pub struct VisitRecord {
    #[serde(rename = "SR_NO")]
    pub sr_no: Cell,
    #[serde(rename = "DATE")]
    pub date: Cell,
    #[serde(rename = "VILLAGE")]
    pub village: Cell,
    #[serde(rename = "TALUKA")]
    pub taluka: Cell,
    #[serde(rename = "DISTRICT")]
    pub district: Cell,
    #[serde(rename = "STATE")]
    pub state: Cell,
    #[serde(rename = "DAIRY_TYPE")]
    pub dairy_type: Cell,
    #[serde(rename = "TIME_MORNING")]
    pub time_morning: Cell,
    #[serde(rename = "TIME_EVENING")]
    pub time_evening: Cell,
    #[serde(rename = "MILK_MORNING")]
    pub milk_morning: Cell,
    #[serde(rename = "MILK_EVENING")]
    pub milk_evening: Cell,
    #[serde(rename = "SABHASAD_COUNT")]
    pub sabhasad_count: Cell,
    #[serde(rename = "NATURE_SABHASAD")]
    pub nature_sabhasad: Cell,
    #[serde(rename = "MANTRI_NAME")]
    pub mantri_name: Cell,
    #[serde(rename = "SUPPORT")]
    pub support: Cell,
    #[serde(rename = "DELIVERY_PERIOD")]
    pub delivery_period: Cell,
    #[serde(rename = "DEMO_DAYS")]
    pub demo_days: Cell,
    #[serde(rename = "DISPATCH_DAYS")]
    pub dispatch_days: Cell,
    #[serde(rename = "DECISION_MAKER")]
    pub decision_maker: Cell,
    #[serde(rename = "HIGH_LOW_HOLDER")]
    pub holder_tier: Cell,
    #[serde(rename = "CURRENT_BUSINESS")]
    pub current_business: Cell,
}

impl VisitRecord {
    /// Number of positionally mapped spreadsheet columns.
    pub const FIELD_COUNT: usize = 21;

    /// Build a record from cells in spreadsheet column order.
    ///
    /// Short rows are padded with empty cells; extra columns beyond the
    /// mapped 21 are ignored.
    pub fn from_cells(cells: Vec<Cell>) -> Self {
        let mut it = cells.into_iter();
        let mut next = move || it.next().unwrap_or(Cell::Empty);
        VisitRecord {
            sr_no: next(),
            date: next(),
            village: next(),
            taluka: next(),
            district: next(),
            state: next(),
            dairy_type: next(),
            time_morning: next(),
            time_evening: next(),
            milk_morning: next(),
            milk_evening: next(),
            sabhasad_count: next(),
            nature_sabhasad: next(),
            mantri_name: next(),
            support: next(),
            delivery_period: next(),
            demo_days: next(),
            dispatch_days: next(),
            decision_maker: next(),
            holder_tier: next(),
            current_business: next(),
        }
    }
}

/// Individual factor scores for one visit
#[derive(Debug, Clone, Copy, Serialize)]
pub struct FactorScores {
    #[serde(rename = "SCORE_SEASON")]
    pub season: f64,
    #[serde(rename = "SCORE_PAYMENT")]
    pub payment: f64,
    #[serde(rename = "SCORE_HOLDER")]
    pub holder: f64,
    #[serde(rename = "SCORE_BUSINESS")]
    pub business: f64,
    #[serde(rename = "SCORE_SABHASAD")]
    pub sabhasad: f64,
    #[serde(rename = "SCORE_SUPPORT")]
    pub support: f64,
}

impl FactorScores {
    /// Sum of the six factors, rounded to two decimals.
    pub fn total(&self) -> f64 {
        crate::models::scoring::round2(
            self.season + self.payment + self.holder + self.business + self.sabhasad
                + self.support,
        )
    }
}

/// A visit with its scores, rank, and priority bucket
#[derive(Debug, Clone, Serialize)]
pub struct ScoredVisit {
    #[serde(flatten)]
    pub visit: VisitRecord,
    #[serde(rename = "PRIORITY_RANK")]
    pub rank: u32,
    #[serde(rename = "PRIORITY_LABEL")]
    pub label: PriorityLabel,
    #[serde(rename = "TOTAL_SCORE")]
    pub total: f64,
    #[serde(flatten)]
    pub scores: FactorScores,
}

/// Priority bucket derived from the total score
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum PriorityLabel {
    /// Total score >= 75
    Urgent,
    /// Total score >= 55
    High,
    /// Total score >= 35
    Medium,
    /// Everything below 35
    Low,
}

impl PriorityLabel {
    /// Classify a total score; thresholds are evaluated high to low.
    pub fn from_score(total: f64) -> Self {
        if total >= 75.0 {
            PriorityLabel::Urgent
        } else if total >= 55.0 {
            PriorityLabel::High
        } else if total >= 35.0 {
            PriorityLabel::Medium
        } else {
            PriorityLabel::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PriorityLabel::Urgent => "URGENT",
            PriorityLabel::High => "HIGH",
            PriorityLabel::Medium => "MEDIUM",
            PriorityLabel::Low => "LOW",
        }
    }
}

impl std::fmt::Display for PriorityLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
