//! Risk scoring: technical complexity estimation, the composite risk score,
//! and the score-to-level presentation mapping.
//!
//! Everything in this module is pure and deterministic. Scores are computed
//! at submission time, stored on the application row, and recomputed on
//! demand; the same inputs always produce the same score.

use crate::project_type::ProjectType;

// ---------------------------------------------------------------------------
// Score bounds
// ---------------------------------------------------------------------------

/// Lowest possible risk score.
pub const MIN_RISK_SCORE: i32 = 0;
/// Highest possible risk score.
pub const MAX_RISK_SCORE: i32 = 100;

/// Highest possible technical complexity.
pub const MAX_COMPLEXITY: i32 = 5;

// ---------------------------------------------------------------------------
// Complexity estimation
// ---------------------------------------------------------------------------

/// Vocabulary scanned (case-insensitively) in technical descriptions.
/// Each distinct term found counts once toward the term bonus.
pub const TECHNICAL_TERMS: &[&str] = &[
    "api",
    "database",
    "authentication",
    "integration",
    "microservice",
    "cloud",
    "deployment",
    "architecture",
    "scalability",
    "security",
    "algorithm",
    "optimization",
    "framework",
    "library",
    "backend",
    "frontend",
    "devops",
    "ci/cd",
    "docker",
    "kubernetes",
];

/// Estimate technical complexity from a free-text technical description.
///
/// Returns an integer in `[0, 5]`:
/// - length base: >1000 chars -> 3, >500 -> 2, >200 -> 1, else 0
/// - term bonus: >=5 distinct vocabulary terms -> +2, >=3 -> +1
/// - capped at [`MAX_COMPLEXITY`]
pub fn compute_complexity(technical_desc: &str) -> i32 {
    let length = technical_desc.len();
    let lowered = technical_desc.to_lowercase();

    let term_count = TECHNICAL_TERMS
        .iter()
        .filter(|term| lowered.contains(*term))
        .count();

    let base = if length > 1000 {
        3
    } else if length > 500 {
        2
    } else if length > 200 {
        1
    } else {
        0
    };

    let bonus = if term_count >= 5 {
        2
    } else if term_count >= 3 {
        1
    } else {
        0
    };

    (base + bonus).min(MAX_COMPLEXITY)
}

// ---------------------------------------------------------------------------
// Risk score
// ---------------------------------------------------------------------------

/// Inputs to the composite risk score.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct RiskFactors {
    /// Total project cost (non-negative).
    pub cost: f64,
    /// Project duration in days (positive).
    pub duration_days: i32,
    /// Project type, as stored on the application.
    pub project_type: ProjectType,
    /// Technical complexity in `[0, 5]`, from [`compute_complexity`].
    pub technical_complexity: i32,
}

/// Cost sub-score. Step function, no interpolation between bands.
fn cost_points(cost: f64) -> i32 {
    if cost < 5_000.0 {
        5
    } else if cost < 20_000.0 {
        15
    } else if cost < 50_000.0 {
        25
    } else if cost < 100_000.0 {
        35
    } else {
        40
    }
}

/// Duration sub-score in days. Step function.
fn duration_points(duration_days: i32) -> i32 {
    if duration_days < 30 {
        5
    } else if duration_days < 90 {
        12
    } else if duration_days < 180 {
        20
    } else {
        30
    }
}

/// Complexity sub-score: two points per complexity unit, capped at 10.
fn complexity_points(complexity: i32) -> i32 {
    (complexity * 2).min(10)
}

/// Compute the composite risk score for an application.
///
/// Sum of the four additive sub-scores (cost, duration, project type,
/// complexity), clamped to `[0, 100]`. With valid inputs the unclamped sum
/// already lies in `[18, 100]`; the clamp guards against out-of-range
/// complexity values.
pub fn compute_risk_score(factors: &RiskFactors) -> i32 {
    let score = cost_points(factors.cost)
        + duration_points(factors.duration_days)
        + factors.project_type.risk_points()
        + complexity_points(factors.technical_complexity);

    score.clamp(MIN_RISK_SCORE, MAX_RISK_SCORE)
}

// ---------------------------------------------------------------------------
// Risk level mapping
// ---------------------------------------------------------------------------

/// Categorical risk level derived from a score. Presentation and filtering
/// only; the score itself is what is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    /// Map a score to its level. Bands are half-open: `[0,30)` Low,
    /// `[30,60)` Medium, `[60,80)` High, `[80,100]` Critical.
    pub fn from_score(score: i32) -> Self {
        if score < 30 {
            Self::Low
        } else if score < 60 {
            Self::Medium
        } else if score < 80 {
            Self::High
        } else {
            Self::Critical
        }
    }

    /// Human-readable label for display in the UI.
    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "Low Risk",
            Self::Medium => "Medium Risk",
            Self::High => "High Risk",
            Self::Critical => "Critical Risk",
        }
    }

    /// UI badge color name.
    pub fn color(self) -> &'static str {
        match self {
            Self::Low => "green",
            Self::Medium => "yellow",
            Self::High => "orange",
            Self::Critical => "red",
        }
    }
}

/// Level, label, and color for a score, bundled for API responses.
#[derive(Debug, Clone, serde::Serialize)]
pub struct RiskLevelInfo {
    pub level: RiskLevel,
    pub label: &'static str,
    pub color: &'static str,
}

/// Resolve the presentation bundle for a score.
pub fn risk_level(score: i32) -> RiskLevelInfo {
    let level = RiskLevel::from_score(score);
    RiskLevelInfo {
        level,
        label: level.label(),
        color: level.color(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn factors(cost: f64, duration_days: i32, project_type: ProjectType, tc: i32) -> RiskFactors {
        RiskFactors {
            cost,
            duration_days,
            project_type,
            technical_complexity: tc,
        }
    }

    // -- compute_complexity --

    #[test]
    fn complexity_empty_text_is_zero() {
        assert_eq!(compute_complexity(""), 0);
    }

    #[test]
    fn complexity_short_plain_text_is_zero() {
        assert_eq!(compute_complexity("a simple internal tool"), 0);
    }

    #[test]
    fn complexity_length_bands() {
        assert_eq!(compute_complexity(&"x".repeat(200)), 0);
        assert_eq!(compute_complexity(&"x".repeat(201)), 1);
        assert_eq!(compute_complexity(&"x".repeat(501)), 2);
        assert_eq!(compute_complexity(&"x".repeat(1001)), 3);
    }

    #[test]
    fn complexity_term_bonus_three_terms() {
        // Three distinct terms, short text: bonus only.
        assert_eq!(compute_complexity("api database cloud"), 1);
    }

    #[test]
    fn complexity_term_bonus_five_terms() {
        assert_eq!(compute_complexity("api database cloud docker kubernetes"), 2);
    }

    #[test]
    fn complexity_term_scan_is_case_insensitive() {
        assert_eq!(compute_complexity("API Database CLOUD"), 1);
    }

    #[test]
    fn complexity_repeated_term_counts_once() {
        assert_eq!(compute_complexity("api api api api api"), 0);
    }

    #[test]
    fn complexity_long_text_with_five_terms_is_capped() {
        // Length base 3 + term bonus 2 = 5, the maximum.
        let text = format!("{} api database cloud docker kubernetes", "x".repeat(1200));
        assert_eq!(compute_complexity(&text), 5);
    }

    #[test]
    fn complexity_spec_example_three() {
        // 1200 chars containing api, database, cloud, docker, kubernetes.
        let padding = "x".repeat(1200 - "api database cloud docker kubernetes".len());
        let text = format!("api database cloud docker kubernetes{padding}");
        assert_eq!(text.len(), 1200);
        assert_eq!(compute_complexity(&text), 5);
    }

    #[test]
    fn complexity_is_idempotent() {
        let text = "a backend api with a database and docker deployment";
        assert_eq!(compute_complexity(text), compute_complexity(text));
    }

    // -- sub-score boundaries --

    #[test]
    fn cost_band_boundaries() {
        assert_eq!(cost_points(0.0), 5);
        assert_eq!(cost_points(4_999.99), 5);
        assert_eq!(cost_points(5_000.0), 15);
        assert_eq!(cost_points(19_999.99), 15);
        assert_eq!(cost_points(20_000.0), 25);
        assert_eq!(cost_points(50_000.0), 35);
        assert_eq!(cost_points(99_999.99), 35);
        assert_eq!(cost_points(100_000.0), 40);
        assert_eq!(cost_points(1_000_000.0), 40);
    }

    #[test]
    fn duration_band_boundaries() {
        assert_eq!(duration_points(1), 5);
        assert_eq!(duration_points(29), 5);
        assert_eq!(duration_points(30), 12);
        assert_eq!(duration_points(89), 12);
        assert_eq!(duration_points(90), 20);
        assert_eq!(duration_points(179), 20);
        assert_eq!(duration_points(180), 30);
        assert_eq!(duration_points(365), 30);
    }

    #[test]
    fn complexity_points_capped_at_ten() {
        assert_eq!(complexity_points(0), 0);
        assert_eq!(complexity_points(3), 6);
        assert_eq!(complexity_points(5), 10);
        // Out-of-range input still capped.
        assert_eq!(complexity_points(9), 10);
    }

    // -- compute_risk_score --

    #[test]
    fn score_spec_example_one() {
        // 5 + 5 + 8 + 0 = 18 -> LOW
        let f = factors(3_000.0, 10, ProjectType::WebDevelopment, 0);
        assert_eq!(compute_risk_score(&f), 18);
        assert_eq!(RiskLevel::from_score(18), RiskLevel::Low);
    }

    #[test]
    fn score_spec_example_two() {
        // 35 + 20 + 20 + 10 = 85 -> CRITICAL
        let f = factors(75_000.0, 120, ProjectType::Security, 5);
        assert_eq!(compute_risk_score(&f), 85);
        assert_eq!(RiskLevel::from_score(85), RiskLevel::Critical);
    }

    #[test]
    fn score_is_deterministic() {
        let f = factors(42_000.0, 95, ProjectType::Research, 3);
        assert_eq!(compute_risk_score(&f), compute_risk_score(&f));
    }

    #[test]
    fn score_always_within_bounds() {
        for &cost in &[0.0, 4_999.0, 5_000.0, 60_000.0, 250_000.0] {
            for &days in &[1, 29, 30, 120, 400] {
                for pt in ProjectType::ALL {
                    for tc in 0..=MAX_COMPLEXITY {
                        let score = compute_risk_score(&factors(cost, days, *pt, tc));
                        assert!((MIN_RISK_SCORE..=MAX_RISK_SCORE).contains(&score));
                    }
                }
            }
        }
    }

    #[test]
    fn score_minimum_is_eighteen() {
        // Cheapest, shortest, lowest-type, zero-complexity input.
        let f = factors(0.0, 1, ProjectType::WebDevelopment, 0);
        assert_eq!(compute_risk_score(&f), 18);
    }

    #[test]
    fn score_maximum_is_one_hundred() {
        let f = factors(200_000.0, 365, ProjectType::Security, 5);
        assert_eq!(compute_risk_score(&f), 100);
    }

    #[test]
    fn score_clamps_out_of_range_complexity() {
        // complexity 50 would add min(100, 10) = 10; stays within bounds.
        let f = factors(200_000.0, 365, ProjectType::Security, 50);
        assert_eq!(compute_risk_score(&f), 100);
    }

    #[test]
    fn cost_subscore_is_monotonic_across_bands() {
        let costs = [0.0, 4_999.0, 5_000.0, 19_999.0, 20_000.0, 50_000.0, 100_000.0];
        let scores: Vec<i32> = costs
            .iter()
            .map(|&c| compute_risk_score(&factors(c, 10, ProjectType::Other, 0)))
            .collect();
        assert!(scores.windows(2).all(|w| w[0] <= w[1]), "scores: {scores:?}");
    }

    #[test]
    fn duration_subscore_is_monotonic_across_bands() {
        let durations = [1, 29, 30, 89, 90, 179, 180, 365];
        let scores: Vec<i32> = durations
            .iter()
            .map(|&d| compute_risk_score(&factors(1_000.0, d, ProjectType::Other, 0)))
            .collect();
        assert!(scores.windows(2).all(|w| w[0] <= w[1]), "scores: {scores:?}");
    }

    // -- risk level mapping --

    #[test]
    fn level_band_boundaries() {
        assert_eq!(RiskLevel::from_score(0), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(29), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(30), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(59), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(60), RiskLevel::High);
        assert_eq!(RiskLevel::from_score(79), RiskLevel::High);
        assert_eq!(RiskLevel::from_score(80), RiskLevel::Critical);
        assert_eq!(RiskLevel::from_score(100), RiskLevel::Critical);
    }

    #[test]
    fn level_labels_and_colors() {
        assert_eq!(RiskLevel::Low.label(), "Low Risk");
        assert_eq!(RiskLevel::Low.color(), "green");
        assert_eq!(RiskLevel::Medium.color(), "yellow");
        assert_eq!(RiskLevel::High.color(), "orange");
        assert_eq!(RiskLevel::Critical.label(), "Critical Risk");
        assert_eq!(RiskLevel::Critical.color(), "red");
    }

    #[test]
    fn risk_level_info_bundles_presentation_fields() {
        let info = risk_level(85);
        assert_eq!(info.level, RiskLevel::Critical);
        assert_eq!(info.label, "Critical Risk");
        assert_eq!(info.color, "red");
    }

    #[test]
    fn vocabulary_has_twenty_terms() {
        assert_eq!(TECHNICAL_TERMS.len(), 20);
    }
}
