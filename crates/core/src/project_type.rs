//! Project type enum and its contribution to the risk score.

use crate::error::CoreError;

/// Category of a submitted project. Stored as SCREAMING_SNAKE_CASE text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProjectType {
    WebDevelopment,
    MobileApp,
    DataAnalysis,
    Infrastructure,
    Security,
    Research,
    Other,
}

impl ProjectType {
    /// All variants, in display order.
    pub const ALL: &'static [ProjectType] = &[
        Self::WebDevelopment,
        Self::MobileApp,
        Self::DataAnalysis,
        Self::Infrastructure,
        Self::Security,
        Self::Research,
        Self::Other,
    ];

    /// The stored string form (matches the `project_type` column).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::WebDevelopment => "WEB_DEVELOPMENT",
            Self::MobileApp => "MOBILE_APP",
            Self::DataAnalysis => "DATA_ANALYSIS",
            Self::Infrastructure => "INFRASTRUCTURE",
            Self::Security => "SECURITY",
            Self::Research => "RESEARCH",
            Self::Other => "OTHER",
        }
    }

    /// Parse a stored string form. Unknown values are a validation error.
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s {
            "WEB_DEVELOPMENT" => Ok(Self::WebDevelopment),
            "MOBILE_APP" => Ok(Self::MobileApp),
            "DATA_ANALYSIS" => Ok(Self::DataAnalysis),
            "INFRASTRUCTURE" => Ok(Self::Infrastructure),
            "SECURITY" => Ok(Self::Security),
            "RESEARCH" => Ok(Self::Research),
            "OTHER" => Ok(Self::Other),
            other => Err(CoreError::Validation(format!(
                "Invalid project type '{other}'"
            ))),
        }
    }

    /// Points this type contributes to the composite risk score.
    pub fn risk_points(self) -> i32 {
        match self {
            Self::WebDevelopment => 8,
            Self::MobileApp => 12,
            Self::DataAnalysis => 10,
            Self::Infrastructure => 18,
            Self::Security => 20,
            Self::Research => 15,
            Self::Other => 10,
        }
    }
}

/// Risk points for a stored type string. Unknown or legacy values score the
/// same as `OTHER` so recomputation never fails on old rows.
pub fn risk_points_for(project_type: &str) -> i32 {
    ProjectType::parse(project_type)
        .map(ProjectType::risk_points)
        .unwrap_or(ProjectType::Other.risk_points())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_round_trips_all_variants() {
        for pt in ProjectType::ALL {
            assert_eq!(ProjectType::parse(pt.as_str()).unwrap(), *pt);
        }
    }

    #[test]
    fn parse_rejects_unknown() {
        assert!(ProjectType::parse("BLOCKCHAIN").is_err());
        assert!(ProjectType::parse("").is_err());
        // Parsing is exact; lowercase is not accepted.
        assert!(ProjectType::parse("security").is_err());
    }

    #[test]
    fn risk_points_match_band_table() {
        assert_eq!(ProjectType::WebDevelopment.risk_points(), 8);
        assert_eq!(ProjectType::MobileApp.risk_points(), 12);
        assert_eq!(ProjectType::DataAnalysis.risk_points(), 10);
        assert_eq!(ProjectType::Infrastructure.risk_points(), 18);
        assert_eq!(ProjectType::Security.risk_points(), 20);
        assert_eq!(ProjectType::Research.risk_points(), 15);
        assert_eq!(ProjectType::Other.risk_points(), 10);
    }

    #[test]
    fn unknown_type_scores_like_other() {
        assert_eq!(risk_points_for("LEGACY_VALUE"), 10);
        assert_eq!(risk_points_for("SECURITY"), 20);
    }
}
