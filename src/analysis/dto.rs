use serde::{Deserialize, Serialize};

use crate::{
    error::FieldError,
    validation::{check_required, finish, Validate},
};

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub url: Option<String>,
}

impl AnalyzeRequest {
    pub fn url(&self) -> &str {
        self.url.as_deref().unwrap_or_default()
    }
}

impl Validate for AnalyzeRequest {
    fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();
        check_required(&mut errors, "url", self.url());
        finish(errors)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricStatus {
    Good,
    Warning,
    Poor,
}

impl MetricStatus {
    pub fn for_score(score: u8) -> Self {
        match score {
            80.. => MetricStatus::Good,
            60..=79 => MetricStatus::Warning,
            _ => MetricStatus::Poor,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Impact {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CroMetric {
    pub name: String,
    pub score: u8,
    pub status: MetricStatus,
    pub description: String,
}

impl CroMetric {
    /// Status is derived from the score.
    pub fn new(name: &str, score: u8, description: &str) -> Self {
        let score = score.min(100);
        Self {
            name: name.to_string(),
            score,
            status: MetricStatus::for_score(score),
            description: description.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CroRecommendation {
    pub title: String,
    pub description: String,
    pub impact: Impact,
    pub is_premium: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CroAnalysis {
    pub overall_score: u8,
    pub metrics: Vec<CroMetric>,
    pub recommendations: Vec<CroRecommendation>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_thresholds() {
        assert_eq!(MetricStatus::for_score(100), MetricStatus::Good);
        assert_eq!(MetricStatus::for_score(80), MetricStatus::Good);
        assert_eq!(MetricStatus::for_score(79), MetricStatus::Warning);
        assert_eq!(MetricStatus::for_score(60), MetricStatus::Warning);
        assert_eq!(MetricStatus::for_score(59), MetricStatus::Poor);
        assert_eq!(MetricStatus::for_score(0), MetricStatus::Poor);
    }

    #[test]
    fn metric_score_is_clamped() {
        let m = CroMetric::new("x", 250, "y");
        assert_eq!(m.score, 100);
        assert_eq!(m.status, MetricStatus::Good);
    }

    #[test]
    fn analyze_request_requires_non_empty_url() {
        let missing: AnalyzeRequest = serde_json::from_str("{}").unwrap();
        assert!(missing.validate().is_err());
        let empty: AnalyzeRequest = serde_json::from_str(r#"{"url":""}"#).unwrap();
        assert!(empty.validate().is_err());
        let null: AnalyzeRequest = serde_json::from_str(r#"{"url":null}"#).unwrap();
        assert!(null.validate().is_err());
        let ok: AnalyzeRequest = serde_json::from_str(r#"{"url":"example.com"}"#).unwrap();
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn wire_names_are_camel_case() {
        let rec = CroRecommendation {
            title: "t".into(),
            description: "d".into(),
            impact: Impact::High,
            is_premium: true,
        };
        let json = serde_json::to_value(&rec).unwrap();
        assert_eq!(json["isPremium"], true);
        assert_eq!(json["impact"], "High");
    }
}
