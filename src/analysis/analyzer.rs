use async_trait::async_trait;
use tracing::debug;

use super::dto::{CroAnalysis, CroMetric, CroRecommendation, Impact};

/// Produces a CRO report for a site.
#[async_trait]
pub trait SiteAnalyzer: Send + Sync {
    async fn analyze(&self, url: &str) -> anyhow::Result<CroAnalysis>;
}

/// Returns the same canned report for every URL. Makes no network calls.
#[derive(Debug, Default, Clone)]
pub struct MockAnalyzer;

#[async_trait]
impl SiteAnalyzer for MockAnalyzer {
    async fn analyze(&self, url: &str) -> anyhow::Result<CroAnalysis> {
        debug!(%url, "returning canned analysis");
        Ok(canned_report())
    }
}

fn recommendation(title: &str, description: &str, impact: Impact, is_premium: bool) -> CroRecommendation {
    CroRecommendation {
        title: title.to_string(),
        description: description.to_string(),
        impact,
        is_premium,
    }
}

fn canned_report() -> CroAnalysis {
    CroAnalysis {
        overall_score: 75,
        metrics: vec![
            CroMetric::new(
                "Page Load Speed",
                85,
                "The website loads quickly and efficiently. Good performance metrics.",
            ),
            CroMetric::new(
                "Mobile Responsiveness",
                70,
                "The website is responsive but could use improvements for better mobile experience.",
            ),
            CroMetric::new(
                "Call-to-Action Visibility",
                65,
                "CTAs are present but could be more prominent and strategically placed.",
            ),
        ],
        recommendations: vec![
            recommendation(
                "Optimize CTA Placement",
                "Place primary CTAs above the fold and use contrasting colors to make them stand out.",
                Impact::High,
                false,
            ),
            recommendation(
                "Improve Mobile Navigation",
                "Simplify the mobile menu and increase touch target sizes for better usability.",
                Impact::Medium,
                false,
            ),
            recommendation(
                "Add Social Proof",
                "Display customer reviews and testimonials prominently on product pages.",
                Impact::High,
                false,
            ),
            recommendation(
                "Implement Exit-Intent Popup",
                "Add a popup offering a discount when users show exit intent.",
                Impact::Medium,
                true,
            ),
            recommendation(
                "A/B Test Product Images",
                "Test different product image styles and sizes to find the optimal conversion rate.",
                Impact::High,
                true,
            ),
        ],
    }
}
