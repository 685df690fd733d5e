//! Category to advice mapping
//!
//! A pure lookup from the predicted [`Category`] to a label, a short list of
//! tips and the shared guidelines footer. Only the heavy-spender tips depend
//! on the household's figures (the monthly savings goal).

use serde::Serialize;

use crate::format::format_currency;
use crate::models::{Category, DerivedMetrics};

/// General guidelines shown under every recommendation
pub const GUIDELINES: [&str; 4] = [
    "Keep debt below 36% of income.",
    "Follow the 50/30/20 rule (needs/wants/savings).",
    "Review your spending monthly.",
    "Automate savings where possible.",
];

/// Advice block rendered for one household
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Advice {
    pub category: Category,
    pub label: String,
    /// Label with emoji, e.g. "💸 Heavy Spender"
    pub display_label: String,
    pub points: Vec<String>,
    pub guidelines: Vec<String>,
}

pub fn advice_for(category: Category, derived: &DerivedMetrics) -> Advice {
    let points: Vec<String> = match category {
        Category::HeavySpender => vec![
            "Reduce entertainment and eating out expenses.".to_string(),
            format!(
                "Set up a savings goal of {} per month.",
                format_currency(derived.desired_savings)
            ),
            "Use an expense tracker to stay on budget.".to_string(),
        ],
        Category::ModerateSpender => vec![
            "Moderate spender. Try trimming utilities or transport costs.".to_string(),
            "Consider SIPs or fixed deposits for better savings.".to_string(),
        ],
        Category::Saver => vec![
            "You're doing well! Maintain or increase your savings rate.".to_string(),
            "Explore investment opportunities (e.g., mutual funds, PPF).".to_string(),
            "Build an emergency fund if not already.".to_string(),
        ],
    };

    Advice {
        category,
        label: category.label().to_string(),
        display_label: category.display_label(),
        points,
        guidelines: GUIDELINES.iter().map(|g| g.to_string()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::compute;

    fn scenario_a() -> DerivedMetrics {
        compute(&crate::test_utils::scenario_a())
    }

    #[test]
    fn test_heavy_spender_interpolates_savings_goal() {
        let advice = advice_for(Category::HeavySpender, &scenario_a());
        assert_eq!(advice.label, "Heavy Spender");
        assert_eq!(advice.points.len(), 3);
        assert_eq!(
            advice.points[1],
            "Set up a savings goal of ₹3,900 per month."
        );
    }

    #[test]
    fn test_moderate_and_saver_templates_are_fixed() {
        let derived = scenario_a();
        let moderate = advice_for(Category::ModerateSpender, &derived);
        assert_eq!(moderate.points.len(), 2);
        assert!(moderate.points[0].starts_with("Moderate spender."));

        let saver = advice_for(Category::Saver, &derived);
        assert_eq!(saver.display_label, "💰 Saver");
        assert!(saver.points.iter().all(|p| !p.contains('₹')));
    }

    #[test]
    fn test_every_category_gets_guidelines() {
        for category in Category::all() {
            let advice = advice_for(*category, &scenario_a());
            assert_eq!(advice.guidelines.len(), GUIDELINES.len());
            assert!(advice.guidelines[1].contains("50/30/20"));
        }
    }

    #[test]
    fn test_negative_savings_goal_is_rendered() {
        let derived = compute(&crate::test_utils::scenario_c());
        let advice = advice_for(Category::HeavySpender, &derived);
        assert!(advice.points[1].contains("₹-150"));
    }
}
