//! Cookie Categories
//!
//! The four categories the consent banner lets a visitor choose between.

use derive_more::Display;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsentCategory {
    #[display("necessary")]
    Necessary,
    #[display("analytics")]
    Analytics,
    #[display("marketing")]
    Marketing,
    #[display("functional")]
    Functional,
}

impl ConsentCategory {
    pub const ALL: [ConsentCategory; 4] = [
        ConsentCategory::Necessary,
        ConsentCategory::Analytics,
        ConsentCategory::Marketing,
        ConsentCategory::Functional,
    ];

    pub const fn name(&self) -> &'static str {
        match self {
            ConsentCategory::Necessary => "Necessary Cookies",
            ConsentCategory::Analytics => "Analytics Cookies",
            ConsentCategory::Marketing => "Marketing Cookies",
            ConsentCategory::Functional => "Functional Cookies",
        }
    }

    pub const fn description(&self) -> &'static str {
        match self {
            ConsentCategory::Necessary => {
                "Essential cookies required for the website to function properly. These cannot be disabled."
            }
            ConsentCategory::Analytics => {
                "Help us understand how visitors interact with our website by collecting anonymous information."
            }
            ConsentCategory::Marketing => {
                "Used to track visitors across websites to display relevant and engaging advertisements."
            }
            ConsentCategory::Functional => {
                "Enable enhanced functionality and personalization, such as remembering your preferences."
            }
        }
    }

    /// Only necessary cookies cannot be declined
    pub const fn is_required(&self) -> bool {
        matches!(self, ConsentCategory::Necessary)
    }
}

/// Banner copy for one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryInfo {
    pub category: ConsentCategory,
    pub name: &'static str,
    pub description: &'static str,
    pub required: bool,
}

impl From<ConsentCategory> for CategoryInfo {
    fn from(category: ConsentCategory) -> Self {
        Self {
            category,
            name: category.name(),
            description: category.description(),
            required: category.is_required(),
        }
    }
}

/// All categories in banner order
pub fn cookie_categories() -> Vec<CategoryInfo> {
    ConsentCategory::ALL.into_iter().map(CategoryInfo::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_necessary_is_required() {
        let categories = cookie_categories();
        assert_eq!(categories.len(), 4);
        assert_eq!(
            categories.iter().filter(|c| c.required).count(),
            1
        );
        assert_eq!(categories[0].category, ConsentCategory::Necessary);
        assert_eq!(categories[0].name, "Necessary Cookies");
    }

    #[test]
    fn test_display() {
        assert_eq!(ConsentCategory::Analytics.to_string(), "analytics");
        assert_eq!(ConsentCategory::Functional.to_string(), "functional");
    }

    #[test]
    fn test_serialize() {
        let json = serde_json::to_string(&CategoryInfo::from(ConsentCategory::Marketing)).unwrap();
        assert!(json.contains(r#""category":"marketing""#));
        assert!(json.contains(r#""required":false"#));
    }
}
