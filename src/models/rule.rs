//! Category rule model
//!
//! A rule maps transaction descriptions to a category. Rules are stored in
//! their textual form here; `services::matcher` compiles them into
//! predicates.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::{validate_category_name, Category};
use super::ids::RuleId;

/// How a rule's pattern text is matched against a description
///
/// All kinds are case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "text", rename_all = "lowercase")]
pub enum RulePattern {
    /// Substring anywhere in the description
    Contains(String),
    /// Whole-description glob where `*` matches any run of characters
    Wildcard(String),
    /// Regular expression (unanchored unless the expression anchors itself)
    Regex(String),
}

impl RulePattern {
    pub fn text(&self) -> &str {
        match self {
            Self::Contains(t) | Self::Wildcard(t) | Self::Regex(t) => t,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Contains(_) => "contains",
            Self::Wildcard(_) => "wildcard",
            Self::Regex(_) => "regex",
        }
    }
}

impl fmt::Display for RulePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Contains(t) => write!(f, "~\"{}\"", t),
            Self::Wildcard(t) => write!(f, "glob \"{}\"", t),
            Self::Regex(t) => write!(f, "/{}/i", t),
        }
    }
}

/// An ordered categorization rule (lower priority is evaluated first)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryRule {
    pub id: RuleId,

    pub pattern: RulePattern,

    /// Name of the category assigned on match
    pub category: String,

    #[serde(default)]
    pub priority: i32,

    pub created_at: DateTime<Utc>,
}

impl CategoryRule {
    pub fn new(pattern: RulePattern, category: impl Into<String>, priority: i32) -> Self {
        Self {
            id: RuleId::new(),
            pattern,
            category: category.into().trim().to_string(),
            priority,
            created_at: Utc::now(),
        }
    }

    /// Shorthand for the common case-insensitive substring rule
    pub fn contains(text: impl Into<String>, category: impl Into<String>, priority: i32) -> Self {
        Self::new(RulePattern::Contains(text.into()), category, priority)
    }

    /// The category assigned when this rule matches
    pub fn target(&self) -> Category {
        Category::named(self.category.clone())
    }

    /// Structural validation; regex syntax is checked when compiling
    pub fn validate(&self) -> Result<(), RuleValidationError> {
        if self.pattern.text().trim().is_empty() {
            return Err(RuleValidationError::EmptyPattern);
        }
        validate_category_name(&self.category)
            .map_err(|e| RuleValidationError::BadCategory(e.to_string()))?;
        Ok(())
    }
}

impl fmt::Display for CategoryRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} -> {}",
            self.priority, self.pattern, self.category
        )
    }
}

/// Validation errors for rules
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleValidationError {
    EmptyPattern,
    BadCategory(String),
}

impl fmt::Display for RuleValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyPattern => write!(f, "Rule pattern cannot be empty"),
            Self::BadCategory(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for RuleValidationError {}
