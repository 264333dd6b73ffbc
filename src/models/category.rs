//! Category labels
//!
//! A transaction is either in a user-named category or in the explicit
//! `Uncategorized` sentinel. The sentinel is a distinct variant, so a user
//! category that happens to be called "Uncategorized" never collides with it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The category a transaction is assigned to
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// A user-defined category label
    Named(String),
    /// No rule matched and no category was given
    Uncategorized,
}

impl Category {
    /// Create a named category, trimming surrounding whitespace
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into().trim().to_string())
    }

    pub fn is_uncategorized(&self) -> bool {
        matches!(self, Self::Uncategorized)
    }

    /// The user-facing name, or `None` for the sentinel
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Named(name) => Some(name),
            Self::Uncategorized => None,
        }
    }

    /// Whether this is the named category `name` (case-sensitive)
    pub fn is_named(&self, name: &str) -> bool {
        self.name() == Some(name)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(name) => f.pad(name),
            Self::Uncategorized => f.pad("(uncategorized)"),
        }
    }
}

/// Validate a user-supplied category name
pub fn validate_category_name(name: &str) -> Result<(), CategoryValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CategoryValidationError::EmptyName);
    }
    if trimmed.len() > 50 {
        return Err(CategoryValidationError::NameTooLong(trimmed.len()));
    }
    Ok(())
}

/// Validation errors for category names
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryValidationError {
    EmptyName,
    NameTooLong(usize),
}

impl fmt::Display for CategoryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Category name cannot be empty"),
            Self::NameTooLong(len) => {
                write!(f, "Category name too long ({} chars, max 50)", len)
            }
        }
    }
}

impl std::error::Error for CategoryValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinel_distinct_from_named() {
        let sentinel = Category::Uncategorized;
        let lookalike = Category::named("Uncategorized");
        assert_ne!(sentinel, lookalike);
        assert!(sentinel.is_uncategorized());
        assert!(!lookalike.is_uncategorized());
        assert_eq!(lookalike.name(), Some("Uncategorized"));
        assert_eq!(sentinel.name(), None);
    }

    #[test]
    fn test_named_trims() {
        let category = Category::named("  Transport ");
        assert!(category.is_named("Transport"));
        assert_eq!(category.to_string(), "Transport");
    }

    #[test]
    fn test_validate_name() {
        assert!(validate_category_name("Groceries").is_ok());
        assert_eq!(
            validate_category_name("   "),
            Err(CategoryValidationError::EmptyName)
        );
        assert!(matches!(
            validate_category_name(&"x".repeat(51)),
            Err(CategoryValidationError::NameTooLong(51))
        ));
    }

    #[test]
    fn test_serialization() {
        let named = Category::named("Transport");
        let json = serde_json::to_string(&named).unwrap();
        assert_eq!(json, r#"{"named":"Transport"}"#);

        let json = serde_json::to_string(&Category::Uncategorized).unwrap();
        assert_eq!(json, r#""uncategorized""#);

        let back: Category = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Category::Uncategorized);
    }
}
