//! Configuration module for budgetbook
//!
//! Resolves where data lives on disk and loads the user's settings.

pub mod paths;
pub mod settings;

pub use paths::BudgetbookPaths;
pub use settings::Settings;
