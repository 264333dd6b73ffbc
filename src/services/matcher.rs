//! Category rule matcher
//!
//! Compiles category rules into an ordered list of predicates and assigns a
//! category to a description: the first rule (lowest priority number, then
//! earliest added) whose predicate matches wins. No match yields
//! `Category::Uncategorized`.

use regex::{Regex, RegexBuilder};

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Category, CategoryRule, RuleId, RulePattern};

/// A compiled match predicate
#[derive(Debug, Clone)]
enum Predicate {
    /// Lowercased needle
    Contains(String),
    /// Wildcards and explicit regexes both end up here
    Pattern(Regex),
}

impl Predicate {
    fn compile(pattern: &RulePattern) -> LedgerResult<Self> {
        match pattern {
            RulePattern::Contains(text) => Ok(Self::Contains(text.trim().to_lowercase())),
            RulePattern::Wildcard(text) => {
                let translated = wildcard_to_regex(text.trim());
                build_regex(&translated, text)
            }
            RulePattern::Regex(text) => build_regex(text, text),
        }
    }

    /// `lowered` is the description already lowercased, used by substring rules
    fn is_match(&self, description: &str, lowered: &str) -> bool {
        match self {
            Self::Contains(needle) => lowered.contains(needle.as_str()),
            Self::Pattern(re) => re.is_match(description),
        }
    }
}

fn build_regex(expr: &str, original: &str) -> LedgerResult<Predicate> {
    RegexBuilder::new(expr)
        .case_insensitive(true)
        .build()
        .map(Predicate::Pattern)
        .map_err(|e| LedgerError::InvalidRule(format!("bad pattern '{}': {}", original, e)))
}

/// Translate a `*` glob into an anchored regular expression
fn wildcard_to_regex(glob: &str) -> String {
    let body = glob
        .split('*')
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(".*");
    format!("^{}$", body)
}

#[derive(Debug, Clone)]
struct CompiledRule {
    rule: CategoryRule,
    predicate: Predicate,
}

/// Ordered, compiled rule set
#[derive(Debug, Clone, Default)]
pub struct RuleMatcher {
    rules: Vec<CompiledRule>,
}

impl RuleMatcher {
    /// An empty matcher: every description is uncategorized
    pub fn new() -> Self {
        Self::default()
    }

    /// Compile rules given in insertion order
    ///
    /// Fails with `InvalidRule` on the first rule that does not validate or
    /// compile; nothing is kept in that case.
    pub fn compile(rules: &[CategoryRule]) -> LedgerResult<Self> {
        let mut matcher = Self::new();
        for rule in rules {
            matcher.push(rule.clone())?;
        }
        Ok(matcher)
    }

    /// Append a rule, keeping evaluation order sorted by priority
    ///
    /// Rules with equal priority keep their insertion order. A rule whose
    /// id is already present is rejected with `InvalidRule`.
    pub fn push(&mut self, rule: CategoryRule) -> LedgerResult<()> {
        rule.validate()
            .map_err(|e| LedgerError::InvalidRule(e.to_string()))?;
        if self.get(rule.id).is_some() {
            return Err(LedgerError::InvalidRule(format!("duplicate rule id {}", rule.id)));
        }
        let predicate = Predicate::compile(&rule.pattern)?;

        // Insert after every rule with priority <= the new one (stable).
        let position = self
            .rules
            .partition_point(|existing| existing.rule.priority <= rule.priority);
        self.rules.insert(position, CompiledRule { rule, predicate });
        Ok(())
    }

    /// Remove a rule by id, returning it
    pub fn remove(&mut self, id: RuleId) -> Option<CategoryRule> {
        let index = self.rules.iter().position(|c| c.rule.id == id)?;
        Some(self.rules.remove(index).rule)
    }

    /// The rule that decides `description`, if any
    pub fn matching_rule(&self, description: &str) -> Option<&CategoryRule> {
        let lowered = description.to_lowercase();
        self.rules
            .iter()
            .find(|c| c.predicate.is_match(description, &lowered))
            .map(|c| &c.rule)
    }

    /// Assign a category to a description
    pub fn categorize(&self, description: &str) -> Category {
        match self.matching_rule(description) {
            Some(rule) => {
                tracing::debug!(rule = %rule.id, category = %rule.category, description, "rule matched");
                rule.target()
            }
            None => {
                tracing::debug!(description, "no rule matched");
                Category::Uncategorized
            }
        }
    }

    /// Rules in evaluation order
    pub fn rules(&self) -> impl Iterator<Item = &CategoryRule> {
        self.rules.iter().map(|c| &c.rule)
    }

    pub fn get(&self, id: RuleId) -> Option<&CategoryRule> {
        self.rules().find(|r| r.id == id)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_matcher_is_uncategorized() {
        let matcher = RuleMatcher::new();
        assert_eq!(matcher.categorize("anything"), Category::Uncategorized);
        assert!(matcher.is_empty());
    }

    #[test]
    fn test_contains_is_case_insensitive() {
        let matcher =
            RuleMatcher::compile(&[CategoryRule::contains("uber", "Transport", 1)]).unwrap();
        assert_eq!(matcher.categorize("UBER TRIP"), Category::named("Transport"));
        assert_eq!(matcher.categorize("Uber Eats"), Category::named("Transport"));
        assert_eq!(matcher.categorize("LYFT"), Category::Uncategorized);
    }

    #[test]
    fn test_lower_priority_number_wins_regardless_of_order() {
        let eats = CategoryRule::contains("uber eats", "Dining", 1);
        let uber = CategoryRule::contains("uber", "Transport", 5);

        let forward = RuleMatcher::compile(&[eats.clone(), uber.clone()]).unwrap();
        let reverse = RuleMatcher::compile(&[uber, eats]).unwrap();

        assert_eq!(forward.categorize("UBER EATS 123"), Category::named("Dining"));
        assert_eq!(reverse.categorize("UBER EATS 123"), Category::named("Dining"));
        assert_eq!(reverse.categorize("UBER TRIP"), Category::named("Transport"));
    }

    #[test]
    fn test_duplicate_rule_id_rejected() {
        let rule = CategoryRule::contains("uber", "Transport", 1);
        let err = RuleMatcher::compile(&[rule.clone(), rule.clone()]).unwrap_err();
        assert!(matches!(err, LedgerError::InvalidRule(_)));

        let mut matcher = RuleMatcher::compile(&[rule.clone()]).unwrap();
        assert!(matcher.push(rule).is_err());
        assert_eq!(matcher.len(), 1);
    }

    #[test]
    fn test_equal_priority_keeps_insertion_order() {
        let first = CategoryRule::contains("shell", "Fuel", 3);
        let second = CategoryRule::contains("shell", "Snacks", 3);
        let matcher = RuleMatcher::compile(&[first, second]).unwrap();
        assert_eq!(matcher.categorize("SHELL OIL"), Category::named("Fuel"));
    }

    #[test]
    fn test_wildcard() {
        let rule = CategoryRule::new(RulePattern::Wildcard("amzn*mktp*".into()), "Shopping", 1);
        let matcher = RuleMatcher::compile(&[rule]).unwrap();
        assert_eq!(
            matcher.categorize("AMZN Mktp US*2K4"),
            Category::named("Shopping")
        );
        // Anchored: must start with the first segment
        assert_eq!(matcher.categorize("PAY AMZN MKTP"), Category::Uncategorized);
    }

    #[test]
    fn test_wildcard_escapes_regex_metacharacters() {
        let rule = CategoryRule::new(RulePattern::Wildcard("apple.com/bill*".into()), "Subs", 1);
        let matcher = RuleMatcher::compile(&[rule]).unwrap();
        assert_eq!(
            matcher.categorize("APPLE.COM/BILL 866"),
            Category::named("Subs")
        );
        assert_eq!(matcher.categorize("APPLEXCOM/BILL"), Category::Uncategorized);
    }

    #[test]
    fn test_regex() {
        let rule = CategoryRule::new(RulePattern::Regex(r"^(shell|chevron)\b".into()), "Fuel", 1);
        let matcher = RuleMatcher::compile(&[rule]).unwrap();
        assert_eq!(matcher.categorize("Chevron 0042"), Category::named("Fuel"));
        assert_eq!(matcher.categorize("SHELLFISH SHACK"), Category::Uncategorized);
    }

    #[test]
    fn test_invalid_regex_rejected() {
        let rule = CategoryRule::new(RulePattern::Regex("(unclosed".into()), "Fuel", 1);
        let err = RuleMatcher::compile(&[rule]).unwrap_err();
        assert!(matches!(err, LedgerError::InvalidRule(_)));
    }

    #[test]
    fn test_remove_rule() {
        let uber = CategoryRule::contains("uber", "Transport", 1);
        let id = uber.id;
        let mut matcher = RuleMatcher::compile(&[uber]).unwrap();
        assert!(matcher.remove(id).is_some());
        assert!(matcher.remove(id).is_none());
        assert_eq!(matcher.categorize("UBER"), Category::Uncategorized);
    }

    #[test]
    fn test_deterministic() {
        let matcher = RuleMatcher::compile(&[
            CategoryRule::contains("coffee", "Dining", 2),
            CategoryRule::contains("market", "Groceries", 2),
        ])
        .unwrap();
        let a = matcher.categorize("Coffee Market");
        let b = matcher.categorize("Coffee Market");
        assert_eq!(a, b);
        assert_eq!(a, Category::named("Dining"));
    }
}
