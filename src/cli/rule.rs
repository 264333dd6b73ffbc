//! Categorization rule CLI commands

use clap::{Subcommand, ValueEnum};

use crate::audit::EntityType;
use crate::display::{format_rule_list, format_rule_test};
use crate::error::LedgerResult;
use crate::models::{CategoryRule, RulePattern};
use crate::services::Ledger;
use crate::storage::Storage;

/// How the pattern text is interpreted
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum RuleKind {
    /// Case-insensitive substring
    #[default]
    Contains,
    /// Whole description with `*` wildcards
    Wildcard,
    /// Regular expression
    Regex,
}

impl RuleKind {
    fn pattern(self, text: String) -> RulePattern {
        match self {
            Self::Contains => RulePattern::Contains(text),
            Self::Wildcard => RulePattern::Wildcard(text),
            Self::Regex => RulePattern::Regex(text),
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum RuleCommands {
    /// Add a rule mapping descriptions to a category
    Add {
        /// Text to match against descriptions
        pattern: String,
        /// Category assigned on match
        category: String,
        /// Lower numbers are tried first
        #[arg(short, long, default_value = "100", allow_hyphen_values = true)]
        priority: i32,
        #[arg(short, long, value_enum, default_value = "contains")]
        kind: RuleKind,
        /// Also categorize existing uncategorized transactions
        #[arg(long)]
        apply: bool,
    },

    /// List rules in evaluation order
    List,

    /// Remove a rule
    Remove {
        /// Rule ID or unique prefix
        id: String,
    },

    /// Show which category a description would get
    Test {
        description: String,
    },
}

pub fn handle_rule_command(storage: &Storage, ledger: &mut Ledger, cmd: RuleCommands) -> LedgerResult<()> {
    match cmd {
        RuleCommands::Add {
            pattern,
            category,
            priority,
            kind,
            apply,
        } => {
            let rule = ledger.add_rule(CategoryRule::new(kind.pattern(pattern), category, priority))?;
            storage.save_ledger(ledger)?;
            storage.log_create(
                EntityType::Rule,
                rule.id.to_string(),
                Some(rule.pattern.text().to_string()),
                &rule,
            )?;
            println!("Added rule {} {}", rule.id, rule);

            if apply {
                super::transaction::recategorize_uncategorized(storage, ledger)?;
            }
        }

        RuleCommands::List => {
            print!("{}", format_rule_list(&ledger.rules()));
        }

        RuleCommands::Remove { id } => {
            let id = ledger.resolve_rule_id(&id)?;
            let rule = ledger.remove_rule(id)?;
            storage.save_ledger(ledger)?;
            storage.log_delete(
                EntityType::Rule,
                id.to_string(),
                Some(rule.pattern.text().to_string()),
                &rule,
            )?;
            println!("Removed rule {} {}", id, rule);
        }

        RuleCommands::Test { description } => {
            let matched = ledger.matcher().matching_rule(&description);
            print!("{}", format_rule_test(&description, matched));
        }
    }

    Ok(())
}
