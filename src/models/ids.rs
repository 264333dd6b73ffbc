//! Strongly-typed ID wrappers for ledger entities
//!
//! Newtype wrappers keep transaction ids and rule ids from being mixed up.
//! The display form is a short prefix (`txn-1a2b3c4d`); lookups by that
//! short form are resolved by the ledger.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

macro_rules! define_id {
    ($name:ident, $display_prefix:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Create a new random ID
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Create an ID from an existing UUID
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Get the underlying UUID
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            /// Parse an ID from a full UUID string, with or without the prefix
            pub fn parse(s: &str) -> Result<Self, uuid::Error> {
                s.parse()
            }

            /// The prefix used in the short display form
            pub const fn prefix() -> &'static str {
                $display_prefix
            }

            /// Whether `fragment` (with or without the prefix) is a leading
            /// part of this id's hyphenated UUID
            pub fn matches_prefix(&self, fragment: &str) -> bool {
                let fragment = fragment.trim();
                let fragment = fragment.strip_prefix($display_prefix).unwrap_or(fragment);
                !fragment.is_empty()
                    && self
                        .0
                        .hyphenated()
                        .to_string()
                        .starts_with(&fragment.to_lowercase())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}{}", $display_prefix, &self.0.to_string()[..8])
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim();
                let s = s.strip_prefix($display_prefix).unwrap_or(s);
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

define_id!(TransactionId, "txn-");
define_id!(RuleId, "rule-");
