//! Participant identity
//!
//! A participant is keyed by their full name; the first/last split is only
//! used for display.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::error::AppError;

/// Canonical participant key derived from a "First Last" name.
#[derive(Debug, Clone)]
pub(crate) struct Identity {
    pub(crate) full_name: String,
    pub(crate) first_name: String,
    pub(crate) last_name: String,
}

impl Identity {
    /// Build an identity from a full name. The name must consist of exactly
    /// two whitespace-separated tokens.
    pub(crate) fn new(full_name: &str) -> Result<Self, AppError> {
        let mut tokens = full_name.split_whitespace();
        let (Some(first), Some(last), None) = (tokens.next(), tokens.next(), tokens.next()) else {
            return Err(AppError::InvalidName {
                input: full_name.to_string(),
            });
        };
        Ok(Identity {
            full_name: full_name.to_string(),
            first_name: first.to_string(),
            last_name: last.to_string(),
        })
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_name)
    }
}

impl PartialEq for Identity {
    fn eq(&self, other: &Self) -> bool {
        self.full_name == other.full_name
    }
}

impl Eq for Identity {}

impl Hash for Identity {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.full_name.hash(state);
    }
}

// Deliberately inverted: sorting ascending yields names in descending
// lexicographic order. Every participant-keyed table relies on this order.
impl Ord for Identity {
    fn cmp(&self, other: &Self) -> Ordering {
        other.full_name.cmp(&self.full_name)
    }
}

impl PartialOrd for Identity {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
