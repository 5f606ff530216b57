//! ## Errors
//!
//! Recoverable error conditions raised by tree construction and queries.
//! Invariant violations (internal bugs) are not represented here; they
//! surface as panics at the point of detection.

use std::error::Error;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Errors returned by [`crate::tree::Tree`] construction and queries.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub enum TreeError {
    /// Occurs when a tree is constructed with an invalid `max_entries`/`min_entries` pair.
    Configuration {
        /// The requested maximum number of entries per node.
        max_entries: usize,
        /// The requested minimum number of entries per node.
        min_entries: usize,
    },
    /// Occurs when a query location does not match any supported shape.
    InvalidLocation {
        /// Human-readable description of why the location was rejected.
        reason: String,
    },
}

impl fmt::Display for TreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreeError::Configuration {
                max_entries,
                min_entries,
            } => write!(
                f,
                "invalid tree configuration: max_entries={max_entries}, min_entries={min_entries} \
                 (require max_entries >= 2 and 1 <= min_entries <= max_entries / 2)"
            ),
            TreeError::InvalidLocation { reason } => {
                write!(f, "invalid query location: {reason}")
            }
        }
    }
}

impl Error for TreeError {}
