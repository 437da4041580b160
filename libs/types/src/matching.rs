//! Reconciliation output types

use crate::ids::{BookingId, ClaimId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Secondary attribute that disagreed on an accepted pair
///
/// Declaration order is the order tags are reported in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mismatch {
    /// Hour or minute of the appointment differs
    Time,
    /// Claim service code is not the one mapped from the booked test
    Test,
    /// Insurer differs
    Insurance,
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mismatch::Time => write!(f, "time"),
            Mismatch::Test => write!(f, "test"),
            Mismatch::Insurance => write!(f, "insurance"),
        }
    }
}

/// One accepted booking/claim assignment
///
/// `mismatch` is `None` rather than an empty list when every secondary check
/// passed, so the key disappears from the JSON entirely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub claim: ClaimId,
    pub booking: BookingId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mismatch: Option<Vec<Mismatch>>,
}

impl MatchResult {
    pub fn new(claim: ClaimId, booking: BookingId, mismatches: Vec<Mismatch>) -> Self {
        Self {
            claim,
            booking,
            mismatch: if mismatches.is_empty() {
                None
            } else {
                Some(mismatches)
            },
        }
    }

    /// Tags for this pair, empty for a perfect match
    pub fn mismatches(&self) -> &[Mismatch] {
        self.mismatch.as_deref().unwrap_or(&[])
    }

    pub fn is_perfect(&self) -> bool {
        self.mismatch.is_none()
    }
}
