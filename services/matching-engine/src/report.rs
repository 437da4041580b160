//! Reconciliation report structures
//!
//! Richer view of one engine run than the plain `MatchResult` list: scores
//! of the accepted pairs and the records nothing was assigned to.

use serde::Serialize;
use types::ids::{BookingId, ClaimId};
use types::matching::MatchResult;

/// Accepted pair together with the score it was accepted at
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoredMatch {
    #[serde(flatten)]
    pub result: MatchResult,
    pub score: u32,
}

/// Full outcome of reconciling one booking list against one claim list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Reconciliation {
    /// In acceptance order
    pub matches: Vec<ScoredMatch>,
    /// Bookings with no accepted claim, in input order
    pub unmatched_bookings: Vec<BookingId>,
    /// Claims with no accepted booking, in input order
    pub unmatched_claims: Vec<ClaimId>,
}

impl Reconciliation {
    pub fn total_score(&self) -> u32 {
        self.matches.iter().map(|m| m.score).sum()
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// Drop scores and unmatched ids, keeping the wire-level result list.
    pub fn into_results(self) -> Vec<MatchResult> {
        self.matches.into_iter().map(|m| m.result).collect()
    }
}
