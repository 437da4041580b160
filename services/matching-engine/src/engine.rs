//! Matching engine core
//!
//! Main coordinator: scores, enumerates and assigns in one pass per call.

use std::collections::HashSet;
use tracing::debug;
use types::booking::Booking;
use types::claim::Claim;
use types::matching::MatchResult;
use types::test_codes::TestCodeMap;

use crate::matching::{assignment, candidates, AssignmentPolicy};
use crate::report::{Reconciliation, ScoredMatch};

/// Booking/claim reconciliation engine
///
/// Holds only immutable configuration, so one instance can serve any number
/// of concurrent calls.
#[derive(Debug, Clone, Default)]
pub struct MatchingEngine {
    /// Test id → service code translation
    codes: TestCodeMap,
    /// How candidates become a 1:1 mapping
    policy: AssignmentPolicy,
}

impl MatchingEngine {
    /// Create an engine using the global greedy policy
    pub fn new(codes: TestCodeMap) -> Self {
        Self::with_policy(codes, AssignmentPolicy::default())
    }

    pub fn with_policy(codes: TestCodeMap, policy: AssignmentPolicy) -> Self {
        Self { codes, policy }
    }

    pub fn test_codes(&self) -> &TestCodeMap {
        &self.codes
    }

    pub fn policy(&self) -> AssignmentPolicy {
        self.policy
    }

    /// Reconcile bookings against claims and return the accepted pairs.
    ///
    /// This is the main entry point. Callers must pass records with
    /// non-empty fields and ids unique within each list (see
    /// `types::validation::validate_records`); the engine does not re-check.
    /// Either list being empty yields an empty result.
    pub fn match_records(&self, bookings: &[Booking], claims: &[Claim]) -> Vec<MatchResult> {
        self.reconcile(bookings, claims).into_results()
    }

    /// Same as [`match_records`](Self::match_records) but keeps scores and
    /// reports the records left unassigned.
    pub fn reconcile(&self, bookings: &[Booking], claims: &[Claim]) -> Reconciliation {
        let candidates = candidates::enumerate(&self.codes, bookings, claims);
        let candidate_count = candidates.len();
        let accepted = assignment::assign(self.policy, candidates);

        debug!(
            bookings = bookings.len(),
            claims = claims.len(),
            candidates = candidate_count,
            accepted = accepted.len(),
            policy = ?self.policy,
            "reconciliation complete"
        );

        let matched_bookings: HashSet<usize> = accepted.iter().map(|c| c.booking_index).collect();
        let matched_claims: HashSet<usize> = accepted.iter().map(|c| c.claim_index).collect();

        let matches = accepted
            .into_iter()
            .map(|c| ScoredMatch {
                result: MatchResult::new(c.claim.id.clone(), c.booking.id.clone(), c.pair.mismatches),
                score: c.pair.score,
            })
            .collect();

        let unmatched_bookings = bookings
            .iter()
            .enumerate()
            .filter(|(i, _)| !matched_bookings.contains(i))
            .map(|(_, b)| b.id.clone())
            .collect();
        let unmatched_claims = claims
            .iter()
            .enumerate()
            .filter(|(i, _)| !matched_claims.contains(i))
            .map(|(_, c)| c.id.clone())
            .collect();

        Reconciliation {
            matches,
            unmatched_bookings,
            unmatched_claims,
        }
    }
}
