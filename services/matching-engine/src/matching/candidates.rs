//! Candidate pair enumeration
//!
//! Scores the full bookings × claims product and keeps the pairs that pass
//! the mandatory gate.

use types::booking::Booking;
use types::claim::Claim;
use types::test_codes::TestCodeMap;

use super::scoring::{score_pair, PairScore};

/// A gate-passing pair, borrowed from the caller's input lists
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate<'a> {
    pub booking: &'a Booking,
    pub claim: &'a Claim,
    /// Position of the booking in its input list
    pub booking_index: usize,
    /// Position of the claim in its input list
    pub claim_index: usize,
    pub pair: PairScore,
}

impl Candidate<'_> {
    pub fn score(&self) -> u32 {
        self.pair.score
    }
}

/// Enumerate all gate-passing pairs.
///
/// Output order is generation order: bookings in the outer loop, claims in
/// the inner loop. Assignment relies on this order to break score ties.
pub fn enumerate<'a>(
    codes: &TestCodeMap,
    bookings: &'a [Booking],
    claims: &'a [Claim],
) -> Vec<Candidate<'a>> {
    let mut candidates = Vec::new();

    for (booking_index, booking) in bookings.iter().enumerate() {
        for (claim_index, claim) in claims.iter().enumerate() {
            if let Some(pair) = score_pair(codes, booking, claim) {
                candidates.push(Candidate {
                    booking,
                    claim,
                    booking_index,
                    claim_index,
                    pair,
                });
            }
        }
    }

    candidates
}
