//! Pairwise compatibility scoring
//!
//! Decides whether a booking and a claim may describe the same appointment
//! and, if so, how confident that pairing is.

use chrono::{DateTime, Timelike, Utc};
use types::booking::Booking;
use types::claim::Claim;
use types::matching::Mismatch;
use types::test_codes::TestCodeMap;

/// Awarded to every pair that passes the mandatory gate
pub const BASE_SCORE: u32 = 100;
/// Same UTC hour and minute
pub const TIME_BONUS: u32 = 30;
/// Claim service code matches the mapped test
pub const TEST_BONUS: u32 = 50;
/// Same insurer
pub const INSURANCE_BONUS: u32 = 20;
/// Every secondary check passed
pub const MAX_SCORE: u32 = BASE_SCORE + TIME_BONUS + TEST_BONUS + INSURANCE_BONUS;

/// Outcome of scoring a pair that passed the gate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairScore {
    pub score: u32,
    /// Failed secondary checks, always in time, test, insurance order
    pub mismatches: Vec<Mismatch>,
}

impl PairScore {
    pub fn is_perfect(&self) -> bool {
        self.mismatches.is_empty()
    }
}

/// Mandatory gate: same patient and same UTC calendar day.
pub fn passes_gate(booking: &Booking, claim: &Claim) -> bool {
    booking.patient == claim.patient && same_day(booking.reservation_date, claim.booking_date)
}

/// Score a booking against a claim.
///
/// Returns `None` when the gate fails. Otherwise the score is
/// [`BASE_SCORE`] plus the bonus of each secondary check that passed; a
/// failed secondary check only records its tag.
pub fn score_pair(codes: &TestCodeMap, booking: &Booking, claim: &Claim) -> Option<PairScore> {
    if !passes_gate(booking, claim) {
        return None;
    }

    let mut score = BASE_SCORE;
    let mut mismatches = Vec::new();

    if same_minute(booking.reservation_date, claim.booking_date) {
        score += TIME_BONUS;
    } else {
        mismatches.push(Mismatch::Time);
    }

    if codes.expected_service_code(&booking.test) == Some(claim.medical_service_code.as_str()) {
        score += TEST_BONUS;
    } else {
        mismatches.push(Mismatch::Test);
    }

    if booking.insurance == claim.insurance {
        score += INSURANCE_BONUS;
    } else {
        mismatches.push(Mismatch::Insurance);
    }

    Some(PairScore { score, mismatches })
}

fn same_day(a: DateTime<Utc>, b: DateTime<Utc>) -> bool {
    a.date_naive() == b.date_naive()
}

/// Seconds and sub-second parts are ignored.
fn same_minute(a: DateTime<Utc>, b: DateTime<Utc>) -> bool {
    a.hour() == b.hour() && a.minute() == b.minute()
}
