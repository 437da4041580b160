//! Batch checks for a booking list and a claim list
//!
//! The engine assumes non-empty fields and ids unique within each list.
//! Callers run [`validate_records`] at the boundary so those assumptions
//! hold before matching starts.

use crate::booking::Booking;
use crate::claim::Claim;
use crate::errors::{RecordKind, ValidationError};
use std::collections::HashSet;

/// Validate both lists, returning the first violation found.
///
/// Bookings are checked before claims, each in list order.
pub fn validate_records(bookings: &[Booking], claims: &[Claim]) -> Result<(), ValidationError> {
    let mut seen = HashSet::with_capacity(bookings.len());
    for (index, booking) in bookings.iter().enumerate() {
        booking.validate(index)?;
        if !seen.insert(booking.id.as_str()) {
            return Err(ValidationError::DuplicateId {
                record: RecordKind::Booking,
                id: booking.id.to_string(),
            });
        }
    }

    let mut seen = HashSet::with_capacity(claims.len());
    for (index, claim) in claims.iter().enumerate() {
        claim.validate(index)?;
        if !seen.insert(claim.id.as_str()) {
            return Err(ValidationError::DuplicateId {
                record: RecordKind::Claim,
                id: claim.id.to_string(),
            });
        }
    }

    Ok(())
}
