use serde::Deserialize;
use types::booking::Booking;
use types::claim::Claim;

/// Body of `POST /match`
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MatchRequest {
    pub bookings: Vec<Booking>,
    pub claims: Vec<Claim>,
}
