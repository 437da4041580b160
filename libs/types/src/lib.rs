//! Types library for booking/claim reconciliation
//!
//! Shared record definitions used by the matching engine and the HTTP
//! gateway. Everything here is plain data: construction, validation and
//! (de)serialization, no matching logic.
//!
//! # Modules
//! - `ids`: Opaque identifiers (BookingId, ClaimId, PatientId)
//! - `booking`: Scheduling-side appointment records
//! - `claim`: Billing-side claim records
//! - `test_codes`: Test id → service code translation table
//! - `matching`: Reconciliation output (MatchResult, Mismatch)
//! - `validation`: Boundary checks for whole record lists
//! - `errors`: Error taxonomy

pub mod ids;
pub mod booking;
pub mod claim;
pub mod test_codes;
pub mod matching;
pub mod validation;
pub mod errors;

// Library version constant
pub const LIB_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::ids::*;
    pub use crate::booking::*;
    pub use crate::claim::*;
    pub use crate::test_codes::*;
    pub use crate::matching::*;
    pub use crate::validation::*;
    pub use crate::errors::*;
}
