//! Matching logic module
//!
//! Pairwise scoring, candidate enumeration and conflict-free assignment

pub mod scoring;
pub mod candidates;
pub mod assignment;

pub use assignment::AssignmentPolicy;
pub use candidates::Candidate;
pub use scoring::{score_pair, PairScore};
