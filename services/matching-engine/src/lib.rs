//! Matching Engine Service
//!
//! Reconciles scheduling bookings against billing claims that describe the
//! same appointment, producing a 1:1 assignment with per-pair mismatch tags.
//!
//! **Pipeline:**
//! 1. Score every booking × claim pair (`matching::scoring`)
//! 2. Keep the pairs that pass the patient/date gate (`matching::candidates`)
//! 3. Select a conflict-free mapping (`matching::assignment`)
//!
//! **Key Invariants:**
//! - Each booking and each claim is assigned at most once
//! - Only gate-passing pairs are ever assigned
//! - Deterministic output (same inputs → same outputs)
//! - Mismatch tags reported in time, test, insurance order

pub mod matching;
pub mod engine;
pub mod report;

pub use engine::MatchingEngine;
pub use matching::AssignmentPolicy;
pub use report::{Reconciliation, ScoredMatch};
