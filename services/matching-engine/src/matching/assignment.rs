//! Conflict-free assignment
//!
//! Turns the many-to-many candidate set into a 1:1 booking/claim mapping.
//! Accepted pairs come back ordered by score descending, ties broken by
//! enumeration order, whichever policy produced them.

use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::{BTreeSet, HashSet};

use super::candidates::Candidate;
use super::scoring::MAX_SCORE;

/// Rule used to pick a 1:1 mapping out of the candidates
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentPolicy {
    /// Walk candidates best-first and take every pair whose booking and
    /// claim are both still free. Skipped pairs are never revisited.
    #[default]
    GlobalGreedy,
    /// Maximize the summed score over all accepted pairs.
    MaxWeight,
}

/// Apply `policy` to `candidates`.
///
/// `candidates` must be in enumeration order (see
/// [`super::candidates::enumerate`]).
pub fn assign(policy: AssignmentPolicy, candidates: Vec<Candidate<'_>>) -> Vec<Candidate<'_>> {
    match policy {
        AssignmentPolicy::GlobalGreedy => assign_greedy(candidates),
        AssignmentPolicy::MaxWeight => assign_max_weight(candidates),
    }
}

/// Global greedy by descending score.
pub fn assign_greedy(mut candidates: Vec<Candidate<'_>>) -> Vec<Candidate<'_>> {
    // Stable: equal scores keep enumeration order
    candidates.sort_by_key(|c| Reverse(c.score()));

    let mut used_bookings = HashSet::new();
    let mut used_claims = HashSet::new();
    let mut accepted = Vec::new();

    for candidate in candidates {
        let (booking, claim) = (candidate.booking, candidate.claim);
        if used_bookings.contains(&booking.id) || used_claims.contains(&claim.id) {
            continue;
        }
        used_bookings.insert(&booking.id);
        used_claims.insert(&claim.id);
        accepted.push(candidate);
    }

    accepted
}

/// Maximum-weight bipartite assignment (Kuhn–Munkres).
///
/// Only bookings and claims that appear in some candidate take part. The
/// weight matrix is padded to a square; absent pairs carry weight 0 and are
/// dropped from the result, so every accepted pair is a real candidate.
pub fn assign_max_weight(candidates: Vec<Candidate<'_>>) -> Vec<Candidate<'_>> {
    if candidates.is_empty() {
        return candidates;
    }

    let rows: Vec<usize> = candidates
        .iter()
        .map(|c| c.booking_index)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let cols: Vec<usize> = candidates
        .iter()
        .map(|c| c.claim_index)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let n = rows.len().max(cols.len());
    // cell -> position in `candidates`
    let mut cells: Vec<Option<usize>> = vec![None; n * n];
    for (pos, c) in candidates.iter().enumerate() {
        // Both indices are present by construction
        let (Ok(i), Ok(j)) = (rows.binary_search(&c.booking_index), cols.binary_search(&c.claim_index))
        else {
            continue;
        };
        cells[i * n + j] = Some(pos);
    }

    let cost = |i: usize, j: usize| -> i64 {
        let weight = cells[i * n + j].map_or(0, |pos| candidates[pos].score());
        i64::from(MAX_SCORE) - i64::from(weight)
    };
    let row_for_col = hungarian(n, cost);

    let mut picked: Vec<usize> = row_for_col
        .iter()
        .enumerate()
        .filter_map(|(j, &i)| cells[i * n + j])
        .collect();
    picked.sort_by_key(|&pos| (Reverse(candidates[pos].score()), pos));

    let mut slots: Vec<Option<Candidate<'_>>> = candidates.into_iter().map(Some).collect();
    picked
        .into_iter()
        .filter_map(|pos| slots[pos].take())
        .collect()
}

/// Minimum-cost perfect assignment on an `n`×`n` matrix.
///
/// Returns, for each column, the row assigned to it. Potentials-based
/// O(n³) formulation with 1-based internal indexing; row/column 0 is the
/// virtual start node.
fn hungarian(n: usize, cost: impl Fn(usize, usize) -> i64) -> Vec<usize> {
    const INF: i64 = i64::MAX / 4;

    let mut u = vec![0i64; n + 1];
    let mut v = vec![0i64; n + 1];
    let mut p = vec![0usize; n + 1];
    let mut way = vec![0usize; n + 1];

    for i in 1..=n {
        p[0] = i;
        let mut j0 = 0;
        let mut minv = vec![INF; n + 1];
        let mut used = vec![false; n + 1];

        loop {
            used[j0] = true;
            let i0 = p[j0];
            let mut delta = INF;
            let mut j1 = 0;

            for j in 1..=n {
                if used[j] {
                    continue;
                }
                let cur = cost(i0 - 1, j - 1) - u[i0] - v[j];
                if cur < minv[j] {
                    minv[j] = cur;
                    way[j] = j0;
                }
                if minv[j] < delta {
                    delta = minv[j];
                    j1 = j;
                }
            }

            for j in 0..=n {
                if used[j] {
                    u[p[j]] += delta;
                    v[j] -= delta;
                } else {
                    minv[j] -= delta;
                }
            }

            j0 = j1;
            if p[j0] == 0 {
                break;
            }
        }

        // Augment along the alternating path
        loop {
            let j1 = way[j0];
            p[j0] = p[j1];
            j0 = j1;
            if j0 == 0 {
                break;
            }
        }
    }

    (1..=n).map(|j| p[j] - 1).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::candidates::enumerate;
    use chrono::{DateTime, Utc};
    use types::booking::Booking;
    use types::claim::Claim;
    use types::test_codes::TestCodeMap;

    fn at(ts: &str) -> DateTime<Utc> {
        ts.parse().unwrap()
    }

    fn ids<'a>(accepted: &[Candidate<'a>]) -> Vec<(&'a str, &'a str)> {
        accepted
            .iter()
            .map(|c| (c.booking.id.as_str(), c.claim.id.as_str()))
            .collect()
    }

    /// Both bookings compete for c1; c1 fits b1 perfectly.
    fn conflict_fixture() -> (Vec<Booking>, Vec<Claim>) {
        let bookings = vec![
            Booking::new("b1", "p", "test_1", "AON", at("2025-05-15T10:30:00Z")),
            Booking::new("b2", "p", "test_2", "FASCHIM", at("2025-05-15T09:00:00Z")),
        ];
        let claims = vec![
            // b1: 200, b2: 100
            Claim::new("c1", "medical_service_1", at("2025-05-15T10:30:00Z"), "AON", "p"),
            // b1: 170 (time mismatch), b2: 100
            Claim::new("c2", "medical_service_1", at("2025-05-15T11:00:00Z"), "AON", "p"),
        ];
        (bookings, claims)
    }

    #[test]
    fn test_greedy_takes_highest_first() {
        let ts = at("2025-05-15T10:30:00Z");
        let bookings = vec![Booking::new("b1", "p", "test_1", "AON", ts)];
        let claims = vec![
            Claim::new("c1", "medical_service_1", ts, "FASCHIM", "p"),
            Claim::new("c2", "medical_service_1", ts, "AON", "p"),
        ];

        let candidates = enumerate(&TestCodeMap::default(), &bookings, &claims);
        let accepted = assign_greedy(candidates);
        assert_eq!(ids(&accepted), vec![("b1", "c2")]);
    }

    #[test]
    fn test_greedy_ties_follow_enumeration_order() {
        let ts = at("2025-05-15T10:30:00Z");
        let bookings = vec![
            Booking::new("b1", "p", "test_1", "AON", ts),
            Booking::new("b2", "p", "test_1", "AON", ts),
        ];
        let claims = vec![
            Claim::new("c1", "medical_service_1", ts, "AON", "p"),
            Claim::new("c2", "medical_service_1", ts, "AON", "p"),
        ];

        let candidates = enumerate(&TestCodeMap::default(), &bookings, &claims);
        let accepted = assign_greedy(candidates);
        assert_eq!(ids(&accepted), vec![("b1", "c1"), ("b2", "c2")]);
    }

    #[test]
    fn test_greedy_skips_consumed_pairs() {
        let (bookings, claims) = conflict_fixture();
        let candidates = enumerate(&TestCodeMap::default(), &bookings, &claims);
        let accepted = assign_greedy(candidates);

        // b1-c1 (200) is taken first; b1-c2 and b2-c1 are skipped, b2-c2 (100) remains
        assert_eq!(ids(&accepted), vec![("b1", "c1"), ("b2", "c2")]);
        let total: u32 = accepted.iter().map(Candidate::score).sum();
        assert_eq!(total, 300);
    }

    #[test]
    fn test_max_weight_matches_greedy_when_greedy_is_optimal() {
        let (bookings, claims) = conflict_fixture();
        let candidates = enumerate(&TestCodeMap::default(), &bookings, &claims);
        let greedy: u32 = assign_greedy(candidates.clone()).iter().map(Candidate::score).sum();
        let optimal: u32 = assign_max_weight(candidates).iter().map(Candidate::score).sum();
        assert!(optimal >= greedy);
    }

    #[test]
    fn test_max_weight_beats_greedy() {
        // b1 is perfect with c1 (200) and scores 180 with c2.
        // b2 may only use c1 (180). Greedy: b1-c1 = 200, b2 left out.
        // Optimal: b1-c2 + b2-c1 = 360.
        let ts = at("2025-05-15T10:30:00Z");
        let bookings = vec![
            Booking::new("b1", "p", "test_1", "AON", ts),
            Booking::new("b2", "p", "test_1", "BUPA", ts),
        ];
        let claims = vec![
            Claim::new("c1", "medical_service_1", ts, "AON", "p"),
            Claim::new("c2", "medical_service_1", ts, "FASCHIM", "p"),
        ];
        let mut restricted = enumerate(&TestCodeMap::default(), &bookings, &claims);
        // drop b2-c2 to force the conflict
        restricted.retain(|c| !(c.booking_index == 1 && c.claim_index == 1));

        let greedy = assign_greedy(restricted.clone());
        assert_eq!(ids(&greedy), vec![("b1", "c1")]);

        let optimal = assign_max_weight(restricted);
        // equal scores, reported in enumeration order
        assert_eq!(ids(&optimal), vec![("b1", "c2"), ("b2", "c1")]);
        let total: u32 = optimal.iter().map(Candidate::score).sum();
        assert_eq!(total, 360);
    }

    #[test]
    fn test_max_weight_rectangular_input() {
        let ts = at("2025-05-15T10:30:00Z");
        let bookings = vec![Booking::new("b1", "p", "test_1", "AON", ts)];
        let claims = vec![
            Claim::new("c1", "medical_service_2", ts, "AON", "p"),
            Claim::new("c2", "medical_service_1", ts, "AON", "p"),
            Claim::new("c3", "medical_service_1", ts, "FASCHIM", "p"),
        ];

        let candidates = enumerate(&TestCodeMap::default(), &bookings, &claims);
        let accepted = assign(AssignmentPolicy::MaxWeight, candidates);
        assert_eq!(ids(&accepted), vec![("b1", "c2")]);
    }

    #[test]
    fn test_empty_candidates() {
        assert!(assign(AssignmentPolicy::GlobalGreedy, Vec::new()).is_empty());
        assert!(assign(AssignmentPolicy::MaxWeight, Vec::new()).is_empty());
    }

    #[test]
    fn test_hungarian_small_matrix() {
        let costs = [[4i64, 1, 3], [2, 0, 5], [3, 2, 2]];
        let row_for_col = hungarian(3, |i, j| costs[i][j]);
        let total: i64 = row_for_col
            .iter()
            .enumerate()
            .map(|(j, &i)| costs[i][j])
            .sum();
        assert_eq!(total, 5);
    }

    #[test]
    fn test_policy_deserializes_snake_case() {
        let policy: AssignmentPolicy = serde_json::from_str("\"max_weight\"").unwrap();
        assert_eq!(policy, AssignmentPolicy::MaxWeight);
        assert_eq!(AssignmentPolicy::default(), AssignmentPolicy::GlobalGreedy);
    }
}
