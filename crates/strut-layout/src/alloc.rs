#![forbid(unsafe_code)]

//! Space allocation: distribute an available length among size hints.
//!
//! [`allocate`] is the algorithmic core of the toolkit. Given `n` hints and
//! an available length it produces `n` allocated lengths, honoring each
//! hint's `min`/`max` bounds and preferring each hint's `pref`. Directional
//! containers call it on every layout pass; it is a pure function with no
//! tree knowledge, so it is also usable standalone.

use std::fmt;

use strut_core::SizeHint;

/// Allocation failure: the hints cannot fit in the available length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AllocError {
    /// The sum of minimum lengths exceeds the available length.
    Infeasible {
        /// Sum of the hints' minimum lengths.
        required: f64,
        /// The length that was offered.
        available: f64,
    },
}

impl fmt::Display for AllocError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Infeasible {
                required,
                available,
            } => write!(
                f,
                "minimum length of all items {required} exceeds available length {available}"
            ),
        }
    }
}

impl std::error::Error for AllocError {}

/// Distribute `available` length among `hints`.
///
/// The result always has one entry per hint, each entry lies in
/// `[min, max]` (modulo floating point), and the entries sum to at most
/// `available`. Fractional allocations are expected; no rounding is
/// performed. Failure is a distinct [`AllocError`], never an all-zero
/// vector, and implies nothing was allocated.
///
/// # Policy
///
/// 1. If `sum(min) > available`, fail.
/// 2. If `sum(min) == available`, every item gets exactly its `min`.
/// 3. If `sum(pref) <= available`, start every item at `pref` and treat
///    `max - pref` as each item's claim on the remaining slack.
/// 4. Otherwise start every item at `min`, distribute slack over the
///    `pref - min` gaps first, then over whatever headroom is left under
///    each item's `max`.
/// 5. Slack is split proportionally to claim size, except that unbounded
///    claims preempt the pool: when `k` items have infinite claims, each
///    receives `slack / k` and every bounded claim receives nothing in
///    that pass.
pub fn allocate(hints: &[SizeHint], available: f64) -> Result<Vec<f64>, AllocError> {
    let sum_min: f64 = hints.iter().map(|h| h.min).sum();
    let sum_pref: f64 = hints.iter().map(|h| h.pref).sum();

    if sum_min > available {
        return Err(AllocError::Infeasible {
            required: sum_min,
            available,
        });
    }

    if sum_min == available {
        return Ok(hints.iter().map(|h| h.min).collect());
    }

    let mut alloc: Vec<f64>;
    let mut claims: Vec<f64>;
    if sum_pref <= available {
        // Every preferred length fits; leftover slack is bid on by each
        // item's headroom above pref.
        alloc = hints.iter().map(|h| h.pref).collect();
        claims = hints.iter().map(|h| h.max - h.pref).collect();
    } else {
        // Preferred lengths don't fit. Start from the floor and close the
        // min->pref gaps proportionally before considering max headroom.
        alloc = hints.iter().map(|h| h.min).collect();
        claims = hints.iter().map(|h| h.pref - h.min).collect();
        if claims.iter().sum::<f64>() > 0.0 {
            let slack = available - alloc.iter().sum::<f64>();
            for (entry, share) in alloc.iter_mut().zip(distribute_claims(&claims, slack)) {
                *entry += share;
            }
        }
        if alloc.iter().sum::<f64>() < available {
            claims = hints
                .iter()
                .zip(&alloc)
                .map(|(h, entry)| h.max - entry)
                .collect();
        }
    }

    if claims.iter().sum::<f64>() > 0.0 {
        let slack = available - alloc.iter().sum::<f64>();
        for (entry, share) in alloc.iter_mut().zip(distribute_claims(&claims, slack)) {
            *entry += share;
        }
    }

    Ok(alloc)
}

/// Split `slack` across `claims`.
///
/// Unbounded claims win the whole pool in equal shares; otherwise each
/// claim receives its proportional cut of `min(total_claims, slack)`.
fn distribute_claims(claims: &[f64], slack: f64) -> Vec<f64> {
    let unbounded = claims.iter().filter(|c| c.is_infinite()).count();
    if unbounded > 0 {
        let share = slack / unbounded as f64;
        claims
            .iter()
            .map(|c| if c.is_infinite() { share } else { 0.0 })
            .collect()
    } else {
        let total: f64 = claims.iter().sum();
        let pool = total.min(slack);
        claims.iter().map(|c| c / total * pool).collect()
    }
}
