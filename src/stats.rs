// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Aggregated execution statistics.

use std::{ops, time::Duration};

/// Aggregate of execution outcomes for a specification run.
///
/// Forms a commutative monoid under point-wise addition with
/// [`Statistics::identity()`] as the identity, so totals can be built both
/// incrementally (one fragment at a time) and across independently computed
/// sub-specifications (nested references).
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Statistics {
    /// Number of executed examples.
    pub examples: usize,

    /// Number of successful examples.
    pub successes: usize,

    /// Number of failed examples.
    pub failures: usize,

    /// Number of errored examples.
    pub errors: usize,

    /// Number of skipped examples.
    pub skipped: usize,

    /// Number of pending examples.
    pub pending: usize,

    /// Number of evaluated expectations.
    pub expectations: usize,

    /// Elapsed time.
    ///
    /// Accumulates per-example durations while folding; the [`Reporter`]
    /// replaces it with the wall-clock elapsed time of the whole traversal
    /// when the stream ends.
    ///
    /// [`Reporter`]: crate::reporter::Reporter
    pub elapsed: Duration,
}

impl Statistics {
    /// Returns the monoid identity: all counters at zero.
    #[must_use]
    pub const fn identity() -> Self {
        Self {
            examples: 0,
            successes: 0,
            failures: 0,
            errors: 0,
            skipped: 0,
            pending: 0,
            expectations: 0,
            elapsed: Duration::ZERO,
        }
    }

    /// Point-wise sum of `self` and `other`.
    #[must_use]
    pub fn combine(self, other: Self) -> Self {
        Self {
            examples: self.examples + other.examples,
            successes: self.successes + other.successes,
            failures: self.failures + other.failures,
            errors: self.errors + other.errors,
            skipped: self.skipped + other.skipped,
            pending: self.pending + other.pending,
            expectations: self.expectations + other.expectations,
            elapsed: self.elapsed + other.elapsed,
        }
    }

    /// Indicates whether any failure or error was counted.
    #[must_use]
    pub const fn has_issues(&self) -> bool {
        self.failures > 0 || self.errors > 0
    }

    /// Indicates whether nothing was counted yet.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.examples == 0 && self.expectations == 0
    }
}

impl ops::Add for Statistics {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        self.combine(rhs)
    }
}

impl ops::AddAssign for Statistics {
    fn add_assign(&mut self, rhs: Self) {
        *self = self.combine(rhs);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(n: usize) -> Statistics {
        Statistics {
            examples: n,
            successes: n / 2,
            failures: n / 3,
            errors: n / 5,
            skipped: 1,
            pending: 0,
            expectations: n * 2,
            elapsed: Duration::from_millis(n as u64),
        }
    }

    #[test]
    fn identity_is_neutral() {
        let s = sample(7);
        assert_eq!(Statistics::identity() + s, s);
        assert_eq!(s + Statistics::identity(), s);
    }

    #[test]
    fn addition_is_associative_and_commutative() {
        let (a, b, c) = (sample(3), sample(5), sample(11));
        assert_eq!((a + b) + c, a + (b + c));
        assert_eq!(a + b, b + a);
    }

    #[test]
    fn partitioned_folding_matches_sequential() {
        let parts = [sample(1), sample(2), sample(3), sample(4)];

        let sequential = parts
            .iter()
            .fold(Statistics::identity(), |acc, s| acc + *s);
        let split = (parts[0] + parts[1]) + (parts[2] + parts[3]);

        assert_eq!(sequential, split);
    }

    #[test]
    fn issue_detection() {
        assert!(!Statistics::identity().has_issues());
        assert!(sample(3).has_issues());
    }
}
