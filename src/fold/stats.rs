//! Statistics-accumulating fold.

use crate::{
    fragment::{Fragment, Status},
    stats::Statistics,
};

use super::Fold;

/// [`Fold`] turning each fragment's result into a running [`Statistics`]
/// aggregate.
///
/// Results decorated with a nested specification's [`Statistics`] are folded
/// in by monoid-adding the nested aggregate wholesale, so a reference to
/// another specification never counts as one more example of the referring
/// one.
#[derive(Clone, Copy, Debug, Default)]
pub struct StatsFold;

impl StatsFold {
    /// Creates a new [`StatsFold`].
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Fold<Fragment> for StatsFold {
    type State = Statistics;

    fn initial(&self) -> Statistics {
        Statistics::identity()
    }

    fn step(&self, mut stats: Statistics, fragment: &Fragment) -> Statistics {
        let Some(executed) = fragment.executed() else {
            return stats;
        };

        if let Some(nested) = executed.result.nested_stats() {
            return stats + *nested;
        }

        stats.examples += 1;
        stats.expectations += executed.expectations;
        stats.elapsed += executed.duration;
        match executed.result.status() {
            Status::Success => stats.successes += 1,
            Status::Failure => stats.failures += 1,
            Status::Error => stats.errors += 1,
            Status::Skipped => stats.skipped += 1,
            Status::Pending => stats.pending += 1,
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crate::fragment::{DataTable, ExecResult, Executed, Execution};

    use super::*;

    fn fold(fragments: &[Fragment]) -> Statistics {
        let f = StatsFold::new();
        fragments
            .iter()
            .fold(f.initial(), |acc, frag| f.step(acc, frag))
    }

    #[test]
    fn counts_every_status_category() {
        let stats = fold(&[
            Fragment::example("a", ExecResult::success()),
            Fragment::example("b", ExecResult::failure("nope")),
            Fragment::example("c", ExecResult::error("boom")),
            Fragment::example("d", ExecResult::skipped("later")),
            Fragment::example("e", ExecResult::pending("todo")),
            Fragment::text("not an example"),
        ]);

        assert_eq!(stats.examples, 5);
        assert_eq!(stats.successes, 1);
        assert_eq!(stats.failures, 1);
        assert_eq!(stats.errors, 1);
        assert_eq!(stats.skipped, 1);
        assert_eq!(stats.pending, 1);
        assert_eq!(stats.expectations, 5);
    }

    #[test]
    fn nested_statistics_are_added_wholesale() {
        let nested = Statistics {
            examples: 5,
            successes: 5,
            expectations: 5,
            ..Statistics::identity()
        };
        let stats = fold(&[
            Fragment::example("one more", ExecResult::success()),
            Fragment::example(
                "see other spec",
                ExecResult::success().with_stats(nested),
            ),
        ]);

        // 1 local example plus the nested 5, never 7.
        assert_eq!(stats.examples, 6);
        assert_eq!(stats.successes, 6);
    }

    #[test]
    fn table_decoration_counts_as_its_inner_result() {
        let table = DataTable::new(["n", "out"], vec![vec![
            "1".to_owned(),
            "2".to_owned(),
        ]]);
        let stats = fold(&[Fragment::example(
            "rows hold",
            ExecResult::failure("row 1 differs").with_table(table),
        )]);

        assert_eq!(stats.examples, 1);
        assert_eq!(stats.failures, 1);
    }

    #[test]
    fn durations_accumulate() {
        let frag = Fragment {
            description: crate::fragment::Description::Text("t".into()),
            execution: Execution::Executed(
                Executed::new(ExecResult::success())
                    .with_duration(Duration::from_millis(30)),
            ),
        };
        let stats = fold(&[frag.clone(), frag]);
        assert_eq!(stats.elapsed, Duration::from_millis(60));
    }
}
