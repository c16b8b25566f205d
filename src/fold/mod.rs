// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Composable single-pass stream folds.
//!
//! A [`Fold`] reduces a stream of items into a state: an initial state, a
//! pure per-item step, and an optional finalization applied once at stream
//! end. Two [`Fold`]s over the same item type are paired with [`combine()`]
//! into one fold whose state is the pair of states, so any number of
//! accumulators run over a single traversal of the stream without it being
//! re-read or duplicated.
//!
//! Side-effecting consumers are [`Sink`]s; they are driven in lock-step with
//! the value-producing folds by the [`Reporter`], which owns the one
//! traversal.
//!
//! [`Reporter`]: crate::reporter::Reporter

mod indent;
mod sink;
mod stats;
mod timer;

use futures::{Stream, StreamExt as _, pin_mut};

use crate::error::Result;

pub use self::{
    indent::{IndentFold, Indentation},
    sink::{Ext as SinkExt, Frame, Sink, Sum, sum},
    stats::StatsFold,
    timer::{SimpleTimer, TimerFold},
};

/// A stateful reduction of a stream of `I` items.
///
/// The step must be pure with respect to stream order: it may depend on the
/// items seen so far, never on their timing.
pub trait Fold<I: ?Sized> {
    /// State accumulated by this [`Fold`].
    ///
    /// Owned exclusively by a single traversal; pairing two folds with
    /// [`combine()`] produces a new paired state, not aliasing.
    type State;

    /// Returns the state this [`Fold`] starts from.
    fn initial(&self) -> Self::State;

    /// Folds one `item` into the given `state`.
    fn step(&self, state: Self::State, item: &I) -> Self::State;

    /// Finalizes the state once, at stream end.
    ///
    /// Defaults to the state unchanged; folds holding live resources (such
    /// as a running timer) override it.
    fn finish(&self, state: Self::State) -> Self::State {
        state
    }
}

/// Pairs two [`Fold`]s over the same item type into one.
///
/// The resulting fold applies each sub-step independently to its half of the
/// paired state, so both accumulators observe every item of a single
/// traversal in the same order.
pub const fn combine<I, A, B>(first: A, second: B) -> Zipped<A, B>
where
    I: ?Sized,
    A: Fold<I>,
    B: Fold<I>,
{
    Zipped { first, second }
}

/// [`Fold`] produced by [`combine()`].
#[derive(Clone, Copy, Debug)]
pub struct Zipped<A, B> {
    /// First paired [`Fold`].
    first: A,

    /// Second paired [`Fold`].
    second: B,
}

impl<I, A, B> Fold<I> for Zipped<A, B>
where
    I: ?Sized,
    A: Fold<I>,
    B: Fold<I>,
{
    type State = (A::State, B::State);

    fn initial(&self) -> Self::State {
        (self.first.initial(), self.second.initial())
    }

    fn step(&self, (a, b): Self::State, item: &I) -> Self::State {
        (self.first.step(a, item), self.second.step(b, item))
    }

    fn finish(&self, (a, b): Self::State) -> Self::State {
        (self.first.finish(a), self.second.finish(b))
    }
}

/// Runs the given [`Fold`] over a whole `stream` in a single pass.
///
/// Each element access may fail with an execution error, which aborts the
/// fold and propagates.
///
/// # Errors
///
/// If the `stream` yields an error in place of an item.
pub async fn run_fold<I, F, S>(stream: S, fold: &F) -> Result<F::State>
where
    F: Fold<I>,
    S: Stream<Item = Result<I>>,
{
    pin_mut!(stream);

    let mut state = fold.initial();
    while let Some(item) = stream.next().await {
        state = fold.step(state, &item?);
    }
    Ok(fold.finish(state))
}

#[cfg(test)]
mod tests {
    use futures::stream;

    use super::*;

    /// Counts items.
    struct Count;

    impl Fold<u32> for Count {
        type State = usize;

        fn initial(&self) -> usize {
            0
        }

        fn step(&self, state: usize, _: &u32) -> usize {
            state + 1
        }
    }

    /// Sums items.
    struct Total;

    impl Fold<u32> for Total {
        type State = u32;

        fn initial(&self) -> u32 {
            0
        }

        fn step(&self, state: u32, item: &u32) -> u32 {
            state + item
        }
    }

    #[tokio::test]
    async fn zipped_folds_share_one_traversal() {
        let items = stream::iter([1_u32, 2, 3, 4].map(Ok));
        let fold = combine(Count, Total);

        let (count, total) = run_fold(items, &fold).await.unwrap();

        assert_eq!(count, 4);
        assert_eq!(total, 10);
    }

    #[tokio::test]
    async fn stream_error_aborts_the_fold() {
        let items = stream::iter(vec![
            Ok(1_u32),
            Err(crate::ReportError::execution("step blew up")),
            Ok(3),
        ]);

        let res = run_fold(items, &Total).await;
        assert!(res.is_err());
    }
}
