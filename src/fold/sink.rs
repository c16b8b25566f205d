// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Side-effecting stream consumers.

use std::time::Duration;

use async_trait::async_trait;

use crate::{error::Result, stats::Statistics};

/// Snapshot of the accumulated fold state a [`Sink`] observes an item with.
///
/// Taken just before the item is folded in, so a block-opening marker is
/// observed at its enclosing depth.
#[derive(Clone, Copy, Debug, Default)]
pub struct Frame {
    /// Nesting level of the item, in blocks.
    pub level: usize,

    /// Wall-clock time elapsed since the traversal started.
    pub elapsed: Duration,
}

/// A [`Fold`] used purely for side effects.
///
/// A [`Sink`] participates in the same single traversal as the
/// value-producing folds: it receives every item, in stream order, in
/// lock-step with the accumulating state, and the finalized [`Statistics`]
/// once at stream end.
///
/// If any of its operations fails, the whole fold fails: there is no
/// per-sink isolation, so a broken sink aborts the run rather than silently
/// dropping output.
///
/// [`Fold`]: super::Fold
#[async_trait(?Send)]
pub trait Sink<I> {
    /// Called once before the first item.
    async fn start(&mut self) -> Result<()> {
        Ok(())
    }

    /// Observes one `item` together with the [`Frame`] it occurs in.
    async fn observe(&mut self, item: &I, frame: Frame) -> Result<()>;

    /// Called once after the last item, with the finalized [`Statistics`].
    async fn end(&mut self, stats: &Statistics) -> Result<()> {
        let _ = stats;
        Ok(())
    }
}

/// Combines the given [`Sink`]s into a single point-wise one.
///
/// For each incoming item the resulting [`Sink`] invokes every constituent
/// on that same item, in registration order, before advancing. All
/// consumers therefore see a consistent, order-identical view of the one
/// traversal, without the stream being duplicated or re-run.
#[must_use]
pub fn sum<I>(sinks: Vec<Box<dyn Sink<I>>>) -> Sum<I> {
    Sum { sinks }
}

/// Point-wise sum of [`Sink`]s, built by [`sum()`].
pub struct Sum<I> {
    /// Constituent [`Sink`]s, in registration order.
    sinks: Vec<Box<dyn Sink<I>>>,
}

impl<I> Sum<I> {
    /// Number of constituent [`Sink`]s.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    /// Indicates whether this [`Sum`] has no constituents.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

#[async_trait(?Send)]
impl<I> Sink<I> for Sum<I> {
    async fn start(&mut self) -> Result<()> {
        for sink in &mut self.sinks {
            sink.start().await?;
        }
        Ok(())
    }

    async fn observe(&mut self, item: &I, frame: Frame) -> Result<()> {
        for sink in &mut self.sinks {
            sink.observe(item, frame).await?;
        }
        Ok(())
    }

    async fn end(&mut self, stats: &Statistics) -> Result<()> {
        for sink in &mut self.sinks {
            sink.end(stats).await?;
        }
        Ok(())
    }
}

/// Extension of a [`Sink`] for pipeline assembly.
#[sealed::sealed]
pub trait Ext<I>: Sink<I> + Sized {
    /// Boxes this [`Sink`] for use in a [`sum()`].
    fn boxed(self) -> Box<dyn Sink<I>>;
}

#[sealed::sealed]
impl<I, T> Ext<I> for T
where
    T: Sink<I> + Sized + 'static,
{
    fn boxed(self) -> Box<dyn Sink<I>> {
        Box::new(self)
    }
}
