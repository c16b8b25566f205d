// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Run orchestration.
//!
//! The [`Reporter`] obtains a fragment stream from the external
//! [`Executor`], builds the combined fold (statistics, indentation, timer)
//! zipped with the point-wise sum of every printer sink plus the statistics
//! store sink, and folds the stream exactly once. Every sink observes every
//! fragment in stream order, in lock-step with the accumulating state,
//! regardless of how the upstream producer schedules execution.

use std::{
    cell::RefCell,
    rc::Rc,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};

use futures::{Stream, StreamExt as _, future::Either, pin_mut, stream};

use crate::{
    config::Config,
    error::{ReportError, Result},
    fold::{
        Fold as _, Frame, IndentFold, Sink as _, SinkExt as _, StatsFold,
        TimerFold, combine, sum,
    },
    fragment::Fragment,
    printer::{Printer, TextPrinter},
    specification::Specification,
    stats::Statistics,
    store::{MemoryRepository, SharedRepository, StoreSink},
};

/// Supplier of executed fragment streams.
///
/// The selection/execution phase behind this contract decides which
/// fragments run and runs them; the stream it yields is already correctly
/// ordered and already carries results. Element accesses may fail with an
/// execution error, which propagates as a fold failure.
///
/// Any `FnMut(&Specification) -> impl Stream` closure is an [`Executor`].
pub trait Executor {
    /// Stream of executed fragments this [`Executor`] produces.
    type Fragments: Stream<Item = Result<Fragment>>;

    /// Returns the executed fragment stream of the given specification.
    ///
    /// Re-invoking is the only way to restart: the returned stream is lazy,
    /// finite, and consumed in one pass.
    fn execute(&mut self, spec: &Specification) -> Self::Fragments;
}

impl<F, S> Executor for F
where
    F: FnMut(&Specification) -> S,
    S: Stream<Item = Result<Fragment>>,
{
    type Fragments = S;

    fn execute(&mut self, spec: &Specification) -> S {
        self(spec)
    }
}

/// Cooperative cancellation flag, checked between stream pulls.
///
/// Cancelling stops the fold from pulling further fragments; already
/// performed side effects are not rolled back, and the run surfaces as
/// [`ReportError::Cancelled`] instead of presenting partial statistics as
/// final.
#[derive(Clone, Debug, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    /// Creates a new, unset [`CancelFlag`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Indicates whether cancellation was requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Orchestrator of reporting runs.
pub struct Reporter<E> {
    /// Supplier of executed fragment streams.
    executor: E,

    /// Configured printers, in registration order.
    printers: Vec<Box<dyn Printer>>,

    /// Repository the store sink writes through.
    repository: SharedRepository,

    /// Options of this run.
    config: Config,

    /// Cancellation flag checked between stream pulls.
    cancel: CancelFlag,
}

impl<E: Executor> Reporter<E> {
    /// Creates a [`Reporter`] with the default setup: a [`TextPrinter`]
    /// and an in-memory repository.
    #[must_use]
    pub fn new(executor: E, config: Config) -> Self {
        let printer = TextPrinter::new(config.clone());
        Self::custom(executor, config).with_printer(printer)
    }

    /// Creates a [`Reporter`] without any printers, for a fully custom
    /// pipeline.
    #[must_use]
    pub fn custom(executor: E, config: Config) -> Self {
        Self {
            executor,
            printers: Vec::new(),
            repository: Rc::new(RefCell::new(MemoryRepository::new())),
            config,
            cancel: CancelFlag::new(),
        }
    }

    /// Adds a [`Printer`] to this [`Reporter`].
    #[must_use]
    pub fn with_printer(mut self, printer: impl Printer + 'static) -> Self {
        self.printers.push(Box::new(printer));
        self
    }

    /// Replaces the statistics repository.
    #[must_use]
    pub fn with_repository(mut self, repository: SharedRepository) -> Self {
        self.repository = repository;
        self
    }

    /// Attaches a [`CancelFlag`] to this [`Reporter`].
    #[must_use]
    pub fn with_cancel(mut self, cancel: CancelFlag) -> Self {
        self.cancel = cancel;
        self
    }

    /// Returns the repository handle of this [`Reporter`].
    #[must_use]
    pub fn repository(&self) -> SharedRepository {
        Rc::clone(&self.repository)
    }

    /// Calls every printer's [`Printer::prepare()`] hook, once before any
    /// specification of the batch executes.
    ///
    /// # Errors
    ///
    /// If any printer fails to prepare; the failure surfaces as the run's
    /// failure.
    pub async fn prepare(&mut self, specs: &[Specification]) -> Result<()> {
        for printer in &mut self.printers {
            printer.prepare(specs).await?;
        }
        Ok(())
    }

    /// Calls every printer's [`Printer::finalize()`] hook, once after all
    /// specifications of the batch executed.
    ///
    /// # Errors
    ///
    /// If any printer fails to finalize.
    pub async fn finalize(&mut self, specs: &[Specification]) -> Result<()> {
        for printer in &mut self.printers {
            printer.finalize(specs).await?;
        }
        Ok(())
    }

    /// Reports one specification, returning its finalized [`Statistics`].
    ///
    /// The fragment stream is folded exactly once: statistics,
    /// indentation and timing accumulate per fragment while every sink
    /// observes the same fragment, in registration order, before the next
    /// one is considered. By default sinks observe fragments as they are
    /// produced, so output may appear before later fragments have finished
    /// executing; the `sequential` option instead materializes the whole
    /// stream up front.
    ///
    /// # Errors
    ///
    /// - If the upstream executor fails to produce a fragment.
    /// - If any sink action fails; already-emitted side effects for prior
    ///   fragments are not undone.
    /// - If the attached [`CancelFlag`] is raised mid-run.
    pub async fn report(&mut self, spec: &Specification) -> Result<Statistics> {
        let mut sinks = Vec::with_capacity(self.printers.len() + 1);
        for printer in &self.printers {
            sinks.push(printer.sink(spec)?);
        }
        sinks.push(
            StoreSink::new(
                spec.id.clone(),
                Rc::clone(&self.repository),
                self.config.never_store,
                self.config.reset_store,
            )
            .boxed(),
        );
        let mut sink = sum(sinks);

        let fold = combine(
            StatsFold::new(),
            combine(IndentFold::new(), TimerFold::new()),
        );

        let stream = if self.config.sequential {
            let materialized: Vec<_> =
                self.executor.execute(spec).collect().await;
            Either::Left(stream::iter(materialized))
        } else {
            Either::Right(self.executor.execute(spec))
        };
        pin_mut!(stream);

        sink.start().await?;
        let mut state = fold.initial();
        loop {
            if self.cancel.is_cancelled() {
                return Err(ReportError::Cancelled);
            }
            let Some(item) = stream.next().await else {
                break;
            };
            let fragment = item?;

            let (_, (indent, timer)) = &state;
            let frame =
                Frame { level: indent.level(), elapsed: timer.elapsed() };
            sink.observe(&fragment, frame).await?;

            state = fold.step(state, &fragment);
        }

        let (mut stats, (_, timer)) = fold.finish(state);
        stats.elapsed = timer.elapsed();
        sink.end(&stats).await?;
        Ok(stats)
    }

    /// Reports a whole batch: [`prepare()`], one [`report()`] per
    /// specification, then [`finalize()`].
    ///
    /// [`prepare()`]: Reporter::prepare
    /// [`report()`]: Reporter::report
    /// [`finalize()`]: Reporter::finalize
    ///
    /// # Errors
    ///
    /// On the first failing phase; later specifications are not reported.
    pub async fn run(
        &mut self,
        specs: &[Specification],
    ) -> Result<Vec<Statistics>> {
        self.prepare(specs).await?;
        let mut all = Vec::with_capacity(specs.len());
        for spec in specs {
            all.push(self.report(spec).await?);
        }
        self.finalize(specs).await?;
        Ok(all)
    }
}
