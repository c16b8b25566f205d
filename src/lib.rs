// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Streaming reporter for executed specifications.
//!
//! An external selection/execution phase turns a specification into an
//! ordered, asynchronous, single-pass stream of [`Fragment`]s already
//! annotated with their results. This crate consumes that stream exactly
//! once and, in one traversal:
//!
//! - accumulates running [`Statistics`] and display indentation;
//! - renders each fragment to human-readable log lines, with status
//!   coloring and failure-diff detail ([`TextPrinter`]);
//! - persists per-example and per-specification statistics
//!   ([`store::StatsRepository`]).
//!
//! Delivery order is preserved and any number of independent consumers
//! ([`fold::Sink`]s) observe the same stream without anything being
//! re-run: value-producing [`fold::Fold`]s are paired with
//! [`fold::combine()`], side-effecting sinks with [`fold::sum()`], and the
//! [`Reporter`] drives the result to completion.
//!
//! # Example
//!
//! ```rust
//! use futures::stream;
//! use specfold::{
//!     Config, ExecResult, Fragment, Reporter, Specification,
//! };
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let mut reporter = Reporter::new(
//!     |_: &Specification| {
//!         stream::iter(vec![
//!             Ok(Fragment::example("adds numbers", ExecResult::success())),
//!             Ok(Fragment::example(
//!                 "carries overflow",
//!                 ExecResult::failure("expected 2 got 1"),
//!             )),
//!         ])
//!     },
//!     Config::default(),
//! );
//!
//! let spec = Specification::new("arithmetic", "Arithmetic");
//! let stats = reporter.report(&spec).await.unwrap();
//! assert_eq!(stats.examples, 2);
//! # }
//! ```

pub mod config;
pub mod error;
pub mod fold;
pub mod fragment;
pub mod printer;
pub mod reporter;
pub mod specification;
pub mod stats;
pub mod store;

pub use self::{
    config::{Cli, Coloring, Config, DiffPolicy, DisplayFilter, TraceFilter},
    error::{ReportError, Result},
    fragment::{
        Description, Details, ExecError, ExecResult, Failure, Fragment,
        SpecRef, Status,
    },
    printer::{LogLine, Logger, Printer, TextPrinter},
    reporter::{CancelFlag, Executor, Reporter},
    specification::{SpecId, Specification},
    stats::Statistics,
};
