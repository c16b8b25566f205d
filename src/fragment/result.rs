// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Tagged execution outcomes.

use derive_more::Display;

use crate::stats::Statistics;

use super::Details;

/// Outcome of executing one example.
#[derive(Clone, Debug, PartialEq)]
pub enum ExecResult {
    /// The example held.
    Success,

    /// An expectation was not met.
    Failure(Failure),

    /// The example raised an error instead of evaluating its expectations.
    Error(ExecError),

    /// The example was deliberately not run.
    Skipped(String),

    /// The example is declared but not implemented yet.
    Pending(String),

    /// A result wrapping a payload around an inner status-bearing result.
    ///
    /// The displayed status is always the inner result's status; the payload
    /// only affects how the result is rendered.
    Decorated(Box<Decorated>),
}

/// Display status of an [`ExecResult`].
#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub enum Status {
    /// Successful example.
    #[display("success")]
    Success,

    /// Failed expectation.
    #[display("failure")]
    Failure,

    /// Raised error.
    #[display("error")]
    Error,

    /// Skipped example.
    #[display("skipped")]
    Skipped,

    /// Pending example.
    #[display("pending")]
    Pending,
}

impl Status {
    /// Returns the one-character glyph this status is rendered with.
    #[must_use]
    pub const fn glyph(self) -> char {
        match self {
            Self::Success => '+',
            Self::Failure => 'x',
            Self::Error => '!',
            Self::Skipped => 'o',
            Self::Pending => '*',
        }
    }

    /// Indicates whether this status represents a non-passing outcome.
    #[must_use]
    pub const fn is_issue(self) -> bool {
        matches!(self, Self::Failure | Self::Error)
    }
}

impl ExecResult {
    /// Creates a plain [`ExecResult::Success`].
    #[must_use]
    pub const fn success() -> Self {
        Self::Success
    }

    /// Creates an [`ExecResult::Failure`] with the given `message` and no
    /// structured details.
    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        Self::Failure(Failure::new(message))
    }

    /// Creates an [`ExecResult::Error`] with the given `message` and no
    /// cause.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error(ExecError::new(message))
    }

    /// Creates an [`ExecResult::Skipped`] with the given `reason`.
    #[must_use]
    pub fn skipped(reason: impl Into<String>) -> Self {
        Self::Skipped(reason.into())
    }

    /// Creates an [`ExecResult::Pending`] with the given `reason`.
    #[must_use]
    pub fn pending(reason: impl Into<String>) -> Self {
        Self::Pending(reason.into())
    }

    /// Wraps this result with the statistics of a nested specification run.
    #[must_use]
    pub fn with_stats(self, stats: Statistics) -> Self {
        Self::Decorated(Box::new(Decorated {
            payload: Payload::Stats(stats),
            inner: self,
        }))
    }

    /// Wraps this result with a tabular payload.
    #[must_use]
    pub fn with_table(self, table: DataTable) -> Self {
        Self::Decorated(Box::new(Decorated {
            payload: Payload::Table(table),
            inner: self,
        }))
    }

    /// Returns the display [`Status`] of this result.
    ///
    /// A decorated result always reports its inner result's status.
    #[must_use]
    pub fn status(&self) -> Status {
        match self {
            Self::Success => Status::Success,
            Self::Failure(_) => Status::Failure,
            Self::Error(_) => Status::Error,
            Self::Skipped(_) => Status::Skipped,
            Self::Pending(_) => Status::Pending,
            Self::Decorated(dec) => dec.inner.status(),
        }
    }

    /// Returns the nested [`Statistics`] payload, if this result carries
    /// one on any decoration level.
    #[must_use]
    pub fn nested_stats(&self) -> Option<&Statistics> {
        match self {
            Self::Decorated(dec) => match &dec.payload {
                Payload::Stats(stats) => Some(stats),
                Payload::Table(_) => dec.inner.nested_stats(),
            },
            _ => None,
        }
    }
}

/// A failed expectation.
#[derive(Clone, Debug, PartialEq)]
pub struct Failure {
    /// Human-readable failure message.
    pub message: String,

    /// Stack trace lines, unfiltered.
    pub trace: Vec<String>,

    /// Structured detail of the mismatch, when the matcher provided one.
    pub details: Option<Details>,
}

impl Failure {
    /// Creates a new [`Failure`] with the given `message` only.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into(), trace: Vec::new(), details: None }
    }

    /// Attaches structured `details` to this failure.
    #[must_use]
    pub fn with_details(mut self, details: Details) -> Self {
        self.details = Some(details);
        self
    }

    /// Attaches stack `trace` lines to this failure.
    #[must_use]
    pub fn with_trace(mut self, trace: Vec<String>) -> Self {
        self.trace = trace;
        self
    }
}

/// An error raised during example execution, optionally chained to the
/// error that caused it.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ExecError {
    /// Human-readable error message.
    pub message: String,

    /// Stack trace lines, unfiltered.
    pub trace: Vec<String>,

    /// The underlying cause, if any.
    ///
    /// Cause chains may be arbitrarily deep or even self-referential;
    /// rendering treats a cause equal to an ancestor as terminal.
    pub cause: Option<Box<ExecError>>,
}

impl ExecError {
    /// Creates a new [`ExecError`] with the given `message` only.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into(), trace: Vec::new(), cause: None }
    }

    /// Attaches the underlying `cause` of this error.
    #[must_use]
    pub fn caused_by(mut self, cause: ExecError) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }

    /// Attaches stack `trace` lines to this error.
    #[must_use]
    pub fn with_trace(mut self, trace: Vec<String>) -> Self {
        self.trace = trace;
        self
    }
}

/// Payload-wrapping result.
#[derive(Clone, Debug, PartialEq)]
pub struct Decorated {
    /// Rendering payload.
    pub payload: Payload,

    /// The status-bearing result being wrapped.
    pub inner: ExecResult,
}

/// What a [`Decorated`] result wraps its inner result with.
#[derive(Clone, Debug, PartialEq)]
pub enum Payload {
    /// Statistics of a nested specification run.
    ///
    /// Folded into the referring specification's totals wholesale, instead
    /// of counting the reference fragment as one more example.
    Stats(Statistics),

    /// A tabular result (data table of example inputs/outcomes).
    Table(DataTable),
}

/// Tabular result payload.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DataTable {
    /// Column headers.
    pub header: Vec<String>,

    /// Data rows.
    pub rows: Vec<Vec<String>>,
}

impl DataTable {
    /// Creates a new [`DataTable`] from its `header` and `rows`.
    #[must_use]
    pub fn new(
        header: impl IntoIterator<Item = impl Into<String>>,
        rows: impl IntoIterator<Item = Vec<String>>,
    ) -> Self {
        Self {
            header: header.into_iter().map(Into::into).collect(),
            rows: rows.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decorated_status_is_inner_status() {
        let res = ExecResult::failure("boom")
            .with_stats(Statistics::identity())
            .with_table(DataTable::new(["a"], Vec::new()));
        assert_eq!(res.status(), Status::Failure);
    }

    #[test]
    fn nested_stats_found_through_table_decoration() {
        let mut stats = Statistics::identity();
        stats.examples = 5;
        let res = ExecResult::success().with_stats(stats).with_table(
            DataTable::new(["a"], Vec::new()),
        );
        assert_eq!(res.nested_stats().map(|s| s.examples), Some(5));
    }

    #[test]
    fn glyphs_are_stable() {
        assert_eq!(Status::Success.glyph(), '+');
        assert_eq!(Status::Failure.glyph(), 'x');
        assert_eq!(Status::Error.glyph(), '!');
        assert_eq!(Status::Skipped.glyph(), 'o');
        assert_eq!(Status::Pending.glyph(), '*');
    }
}
