// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Executed specification fragments.
//!
//! A [`Fragment`] is one node of a specification as it comes out of the
//! selection/execution phase: a [`Description`] plus an [`Execution`] record.
//! Fragments are immutable once produced and are consumed exactly once by
//! the reporting fold.

mod description;
mod details;
mod result;

use std::time::Duration;

pub use self::{
    description::{Description, SpecRef},
    details::Details,
    result::{
        DataTable, Decorated, ExecError, ExecResult, Failure, Payload, Status,
    },
};

/// One node of an executed specification.
#[derive(Clone, Debug, PartialEq)]
pub struct Fragment {
    /// What this fragment describes.
    pub description: Description,

    /// Whether (and how) this fragment was executed.
    pub execution: Execution,
}

/// Execution record of a [`Fragment`].
#[derive(Clone, Debug, PartialEq)]
pub enum Execution {
    /// The fragment carries no example to run (plain text, code, markers).
    NotExecutable,

    /// The fragment was executed and carries its outcome.
    Executed(Executed),
}

/// Outcome of executing a single example.
#[derive(Clone, Debug, PartialEq)]
pub struct Executed {
    /// The tagged [`ExecResult`] of the example.
    pub result: ExecResult,

    /// Time the example took to execute.
    pub duration: Duration,

    /// Number of expectations the example evaluated.
    pub expectations: usize,
}

impl Executed {
    /// Creates an execution record for the given `result` with a single
    /// expectation and no measured duration.
    #[must_use]
    pub fn new(result: ExecResult) -> Self {
        Self { result, duration: Duration::ZERO, expectations: 1 }
    }

    /// Replaces the measured `duration`.
    #[must_use]
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Replaces the evaluated `expectations` count.
    #[must_use]
    pub fn with_expectations(mut self, expectations: usize) -> Self {
        self.expectations = expectations;
        self
    }
}

impl Fragment {
    /// Creates a non-executable text fragment.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            description: Description::Text(text.into()),
            execution: Execution::NotExecutable,
        }
    }

    /// Creates a non-executable code-block fragment.
    #[must_use]
    pub fn code(code: impl Into<String>) -> Self {
        Self {
            description: Description::Code(code.into()),
            execution: Execution::NotExecutable,
        }
    }

    /// Creates a line-break fragment.
    #[must_use]
    pub const fn linebreak() -> Self {
        Self {
            description: Description::Break,
            execution: Execution::NotExecutable,
        }
    }

    /// Creates a block-opening marker carrying the block's header text.
    #[must_use]
    pub fn start(header: impl Into<String>) -> Self {
        Self {
            description: Description::Start(header.into()),
            execution: Execution::NotExecutable,
        }
    }

    /// Creates a block-closing marker.
    #[must_use]
    pub const fn end() -> Self {
        Self {
            description: Description::End,
            execution: Execution::NotExecutable,
        }
    }

    /// Creates an executed example fragment out of a `description` and its
    /// `result`.
    #[must_use]
    pub fn example(description: impl Into<String>, result: ExecResult) -> Self {
        Self {
            description: Description::Text(description.into()),
            execution: Execution::Executed(Executed::new(result)),
        }
    }

    /// Creates a reference to another specification, annotated with the
    /// referenced run's outcome.
    #[must_use]
    pub fn reference(spec_ref: SpecRef, result: ExecResult) -> Self {
        Self {
            description: Description::Ref(spec_ref),
            execution: Execution::Executed(Executed::new(result)),
        }
    }

    /// Indicates whether this fragment carried an example to execute.
    #[must_use]
    pub const fn is_executable(&self) -> bool {
        matches!(self.execution, Execution::Executed(_))
    }

    /// Returns the execution record, if this fragment was executed.
    #[must_use]
    pub const fn executed(&self) -> Option<&Executed> {
        match &self.execution {
            Execution::Executed(ex) => Some(ex),
            Execution::NotExecutable => None,
        }
    }

    /// Returns the [`ExecResult`] of this fragment, if executed.
    #[must_use]
    pub fn result(&self) -> Option<&ExecResult> {
        self.executed().map(|ex| &ex.result)
    }
}
