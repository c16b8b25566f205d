// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Reporting pipeline error types.
//!
//! A failing example is ordinary data for the pipeline and never surfaces
//! here. [`ReportError`] covers infrastructure faults only: output I/O,
//! persistence, printer lifecycle hooks, upstream execution faults and
//! cancellation. Any of these aborts the fold for the current specification
//! and is returned to the caller, so a short run is never presented as a
//! complete one.

use std::{fmt, io};

use derive_more::{Display, Error, From};

/// Failure of the reporting pipeline itself.
#[derive(Debug, Display, Error, From)]
pub enum ReportError {
    /// I/O failure while writing output.
    #[display("I/O operation failed: {_0}")]
    Io(io::Error),

    /// Formatting failure while building an output line.
    #[display("formatting failed: {_0}")]
    Format(fmt::Error),

    /// The statistics repository rejected a read or write.
    #[display("statistics store failed: {reason}")]
    #[from(ignore)]
    Store {
        /// Reason reported by the repository.
        #[error(not(source))]
        reason: String,
    },

    /// A [`Printer`] lifecycle hook failed.
    ///
    /// [`Printer`]: crate::printer::Printer
    #[display("printer failed during {phase}: {reason}")]
    #[from(ignore)]
    Printer {
        /// Lifecycle phase the hook failed in.
        #[error(not(source))]
        phase: &'static str,

        /// Reason reported by the printer.
        reason: String,
    },

    /// The upstream executor failed to produce the next fragment.
    #[display("fragment execution failed: {reason}")]
    #[from(ignore)]
    Execution {
        /// Reason reported by the executor.
        #[error(not(source))]
        reason: String,
    },

    /// The run was cancelled between stream pulls.
    ///
    /// Side effects already performed are not rolled back; the accumulated
    /// statistics are discarded rather than reported as final.
    #[display("reporting was cancelled")]
    Cancelled,
}

/// Result of a reporting operation.
pub type Result<T> = std::result::Result<T, ReportError>;

impl ReportError {
    /// Creates a [`ReportError::Store`] with the given `reason`.
    #[must_use]
    pub fn store(reason: impl Into<String>) -> Self {
        Self::Store { reason: reason.into() }
    }

    /// Creates a [`ReportError::Printer`] for the given lifecycle `phase`.
    #[must_use]
    pub fn printer(phase: &'static str, reason: impl Into<String>) -> Self {
        Self::Printer { phase, reason: reason.into() }
    }

    /// Creates a [`ReportError::Execution`] with the given `reason`.
    #[must_use]
    pub fn execution(reason: impl Into<String>) -> Self {
        Self::Execution { reason: reason.into() }
    }

    /// Indicates whether this error is a cancellation rather than a fault.
    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}
