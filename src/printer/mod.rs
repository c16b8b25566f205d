// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Pluggable output renderers.
//!
//! A [`Printer`] turns fragments into [`LogLine`]s over a three-phase
//! lifecycle: [`prepare()`] once before any specification executes,
//! [`sink()`] per specification to obtain the [`Sink`] that joins the
//! reporting fold, and [`finalize()`] once after all specifications ran.
//! Failure in any phase is a reporting failure for the whole run; it is
//! never swallowed per-printer.
//!
//! [`prepare()`]: Printer::prepare
//! [`sink()`]: Printer::sink
//! [`finalize()`]: Printer::finalize

pub mod logger;
pub mod out;
pub mod text;

use async_trait::async_trait;
use derive_more::Display;

use crate::{
    error::Result, fold::Sink, fragment::Fragment,
    specification::Specification,
};

#[doc(inline)]
pub use self::{
    logger::{BufferLogger, ConsoleLogger, Logger},
    out::{Styles, WritableString},
    text::TextPrinter,
};

/// A rendering-ready output line, tagged with its severity.
///
/// Produced by printers and consumed only by a [`Logger`]; never re-parsed.
#[derive(Clone, Debug, Display, Eq, PartialEq)]
pub enum LogLine {
    /// Regular output line.
    #[display("{_0}")]
    Info(String),

    /// Line reporting a failed expectation.
    #[display("{_0}")]
    Failure(String),

    /// Line reporting a raised error.
    #[display("{_0}")]
    Error(String),

    /// Blank separator line.
    #[display("")]
    Empty,
}

impl LogLine {
    /// Returns the text of this line, empty for [`LogLine::Empty`].
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Info(s) | Self::Failure(s) | Self::Error(s) => s,
            Self::Empty => "",
        }
    }
}

/// Renderer of executed specifications with a three-phase lifecycle.
#[async_trait(?Send)]
pub trait Printer {
    /// Called once before any specification executes.
    ///
    /// Printers needing global setup (an output file, for example) acquire
    /// it here.
    async fn prepare(&mut self, specs: &[Specification]) -> Result<()> {
        let _ = specs;
        Ok(())
    }

    /// Returns the [`Sink`] rendering a single specification's fragments.
    ///
    /// The returned [`Sink`] must not assume it is the only one active: it
    /// joins the same traversal as every other configured sink.
    fn sink(&self, spec: &Specification) -> Result<Box<dyn Sink<Fragment>>>;

    /// Called once after all specifications executed.
    ///
    /// Resources acquired in [`Printer::prepare()`] are released here.
    async fn finalize(&mut self, specs: &[Specification]) -> Result<()> {
        let _ = specs;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_line_text() {
        assert_eq!(LogLine::Info("ok".into()).text(), "ok");
        assert_eq!(LogLine::Empty.text(), "");
        assert_eq!(LogLine::Failure("bad".into()).to_string(), "bad");
    }
}
