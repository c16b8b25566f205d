// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Line-oriented output destinations.
//!
//! A [`Logger`] is the only consumer of [`LogLine`]s. Loggers are scoped
//! resources: one is acquired per [`Printer`] sink and closed exactly once
//! at stream end, on every exit path including failure.
//!
//! [`Printer`]: super::Printer

use std::{cell::RefCell, io, rc::Rc};

use super::{LogLine, out::WriteStrExt as _};
use crate::error::Result;

/// Destination of rendered [`LogLine`]s.
pub trait Logger {
    /// Writes one `line`.
    ///
    /// # Errors
    ///
    /// If the underlying destination rejects the line; this is a reporting
    /// failure and aborts the run.
    fn log(&mut self, line: LogLine) -> Result<()>;

    /// Releases the underlying destination.
    ///
    /// Closing is idempotent: the first call flushes, later calls are
    /// no-ops.
    ///
    /// # Errors
    ///
    /// If the final flush fails.
    fn close(&mut self) -> Result<()>;
}

/// [`Logger`] writing to an [`io::Write`] implementor, one line per
/// [`LogLine`].
#[derive(Debug)]
pub struct ConsoleLogger<Out: io::Write = io::Stdout> {
    /// Destination of the output.
    out: Out,

    /// Whether [`Logger::close()`] already happened.
    closed: bool,
}

impl ConsoleLogger {
    /// Creates a [`ConsoleLogger`] writing to [`io::Stdout`].
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<Out: io::Write> ConsoleLogger<Out> {
    /// Creates a [`ConsoleLogger`] writing to the given `out`.
    #[must_use]
    pub const fn new(out: Out) -> Self {
        Self { out, closed: false }
    }

    /// Returns the underlying output, consuming this [`ConsoleLogger`].
    #[must_use]
    pub fn into_inner(self) -> Out {
        self.out
    }
}

impl<Out: io::Write> Logger for ConsoleLogger<Out> {
    fn log(&mut self, line: LogLine) -> Result<()> {
        self.out.write_line(line.text())?;
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        if !self.closed {
            self.closed = true;
            self.out.flush()?;
        }
        Ok(())
    }
}

/// [`Logger`] collecting lines into a shared buffer, for inspection in
/// tests.
#[derive(Clone, Debug, Default)]
pub struct BufferLogger {
    /// Collected lines, shared with every [`BufferLogger::handle()`].
    lines: Rc<RefCell<Vec<LogLine>>>,

    /// Whether [`Logger::close()`] already happened.
    closed: Rc<RefCell<bool>>,
}

impl BufferLogger {
    /// Creates an empty [`BufferLogger`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a handle onto the collected lines.
    #[must_use]
    pub fn handle(&self) -> Rc<RefCell<Vec<LogLine>>> {
        Rc::clone(&self.lines)
    }

    /// Indicates whether this [`BufferLogger`] has been closed.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        *self.closed.borrow()
    }

    /// Returns the collected lines' texts.
    #[must_use]
    pub fn texts(&self) -> Vec<String> {
        self.lines.borrow().iter().map(|l| l.text().to_owned()).collect()
    }
}

impl Logger for BufferLogger {
    fn log(&mut self, line: LogLine) -> Result<()> {
        self.lines.borrow_mut().push(line);
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        *self.closed.borrow_mut() = true;
        Ok(())
    }
}
