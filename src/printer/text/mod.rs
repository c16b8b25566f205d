// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Reference text renderer.
//!
//! Pretty-prints executed fragments as indented, status-glyphed lines with
//! colors if a terminal was detected, otherwise as plain output. Useful for
//! running under CI tools.

mod diff;
mod render;

use async_trait::async_trait;

use crate::{
    config::Config,
    error::Result,
    fold::{Frame, Sink},
    fragment::Fragment,
    specification::Specification,
    stats::Statistics,
};

use super::{
    ConsoleLogger, Logger, Printer, out::Styles,
};

/// Factory producing one [`Logger`] per reported specification.
type LoggerFactory = Box<dyn Fn() -> Box<dyn Logger>>;

/// Reference [`Printer`] implementation rendering fragments as text lines.
pub struct TextPrinter {
    /// Options of the current run.
    config: Config,

    /// Produces the [`Logger`] of each specification's sink.
    logger_factory: LoggerFactory,
}

impl TextPrinter {
    /// Creates a [`TextPrinter`] logging to [`io::Stdout`].
    ///
    /// [`io::Stdout`]: std::io::Stdout
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self::with_logger_factory(config, || Box::new(ConsoleLogger::stdout()))
    }

    /// Creates a [`TextPrinter`] acquiring each specification's [`Logger`]
    /// from the given `factory`.
    #[must_use]
    pub fn with_logger_factory(
        config: Config,
        factory: impl Fn() -> Box<dyn Logger> + 'static,
    ) -> Self {
        Self { config, logger_factory: Box::new(factory) }
    }
}

impl Printer for TextPrinter {
    fn sink(&self, spec: &Specification) -> Result<Box<dyn Sink<Fragment>>> {
        let mut styles = Styles::new();
        styles.apply_coloring(self.config.color);

        Ok(Box::new(TextSink {
            spec: spec.clone(),
            config: self.config.clone(),
            styles,
            logger: (self.logger_factory)(),
        }))
    }
}

/// [`Sink`] rendering one specification's fragments through a [`Logger`].
struct TextSink {
    /// Specification being rendered.
    spec: Specification,

    /// Options of the current run.
    config: Config,

    /// Terminal [`Styles`], honoring the configured [`Coloring`].
    ///
    /// [`Coloring`]: crate::config::Coloring
    styles: Styles,

    /// Destination of the rendered lines, closed exactly once.
    logger: Box<dyn Logger>,
}

impl TextSink {
    /// Logs the final footer, if status filtering allows it.
    fn log_footer(&mut self, stats: &Statistics) -> Result<()> {
        for line in
            render::footer(&self.config, &self.styles, &self.spec, stats)
        {
            self.logger.log(line)?;
        }
        Ok(())
    }
}

#[async_trait(?Send)]
impl Sink<Fragment> for TextSink {
    async fn observe(&mut self, fragment: &Fragment, frame: Frame) -> Result<()> {
        for line in
            render::fragment(&self.config, &self.styles, fragment, frame)
        {
            self.logger.log(line)?;
        }
        Ok(())
    }

    async fn end(&mut self, stats: &Statistics) -> Result<()> {
        let outcome = self.log_footer(stats);
        // The logger is released even when the footer failed to write.
        let closed = self.logger.close();
        outcome.and(closed)
    }
}

impl Drop for TextSink {
    fn drop(&mut self) {
        // Covers early termination, where `end()` is never reached;
        // `close()` is idempotent, so the regular path is unaffected.
        drop(self.logger.close());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        fragment::ExecResult,
        printer::BufferLogger,
    };

    fn plain_config() -> Config {
        Config { color: crate::config::Coloring::Never, ..Config::default() }
    }

    #[tokio::test]
    async fn sink_logs_and_closes() {
        let logger = BufferLogger::new();
        let probe = logger.clone();
        let printer = TextPrinter::with_logger_factory(plain_config(), {
            move || Box::new(logger.clone())
        });

        let spec = Specification::new("s1", "Sample");
        let mut sink = printer.sink(&spec).unwrap();
        sink.observe(
            &Fragment::example("works", ExecResult::success()),
            Frame::default(),
        )
        .await
        .unwrap();
        sink.end(&Statistics::identity()).await.unwrap();

        assert!(probe.is_closed());
        assert!(probe.texts().iter().any(|l| l.contains("+ works")));
    }

    #[tokio::test]
    async fn dropping_an_unfinished_sink_closes_its_logger() {
        let logger = BufferLogger::new();
        let probe = logger.clone();
        let printer = TextPrinter::with_logger_factory(plain_config(), {
            move || Box::new(logger.clone())
        });

        let sink = printer.sink(&Specification::named("s1")).unwrap();
        drop(sink);

        assert!(probe.is_closed());
    }
}
