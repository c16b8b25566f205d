// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Run options consumed by the reporting pipeline.
//!
//! All options here are read-only inputs: parsing the command line into a
//! [`Config`] happens once, up front, and the resulting value is shared by
//! every component of the run.

use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use smart_default::SmartDefault;

use crate::fragment::Status;

/// Options of one reporting run.
#[derive(Clone, Debug, SmartDefault)]
pub struct Config {
    /// Which output categories are rendered.
    pub filter: DisplayFilter,

    /// Shows only failures and errors, regardless of [`Config::filter`].
    pub xonly: bool,

    /// Appends each example's execution time to its line.
    pub show_times: bool,

    /// Renders (filtered) stack traces for failures.
    pub fail_trace: bool,

    /// How mismatch details are rendered.
    pub diffs: DiffPolicy,

    /// Filter applied to stack traces before rendering.
    pub trace_filter: TraceFilter,

    /// Never writes anything to the statistics repository.
    pub never_store: bool,

    /// Clears previously stored statistics before the first write.
    pub reset_store: bool,

    /// Spaces per nesting level.
    #[default = 2]
    pub indent_width: usize,

    /// Materializes the whole fragment stream before folding it, forcing
    /// all execution to complete first.
    pub sequential: bool,

    /// Coloring policy for console output.
    pub color: Coloring,
}

impl Config {
    /// Indicates whether an example with the given [`Status`] is rendered.
    #[must_use]
    pub fn shows_status(&self, status: Status) -> bool {
        if self.xonly {
            status.is_issue()
        } else {
            self.filter.shows_status(status)
        }
    }

    /// Indicates whether non-executable text is rendered.
    #[must_use]
    pub const fn shows_text(&self) -> bool {
        !self.xonly && self.filter.text
    }

    /// Indicates whether the statistics footer is rendered.
    #[must_use]
    pub const fn shows_stats(&self) -> bool {
        self.filter.stats
    }
}

/// Which output categories a run displays.
///
/// Parsed from a flags string in the classic one-character-per-status
/// notation: `+` successes, `x` failures, `!` errors, `o` skipped, `*`
/// pending.
#[derive(Clone, Copy, Debug, SmartDefault)]
pub struct DisplayFilter {
    /// Shows successful examples.
    #[default = true]
    pub successes: bool,

    /// Shows failed examples.
    #[default = true]
    pub failures: bool,

    /// Shows errored examples.
    #[default = true]
    pub errors: bool,

    /// Shows skipped examples.
    #[default = true]
    pub skipped: bool,

    /// Shows pending examples.
    #[default = true]
    pub pending: bool,

    /// Shows non-executable text (headers, code, breaks).
    #[default = true]
    pub text: bool,

    /// Shows the per-specification statistics footer.
    #[default = true]
    pub stats: bool,
}

impl DisplayFilter {
    /// Indicates whether the given [`Status`] is displayed.
    #[must_use]
    pub const fn shows_status(&self, status: Status) -> bool {
        match status {
            Status::Success => self.successes,
            Status::Failure => self.failures,
            Status::Error => self.errors,
            Status::Skipped => self.skipped,
            Status::Pending => self.pending,
        }
    }
}

impl FromStr for DisplayFilter {
    type Err = &'static str;

    fn from_str(flags: &str) -> Result<Self, Self::Err> {
        let mut filter = Self {
            successes: false,
            failures: false,
            errors: false,
            skipped: false,
            pending: false,
            text: true,
            stats: true,
        };
        for c in flags.chars() {
            match c {
                '+' => filter.successes = true,
                'x' => filter.failures = true,
                '!' => filter.errors = true,
                'o' => filter.skipped = true,
                '*' => filter.pending = true,
                _ => return Err("possible status flags: + x ! o *"),
            }
        }
        Ok(filter)
    }
}

/// How mismatch details of failed expectations are rendered.
#[derive(Clone, Copy, Debug, SmartDefault)]
pub struct DiffPolicy {
    /// Renders diffs at all.
    #[default = true]
    pub show: bool,

    /// Additionally renders the unabbreviated actual/expected values of
    /// pairwise mismatches.
    pub full: bool,
}

/// Threshold from which listed diff elements collapse into a one-line
/// summary of counts per category.
pub const DIFF_COLLAPSE_THRESHOLD: usize = 50;

/// Filter dropping noise frames from rendered stack traces.
#[derive(Clone, Debug)]
pub struct TraceFilter {
    /// Frames matching any of these patterns are dropped.
    exclude: Vec<Regex>,
}

/// Frames of the runtime and test machinery, dropped by default.
static DEFAULT_EXCLUDES: Lazy<Vec<Regex>> = Lazy::new(|| {
    ["^std::", "^core::", "^tokio::", "^futures::", "^<?alloc::"]
        .into_iter()
        .map(|p| Regex::new(p).expect("static trace pattern"))
        .collect()
});

impl TraceFilter {
    /// Creates a [`TraceFilter`] dropping frames that match any of the
    /// given `patterns`.
    ///
    /// # Errors
    ///
    /// If any of the `patterns` is not a valid regular expression.
    pub fn new<'a>(
        patterns: impl IntoIterator<Item = &'a str>,
    ) -> Result<Self, regex::Error> {
        Ok(Self {
            exclude: patterns
                .into_iter()
                .map(Regex::new)
                .collect::<Result<_, _>>()?,
        })
    }

    /// Creates a [`TraceFilter`] keeping every frame.
    #[must_use]
    pub const fn keep_all() -> Self {
        Self { exclude: Vec::new() }
    }

    /// Applies this filter to the given stack `trace` lines.
    #[must_use]
    pub fn apply<'a>(&self, trace: &'a [String]) -> Vec<&'a str> {
        trace
            .iter()
            .map(String::as_str)
            .filter(|line| !self.exclude.iter().any(|re| re.is_match(line)))
            .collect()
    }
}

impl Default for TraceFilter {
    fn default() -> Self {
        Self { exclude: DEFAULT_EXCLUDES.clone() }
    }
}

/// Possible policies of a [`console`] output coloring.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Coloring {
    /// Letting [`console::colors_enabled()`] decide, whether output should
    /// be colored.
    #[default]
    Auto,

    /// Forcing of a colored output.
    Always,

    /// Forcing of a non-colored output.
    Never,
}

impl FromStr for Coloring {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "always" => Ok(Self::Always),
            "never" => Ok(Self::Never),
            _ => Err("possible options: auto, always, never"),
        }
    }
}

/// CLI options producing a [`Config`].
#[derive(Clone, Debug, SmartDefault, clap::Args)]
#[group(skip)]
pub struct Cli {
    /// Status categories to display (`+x!o*`).
    #[arg(long, value_name = "flags")]
    pub showonly: Option<DisplayFilter>,

    /// Show only failures and errors.
    #[arg(long)]
    pub xonly: bool,

    /// Show execution times.
    #[arg(long)]
    pub showtimes: bool,

    /// Show stack traces of failures.
    #[arg(long)]
    pub failtrace: bool,

    /// Never show mismatch diffs.
    #[arg(long)]
    pub nodiffs: bool,

    /// Show full actual/expected values next to diffs.
    #[arg(long)]
    pub fulldiffs: bool,

    /// Never store statistics.
    #[arg(long)]
    pub never: bool,

    /// Clear previously stored statistics before this run.
    #[arg(long)]
    pub reset: bool,

    /// Spaces per indentation level.
    #[arg(long, value_name = "width", default_value_t = 2)]
    #[default = 2]
    pub indent: usize,

    /// Evaluate all fragments before reporting anything.
    #[arg(long)]
    pub sequential: bool,

    /// Coloring policy for a console output.
    #[arg(long, value_name = "auto|always|never", default_value = "auto")]
    #[default(Coloring::Auto)]
    pub color: Coloring,
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        Self {
            filter: cli.showonly.unwrap_or_default(),
            xonly: cli.xonly,
            show_times: cli.showtimes,
            fail_trace: cli.failtrace,
            diffs: DiffPolicy { show: !cli.nodiffs, full: cli.fulldiffs },
            trace_filter: TraceFilter::default(),
            never_store: cli.never,
            reset_store: cli.reset,
            indent_width: cli.indent,
            sequential: cli.sequential,
            color: cli.color,
        }
    }
}
