//! Per-fragment line rendering.
//!
//! Free functions shared by text-based renderers; everything they need is
//! passed in explicitly.

use itertools::Itertools as _;

use crate::{
    config::Config,
    fold::Frame,
    fragment::{
        DataTable, Description, ExecError, ExecResult, Executed, Execution,
        Failure, Fragment, SpecRef, Status,
    },
    printer::{LogLine, out::Styles},
    specification::Specification,
    stats::Statistics,
};

use super::diff;

/// Cause chains deeper than this render truncated.
const MAX_CAUSE_DEPTH: usize = 16;

/// Renders one `fragment` into zero or more [`LogLine`]s.
pub(super) fn fragment(
    config: &Config,
    styles: &Styles,
    fragment: &Fragment,
    frame: Frame,
) -> Vec<LogLine> {
    let margin = " ".repeat(frame.level * config.indent_width);
    match &fragment.execution {
        Execution::NotExecutable => {
            static_text(config, styles, &fragment.description, &margin)
        }
        Execution::Executed(ex) => match &fragment.description {
            Description::Ref(r) => reference(config, styles, r, ex, &margin),
            other => example(config, styles, other, ex, &margin),
        },
    }
}

/// Renders the final per-specification footer.
///
/// Empty when status filtering suppresses statistics; the caller closes the
/// logger regardless.
pub(super) fn footer(
    config: &Config,
    styles: &Styles,
    spec: &Specification,
    stats: &Statistics,
) -> Vec<LogLine> {
    if !config.shows_stats() {
        return Vec::new();
    }

    let title = spec
        .visible_title()
        .map(|t| {
            format!("Total for specification {}", styles.bold(t))
        })
        .unwrap_or_default();
    let summary = summary(stats);
    let summary = if stats.has_issues() {
        styles.err(summary)
    } else {
        styles.ok(summary)
    };

    vec![
        LogLine::Empty,
        LogLine::Info(title),
        LogLine::Info(format!(
            "Finished in {}",
            humantime::format_duration(stats.elapsed),
        )),
        LogLine::Info(summary.into_owned()),
        LogLine::Empty,
    ]
}

/// Renders a non-executable fragment, gated by the display filter.
fn static_text(
    config: &Config,
    styles: &Styles,
    description: &Description,
    margin: &str,
) -> Vec<LogLine> {
    if !config.shows_text() {
        return Vec::new();
    }
    match description {
        Description::Text(text) | Description::Code(text) => text
            .lines()
            .map(|l| LogLine::Info(format!("{margin}{l}")))
            .collect(),
        Description::Break => vec![LogLine::Empty],
        Description::Start(header) => {
            vec![LogLine::Info(format!("{margin}{}", styles.bold(header.as_str())))]
        }
        Description::End => Vec::new(),
        Description::Ref(r) => {
            if r.hidden {
                Vec::new()
            } else {
                vec![LogLine::Info(format!("{margin}{}", r.title()))]
            }
        }
    }
}

/// Renders an executed example fragment.
fn example(
    config: &Config,
    styles: &Styles,
    description: &Description,
    ex: &Executed,
    margin: &str,
) -> Vec<LogLine> {
    let status = ex.result.status();
    if !config.shows_status(status) {
        return Vec::new();
    }

    let mut head = format!("{} {description}", status.glyph());
    if config.show_times {
        head.push_str(&format!(
            " ({})",
            humantime::format_duration(ex.duration),
        ));
    }

    let mut lines = vec![line_of(
        status,
        format!("{margin}{}", styles.status(status, head)),
    )];

    if let Some(table) = table_of(&ex.result) {
        for row in format_table(table, margin) {
            lines.push(line_of(status, row));
        }
    }

    match base_result(&ex.result) {
        ExecResult::Failure(failure) => {
            failure_block(config, styles, failure, margin, &mut lines);
        }
        ExecResult::Error(error) => {
            error_block(config, styles, error, margin, &mut lines);
        }
        _ => {}
    }
    lines
}

/// Renders a specification-reference fragment.
fn reference(
    config: &Config,
    styles: &Styles,
    spec_ref: &SpecRef,
    ex: &Executed,
    margin: &str,
) -> Vec<LogLine> {
    if spec_ref.hidden {
        return Vec::new();
    }
    if spec_ref.muted {
        return if config.shows_text() {
            vec![LogLine::Info(format!("{margin}{}", spec_ref.title()))]
        } else {
            Vec::new()
        };
    }

    let status = ex.result.status();
    if !config.shows_status(status) {
        return Vec::new();
    }

    let mut head = format!("{} {}", status.glyph(), spec_ref.title());
    if let Some(nested) = ex.result.nested_stats() {
        head.push_str(&format!(" ({})", summary(nested)));
    }
    vec![line_of(status, format!("{margin}{}", styles.status(status, head)))]
}

/// Renders the message/trace/details block of a failed expectation.
fn failure_block(
    config: &Config,
    styles: &Styles,
    failure: &Failure,
    margin: &str,
    out: &mut Vec<LogLine>,
) {
    let detail_margin = format!("{margin}  ");
    for l in failure.message.lines() {
        out.push(LogLine::Failure(format!(
            "{detail_margin}{}",
            styles.err(l),
        )));
    }
    if config.fail_trace {
        for l in config.trace_filter.apply(&failure.trace) {
            out.push(LogLine::Failure(format!("{detail_margin}{l}")));
        }
    }
    if let Some(details) = &failure.details {
        out.extend(diff::details(config, &detail_margin, details));
    }
}

/// Renders the message/trace block of a raised error, followed by its
/// cause chain.
fn error_block(
    config: &Config,
    styles: &Styles,
    error: &ExecError,
    margin: &str,
    out: &mut Vec<LogLine>,
) {
    let detail_margin = format!("{margin}  ");
    for l in error.message.lines() {
        out.push(LogLine::Error(format!("{detail_margin}{}", styles.err(l))));
    }
    for l in config.trace_filter.apply(&error.trace) {
        out.push(LogLine::Error(format!("{detail_margin}{l}")));
    }

    // A cause equal to an already rendered ancestor is terminal, so
    // self-referential chains render a finite list of blocks. Equality is
    // judged on message and trace: the chains below an ancestor and its
    // reoccurrence differ by construction.
    let same = |a: &ExecError, b: &ExecError| {
        a.message == b.message && a.trace == b.trace
    };
    let mut ancestors = vec![error];
    let mut current = error.cause.as_deref();
    while let Some(cause) = current {
        if ancestors.iter().any(|a| same(a, cause))
            || ancestors.len() >= MAX_CAUSE_DEPTH
        {
            break;
        }
        out.push(LogLine::Error(format!(
            "{detail_margin}{}",
            styles.err(format!("CAUSED BY {}", cause.message)),
        )));
        for l in config.trace_filter.apply(&cause.trace) {
            out.push(LogLine::Error(format!("{detail_margin}  {l}")));
        }
        ancestors.push(cause);
        current = cause.cause.as_deref();
    }
}

/// Maps a [`Status`] onto the [`LogLine`] severity its lines carry.
fn line_of(status: Status, text: String) -> LogLine {
    match status {
        Status::Failure => LogLine::Failure(text),
        Status::Error => LogLine::Error(text),
        Status::Success | Status::Skipped | Status::Pending => {
            LogLine::Info(text)
        }
    }
}

/// Unwraps decorations down to the status-bearing result.
fn base_result(result: &ExecResult) -> &ExecResult {
    match result {
        ExecResult::Decorated(dec) => base_result(&dec.inner),
        other => other,
    }
}

/// Returns the outermost tabular payload of `result`, if any.
fn table_of(result: &ExecResult) -> Option<&DataTable> {
    match result {
        ExecResult::Decorated(dec) => match &dec.payload {
            crate::fragment::Payload::Table(table) => Some(table),
            crate::fragment::Payload::Stats(_) => table_of(&dec.inner),
        },
        _ => None,
    }
}

/// Formats the given [`DataTable`] with aligned columns under the status
/// line's margin.
fn format_table(table: &DataTable, margin: &str) -> Vec<String> {
    let mut widths: Vec<usize> =
        table.header.iter().map(String::len).collect();
    for row in &table.rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(cell.len());
            } else {
                widths.push(cell.len());
            }
        }
    }

    std::iter::once(&table.header)
        .chain(table.rows.iter())
        .map(|row| {
            let cells = row
                .iter()
                .enumerate()
                .map(|(i, cell)| {
                    format!("{cell:w$}", w = widths.get(i).copied().unwrap_or(0))
                })
                .join(" | ");
            format!("{margin}  | {cells} |")
        })
        .collect()
}

/// One-line statistics summary, shared by reference lines and the footer.
fn summary(stats: &Statistics) -> String {
    let mut parts = vec![
        maybe_plural("example", stats.examples),
        maybe_plural("expectation", stats.expectations),
        maybe_plural("failure", stats.failures),
        maybe_plural("error", stats.errors),
    ];
    if stats.skipped > 0 {
        parts.push(format!("{} skipped", stats.skipped));
    }
    if stats.pending > 0 {
        parts.push(format!("{} pending", stats.pending));
    }
    parts.join(", ")
}

/// Adds a plural suffix to `singular` when `num` calls for it.
fn maybe_plural(singular: &str, num: usize) -> String {
    format!("{num} {singular}{}", if num == 1 { "" } else { "s" })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Coloring;

    fn plain() -> (Config, Styles) {
        let config =
            Config { color: Coloring::Never, ..Config::default() };
        let mut styles = Styles::new();
        styles.apply_coloring(Coloring::Never);
        (config, styles)
    }

    fn texts(lines: Vec<LogLine>) -> Vec<String> {
        lines.into_iter().map(|l| l.text().to_owned()).collect()
    }

    #[test]
    fn success_line_carries_glyph_and_description() {
        let (config, styles) = plain();
        let lines = fragment(
            &config,
            &styles,
            &Fragment::example("it adds", ExecResult::success()),
            Frame::default(),
        );
        assert_eq!(texts(lines), vec!["+ it adds"]);
    }

    #[test]
    fn indentation_follows_the_frame() {
        let (config, styles) = plain();
        let lines = fragment(
            &config,
            &styles,
            &Fragment::example("nested", ExecResult::success()),
            Frame { level: 2, ..Frame::default() },
        );
        assert_eq!(texts(lines), vec!["    + nested"]);
    }

    #[test]
    fn failure_renders_message_under_the_status_line() {
        let (config, styles) = plain();
        let lines = fragment(
            &config,
            &styles,
            &Fragment::example(
                "totals",
                ExecResult::failure("expected 2 got 1"),
            ),
            Frame::default(),
        );
        let texts = texts(lines);
        assert_eq!(texts[0], "x totals");
        assert_eq!(texts[1], "  expected 2 got 1");
    }

    #[test]
    fn cause_chain_terminates_on_cycle() {
        let (config, styles) = plain();

        // `a` caused by `b` caused by `a` again.
        let a_again = ExecError::new("a");
        let b = ExecError::new("b").caused_by(a_again);
        let a = ExecError::new("a").caused_by(b);

        let lines = fragment(
            &config,
            &styles,
            &Fragment::example("loops", ExecResult::Error(a)),
            Frame::default(),
        );
        let caused_by = lines
            .iter()
            .filter(|l| l.text().contains("CAUSED BY"))
            .count();
        assert_eq!(caused_by, 1);
    }

    #[test]
    fn footer_summarizes_statistics() {
        let (config, styles) = plain();
        let stats = Statistics {
            examples: 3,
            successes: 1,
            failures: 1,
            skipped: 1,
            expectations: 3,
            ..Statistics::identity()
        };
        let spec = Specification::new("s1", "Checkout");
        let lines = texts(footer(&config, &styles, &spec, &stats));

        assert!(lines.iter().any(|l| l.contains("Total for specification Checkout")));
        assert!(lines.iter().any(|l| l.contains("3 examples")));
        assert!(lines.iter().any(|l| l.contains("1 failure,")));
        assert!(lines.iter().any(|l| l.contains("1 skipped")));
    }

    #[test]
    fn footer_title_is_blank_without_visible_header() {
        let (config, styles) = plain();
        let spec = Specification::new("s1", "  ");
        let lines =
            footer(&config, &styles, &spec, &Statistics::identity());
        assert_eq!(lines[1], LogLine::Info(String::new()));
    }

    #[test]
    fn hidden_reference_renders_nothing() {
        let (config, styles) = plain();
        let nested = Statistics { examples: 2, ..Statistics::identity() };
        let frag = Fragment::reference(
            SpecRef::new("inner").hidden(),
            ExecResult::success().with_stats(nested),
        );
        assert!(fragment(&config, &styles, &frag, Frame::default()).is_empty());
    }

    #[test]
    fn muted_reference_renders_description_only() {
        let (config, styles) = plain();
        let nested = Statistics { examples: 2, ..Statistics::identity() };
        let frag = Fragment::reference(
            SpecRef::new("inner").with_alias("other behaviours").muted(),
            ExecResult::success().with_stats(nested),
        );
        let lines = texts(fragment(&config, &styles, &frag, Frame::default()));
        assert_eq!(lines, vec!["other behaviours"]);
    }

    #[test]
    fn visible_reference_summarizes_nested_statistics() {
        let (config, styles) = plain();
        let nested = Statistics {
            examples: 5,
            successes: 5,
            expectations: 5,
            ..Statistics::identity()
        };
        let frag = Fragment::reference(
            SpecRef::new("inner"),
            ExecResult::success().with_stats(nested),
        );
        let lines = texts(fragment(&config, &styles, &frag, Frame::default()));
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("+ inner"));
        assert!(lines[0].contains("5 examples"));
    }

    #[test]
    fn table_payload_renders_aligned_rows() {
        let (config, styles) = plain();
        let table = DataTable::new(
            ["a", "b"],
            vec![
                vec!["1".to_owned(), "10".to_owned()],
                vec!["200".to_owned(), "2".to_owned()],
            ],
        );
        let frag = Fragment::example(
            "rows",
            ExecResult::success().with_table(table),
        );
        let lines = texts(fragment(&config, &styles, &frag, Frame::default()));
        assert_eq!(lines[1], "  | a   | b  |");
        assert_eq!(lines[2], "  | 1   | 10 |");
        assert_eq!(lines[3], "  | 200 | 2  |");
    }
}
