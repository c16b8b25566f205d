//! Text renderer behavior over full reporting runs.

use std::time::Duration;

use futures::stream;
use specfold::{
    Config, Details, ExecError, ExecResult, Fragment, Reporter, Result,
    SpecRef, Specification, Statistics,
    fragment::{Executed, Execution},
    printer::{BufferLogger, TextPrinter},
};

fn spec() -> Specification {
    Specification::new("org.acme.RenderSpec", "Rendering")
}

fn plain_config() -> Config {
    Config { color: specfold::Coloring::Never, ..Config::default() }
}

async fn run(config: Config, fragments: Vec<Fragment>) -> Vec<String> {
    let logger = BufferLogger::new();
    let probe = logger.clone();
    let printer = TextPrinter::with_logger_factory(config.clone(), {
        move || Box::new(logger.clone())
    });

    let mut reporter = Reporter::custom(
        move |_: &Specification| {
            stream::iter(
                fragments.clone().into_iter().map(Ok).collect::<Vec<Result<_>>>(),
            )
        },
        config,
    )
    .with_printer(printer);

    reporter.report(&spec()).await.unwrap();
    probe.texts()
}

#[tokio::test]
async fn nested_blocks_indent_their_fragments() {
    let lines = run(
        plain_config(),
        vec![
            Fragment::text("Checkout"),
            Fragment::start("when the cart is empty"),
            Fragment::example("totals to zero", ExecResult::success()),
            Fragment::end(),
            Fragment::example("top level again", ExecResult::success()),
        ],
    )
    .await;

    assert_eq!(lines[0], "Checkout");
    assert_eq!(lines[1], "when the cart is empty");
    assert_eq!(lines[2], "  + totals to zero");
    assert_eq!(lines[3], "+ top level again");
}

#[tokio::test]
async fn show_times_appends_durations() {
    let config = Config { show_times: true, ..plain_config() };
    let fragment = Fragment {
        description: specfold::Description::Text("timed".into()),
        execution: Execution::Executed(
            Executed::new(ExecResult::success())
                .with_duration(Duration::from_millis(250)),
        ),
    };

    let lines = run(config, vec![fragment]).await;
    assert_eq!(lines[0], "+ timed (250ms)");
}

#[tokio::test]
async fn sequence_diff_collapses_at_fifty_lines() {
    let actual: Vec<String> = (0..45).map(|i| format!("a{i}")).collect();
    let expected: Vec<String> = (0..5).map(|i| format!("e{i}")).collect();
    let failure = ExecResult::Failure(
        specfold::Failure::new("lists differ")
            .with_details(Details::Sequence { actual, expected }),
    );

    let lines =
        run(plain_config(), vec![Fragment::example("long diff", failure)])
            .await;

    assert!(
        lines
            .iter()
            .any(|l| l.contains("Added: 45 elements, Missing: 5 elements")),
        "{lines:?}",
    );
    assert!(!lines.iter().any(|l| l.contains("a0")), "{lines:?}");
}

#[tokio::test]
async fn sequence_diff_stays_expanded_below_fifty_lines() {
    let actual: Vec<String> = (0..44).map(|i| format!("a{i}")).collect();
    let expected: Vec<String> = (0..5).map(|i| format!("e{i}")).collect();
    let failure = ExecResult::Failure(
        specfold::Failure::new("lists differ")
            .with_details(Details::Sequence { actual, expected }),
    );

    let lines =
        run(plain_config(), vec![Fragment::example("long diff", failure)])
            .await;

    assert!(lines.iter().any(|l| l.contains("Added (44):")), "{lines:?}");
    assert!(lines.iter().any(|l| l.trim() == "a0"), "{lines:?}");
}

#[tokio::test]
async fn error_causes_render_as_finite_caused_by_blocks() {
    let root = ExecError::new("connection refused");
    let wrapper = ExecError::new("request failed").caused_by(root);
    let outer = ExecError::new("checkout failed").caused_by(wrapper);

    let lines = run(
        plain_config(),
        vec![Fragment::example("errors out", ExecResult::Error(outer))],
    )
    .await;

    let caused_by: Vec<&String> =
        lines.iter().filter(|l| l.contains("CAUSED BY")).collect();
    assert_eq!(caused_by.len(), 2, "{lines:?}");
    assert!(caused_by[0].contains("request failed"));
    assert!(caused_by[1].contains("connection refused"));
}

#[tokio::test]
async fn failure_trace_is_rendered_filtered_when_requested() {
    let config = Config { fail_trace: true, ..plain_config() };
    let failure = ExecResult::Failure(
        specfold::Failure::new("assertion failed").with_trace(vec![
            "myapp::totals::compute".to_owned(),
            "std::panicking::begin_panic".to_owned(),
        ]),
    );

    let lines = run(config, vec![Fragment::example("traced", failure)]).await;
    assert!(
        lines.iter().any(|l| l.contains("myapp::totals::compute")),
        "{lines:?}",
    );
    assert!(
        !lines.iter().any(|l| l.contains("std::panicking")),
        "{lines:?}",
    );
}

#[tokio::test]
async fn visible_reference_line_summarizes_nested_run() {
    let nested = Statistics {
        examples: 2,
        successes: 2,
        expectations: 2,
        ..Statistics::identity()
    };
    let lines = run(
        plain_config(),
        vec![Fragment::reference(
            SpecRef::new("org.acme.InnerSpec").with_alias("inner rules"),
            ExecResult::success().with_stats(nested),
        )],
    )
    .await;

    assert!(
        lines.iter().any(|l| l.contains("+ inner rules (2 examples")),
        "{lines:?}",
    );
}

#[tokio::test]
async fn footer_brackets_summary_with_blank_lines() {
    let lines = run(
        plain_config(),
        vec![Fragment::example("only one", ExecResult::success())],
    )
    .await;

    // Status line, blank, title, finished-in, summary, blank.
    assert_eq!(lines[0], "+ only one");
    assert_eq!(lines[1], "");
    assert!(lines[2].contains("Total for specification Rendering"));
    assert!(lines[3].starts_with("Finished in"));
    assert!(lines[4].contains("1 example,"));
    assert_eq!(lines[5], "");
}
