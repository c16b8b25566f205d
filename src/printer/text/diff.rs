//! Mismatch detail rendering.
//!
//! Sequence, set and mapping mismatches are rendered as Added/Missing (and,
//! for mappings, Different) listings; listings whose combined element count
//! reaches [`DIFF_COLLAPSE_THRESHOLD`] collapse into a one-line summary of
//! counts per category.

use std::collections::BTreeMap;

use itertools::Itertools as _;

use crate::{
    config::{Config, DIFF_COLLAPSE_THRESHOLD},
    fragment::Details,
    printer::LogLine,
};

/// Characters of context kept around the first difference when values are
/// abbreviated.
const ABBREV_CONTEXT: usize = 20;

/// Renders the given mismatch `details`, honoring the configured diff
/// policy.
pub(super) fn details(
    config: &Config,
    margin: &str,
    details: &Details,
) -> Vec<LogLine> {
    if !config.diffs.show {
        return Vec::new();
    }
    match details {
        Details::Pair { actual, expected } => {
            pair(config, margin, actual, expected)
        }
        Details::Sequence { actual, expected }
        | Details::Set { actual, expected } => listing(
            margin,
            &[
                ("Added", difference(actual, expected)),
                ("Missing", difference(expected, actual)),
            ],
        ),
        Details::Map { actual, expected } => {
            listing(margin, &map_sections(actual, expected))
        }
    }
}

/// Renders a pairwise actual/expected mismatch.
fn pair(
    config: &Config,
    margin: &str,
    actual: &str,
    expected: &str,
) -> Vec<LogLine> {
    let (short_actual, short_expected) = abbreviate(actual, expected);
    let mut out = vec![
        LogLine::Failure(format!("{margin}Actual:   {short_actual}")),
        LogLine::Failure(format!("{margin}Expected: {short_expected}")),
    ];
    if config.diffs.full {
        out.push(LogLine::Failure(format!("{margin}Actual (full):   {actual}")));
        out.push(LogLine::Failure(format!(
            "{margin}Expected (full): {expected}"
        )));
    }
    out
}

/// Set-style difference: elements of `a` absent from `b`, deduplicated,
/// first-occurrence order.
fn difference(a: &[String], b: &[String]) -> Vec<String> {
    a.iter().filter(|el| !b.contains(el)).unique().cloned().collect()
}

/// Added/Missing/Different sections of a mapping mismatch.
///
/// All three sections are rendered; "Different" lists keys present on both
/// sides with differing values.
fn map_sections(
    actual: &BTreeMap<String, String>,
    expected: &BTreeMap<String, String>,
) -> [(&'static str, Vec<String>); 3] {
    let added = actual
        .iter()
        .filter(|(k, _)| !expected.contains_key(*k))
        .map(|(k, v)| format!("{k} -> {v}"))
        .collect();
    let missing = expected
        .iter()
        .filter(|(k, _)| !actual.contains_key(*k))
        .map(|(k, v)| format!("{k} -> {v}"))
        .collect();
    let different = actual
        .iter()
        .filter_map(|(k, av)| {
            expected
                .get(k)
                .filter(|ev| *ev != av)
                .map(|ev| format!("{k} -> {av} != {ev}"))
        })
        .collect();
    [("Added", added), ("Missing", missing), ("Different", different)]
}

/// Renders listing `sections`, collapsing them into a one-line count
/// summary once their combined element count reaches the threshold.
fn listing(margin: &str, sections: &[(&str, Vec<String>)]) -> Vec<LogLine> {
    let total: usize = sections.iter().map(|(_, els)| els.len()).sum();
    if total >= DIFF_COLLAPSE_THRESHOLD {
        let counts = sections
            .iter()
            .map(|(name, els)| {
                format!(
                    "{name}: {} element{}",
                    els.len(),
                    if els.len() == 1 { "" } else { "s" },
                )
            })
            .join(", ");
        return vec![LogLine::Failure(format!("{margin}{counts}"))];
    }

    let mut out = Vec::new();
    for (name, els) in sections {
        if els.is_empty() {
            continue;
        }
        out.push(LogLine::Failure(format!("{margin}{name} ({}):", els.len())));
        for el in els {
            out.push(LogLine::Failure(format!("{margin}  {el}")));
        }
    }
    out
}

/// Abbreviates `actual`/`expected` around their first difference, keeping
/// [`ABBREV_CONTEXT`] characters of shared context on either side.
fn abbreviate(actual: &str, expected: &str) -> (String, String) {
    let a: Vec<char> = actual.chars().collect();
    let e: Vec<char> = expected.chars().collect();

    let prefix =
        a.iter().zip(&e).take_while(|(x, y)| x == y).count();
    let suffix = a
        .iter()
        .rev()
        .zip(e.iter().rev())
        .take_while(|(x, y)| x == y)
        .count()
        .min(a.len() - prefix)
        .min(e.len() - prefix);

    (clip(&a, prefix, suffix), clip(&e, prefix, suffix))
}

/// Clips shared prefix/suffix beyond the kept context, marking elisions
/// with `...`.
fn clip(chars: &[char], prefix: usize, suffix: usize) -> String {
    let start = prefix.saturating_sub(ABBREV_CONTEXT);
    let end = (chars.len() - suffix + ABBREV_CONTEXT).min(chars.len());

    let mut out = String::new();
    if start > 0 {
        out.push_str("...");
    }
    out.extend(&chars[start..end]);
    if end < chars.len() {
        out.push_str("...");
    }
    out
}

#[cfg(test)]
mod tests {
    use crate::config::Coloring;

    use super::*;

    fn config() -> Config {
        Config { color: Coloring::Never, ..Config::default() }
    }

    fn texts(lines: Vec<LogLine>) -> Vec<String> {
        lines.into_iter().map(|l| l.text().to_owned()).collect()
    }

    #[test]
    fn pair_abbreviates_long_shared_context() {
        let long_prefix = "a".repeat(60);
        let actual = format!("{long_prefix}X");
        let expected = format!("{long_prefix}Y");

        let lines = texts(details(
            &config(),
            "",
            &Details::pair(actual, expected),
        ));
        assert!(lines[0].starts_with("Actual:   ..."));
        assert!(lines[0].ends_with('X'));
        assert!(lines[1].ends_with('Y'));
    }

    #[test]
    fn full_policy_adds_unabbreviated_values() {
        let mut config = config();
        config.diffs.full = true;

        let lines = texts(details(
            &config,
            "",
            &Details::pair("abc", "abd"),
        ));
        assert_eq!(lines.len(), 4);
        assert!(lines[2].contains("Actual (full):   abc"));
    }

    #[test]
    fn hidden_diffs_render_nothing() {
        let mut config = config();
        config.diffs.show = false;
        assert!(details(&config, "", &Details::pair("a", "b")).is_empty());
    }

    #[test]
    fn sequence_lists_added_and_missing() {
        let lines = texts(details(
            &config(),
            "",
            &Details::sequence(["a", "b", "c"], ["b", "d"]),
        ));
        assert_eq!(
            lines,
            vec!["Added (2):", "  a", "  c", "Missing (1):", "  d"],
        );
    }

    #[test]
    fn listing_collapses_at_the_threshold() {
        let actual: Vec<String> =
            (0..30).map(|i| format!("a{i}")).collect();
        let expected: Vec<String> =
            (0..20).map(|i| format!("e{i}")).collect();

        // 30 added + 20 missing = 50 rendered elements.
        let lines = texts(details(
            &config(),
            "",
            &Details::set(actual, expected),
        ));
        assert_eq!(
            lines,
            vec!["Added: 30 elements, Missing: 20 elements"],
        );
    }

    #[test]
    fn listing_stays_expanded_below_the_threshold() {
        let actual: Vec<String> =
            (0..30).map(|i| format!("a{i}")).collect();
        let expected: Vec<String> =
            (0..19).map(|i| format!("e{i}")).collect();

        // 49 rendered elements: full listing, with its section headers.
        let lines = texts(details(
            &config(),
            "",
            &Details::set(actual, expected),
        ));
        assert_eq!(lines.len(), 49 + 2);
        assert_eq!(lines[0], "Added (30):");
    }

    #[test]
    fn map_diff_renders_all_three_sections() {
        let lines = texts(details(
            &config(),
            "",
            &Details::map(
                [("a", "1"), ("b", "2")],
                [("b", "3"), ("c", "4")],
            ),
        ));
        assert_eq!(
            lines,
            vec![
                "Added (1):",
                "  a -> 1",
                "Missing (1):",
                "  c -> 4",
                "Different (1):",
                "  b -> 2 != 3",
            ],
        );
    }
}
