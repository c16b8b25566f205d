//! Structured failure details.

use std::collections::BTreeMap;

/// Structured detail of a failed expectation, as provided by a matcher.
///
/// Rendering of each variant is the [`TextPrinter`]'s concern and is gated
/// by the configured diff policy.
///
/// [`TextPrinter`]: crate::printer::TextPrinter
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Details {
    /// A pairwise actual/expected mismatch.
    Pair {
        /// The evaluated value.
        actual: String,

        /// The expected value.
        expected: String,
    },

    /// An ordered-sequence mismatch.
    Sequence {
        /// The evaluated elements, in order.
        actual: Vec<String>,

        /// The expected elements, in order.
        expected: Vec<String>,
    },

    /// An unordered-collection mismatch.
    Set {
        /// The evaluated elements.
        actual: Vec<String>,

        /// The expected elements.
        expected: Vec<String>,
    },

    /// A mapping mismatch.
    Map {
        /// The evaluated entries.
        actual: BTreeMap<String, String>,

        /// The expected entries.
        expected: BTreeMap<String, String>,
    },
}

impl Details {
    /// Creates a pairwise actual/expected detail.
    #[must_use]
    pub fn pair(actual: impl Into<String>, expected: impl Into<String>) -> Self {
        Self::Pair { actual: actual.into(), expected: expected.into() }
    }

    /// Creates an ordered-sequence detail.
    #[must_use]
    pub fn sequence(
        actual: impl IntoIterator<Item = impl Into<String>>,
        expected: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self::Sequence {
            actual: actual.into_iter().map(Into::into).collect(),
            expected: expected.into_iter().map(Into::into).collect(),
        }
    }

    /// Creates an unordered-collection detail.
    #[must_use]
    pub fn set(
        actual: impl IntoIterator<Item = impl Into<String>>,
        expected: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self::Set {
            actual: actual.into_iter().map(Into::into).collect(),
            expected: expected.into_iter().map(Into::into).collect(),
        }
    }

    /// Creates a mapping detail.
    #[must_use]
    pub fn map(
        actual: impl IntoIterator<Item = (impl Into<String>, impl Into<String>)>,
        expected: impl IntoIterator<
            Item = (impl Into<String>, impl Into<String>),
        >,
    ) -> Self {
        Self::Map {
            actual: actual
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            expected: expected
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
