//! Display-nesting fold.

use crate::fragment::Fragment;

use super::Fold;

/// Nesting depth derived from block markers.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Indentation {
    /// Current nesting level, in blocks.
    level: usize,
}

impl Indentation {
    /// Returns the root [`Indentation`].
    #[must_use]
    pub const fn root() -> Self {
        Self { level: 0 }
    }

    /// Current nesting level.
    #[must_use]
    pub const fn level(&self) -> usize {
        self.level
    }
}

/// [`Fold`] tracking display nesting depth.
///
/// Block-opening markers increase the depth, block-closing markers restore
/// the previous one, and the depth never goes negative. Plain fragments pass
/// it through unchanged. Printers consume the depth purely for left-margin
/// computation; it has no effect on statistics.
#[derive(Clone, Copy, Debug, Default)]
pub struct IndentFold;

impl IndentFold {
    /// Creates a new [`IndentFold`].
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Fold<Fragment> for IndentFold {
    type State = Indentation;

    fn initial(&self) -> Indentation {
        Indentation::root()
    }

    fn step(&self, state: Indentation, fragment: &Fragment) -> Indentation {
        let level = if fragment.description.opens_block() {
            state.level + 1
        } else if fragment.description.closes_block() {
            state.level.saturating_sub(1)
        } else {
            state.level
        };
        Indentation { level }
    }
}
