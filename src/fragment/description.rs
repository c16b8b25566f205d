//! Fragment descriptions.

use derive_more::Display;

use crate::specification::SpecId;

/// What a [`Fragment`] describes.
///
/// [`Fragment`]: super::Fragment
#[derive(Clone, Debug, Display, PartialEq)]
pub enum Description {
    /// Free text, typically an example description or a heading.
    #[display("{_0}")]
    Text(String),

    /// A verbatim code block.
    #[display("{_0}")]
    Code(String),

    /// An explicit line break.
    #[display("")]
    Break,

    /// Marker opening a nested block, carrying the block's header text.
    ///
    /// Increases the display nesting depth until the matching
    /// [`Description::End`].
    #[display("{_0}")]
    Start(String),

    /// Marker closing the innermost open block.
    #[display("")]
    End,

    /// A reference to another specification.
    #[display("{}", _0.title())]
    Ref(SpecRef),
}

impl Description {
    /// Indicates whether this description opens a nested block.
    #[must_use]
    pub const fn opens_block(&self) -> bool {
        matches!(self, Self::Start(_))
    }

    /// Indicates whether this description closes a nested block.
    #[must_use]
    pub const fn closes_block(&self) -> bool {
        matches!(self, Self::End)
    }
}

/// Reference to another specification from within a specification.
///
/// The referenced specification runs on its own; the reference fragment only
/// carries the nested run's [`Statistics`] (as a decorated result) so they
/// can be merged into the referring specification's totals without being
/// counted as one more example.
///
/// [`Statistics`]: crate::stats::Statistics
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SpecRef {
    /// Identity of the referenced specification.
    pub spec: SpecId,

    /// Alternative display text; the identity is shown when empty.
    pub alias: String,

    /// Hidden references render nothing at all.
    pub hidden: bool,

    /// Muted references render their description line only, without the
    /// nested statistics display.
    pub muted: bool,
}

impl SpecRef {
    /// Creates a visible, unmuted reference to the given specification.
    #[must_use]
    pub fn new(spec: impl Into<SpecId>) -> Self {
        Self {
            spec: spec.into(),
            alias: String::new(),
            hidden: false,
            muted: false,
        }
    }

    /// Sets the display `alias` of this reference.
    #[must_use]
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = alias.into();
        self
    }

    /// Marks this reference as hidden.
    #[must_use]
    pub const fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    /// Marks this reference as muted.
    #[must_use]
    pub const fn muted(mut self) -> Self {
        self.muted = true;
        self
    }

    /// Returns the text this reference is displayed with.
    #[must_use]
    pub fn title(&self) -> &str {
        if self.alias.is_empty() {
            self.spec.as_str()
        } else {
            &self.alias
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ref_title_prefers_alias() {
        let r = SpecRef::new("org.acme.InnerSpec");
        assert_eq!(r.title(), "org.acme.InnerSpec");

        let r = r.with_alias("inner behaviours");
        assert_eq!(r.title(), "inner behaviours");
    }

    #[test]
    fn block_markers_are_recognized() {
        assert!(Description::Start("block".into()).opens_block());
        assert!(Description::End.closes_block());
        assert!(!Description::Text("plain".into()).opens_block());
    }
}
