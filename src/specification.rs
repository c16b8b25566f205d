// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Specification identity.
//!
//! A specification is identified by its [`SpecId`], which keys everything the
//! pipeline persists: per-fragment results and final [`Statistics`] are both
//! stored against it. The [`Specification`] value additionally carries the
//! display header used for the text footer.
//!
//! [`Statistics`]: crate::stats::Statistics

use derive_more::{AsRef, Display, From, Into};

/// Unique identity of a specification.
///
/// Typically the fully qualified name of the specification structure that
/// produced the fragments, e.g. `org.acme.CheckoutSpec`.
#[derive(
    AsRef, Clone, Debug, Display, Eq, From, Hash, Into, Ord, PartialEq,
    PartialOrd,
)]
#[from(String, &str)]
pub struct SpecId(String);

impl SpecId {
    /// Creates a new [`SpecId`] from the given `name`.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns this identity as a [`str`].
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A specification handed to the [`Reporter`].
///
/// Only identity and presentation concerns live here: the fragments
/// themselves come from the external [`Executor`] when the specification is
/// reported.
///
/// [`Executor`]: crate::reporter::Executor
/// [`Reporter`]: crate::reporter::Reporter
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Specification {
    /// Identity of this specification.
    pub id: SpecId,

    /// Display header, shown as the title line of the text footer.
    ///
    /// May be empty, in which case the footer title line is blank.
    pub title: String,
}

impl Specification {
    /// Creates a new [`Specification`] with the given `id` and `title`.
    #[must_use]
    pub fn new(id: impl Into<SpecId>, title: impl Into<String>) -> Self {
        Self { id: id.into(), title: title.into() }
    }

    /// Creates a [`Specification`] whose title is its identity.
    #[must_use]
    pub fn named(id: impl Into<SpecId>) -> Self {
        let id = id.into();
        let title = id.as_str().to_owned();
        Self { id, title }
    }

    /// Returns the visible part of this specification's header, if any.
    #[must_use]
    pub fn visible_title(&self) -> Option<&str> {
        let trimmed = self.title.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spec_id_displays_as_name() {
        let id = SpecId::new("org.acme.CheckoutSpec");
        assert_eq!(id.to_string(), "org.acme.CheckoutSpec");
    }

    #[test]
    fn blank_title_is_not_visible() {
        let spec = Specification::new("s1", "   ");
        assert_eq!(spec.visible_title(), None);

        let spec = Specification::new("s1", "Checkout");
        assert_eq!(spec.visible_title(), Some("Checkout"));
    }
}
