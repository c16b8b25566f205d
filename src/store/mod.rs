// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Persisted run statistics.
//!
//! Only the read/write contract lives here; the storage engine behind a
//! [`StatsRepository`] is an external collaborator's concern. Writes are
//! keyed by (specification identity, description) with no merge conflict
//! resolution: the last write for a given key wins.

mod memory;

use std::{cell::RefCell, rc::Rc};

use async_trait::async_trait;

use crate::{
    error::Result,
    fold::{Frame, Sink},
    fragment::{ExecResult, Fragment},
    specification::SpecId,
    stats::Statistics,
};

pub use self::memory::{MemoryRepository, NullRepository};

/// Contract of the external statistics repository.
#[async_trait(?Send)]
pub trait StatsRepository {
    /// Persists one fragment's `result` against the owning specification's
    /// identity and the fragment's `description`.
    async fn store_result(
        &mut self,
        spec: &SpecId,
        description: &str,
        result: &ExecResult,
    ) -> Result<()>;

    /// Persists a specification's finalized [`Statistics`].
    async fn store_statistics(
        &mut self,
        spec: &SpecId,
        stats: &Statistics,
    ) -> Result<()>;

    /// Clears all statistics stored for this run scope.
    async fn reset_statistics(&mut self) -> Result<()>;

    /// Reads a specification's previously stored [`Statistics`], if any.
    async fn statistics(&self, spec: &SpecId) -> Result<Option<Statistics>>;
}

/// Shared handle onto a [`StatsRepository`].
///
/// The repository is the one cross-run shared resource; every [`StoreSink`]
/// of a batch writes through the same handle.
pub type SharedRepository = Rc<RefCell<dyn StatsRepository>>;

/// [`Sink`] persisting a specification's results and statistics.
///
/// Participates in the same zipped fold as the printer sinks, so
/// persistence and printing observe an identical single traversal of the
/// stream.
pub struct StoreSink {
    /// Identity the writes are keyed under.
    spec: SpecId,

    /// Repository written to.
    repository: SharedRepository,

    /// Suppresses every write when set.
    never: bool,

    /// Clears previously stored statistics before the first item.
    reset: bool,
}

impl StoreSink {
    /// Creates a [`StoreSink`] for the given specification.
    #[must_use]
    pub fn new(
        spec: SpecId,
        repository: SharedRepository,
        never: bool,
        reset: bool,
    ) -> Self {
        Self { spec, repository, never, reset }
    }
}

#[async_trait(?Send)]
impl Sink<Fragment> for StoreSink {
    async fn start(&mut self) -> Result<()> {
        if self.reset {
            self.repository.borrow_mut().reset_statistics().await?;
        }
        Ok(())
    }

    async fn observe(&mut self, fragment: &Fragment, _: Frame) -> Result<()> {
        if self.never {
            return Ok(());
        }
        if let Some(result) = fragment.result() {
            self.repository
                .borrow_mut()
                .store_result(
                    &self.spec,
                    &fragment.description.to_string(),
                    result,
                )
                .await?;
        }
        Ok(())
    }

    async fn end(&mut self, stats: &Statistics) -> Result<()> {
        if self.never {
            return Ok(());
        }
        self.repository
            .borrow_mut()
            .store_statistics(&self.spec, stats)
            .await
    }
}

#[cfg(test)]
mod tests {
    use crate::fragment::ExecResult;

    use super::*;

    fn shared() -> (SharedRepository, Rc<RefCell<MemoryRepository>>) {
        let repo = Rc::new(RefCell::new(MemoryRepository::new()));
        let handle: SharedRepository = repo.clone();
        (handle, repo)
    }

    #[tokio::test]
    async fn never_store_suppresses_all_writes() {
        let (handle, repo) = shared();
        let mut sink =
            StoreSink::new(SpecId::new("s1"), handle, true, false);

        sink.start().await.unwrap();
        sink.observe(
            &Fragment::example("e1", ExecResult::success()),
            Frame::default(),
        )
        .await
        .unwrap();
        sink.end(&Statistics::identity()).await.unwrap();

        assert!(repo.borrow().is_empty());
    }

    #[tokio::test]
    async fn reset_clears_before_the_first_write() {
        let (handle, repo) = shared();
        repo.borrow_mut()
            .store_statistics(&SpecId::new("old"), &Statistics::identity())
            .await
            .unwrap();

        let mut sink =
            StoreSink::new(SpecId::new("s1"), handle, false, true);
        sink.start().await.unwrap();

        assert!(repo.borrow().is_empty());
    }

    #[tokio::test]
    async fn results_and_statistics_are_persisted() {
        let (handle, repo) = shared();
        let mut sink =
            StoreSink::new(SpecId::new("s1"), handle, false, false);

        sink.start().await.unwrap();
        sink.observe(
            &Fragment::example("e1", ExecResult::failure("nope")),
            Frame::default(),
        )
        .await
        .unwrap();
        sink.observe(&Fragment::text("prose"), Frame::default())
            .await
            .unwrap();
        let stats = Statistics { examples: 1, ..Statistics::identity() };
        sink.end(&stats).await.unwrap();

        let repo = repo.borrow();
        assert_eq!(repo.results_for(&SpecId::new("s1")).len(), 1);
        assert_eq!(
            repo.statistics_sync(&SpecId::new("s1")).map(|s| s.examples),
            Some(1),
        );
    }
}
