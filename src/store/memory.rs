//! In-memory repository implementations.

use async_trait::async_trait;
use linked_hash_map::LinkedHashMap;

use crate::{
    error::Result, fragment::ExecResult, specification::SpecId,
    stats::Statistics,
};

use super::StatsRepository;

/// [`StatsRepository`] keeping everything in memory, in insertion order.
///
/// The default repository of a [`Reporter`]; also convenient for tests.
///
/// [`Reporter`]: crate::reporter::Reporter
#[derive(Debug, Default)]
pub struct MemoryRepository {
    /// Per-fragment results, keyed by (specification, description).
    results: LinkedHashMap<(SpecId, String), ExecResult>,

    /// Per-specification statistics.
    stats: LinkedHashMap<SpecId, Statistics>,
}

impl MemoryRepository {
    /// Creates an empty [`MemoryRepository`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Indicates whether nothing has been stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty() && self.stats.is_empty()
    }

    /// Returns the stored results of the given specification, in storage
    /// order.
    #[must_use]
    pub fn results_for(&self, spec: &SpecId) -> Vec<(&str, &ExecResult)> {
        self.results
            .iter()
            .filter(|((id, _), _)| id == spec)
            .map(|((_, description), result)| {
                (description.as_str(), result)
            })
            .collect()
    }

    /// Returns the stored [`Statistics`] of the given specification,
    /// without going through the async contract.
    #[must_use]
    pub fn statistics_sync(&self, spec: &SpecId) -> Option<Statistics> {
        self.stats.get(spec).copied()
    }
}

#[async_trait(?Send)]
impl StatsRepository for MemoryRepository {
    async fn store_result(
        &mut self,
        spec: &SpecId,
        description: &str,
        result: &ExecResult,
    ) -> Result<()> {
        // Last write for a given key wins.
        drop(self.results.insert(
            (spec.clone(), description.to_owned()),
            result.clone(),
        ));
        Ok(())
    }

    async fn store_statistics(
        &mut self,
        spec: &SpecId,
        stats: &Statistics,
    ) -> Result<()> {
        drop(self.stats.insert(spec.clone(), *stats));
        Ok(())
    }

    async fn reset_statistics(&mut self) -> Result<()> {
        self.results.clear();
        self.stats.clear();
        Ok(())
    }

    async fn statistics(&self, spec: &SpecId) -> Result<Option<Statistics>> {
        Ok(self.statistics_sync(spec))
    }
}

/// [`StatsRepository`] discarding everything.
///
/// Stands in where run history is not wanted at all.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullRepository;

impl NullRepository {
    /// Creates a [`NullRepository`].
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait(?Send)]
impl StatsRepository for NullRepository {
    async fn store_result(
        &mut self,
        _: &SpecId,
        _: &str,
        _: &ExecResult,
    ) -> Result<()> {
        Ok(())
    }

    async fn store_statistics(
        &mut self,
        _: &SpecId,
        _: &Statistics,
    ) -> Result<()> {
        Ok(())
    }

    async fn reset_statistics(&mut self) -> Result<()> {
        Ok(())
    }

    async fn statistics(&self, _: &SpecId) -> Result<Option<Statistics>> {
        Ok(None)
    }
}
