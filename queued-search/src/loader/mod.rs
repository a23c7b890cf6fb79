//! Loader module for the queue processor.
//!
//! Applies reconciled actions to the index: updates in bounded bulk batches,
//! deletes one identifier at a time, grouped by entity type.

mod batch_group;
mod processed;

pub use batch_group::{group_by_entity_type, BatchGroup};
pub use processed::ProcessedSet;

use queued_search_repository::{BackendError, IndexRegistry};
use queued_search_shared::EntityInstance;
use tracing::{debug, error, info, instrument};

use crate::processor::ActionSet;

/// Default maximum number of instances per bulk update.
pub const DEFAULT_BATCH_SIZE: usize = 1000;

/// Counts from one apply pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApplySummary {
    /// Identifiers whose document was (re)indexed.
    pub updated: usize,
    /// Identifiers whose document was removed.
    pub deleted: usize,
    /// Identifiers left unprocessed: bad identifier, unknown entity type or failed lookup.
    pub skipped: usize,
}

/// Applies an [`ActionSet`] to the registered index backends.
///
/// The applier:
/// - Groups identifiers by entity type
/// - Resolves each type's backend and store through the registry
/// - Sends updates in batches of at most `batch_size` instances
/// - Records every confirmed identifier in the [`ProcessedSet`]
pub struct BatchApplier {
    registry: IndexRegistry,
    batch_size: usize,
}

impl BatchApplier {
    /// Create an applier with the default batch size.
    pub fn new(registry: IndexRegistry) -> Self {
        Self::with_batch_size(registry, DEFAULT_BATCH_SIZE)
    }

    /// Create an applier with a custom batch size (at least 1).
    pub fn with_batch_size(registry: IndexRegistry, batch_size: usize) -> Self {
        Self {
            registry,
            batch_size: batch_size.max(1),
        }
    }

    /// Maximum number of instances per bulk update.
    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// The registry handlers are resolved from.
    pub fn registry(&self) -> &IndexRegistry {
        &self.registry
    }

    /// Apply updates, then deletes.
    ///
    /// Confirmed identifiers are added to `processed` as soon as they are
    /// applied, so on error it reflects exactly the work that went through.
    ///
    /// # Returns
    ///
    /// * `Ok(ApplySummary)` - If every backend call succeeded
    /// * `Err(BackendError)` - On the first backend failure
    pub async fn apply(
        &self,
        actions: &ActionSet,
        processed: &mut ProcessedSet,
    ) -> Result<ApplySummary, BackendError> {
        let mut summary = ApplySummary::default();
        self.apply_updates(actions, processed, &mut summary).await?;
        self.apply_deletes(actions, processed, &mut summary).await?;
        Ok(summary)
    }

    /// Process through all updates.
    #[instrument(skip_all, fields(updates = actions.update_count()))]
    async fn apply_updates(
        &self,
        actions: &ActionSet,
        processed: &mut ProcessedSet,
        summary: &mut ApplySummary,
    ) -> Result<(), BackendError> {
        let (groups, invalid) = group_by_entity_type(actions.updates());
        summary.skipped += invalid;

        for group in groups {
            let Some(handler) = self.registry.get(&group.entity_type) else {
                error!(
                    entity_type = %group.entity_type,
                    count = group.primary_keys.len(),
                    "No index handler registered for entity type, skipping"
                );
                summary.skipped += group.primary_keys.len();
                continue;
            };

            let mut identifiers: Vec<String> = Vec::with_capacity(group.primary_keys.len());
            let mut instances: Vec<EntityInstance> = Vec::with_capacity(group.primary_keys.len());

            for (primary_key, identifier) in group.primary_keys.iter().zip(group.identifiers()) {
                match handler.store.get(primary_key).await {
                    Ok(instance) => {
                        identifiers.push(identifier);
                        instances.push(instance);
                    }
                    Err(e) => {
                        error!(
                            identifier = %identifier,
                            error = %e,
                            "Couldn't load entity instance, skipping"
                        );
                        summary.skipped += 1;
                    }
                }
            }

            let total = instances.len();
            debug!(entity_type = %group.entity_type, total = total, "Indexing instances");

            for (batch_number, (batch_ids, batch)) in identifiers
                .chunks(self.batch_size)
                .zip(instances.chunks(self.batch_size))
                .enumerate()
            {
                let start = batch_number * self.batch_size;
                handler.backend.bulk_update(batch).await?;

                for identifier in batch_ids {
                    processed.insert(identifier.as_str());
                }
                summary.updated += batch.len();

                info!(
                    entity_type = %group.entity_type,
                    from = start + 1,
                    to = start + batch.len(),
                    total = total,
                    "Indexed batch"
                );
            }
        }

        Ok(())
    }

    /// Process through all deletes.
    #[instrument(skip_all, fields(deletes = actions.delete_count()))]
    async fn apply_deletes(
        &self,
        actions: &ActionSet,
        processed: &mut ProcessedSet,
        summary: &mut ApplySummary,
    ) -> Result<(), BackendError> {
        let (groups, invalid) = group_by_entity_type(actions.deletes());
        summary.skipped += invalid;

        for group in groups {
            let Some(handler) = self.registry.get(&group.entity_type) else {
                error!(
                    entity_type = %group.entity_type,
                    count = group.primary_keys.len(),
                    "No index handler registered for entity type, skipping"
                );
                summary.skipped += group.primary_keys.len();
                continue;
            };

            for identifier in group.identifiers() {
                handler.backend.remove_by_identifier(&identifier).await?;
                processed.insert(identifier);
                summary.deleted += 1;
            }

            info!(
                entity_type = %group.entity_type,
                count = group.primary_keys.len(),
                "Removed documents"
            );
        }

        Ok(())
    }
}
