// ./infrastructure/src/persistence/in_memory_collection.rs
use application::{ApplicationError, CollectionRepository, RecordUpdate, SequencedRepository};
use async_trait::async_trait;
use domain::{Composed, IdentityAssigner, Record, TextFilter, Window};
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, instrument};

#[derive(Debug)]
struct CollectionState<R> {
    /// Insertion order is the listing order.
    records: Vec<R>,
    /// Records ever appended; drives generated identities and never decreases.
    appended: u64,
}

/// Ordered in-memory collection guarded by a single lock.
///
/// Reads share the read guard. Every mutation, including the check that
/// precedes it, runs under one write guard, so no call observes another
/// half-applied.
#[derive(Debug, Clone)]
pub struct InMemoryCollection<R: Record> {
    state: Arc<RwLock<CollectionState<R>>>,
}

impl<R: Record> Default for InMemoryCollection<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Record> InMemoryCollection<R> {
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(CollectionState {
                records: Vec::new(),
                appended: 0,
            })),
        }
    }

    /// A collection pre-filled with `records`, which must have distinct identities.
    pub fn with_records(records: Vec<R>) -> Result<Self, ApplicationError> {
        ensure_unique(&[], &records)?;
        let appended = records.len() as u64;
        Ok(Self {
            state: Arc::new(RwLock::new(CollectionState { records, appended })),
        })
    }
}

/// Fails on the first record of `incoming` whose identity is already in
/// `existing` or earlier in `incoming`.
fn ensure_unique<R: Record>(existing: &[R], incoming: &[R]) -> Result<(), ApplicationError> {
    let mut seen: HashSet<&R::Id> = existing.iter().map(Record::id).collect();
    for record in incoming {
        if !seen.insert(record.id()) {
            debug!(kind = R::KIND, id = %record.id(), "Duplicate identity rejected");
            return Err(ApplicationError::duplicate::<R>(record.id()));
        }
    }
    Ok(())
}

#[async_trait]
impl<R: Record> CollectionRepository<R> for InMemoryCollection<R> {
    #[instrument(skip(self), fields(kind = R::KIND))]
    async fn list(
        &self,
        filter: Option<&TextFilter>,
        window: Window,
    ) -> Result<Vec<R>, ApplicationError> {
        let state = self.state.read().await;
        let matching = state
            .records
            .iter()
            .filter(|record| filter.is_none_or(|f| f.matches(*record)));
        let page: Vec<R> = window.apply(matching).cloned().collect();
        debug!(total = state.records.len(), returned = page.len(), "Listed records");
        Ok(page)
    }

    #[instrument(skip(self), fields(kind = R::KIND))]
    async fn find(&self, id: &R::Id) -> Result<Option<R>, ApplicationError> {
        let state = self.state.read().await;
        Ok(state.records.iter().find(|record| record.id() == id).cloned())
    }

    #[instrument(skip(self, record), fields(kind = R::KIND, id = %record.id()))]
    async fn append(&self, record: R) -> Result<R, ApplicationError> {
        let mut state = self.state.write().await;
        ensure_unique(&state.records, std::slice::from_ref(&record))?;
        state.records.push(record.clone());
        state.appended += 1;
        debug!(len = state.records.len(), "Appended record");
        Ok(record)
    }

    #[instrument(skip(self, records), fields(kind = R::KIND, count = records.len()))]
    async fn append_all(&self, records: Vec<R>) -> Result<Vec<R>, ApplicationError> {
        let mut state = self.state.write().await;
        ensure_unique(&state.records, &records)?;
        state.records.extend(records.iter().cloned());
        state.appended += records.len() as u64;
        debug!(len = state.records.len(), "Appended batch");
        Ok(records)
    }

    #[instrument(skip(self), fields(kind = R::KIND))]
    async fn remove_by_id(&self, id: &R::Id) -> Result<Option<R>, ApplicationError> {
        let mut state = self.state.write().await;
        let position = state.records.iter().position(|record| record.id() == id);
        let removed = position.map(|index| state.records.remove(index));
        debug!(removed = removed.is_some(), "Remove by id finished");
        Ok(removed)
    }

    #[instrument(skip(self, ids), fields(kind = R::KIND, requested = ids.len()))]
    async fn remove_where(&self, ids: &[R::Id]) -> Result<Vec<R>, ApplicationError> {
        let wanted: HashSet<&R::Id> = ids.iter().collect();
        let mut state = self.state.write().await;
        let (removed, kept): (Vec<R>, Vec<R>) = std::mem::take(&mut state.records)
            .into_iter()
            .partition(|record| wanted.contains(record.id()));
        state.records = kept;
        debug!(removed = removed.len(), remaining = state.records.len(), "Partitioned collection");
        Ok(removed)
    }

    #[instrument(skip(self, update), fields(kind = R::KIND))]
    async fn replace_with(
        &self,
        id: &R::Id,
        update: RecordUpdate<R>,
    ) -> Result<Option<R>, ApplicationError> {
        let mut state = self.state.write().await;
        let Some(index) = state.records.iter().position(|record| record.id() == id) else {
            return Ok(None);
        };
        let updated = update(&state.records[index]);
        // An explicit identity change is allowed as long as it stays unique.
        if updated.id() != id && state.records.iter().any(|r| r.id() == updated.id()) {
            return Err(ApplicationError::duplicate::<R>(updated.id()));
        }
        state.records[index] = updated.clone();
        debug!(index, "Replaced record in place");
        Ok(Some(updated))
    }
}

#[async_trait]
impl<R: Composed> SequencedRepository<R> for InMemoryCollection<R> {
    #[instrument(skip(self, drafts, assigner), fields(kind = R::KIND, count = drafts.len()))]
    async fn append_composed(
        &self,
        drafts: Vec<R::Draft>,
        assigner: &dyn IdentityAssigner<R::Id>,
    ) -> Result<Vec<R>, ApplicationError> {
        let mut state = self.state.write().await;
        let start = state.appended;
        let mut taken: HashSet<R::Id> = state.records.iter().map(|r| r.id().clone()).collect();
        let mut composed = Vec::with_capacity(drafts.len());
        for (draft, offset) in drafts.into_iter().zip(1..) {
            let sequence = start + offset;
            let record = R::compose(assigner.assign(sequence), draft);
            if !taken.insert(record.id().clone()) {
                // Burn the taken sequence so the next batch moves past it.
                state.appended = sequence;
                debug!(kind = R::KIND, id = %record.id(), sequence, "Generated identity already taken");
                return Err(ApplicationError::duplicate::<R>(record.id()));
            }
            composed.push(record);
        }
        state.records.extend(composed.iter().cloned());
        state.appended += composed.len() as u64;
        debug!(first_sequence = start + 1, len = state.records.len(), "Appended composed batch");
        Ok(composed)
    }
}
