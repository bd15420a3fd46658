//! The directory store: an ordered list of records, a favorite set, and the
//! slot they are persisted to.
//!
//! Every mutating call rewrites the whole snapshot under [`DATA_SLOT`], so
//! records and favorites are always persisted together.

use std::collections::{BTreeSet, HashSet};

use bsbb_core::{sample_businesses, BusinessRecord, Deal, DirectorySource, Review};

use crate::error::StoreError;
use crate::slot::KeyValueSlot;
use crate::snapshot::Snapshot;

/// Slot key holding the records-and-favorites snapshot.
pub const DATA_SLOT: &str = "bsbb-data";
/// Slot key holding a Google Places API key saved by the user.
pub const API_KEY_SLOT: &str = "bsbb-google-api-key";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreState {
    Empty,
    Loaded(DirectorySource),
}

/// Handle for one provider search. Only the most recently issued ticket may
/// publish results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchTicket {
    generation: u64,
}

impl SearchTicket {
    #[must_use]
    pub fn generation(self) -> u64 {
        self.generation
    }
}

#[derive(Debug)]
pub struct DirectoryStore<S> {
    slot: S,
    records: Vec<BusinessRecord>,
    favorites: BTreeSet<String>,
    state: StoreState,
    generation: u64,
    loading: bool,
}

impl<S: KeyValueSlot> DirectoryStore<S> {
    /// An empty store over `slot`. Nothing is read until [`open`](Self::open)
    /// or a mutation.
    pub fn new(slot: S) -> Self {
        Self {
            slot,
            records: Vec::new(),
            favorites: BTreeSet::new(),
            state: StoreState::Empty,
            generation: 0,
            loading: false,
        }
    }

    /// Loads the persisted snapshot, or the static samples when the slot is
    /// absent, blank, unreadable as a snapshot, or holds no businesses.
    /// Saved favorites survive the last case.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] only if the slot itself cannot be read.
    pub fn open(slot: S) -> Result<Self, StoreError> {
        let mut store = Self::new(slot);

        match store.slot.get(DATA_SLOT)? {
            Some(json) if !json.trim().is_empty() => {
                if let Err(e) = store.deserialize(&json) {
                    tracing::warn!(error = %e, "persisted directory is malformed; using samples");
                    store.load_samples();
                } else if store.records.is_empty() {
                    tracing::debug!("persisted directory has no businesses; using samples");
                    store.records = sample_businesses();
                    store.state = StoreState::Loaded(DirectorySource::Samples);
                }
            }
            _ => {
                tracing::debug!("no persisted directory; using samples");
                store.load_samples();
            }
        }

        Ok(store)
    }

    fn load_samples(&mut self) {
        self.records = sample_businesses();
        self.favorites.clear();
        self.state = StoreState::Loaded(DirectorySource::Samples);
    }

    #[must_use]
    pub fn state(&self) -> StoreState {
        self.state
    }

    #[must_use]
    pub fn source(&self) -> Option<DirectorySource> {
        match self.state {
            StoreState::Empty => None,
            StoreState::Loaded(source) => Some(source),
        }
    }

    #[must_use]
    pub fn records(&self) -> &[BusinessRecord] {
        &self.records
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&BusinessRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Favorited ids in sorted order. Ids may refer to records no longer in
    /// the list.
    pub fn favorites(&self) -> impl Iterator<Item = &str> {
        self.favorites.iter().map(String::as_str)
    }

    #[must_use]
    pub fn is_favorite(&self, id: &str) -> bool {
        self.favorites.contains(id)
    }

    /// Favorited records present in the list, in list order.
    #[must_use]
    pub fn favorite_records(&self) -> Vec<&BusinessRecord> {
        self.records
            .iter()
            .filter(|r| self.favorites.contains(&r.id))
            .collect()
    }

    /// Replaces every record. Later records whose id was already seen are
    /// dropped. Favorites are kept.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the snapshot cannot be persisted.
    pub fn replace_all(
        &mut self,
        records: Vec<BusinessRecord>,
        source: DirectorySource,
    ) -> Result<(), StoreError> {
        self.records = dedupe(records);
        self.state = StoreState::Loaded(source);
        tracing::debug!(count = self.records.len(), %source, "directory replaced");
        self.persist()
    }

    /// Appends a hand-entered record.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuplicateId`] if a record with the same id is
    /// already present, or [`StoreError`] if persisting fails.
    pub fn add_record(&mut self, record: BusinessRecord) -> Result<(), StoreError> {
        if self.get(&record.id).is_some() {
            return Err(StoreError::DuplicateId(record.id));
        }
        let id = record.id.clone();
        self.records.push(record);
        if let Err(e) = self.persist() {
            self.records.pop();
            return Err(e);
        }
        if self.state == StoreState::Empty {
            self.state = StoreState::Loaded(DirectorySource::Persisted);
        }
        tracing::info!(%id, "business added");
        Ok(())
    }

    /// Appends `review` to the record with `id`. Returns `false`, without
    /// writing, when no such record exists.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the snapshot cannot be persisted. The review is
    /// not kept in memory in that case.
    pub fn append_review(&mut self, id: &str, review: Review) -> Result<bool, StoreError> {
        let Some(index) = self.position(id) else {
            tracing::debug!(id, "review for unknown business ignored");
            return Ok(false);
        };
        self.records[index].reviews.push(review);
        if let Err(e) = self.persist() {
            self.records[index].reviews.pop();
            return Err(e);
        }
        Ok(true)
    }

    /// Appends `deal` to the record with `id`. Returns `false`, without
    /// writing, when no such record exists.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the snapshot cannot be persisted. The deal is
    /// not kept in memory in that case.
    pub fn append_deal(&mut self, id: &str, deal: Deal) -> Result<bool, StoreError> {
        let Some(index) = self.position(id) else {
            tracing::debug!(id, "deal for unknown business ignored");
            return Ok(false);
        };
        self.records[index].deals.push(deal);
        if let Err(e) = self.persist() {
            self.records[index].deals.pop();
            return Err(e);
        }
        Ok(true)
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.records.iter().position(|r| r.id == id)
    }

    /// Flips membership of `id` in the favorite set and returns the new
    /// membership.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the snapshot cannot be persisted.
    pub fn toggle_favorite(&mut self, id: &str) -> Result<bool, StoreError> {
        let now_favorite = if self.favorites.remove(id) {
            false
        } else {
            self.favorites.insert(id.to_string());
            true
        };
        self.persist()?;
        Ok(now_favorite)
    }

    /// Encodes records and favorites as the snapshot JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Json`] if encoding fails.
    pub fn serialize(&self) -> Result<String, StoreError> {
        let snapshot = Snapshot {
            businesses: self.records.clone(),
            favorites: self.favorites.iter().cloned().collect(),
        };
        Ok(snapshot.to_json()?)
    }

    /// Replaces in-memory state with a snapshot document. Does not write
    /// the slot.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Json`] if `json` is not a snapshot; the store
    /// is left unchanged in that case.
    pub fn deserialize(&mut self, json: &str) -> Result<(), StoreError> {
        let snapshot = Snapshot::from_json(json)?;
        self.records = dedupe(snapshot.businesses);
        self.favorites = snapshot.favorites.into_iter().collect();
        self.state = StoreState::Loaded(DirectorySource::Persisted);
        Ok(())
    }

    fn persist(&mut self) -> Result<(), StoreError> {
        let json = self.serialize()?;
        self.slot.set(DATA_SLOT, &json)
    }

    // -------------------------------------------------------------------
    // API key
    // -------------------------------------------------------------------

    /// The saved Places API key, if any non-blank value is stored.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the slot cannot be read.
    pub fn api_key(&self) -> Result<Option<String>, StoreError> {
        Ok(self
            .slot
            .get(API_KEY_SLOT)?
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty()))
    }

    /// # Errors
    ///
    /// Returns [`StoreError`] if the slot cannot be written.
    pub fn set_api_key(&mut self, key: &str) -> Result<(), StoreError> {
        self.slot.set(API_KEY_SLOT, key.trim())
    }

    /// # Errors
    ///
    /// Returns [`StoreError`] if the slot cannot be modified.
    pub fn clear_api_key(&mut self) -> Result<(), StoreError> {
        self.slot.remove(API_KEY_SLOT)
    }

    // -------------------------------------------------------------------
    // Search generations
    // -------------------------------------------------------------------

    /// Starts a search, superseding any search still outstanding.
    pub fn begin_search(&mut self) -> SearchTicket {
        self.generation += 1;
        self.loading = true;
        SearchTicket {
            generation: self.generation,
        }
    }

    /// Publishes search results if `ticket` is still the latest search.
    /// Returns `false` and leaves the store untouched for a stale ticket.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the snapshot cannot be persisted.
    pub fn finish_search(
        &mut self,
        ticket: SearchTicket,
        records: Vec<BusinessRecord>,
        source: DirectorySource,
    ) -> Result<bool, StoreError> {
        if ticket.generation != self.generation {
            tracing::debug!(
                stale = ticket.generation,
                current = self.generation,
                "discarding stale search results"
            );
            return Ok(false);
        }
        self.loading = false;
        self.replace_all(records, source)?;
        Ok(true)
    }

    /// Ends the search for `ticket` without publishing anything, leaving
    /// the records and the slot untouched. Returns `false` for a stale
    /// ticket.
    pub fn abandon_search(&mut self, ticket: SearchTicket) -> bool {
        if ticket.generation != self.generation {
            return false;
        }
        tracing::debug!(generation = ticket.generation, "search ended without results");
        self.loading = false;
        true
    }

    /// True while the latest search has not finished.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Gives back the slot, e.g. to reopen a store over it.
    pub fn into_slot(self) -> S {
        self.slot
    }
}

fn dedupe(records: Vec<BusinessRecord>) -> Vec<BusinessRecord> {
    let before = records.len();
    let mut seen = HashSet::with_capacity(before);
    let kept: Vec<BusinessRecord> = records
        .into_iter()
        .filter(|r| seen.insert(r.id.clone()))
        .collect();
    if kept.len() < before {
        tracing::debug!(dropped = before - kept.len(), "duplicate business ids dropped");
    }
    kept
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
