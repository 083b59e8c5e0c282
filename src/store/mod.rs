//! Store module - single source of truth for the workout collection
//!
//! Owns the in-memory list of workouts and persists it wholesale as one
//! JSON document under a fixed key on every mutation. Persistence is
//! write-then-commit: the prospective collection is serialized and written
//! first, and in-memory state only changes after the write succeeds, so a
//! failed write leaves memory and disk consistent.

use anyhow::{Context, Result};
use tracing::warn;

use crate::model::Workout;
use crate::storage::BlobStore;

/// Fixed key the whole collection is stored under.
pub const WORKOUTS_KEY: &str = "workouts";

/// Sort order for the log listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    /// Most recent first.
    Date,
    /// Alphabetical by workout name.
    Name,
}

/// Canonical in-memory + persisted workout collection.
pub struct WorkoutStore {
    storage: Box<dyn BlobStore>,
    workouts: Vec<Workout>,
}

impl WorkoutStore {
    /// Load the collection from storage. A missing document means an empty
    /// collection; a read failure or malformed document also degrades to
    /// empty, logged rather than surfaced. The store never errors at open.
    pub fn open(storage: Box<dyn BlobStore>) -> Self {
        let workouts = load(storage.as_ref());
        Self { storage, workouts }
    }

    /// Re-read the collection from storage, picking up writes made behind
    /// the store's back. Same failure policy as [`WorkoutStore::open`].
    pub fn reload(&mut self) {
        self.workouts = load(self.storage.as_ref());
    }

    fn persist(&self, workouts: &[Workout]) -> Result<()> {
        let doc = serde_json::to_string(workouts).context("serializing workouts")?;
        self.storage
            .set(WORKOUTS_KEY, &doc)
            .context("writing workout document")
    }

    /// Append a workout. The caller assigns the id; no uniqueness check
    /// or merge is performed here.
    pub fn add(&mut self, workout: Workout) -> Result<()> {
        let mut next = self.workouts.clone();
        next.push(workout);
        self.persist(&next)?;
        self.workouts = next;
        Ok(())
    }

    /// Replace the record with a matching id, keeping its position.
    /// Returns `Ok(false)` when no record matches; nothing is written.
    pub fn update(&mut self, workout: Workout) -> Result<bool> {
        let Some(pos) = self.workouts.iter().position(|w| w.id == workout.id) else {
            return Ok(false);
        };
        let mut next = self.workouts.clone();
        next[pos] = workout;
        self.persist(&next)?;
        self.workouts = next;
        Ok(true)
    }

    /// Remove the record with a matching id. Returns `Ok(false)` when no
    /// record matches; nothing is written.
    pub fn delete(&mut self, id: &str) -> Result<bool> {
        let Some(pos) = self.workouts.iter().position(|w| w.id == id) else {
            return Ok(false);
        };
        let mut next = self.workouts.clone();
        next.remove(pos);
        self.persist(&next)?;
        self.workouts = next;
        Ok(true)
    }

    pub fn get(&self, id: &str) -> Option<&Workout> {
        self.workouts.iter().find(|w| w.id == id)
    }

    /// Full collection in insertion order.
    pub fn all(&self) -> &[Workout] {
        &self.workouts
    }

    pub fn len(&self) -> usize {
        self.workouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workouts.is_empty()
    }

    /// Most recent workouts by date, at most `limit`. Sorts a copy, so
    /// the master insertion order is never disturbed. Unparsable dates
    /// sort last.
    pub fn recent(&self, limit: usize) -> Vec<Workout> {
        let mut sorted = self.workouts.clone();
        sorted.sort_by(|a, b| b.parsed_date().cmp(&a.parsed_date()));
        sorted.truncate(limit);
        sorted
    }

    /// Log listing: case-insensitive substring filter over workout names
    /// and set exercise names, then sorted. An empty query matches all.
    pub fn filter(&self, query: &str, sort: SortKey) -> Vec<Workout> {
        let query = query.to_lowercase();
        let mut matched: Vec<Workout> = self
            .workouts
            .iter()
            .filter(|w| {
                w.name.to_lowercase().contains(&query)
                    || w.sets
                        .iter()
                        .any(|s| s.exercise.to_lowercase().contains(&query))
            })
            .cloned()
            .collect();
        match sort {
            SortKey::Date => matched.sort_by(|a, b| b.parsed_date().cmp(&a.parsed_date())),
            SortKey::Name => {
                matched.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
            }
        }
        matched
    }
}

fn load(storage: &dyn BlobStore) -> Vec<Workout> {
    match storage.get(WORKOUTS_KEY) {
        Ok(Some(doc)) => match serde_json::from_str(&doc) {
            Ok(workouts) => workouts,
            Err(err) => {
                warn!("malformed workout document, starting empty: {err}");
                Vec::new()
            }
        },
        Ok(None) => Vec::new(),
        Err(err) => {
            warn!("failed to load workouts, starting empty: {err}");
            Vec::new()
        }
    }
}
