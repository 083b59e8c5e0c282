//! Model module - workout session records
//!
//! Field values are kept as the user typed them: sets/reps/weight are
//! numeric-ish strings with no validation, dates are ISO `YYYY-MM-DD`.
//! The persisted document is a JSON array of [`Workout`] records.

use anyhow::{bail, Context, Result};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One exercise entry within a workout. Immutable once added.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutSet {
    pub id: String,
    pub exercise: String,
    pub sets: String,
    pub reps: String,
    pub weight: String,
    pub notes: String,
}

/// One logged workout session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workout {
    pub id: String,
    pub name: String,
    pub date: String,
    pub sets: Vec<WorkoutSet>,
    /// Path to an associated recorded video, absent until linked.
    #[serde(rename = "videoUri", default, skip_serializing_if = "Option::is_none")]
    pub video_uri: Option<String>,
}

/// Opaque unique id derived from the current time.
pub fn generate_id() -> String {
    Utc::now().timestamp_millis().to_string()
}

impl Workout {
    /// New empty workout dated today unless a date is given.
    pub fn new(name: impl Into<String>, date: Option<String>) -> Self {
        Self {
            id: generate_id(),
            name: name.into(),
            date: date.unwrap_or_else(|| Utc::now().date_naive().to_string()),
            sets: Vec::new(),
            video_uri: None,
        }
    }

    /// Date parsed for ordering; unparsable dates sort last.
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").ok()
    }
}

impl WorkoutSet {
    /// Parse a CLI set spec: `exercise:SETSxREPS[@WEIGHT][;NOTES]`,
    /// e.g. `bench press:3x8@80;paused reps`.
    pub fn parse_spec(spec: &str) -> Result<Self> {
        let (exercise, rest) = spec
            .split_once(':')
            .with_context(|| format!("missing ':' in set spec '{spec}'"))?;
        let exercise = exercise.trim();
        if exercise.is_empty() {
            bail!("empty exercise name in set spec '{spec}'");
        }

        let (scheme, notes) = match rest.split_once(';') {
            Some((s, n)) => (s, n.trim().to_string()),
            None => (rest, String::new()),
        };
        let (counts, weight) = match scheme.split_once('@') {
            Some((c, w)) => (c, w.trim().to_string()),
            None => (scheme, String::new()),
        };
        let (sets, reps) = counts
            .split_once(['x', 'X'])
            .with_context(|| format!("expected SETSxREPS in set spec '{spec}'"))?;

        Ok(Self {
            id: generate_id(),
            exercise: exercise.to_string(),
            sets: sets.trim().to_string(),
            reps: reps.trim().to_string(),
            weight,
            notes,
        })
    }
}
