//! liftlog - Personal workout tracker
//!
//! Workout sessions with sets, optional linked videos, and a JSON-backed
//! log persisted through a key-value blob store.

pub mod model;
pub mod stats;
pub mod storage;
pub mod store;
pub mod tui;

pub use model::{Workout, WorkoutSet};
pub use store::WorkoutStore;
