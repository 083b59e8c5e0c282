//! Stats module - aggregate views over the workout log

use chrono::{Duration, Utc};

use crate::model::Workout;

/// Workout log aggregates.
pub struct Stats {
    workouts: Vec<Workout>,
}

impl Stats {
    pub fn new(workouts: Vec<Workout>) -> Self {
        Self { workouts }
    }

    fn this_week(&self) -> impl Iterator<Item = &Workout> {
        // 7 calendar days including today
        let cutoff = Utc::now().date_naive() - Duration::days(6);
        self.workouts
            .iter()
            .filter(move |w| w.parsed_date().is_some_and(|d| d >= cutoff))
    }

    /// Workouts logged in the last 7 days.
    pub fn workouts_this_week(&self) -> usize {
        self.this_week().count()
    }

    /// Exercise entries logged in the last 7 days.
    pub fn sets_this_week(&self) -> usize {
        self.this_week().map(|w| w.sets.len()).sum()
    }

    /// Total volume (sets * reps) for an exercise, matched
    /// case-insensitively. Unparsable counts contribute zero; the set
    /// fields are free text by contract.
    pub fn total_volume(&self, exercise: &str) -> i64 {
        let exercise = exercise.to_lowercase();
        self.workouts
            .iter()
            .flat_map(|w| &w.sets)
            .filter(|s| s.exercise.to_lowercase().contains(&exercise))
            .map(|s| {
                let sets: i64 = s.sets.trim().parse().unwrap_or(0);
                let reps: i64 = s.reps.trim().parse().unwrap_or(0);
                sets * reps
            })
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::WorkoutSet;

    fn create_set(exercise: &str, sets: &str, reps: &str) -> WorkoutSet {
        WorkoutSet {
            id: exercise.to_string(),
            exercise: exercise.to_string(),
            sets: sets.to_string(),
            reps: reps.to_string(),
            weight: String::new(),
            notes: String::new(),
        }
    }

    fn create_workout_days_ago(name: &str, days_ago: i64, sets: Vec<WorkoutSet>) -> Workout {
        Workout {
            id: name.to_string(),
            name: name.to_string(),
            date: (Utc::now().date_naive() - Duration::days(days_ago)).to_string(),
            sets,
            video_uri: None,
        }
    }

    #[test]
    fn test_empty_log() {
        let stats = Stats::new(vec![]);
        assert_eq!(stats.workouts_this_week(), 0);
        assert_eq!(stats.sets_this_week(), 0);
        assert_eq!(stats.total_volume("bench"), 0);
    }

    #[test]
    fn test_this_week_excludes_old_workouts() {
        let stats = Stats::new(vec![
            create_workout_days_ago("Today", 0, vec![create_set("bench", "3", "8")]),
            create_workout_days_ago("Recent", 3, vec![create_set("squat", "5", "5")]),
            create_workout_days_ago("Old", 30, vec![create_set("deadlift", "1", "5")]),
        ]);
        assert_eq!(stats.workouts_this_week(), 2);
        assert_eq!(stats.sets_this_week(), 2);
    }

    #[test]
    fn test_this_week_window_boundary() {
        let stats = Stats::new(vec![
            create_workout_days_ago("Edge", 6, vec![create_set("bench", "3", "8")]),
            create_workout_days_ago("Past", 7, vec![create_set("squat", "5", "5")]),
        ]);
        // 6 days ago is the 7th day of the window; 7 days ago falls out
        assert_eq!(stats.workouts_this_week(), 1);
        assert_eq!(stats.sets_this_week(), 1);
    }

    #[test]
    fn test_total_volume_sums_matching_sets() {
        let stats = Stats::new(vec![
            create_workout_days_ago(
                "Push",
                0,
                vec![create_set("Bench Press", "3", "8"), create_set("dips", "3", "12")],
            ),
            create_workout_days_ago("Push 2", 2, vec![create_set("bench press", "2", "10")]),
        ]);
        // 3*8 + 2*10
        assert_eq!(stats.total_volume("bench"), 44);
    }

    #[test]
    fn test_total_volume_ignores_unparsable_counts() {
        let stats = Stats::new(vec![create_workout_days_ago(
            "Push",
            0,
            vec![create_set("bench", "a few", "8")],
        )]);
        assert_eq!(stats.total_volume("bench"), 0);
    }
}
