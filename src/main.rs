//! liftlog - Personal workout tracker
//!
//! CLI + TUI front end over the JSON-backed workout store.

use anyhow::{bail, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::io::{self, Write};

use liftlog::model::{Workout, WorkoutSet};
use liftlog::stats::Stats;
use liftlog::storage::FileStore;
use liftlog::store::{SortKey, WorkoutStore};
use liftlog::tui::App;

const DEFAULT_DATA_DIR: &str = "liftlog-data";

#[derive(Parser)]
#[command(name = "liftlog")]
#[command(author, version, about = "Personal workout tracker")]
struct Cli {
    /// Data directory for the workout log
    #[arg(long, env = "LIFTLOG_DATA_DIR", default_value = DEFAULT_DATA_DIR)]
    data_dir: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SortArg {
    Date,
    Name,
}

impl From<SortArg> for SortKey {
    fn from(sort: SortArg) -> Self {
        match sort {
            SortArg::Date => SortKey::Date,
            SortArg::Name => SortKey::Name,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Open TUI dashboard
    Tui,

    /// Log a workout session
    Add {
        /// Workout name (e.g., "Push Day")
        name: String,

        /// Date as YYYY-MM-DD (defaults to today)
        #[arg(short, long)]
        date: Option<String>,

        /// Set spec: exercise:SETSxREPS[@WEIGHT][;NOTES], repeatable
        #[arg(short, long = "set", required = true)]
        sets: Vec<String>,
    },

    /// List the workout log
    List {
        /// Filter by workout name or exercise
        #[arg(short, long, default_value = "")]
        query: String,

        /// Sort order
        #[arg(long, value_enum, default_value = "date")]
        sort: SortArg,
    },

    /// Show the most recent workouts
    Recent {
        /// Number of workouts to show
        #[arg(short, long, default_value = "5")]
        limit: usize,
    },

    /// Delete a workout
    Delete {
        /// Workout id (shown by list)
        id: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Link a recorded video to a workout
    Attach {
        /// Workout id (shown by list)
        id: String,

        /// Path to the video file
        video: String,
    },

    /// Show workout statistics
    Stats {
        /// Filter by exercise name
        exercise: Option<String>,
    },
}

fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let storage = FileStore::open(&cli.data_dir)?;
    let mut store = WorkoutStore::open(Box::new(storage));

    match cli.command {
        Some(Commands::Tui) | None => {
            let mut app = App::new(store);
            app.run()?;
        }

        Some(Commands::Add { name, date, sets }) => {
            let mut workout = Workout::new(name.clone(), date);
            for spec in &sets {
                workout.sets.push(WorkoutSet::parse_spec(spec)?);
            }
            let count = workout.sets.len();
            let id = workout.id.clone();
            store.add(workout)?;
            println!("Logged: {} - {} set(s) (id: {})", name, count, id);
        }

        Some(Commands::List { query, sort }) => {
            let workouts = store.filter(&query, sort.into());
            println!("Workout Logs ({} total)", store.len());
            println!("{:-<72}", "");
            if workouts.is_empty() {
                if query.is_empty() {
                    println!("No workouts logged yet");
                } else {
                    println!("No workouts match your search");
                }
            }
            for w in &workouts {
                print_workout(w);
            }
        }

        Some(Commands::Recent { limit }) => {
            println!("Recent workouts:");
            println!("{:-<72}", "");
            for w in store.recent(limit) {
                print_workout(&w);
            }
        }

        Some(Commands::Delete { id, yes }) => {
            let Some(workout) = store.get(&id) else {
                bail!("no workout with id {id}");
            };
            if !yes && !confirm(&format!("Delete \"{}\"?", workout.name))? {
                println!("Cancelled");
                return Ok(());
            }
            store.delete(&id)?;
            println!("Deleted workout {id}");
        }

        Some(Commands::Attach { id, video }) => {
            let Some(workout) = store.get(&id) else {
                bail!("no workout with id {id}");
            };
            let mut linked = workout.clone();
            linked.video_uri = Some(video.clone());
            store.update(linked)?;
            println!("Linked {} to workout {}", video, id);
        }

        Some(Commands::Stats { exercise }) => {
            let stats = Stats::new(store.all().to_vec());

            println!("Workout Statistics");
            println!("{:-<40}", "");

            if let Some(ex) = exercise {
                println!("Exercise: {}", ex);
                println!("Total volume: {} reps", stats.total_volume(&ex));
            } else {
                println!("This week: {} workouts", stats.workouts_this_week());
                println!("This week: {} exercises", stats.sets_this_week());
            }
        }
    }

    Ok(())
}

fn print_workout(w: &Workout) {
    let exercises = w
        .sets
        .iter()
        .map(|s| s.exercise.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    println!(
        "{} | {:20} | {} set(s) | {} | id: {}",
        w.date,
        w.name,
        w.sets.len(),
        if w.video_uri.is_some() { "video" } else { "-" },
        w.id
    );
    if !exercises.is_empty() {
        println!("             {}", exercises);
    }
}

fn confirm(prompt: &str) -> Result<bool> {
    print!("{prompt} [y/N] ");
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}
