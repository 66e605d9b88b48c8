//! ironlog - Personal strength training tracker

use anyhow::{Result, bail};
use chrono::Utc;
use clap::{Parser, Subcommand};
use serde::Serialize;

use ironlog::analytics::volume::Effort;
use ironlog::analytics::{classify_training_phase, MuscleVolumeResult};
use ironlog::db::{Database, NewSet};
use ironlog::exercises::{find_exercise, get_all_exercises};
use ironlog::tui::App;
use ironlog::Analytics;

#[derive(Parser)]
#[command(name = "ironlog")]
#[command(author, version, about = "Personal strength training tracker")]
struct Cli {
    /// SQLite database path
    #[arg(long, global = true, env = "IRONLOG_DB", default_value = "ironlog.db")]
    db: String,

    /// Planned sessions per week
    #[arg(long, global = true, env = "IRONLOG_PLANNED_SESSIONS", default_value = "3")]
    planned: u32,

    /// Print analytics as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open TUI dashboard
    Tui,

    /// Start a workout
    Start {
        /// Program day label (e.g. "A", "upper")
        #[arg(short, long)]
        day: Option<String>,
    },

    /// Log a set
    Log {
        /// Workout id
        workout: i64,

        /// Exercise id (e.g. "bench_press", "back_squat")
        exercise: String,

        #[arg(short, long)]
        reps: u32,

        /// Load in kg
        #[arg(short, long, default_value = "0")]
        load: f64,

        /// easy, productive, hard or failure
        #[arg(short, long, default_value = "productive")]
        effort: String,

        #[arg(short, long)]
        warmup: bool,

        /// Top of the target rep range (defaults to the program range)
        #[arg(short, long)]
        target: Option<u32>,
    },

    /// Complete a workout
    Complete {
        workout: i64,
    },

    /// List recent workouts
    List {
        #[arg(short, long, default_value = "10")]
        limit: usize,
    },

    /// List known exercises
    Exercises,

    /// Volume per muscle group; defaults to the current rolling week
    Volume {
        /// Range start (RFC 3339)
        start: Option<String>,
        /// Range end, exclusive (RFC 3339)
        end: Option<String>,
    },

    /// Load suggestion for an exercise
    Suggest {
        exercise: String,
    },

    /// Progression rate for an exercise
    Rate {
        exercise: String,
    },

    /// Current rolling week summary
    Week,

    /// Training phase, from the first workout or for a given number of weeks
    Phase {
        weeks: Option<f64>,
    },
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_volume(results: &[MuscleVolumeResult]) {
    println!("{:<12} {:>6}  {:<8} {}", "Muscle", "Sets", "Zone", "Optimal");
    println!("{:-<44}", "");
    for r in results {
        println!(
            "{:<12} {:>6.1}  {:<8} {}-{}",
            r.display_name,
            r.effective_sets,
            format!("{:?}", r.zone).to_uppercase(),
            r.thresholds.optimal_low,
            r.thresholds.optimal_high,
        );
    }
}

fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let db = Database::open(&cli.db)?;
    let analytics = Analytics::new(&db);

    match cli.command {
        Some(Commands::Tui) | None => {
            let mut app = App::new(&db, cli.planned)?;
            app.run()?;
        }

        Some(Commands::Start { day }) => {
            let id = db.start_workout(Utc::now(), day.as_deref())?;
            println!("Started workout {}", id);
        }

        Some(Commands::Log { workout, exercise, reps, load, effort, warmup, target }) => {
            let effort: Effort = effort.parse()?;
            let set = NewSet {
                workout_id: workout,
                exercise_id: exercise.clone(),
                reps,
                load_kg: load,
                effort,
                is_warmup: warmup,
                target_rep_high: target,
                logged_at: Utc::now(),
            };
            let id = db.add_set(&set)?;
            println!("Logged: {} - {} x {} kg (id: {})", exercise, reps, load, id);
        }

        Some(Commands::Complete { workout }) => {
            db.complete_workout(workout, Utc::now())?;
            println!("Completed workout {}", workout);
        }

        Some(Commands::List { limit }) => {
            let workouts = db.get_workouts(limit)?;
            println!("Recent workouts:");
            println!("{:-<60}", "");
            for w in workouts {
                let sets = db.get_workout_sets(w.id)?;
                println!(
                    "#{:<4} | {} | {:6} | {:>3} sets | {}",
                    w.id,
                    w.started_at.format("%Y-%m-%d %H:%M"),
                    w.program_day.as_deref().unwrap_or("-"),
                    sets.len(),
                    if w.completed_at.is_some() { "done" } else { "open" }
                );
            }
        }

        Some(Commands::Exercises) => {
            for ex in get_all_exercises() {
                println!(
                    "{:<24} {:<24} {:<10} {}-{}",
                    ex.id,
                    ex.name,
                    ex.category.as_str(),
                    ex.rep_range.0,
                    ex.rep_range.1
                );
            }
        }

        Some(Commands::Volume { start, end }) => {
            let results = match (start, end) {
                (Some(start), Some(end)) => {
                    analytics.calculate_volume_for_date_range(&start, &end)?
                }
                (None, None) => match analytics.current_week(Utc::now())? {
                    Some(window) => analytics.volume_between(window.start, window.end)?,
                    None => {
                        println!("No completed workouts yet");
                        return Ok(());
                    }
                },
                _ => bail!("give both start and end, or neither"),
            };

            if cli.json {
                print_json(&results)?;
            } else {
                print_volume(&results);
            }
        }

        Some(Commands::Suggest { exercise }) => {
            if find_exercise(&exercise).is_none() {
                bail!("unknown exercise: {}", exercise);
            }
            let suggestion = analytics.suggest_progression(&exercise)?;
            if cli.json {
                print_json(&suggestion)?;
            } else if let Some(s) = suggestion {
                println!(
                    "{}: go to {} kg (+{}%)",
                    exercise, s.suggested_load_kg, s.increase_percent
                );
                println!("{}", s.reason);
            } else {
                println!("{}: keep the current load", exercise);
            }
        }

        Some(Commands::Rate { exercise }) => {
            let rate = analytics.progression_rate(&exercise)?;
            if cli.json {
                print_json(&rate)?;
            } else {
                println!("Sessions: {} over {:.1} weeks", rate.session_count, rate.weeks_of_data);
                if rate.has_enough_data {
                    println!("Trend: {:+.2} kg/week (estimated 1RM)", rate.actual_rate_kg_per_week);
                } else {
                    println!("Trend: not enough data yet (need 4 sessions over 2 weeks)");
                }
                if let (Some(reference), Some(label)) =
                    (rate.reference_rate_kg_per_week, rate.reference_label)
                {
                    println!("Reference: {:.2} kg/week - {}", reference, label);
                }
            }
        }

        Some(Commands::Week) => {
            let Some(summary) = analytics.week_summary(Utc::now(), cli.planned)? else {
                println!("No completed workouts yet");
                return Ok(());
            };
            if cli.json {
                print_json(&summary)?;
            } else {
                println!(
                    "Week {} ({} - {})",
                    summary.window.week_number + 1,
                    summary.window.start.format("%Y-%m-%d"),
                    summary.window.end.format("%Y-%m-%d"),
                );
                println!("Phase: {}", summary.phase.title);
                println!("Sessions: {}/{}", summary.adherence.completed, summary.adherence.planned);
                println!();
                print_volume(&summary.volume);
            }
        }

        Some(Commands::Phase { weeks }) => {
            let info = match weeks {
                Some(w) => Some(classify_training_phase(w)),
                None => analytics.training_phase(Utc::now())?,
            };
            match info {
                Some(info) if cli.json => print_json(&info)?,
                Some(info) => {
                    println!("{}", info.title);
                    println!("{}", info.description);
                    println!("Source: {}", info.citation);
                }
                None => println!("No completed workouts yet"),
            }
        }
    }

    Ok(())
}
