use castletics_core::storage::{NewWorkout, WorkoutChanges, WorkoutQuery};
use castletics_core::Config;
use castletics_core::workouts::{self, Category, Workout};
use chrono::{DateTime, NaiveDate, Utc};
use clap::Subcommand;

use super::{parse_date, parse_timestamp, print_json, today, CmdResult, Context};

#[derive(Subcommand)]
pub enum WorkoutAction {
    /// Show the workout of the day
    Today {
        /// Day to show (defaults to today)
        #[arg(long, value_parser = parse_date)]
        date: Option<NaiveDate>,
    },
    /// List catalog workouts
    List {
        /// upper, lower, core or full
        #[arg(long)]
        category: Option<Category>,
    },
    /// Pick a random workout
    Random,
    /// Show one catalog workout by name
    Show { name: String },
    /// Log a completed workout and update the streak
    Log {
        #[arg(long)]
        fid: u64,
        /// Workout name (defaults to the workout of the day)
        #[arg(long = "type")]
        workout_type: Option<String>,
        #[arg(long)]
        duration: Option<u32>,
        #[arg(long)]
        calories: Option<u32>,
        #[arg(long)]
        notes: Option<String>,
        /// Completion time, RFC 3339 (defaults to now)
        #[arg(long, value_parser = parse_timestamp)]
        at: Option<DateTime<Utc>>,
    },
    /// Edit one of a user's logged workouts (the streak is not recalculated)
    Update {
        #[arg(long)]
        fid: u64,
        /// Workout entry ID
        id: String,
        #[arg(long = "type")]
        workout_type: Option<String>,
        #[arg(long)]
        duration: Option<u32>,
        #[arg(long)]
        calories: Option<u32>,
        #[arg(long)]
        notes: Option<String>,
        /// Completion time, RFC 3339
        #[arg(long, value_parser = parse_timestamp)]
        at: Option<DateTime<Utc>>,
    },
    /// A user's workout history, newest first
    History {
        #[arg(long)]
        fid: u64,
        #[arg(long)]
        limit: Option<usize>,
        #[arg(long)]
        offset: Option<usize>,
        /// First day to include
        #[arg(long, value_parser = parse_date)]
        since: Option<NaiveDate>,
        /// Last day to include
        #[arg(long, value_parser = parse_date)]
        until: Option<NaiveDate>,
    },
    /// Recent workouts across all users
    Feed {
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Totals for a user
    Stats {
        #[arg(long)]
        fid: u64,
    },
    /// Delete one of a user's workouts
    Delete {
        #[arg(long)]
        fid: u64,
        /// Workout entry ID
        id: String,
    },
    /// Whether the user has already worked out today
    Done {
        #[arg(long)]
        fid: u64,
        #[arg(long, value_parser = parse_date)]
        date: Option<NaiveDate>,
    },
}

pub fn run(action: WorkoutAction) -> CmdResult {
    match action {
        WorkoutAction::Today { date } => {
            let date = match date {
                Some(date) => date,
                None => today(&Config::load()?),
            };
            print_json(workouts::workout_of_the_day(date))?;
        }
        WorkoutAction::List { category } => {
            let list: Vec<&Workout> = match category {
                Some(c) => workouts::workouts_by_category(c).collect(),
                None => workouts::all().iter().collect(),
            };
            print_json(&list)?;
        }
        WorkoutAction::Random => print_json(workouts::random_workout())?,
        WorkoutAction::Show { name } => match workouts::find_workout(&name) {
            Some(w) => print_json(w)?,
            None => return Err(format!("no workout named '{name}'").into()),
        },
        WorkoutAction::Log {
            fid,
            workout_type,
            duration,
            calories,
            notes,
            at,
        } => {
            let ctx = Context::open()?;
            let service = ctx.service();
            let user = ctx.user(fid)?;
            let (workout_type, duration) = match workout_type {
                Some(name) => {
                    let known = workouts::find_workout(&name);
                    (
                        known.map_or(name, |w| w.name.to_string()),
                        duration.or(known.map(|w| w.duration)),
                    )
                }
                None => {
                    let w = workouts::workout_of_the_day(service.today());
                    (w.name.to_string(), duration.or(Some(w.duration)))
                }
            };
            let logged = service.log_workout(NewWorkout {
                user_id: user.id,
                workout_type,
                duration_minutes: duration,
                calories_burned: calories,
                notes,
                completed_at: at,
            })?;
            print_json(&logged.event())?;
            print_json(&logged.entry)?;
        }
        WorkoutAction::Update {
            fid,
            id,
            workout_type,
            duration,
            calories,
            notes,
            at,
        } => {
            let ctx = Context::open()?;
            let user = ctx.user(fid)?;
            let entry = ctx.service().update_workout(
                &id,
                &user.id,
                WorkoutChanges {
                    workout_type,
                    duration_minutes: duration,
                    calories_burned: calories,
                    notes,
                    completed_at: at,
                },
            )?;
            print_json(&entry)?;
        }
        WorkoutAction::History {
            fid,
            limit,
            offset,
            since,
            until,
        } => {
            let ctx = Context::open()?;
            let service = ctx.service();
            let user = ctx.user(fid)?;
            let query = WorkoutQuery {
                limit,
                offset,
                start: since.map(|d| service.day_bounds(d).0),
                end: until.map(|d| service.day_bounds(d).1),
            };
            print_json(&service.user_workouts(&user.id, &query)?)?;
        }
        WorkoutAction::Feed { limit } => {
            let ctx = Context::open()?;
            print_json(&ctx.service().recent_workouts(limit)?)?;
        }
        WorkoutAction::Stats { fid } => {
            let ctx = Context::open()?;
            let user = ctx.user(fid)?;
            print_json(&ctx.service().user_workout_stats(&user.id)?)?;
        }
        WorkoutAction::Delete { fid, id } => {
            let ctx = Context::open()?;
            let user = ctx.user(fid)?;
            ctx.service().delete_workout(&id, &user.id)?;
            println!("deleted {id}");
        }
        WorkoutAction::Done { fid, date } => {
            let ctx = Context::open()?;
            let service = ctx.service();
            let user = ctx.user(fid)?;
            let day = date.unwrap_or_else(|| service.today());
            println!("{}", service.has_worked_out_today(&user.id, day)?);
        }
    }
    Ok(())
}
