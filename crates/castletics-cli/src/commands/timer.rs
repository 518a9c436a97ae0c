use std::time::Duration;

use castletics_core::storage::NewWorkout;
use castletics_core::timer::format_clock;
use castletics_core::workouts::{self, Workout};
use castletics_core::{Config, Event, TimerSession, WorkoutTimer};
use chrono::NaiveDate;
use clap::Subcommand;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::Instrument;

use super::{print_json, today, CmdResult, Context};

#[derive(Subcommand)]
pub enum TimerAction {
    /// Show the timer thresholds for a workout without starting it
    Plan {
        /// Catalog workout name (defaults to the workout of the day)
        #[arg(long)]
        workout: Option<String>,
    },
    /// Run the timer interactively.
    ///
    /// Reads commands from stdin: start, pause, resume, status, complete,
    /// reset, quit.
    Run {
        /// Catalog workout name (defaults to the workout of the day)
        #[arg(long)]
        workout: Option<String>,
        /// Log the completed workout for this user
        #[arg(long)]
        fid: Option<u64>,
    },
}

fn pick_workout(name: Option<&str>, today: NaiveDate) -> Result<&'static Workout, String> {
    match name {
        Some(name) => workouts::find_workout(name).ok_or_else(|| format!("no workout named '{name}'")),
        None => Ok(workouts::workout_of_the_day(today)),
    }
}

fn emit(event: &Event) -> CmdResult {
    println!("{}", serde_json::to_string(event)?);
    Ok(())
}

pub fn run(action: TimerAction) -> CmdResult {
    match action {
        TimerAction::Plan { workout } => {
            let config = Config::load()?;
            let workout = pick_workout(workout.as_deref(), today(&config))?;
            let timer = WorkoutTimer::with_policy(
                workout.name,
                workout.duration,
                config.completion_policy(),
            );
            print_json(&timer.snapshot())?;
        }
        TimerAction::Run { workout, fid } => {
            let ctx = Context::open()?;
            let workout = pick_workout(workout.as_deref(), today(&ctx.config))?;
            // Fail before the workout, not after it.
            let user = fid.map(|fid| ctx.user(fid)).transpose()?;

            let timer = WorkoutTimer::with_policy(
                workout.name,
                workout.duration,
                ctx.config.completion_policy(),
            );
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()?;
            let span = tracing::info_span!("timer_run", workout = workout.name, fid);
            let completed = runtime.block_on(drive(timer, ctx.config.tick_interval()).instrument(span))?;

            let (Some(Event::WorkoutCompleted { workout, elapsed_secs, at, .. }), Some(user)) =
                (completed, user)
            else {
                tracing::debug!("timer run ended without logging");
                return Ok(());
            };
            let minutes = u32::try_from(elapsed_secs.div_ceil(60)).unwrap_or(u32::MAX);
            let logged = ctx.service().log_workout(NewWorkout {
                user_id: user.id,
                workout_type: workout,
                duration_minutes: Some(minutes),
                completed_at: Some(at),
                ..Default::default()
            })?;
            emit(&logged.event())?;
        }
    }
    Ok(())
}

/// Drive a session from stdin until it completes or the user quits.
/// Returns the completion event, if any.
async fn drive(timer: WorkoutTimer, tick_interval: Duration) -> Result<Option<Event>, Box<dyn std::error::Error>> {
    let (mut session, mut events) = TimerSession::with_tick_interval(timer, tick_interval);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    tracing::debug!(tick = ?tick_interval, "timer session started");
    eprintln!("commands: start, pause, resume, status, complete, reset, quit");
    if let Some(event) = session.start() {
        emit(&event)?;
    }

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    tracing::debug!("stdin closed");
                    return Ok(None);
                };
                let outcome = match line.trim() {
                    "" => None,
                    "start" => session.start(),
                    "pause" => session.pause(),
                    "resume" => session.resume(),
                    "reset" => session.reset(),
                    "status" => {
                        eprintln!("{} {}", session.timer().elapsed_display(), session.timer().status_line());
                        Some(session.timer().snapshot())
                    }
                    "complete" => match session.complete() {
                        Some(event) => {
                            emit(&event)?;
                            return Ok(Some(event));
                        }
                        None => {
                            let timer = session.timer();
                            eprintln!(
                                "cannot complete yet: {} of {} minimum",
                                timer.elapsed_display(),
                                format_clock(timer.min_required_secs())
                            );
                            None
                        }
                    },
                    "quit" | "q" => return Ok(None),
                    other => {
                        tracing::warn!(command = other, "unknown timer command");
                        eprintln!("unknown command: {other}");
                        None
                    }
                };
                if let Some(event) = outcome {
                    emit(&event)?;
                }
            }
            Some(event) = events.recv() => {
                if matches!(event, Event::MinimumReached { .. }) {
                    eprintln!("{}", session.timer().status_line());
                }
                emit(&event)?;
            }
        }
    }
}
