mod engine;
mod session;

pub use engine::{format_clock, CompletionPolicy, TimerAction, TimerState, WorkoutTimer};
pub use session::{TimerSession, DEFAULT_TICK_INTERVAL};
