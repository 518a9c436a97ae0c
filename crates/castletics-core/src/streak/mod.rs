mod calculator;

pub use calculator::{
    days_between, StreakCalculator, StreakChange, StreakRecord, StreakUpdate, CONSECUTIVE_DAY_GAP,
    DECAY_GRACE_DAYS,
};
