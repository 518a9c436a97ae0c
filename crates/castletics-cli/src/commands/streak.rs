use chrono::{NaiveDate, Utc};
use clap::Subcommand;

use super::{parse_date, print_json, CmdResult, Context};

#[derive(Subcommand)]
pub enum StreakAction {
    /// Show a user's stored streak
    Show {
        #[arg(long)]
        fid: u64,
    },
    /// Apply the daily check and persist a broken streak
    Check {
        #[arg(long)]
        fid: u64,
        /// Day to check against (defaults to today)
        #[arg(long, value_parser = parse_date)]
        date: Option<NaiveDate>,
    },
    /// Zero the current streak (longest is kept)
    Reset {
        #[arg(long)]
        fid: u64,
    },
    /// Highest current streaks
    Leaderboard {
        #[arg(long)]
        limit: Option<usize>,
    },
}

pub fn run(action: StreakAction) -> CmdResult {
    let ctx = Context::open()?;
    let service = ctx.service();

    match action {
        StreakAction::Show { fid } => {
            let user = ctx.user(fid)?;
            let record = service.get_user_streak(&user.id)?.unwrap_or_default();
            print_json(&record)?;
        }
        StreakAction::Check { fid, date } => {
            let user = ctx.user(fid)?;
            let today = date.unwrap_or_else(|| service.today());
            let check = service.check_streak_status(&user.id, today)?;
            if let Some(event) = check.event(&user.id, Utc::now()) {
                print_json(&event)?;
            }
            print_json(&check.record)?;
        }
        StreakAction::Reset { fid } => {
            let user = ctx.user(fid)?;
            print_json(&service.reset_user_streak(&user.id)?)?;
        }
        StreakAction::Leaderboard { limit } => {
            print_json(&service.streak_leaderboard(limit)?)?;
        }
    }
    Ok(())
}
