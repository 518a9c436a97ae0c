use castletics_core::storage::{Profile, UserChanges};
use clap::Subcommand;

use super::{print_json, CmdResult, Context};

#[derive(Subcommand)]
pub enum UserAction {
    /// Register a user, or update the profile of an existing one
    Register {
        /// Farcaster ID
        #[arg(long)]
        fid: u64,
        #[arg(long)]
        username: Option<String>,
        #[arg(long)]
        display_name: Option<String>,
        #[arg(long)]
        bio: Option<String>,
        #[arg(long)]
        pfp_url: Option<String>,
    },
    /// Change profile fields of a registered user
    Update {
        /// Farcaster ID
        #[arg(long)]
        fid: u64,
        #[arg(long)]
        username: Option<String>,
        #[arg(long)]
        display_name: Option<String>,
        #[arg(long)]
        bio: Option<String>,
        #[arg(long)]
        pfp_url: Option<String>,
    },
    /// Show a user
    Show {
        #[arg(long)]
        fid: u64,
    },
}

pub fn run(action: UserAction) -> CmdResult {
    let ctx = Context::open()?;
    match action {
        UserAction::Register {
            fid,
            username,
            display_name,
            bio,
            pfp_url,
        } => {
            let user = ctx.service().get_or_create_user(&Profile {
                farcaster_id: fid,
                username,
                display_name,
                bio,
                pfp_url,
            })?;
            print_json(&user)?;
        }
        UserAction::Update {
            fid,
            username,
            display_name,
            bio,
            pfp_url,
        } => {
            let changes = UserChanges {
                username,
                display_name,
                bio,
                pfp_url,
            };
            if changes.is_empty() {
                return Err("nothing to update: pass at least one profile field".into());
            }
            let user = ctx.user(fid)?;
            print_json(&ctx.service().update_user(&user.id, &changes)?)?;
        }
        UserAction::Show { fid } => {
            print_json(&ctx.user(fid)?)?;
        }
    }
    Ok(())
}
