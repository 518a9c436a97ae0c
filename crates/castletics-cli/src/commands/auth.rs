use castletics_core::api::{self, VerifySignInRequest};
use castletics_core::storage::Profile;
use castletics_core::{ChallengeManager, HmacSignInVerifier, SignInFlow, SignInMessage};
use chrono::Utc;
use clap::Subcommand;
use serde::Serialize;

use super::{print_json, CmdResult, Context};

#[derive(Subcommand)]
pub enum AuthAction {
    /// Issue a fresh sign-in nonce
    Nonce,
    /// Build and sign a sign-in message with the configured secret
    Sign {
        /// Farcaster ID to sign in as
        #[arg(long)]
        fid: u64,
        /// Nonce obtained from `auth nonce`
        #[arg(long)]
        nonce: String,
        /// Domain requesting the sign-in
        #[arg(long)]
        domain: Option<String>,
    },
    /// Verify a signed message and register the signer
    Verify {
        /// Signed message text
        #[arg(long)]
        message: Option<String>,
        /// Hex signature
        #[arg(long)]
        signature: Option<String>,
    },
    /// Drop expired challenges
    Purge,
}

#[derive(Serialize)]
struct SignedMessage {
    message: String,
    signature: String,
}

pub fn run(action: AuthAction) -> CmdResult {
    let ctx = Context::open()?;
    let challenges = ChallengeManager::from_config(&ctx.db, &ctx.config);

    match action {
        AuthAction::Nonce => {
            print_json(&api::issue_nonce(&challenges)?)?;
        }
        AuthAction::Sign { fid, nonce, domain } => {
            let verifier = HmacSignInVerifier::from_config(&ctx.config)?;
            let mut message = SignInMessage::new(fid, nonce).issued_at(Utc::now());
            if let Some(domain) = domain {
                message = message.with_domain(domain);
            }
            let message = message.render();
            let signature = verifier.sign(&message)?;
            print_json(&SignedMessage { message, signature })?;
        }
        AuthAction::Verify { message, signature } => {
            let _span = tracing::info_span!("auth_verify").entered();
            let verifier = HmacSignInVerifier::from_config(&ctx.config)?;
            let flow = SignInFlow::new(challenges, verifier);
            let response = api::verify_sign_in(&flow, &VerifySignInRequest { message, signature })?;
            let user = ctx.service().get_or_create_user(&Profile {
                farcaster_id: response.fid,
                ..Default::default()
            })?;
            tracing::info!(fid = response.fid, user_id = %user.id, "signed in");
            print_json(&response)?;
        }
        AuthAction::Purge => {
            let purged = challenges.purge_expired(Utc::now())?;
            println!("purged {purged} expired challenge(s)");
        }
    }
    Ok(())
}
