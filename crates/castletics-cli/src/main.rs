use clap::{Parser, Subcommand};

mod commands;
mod logging;

#[derive(Parser)]
#[command(name = "castletics", version, about = "Castletics fitness CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign-in challenges and verification
    Auth {
        #[command(subcommand)]
        action: commands::auth::AuthAction,
    },
    /// Workout catalog and workout log
    Workout {
        #[command(subcommand)]
        action: commands::workout::WorkoutAction,
    },
    /// Streak tracking
    Streak {
        #[command(subcommand)]
        action: commands::streak::StreakAction,
    },
    /// User management
    User {
        #[command(subcommand)]
        action: commands::user::UserAction,
    },
    /// Workout timer
    Timer {
        #[command(subcommand)]
        action: commands::timer::TimerAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    let cli = Cli::parse();
    logging::init();

    let result = match cli.command {
        Commands::Auth { action } => commands::auth::run(action),
        Commands::Workout { action } => commands::workout::run(action),
        Commands::Streak { action } => commands::streak::run(action),
        Commands::User { action } => commands::user::run(action),
        Commands::Timer { action } => commands::timer::run(action),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
