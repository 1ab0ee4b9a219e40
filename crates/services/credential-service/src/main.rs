//! Credential Service - storage administration and registration CLI.

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use credential_service_lib::MigrateAction;

#[derive(Parser)]
#[command(name = "credential-service")]
#[command(about = "Credential storage and registration")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Database migration commands
    Migrate {
        #[command(subcommand)]
        action: MigrateCommands,
    },
    /// Register a new credential
    Register {
        #[arg(long)]
        email: String,
        #[arg(long, env = "REGISTER_PASSWORD", hide_env_values = true)]
        password: String,
    },
}

#[derive(Subcommand)]
enum MigrateCommands {
    /// Run pending migrations
    Up,
    /// Rollback last migration
    Down,
    /// Show migration status
    Status,
    /// Reset database and run all migrations
    Fresh,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Migrate { action } => {
            let migrate_action = match action {
                MigrateCommands::Up => MigrateAction::Up,
                MigrateCommands::Down => MigrateAction::Down,
                MigrateCommands::Status => MigrateAction::Status,
                MigrateCommands::Fresh => MigrateAction::Fresh,
            };
            credential_service_lib::run_migrations(migrate_action).await?;
        }
        Commands::Register { email, password } => {
            match credential_service_lib::register(&email, &password).await {
                Ok(credential) => println!("{}", serde_json::to_string_pretty(&credential)?),
                Err(err) => {
                    eprintln!("{}", err.report("Registration"));
                    std::process::exit(1);
                }
            }
        }
    }

    Ok(())
}
