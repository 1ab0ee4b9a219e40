//! Auth Service - login and token CLI.

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use common::AppError;

#[derive(Parser)]
#[command(name = "auth-service")]
#[command(about = "Authentication against the credential store")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Verify a password and print a signed token
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "AUTH_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Change the password of the token's owner
    ChangePassword {
        #[arg(long, env = "AUTH_TOKEN", hide_env_values = true)]
        token: String,
        #[arg(long)]
        current: String,
        #[arg(long)]
        new: String,
    },
    /// Verify a token and print its claims
    Verify {
        #[arg(long, env = "AUTH_TOKEN", hide_env_values = true)]
        token: String,
    },
}

fn fail(context: &str, err: AppError) -> ! {
    eprintln!("{}", err.report(context));
    std::process::exit(1);
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
        Commands::Login { email, password } => {
            match auth_service_lib::login(&email, &password).await {
                Ok(response) => println!("{}", serde_json::to_string_pretty(&response)?),
                Err(err) => fail("Login", err),
            }
        }
        Commands::ChangePassword { token, current, new } => {
            match auth_service_lib::change_password(&token, &current, &new).await {
                Ok(()) => println!("Password changed"),
                Err(err) => fail("Password change", err),
            }
        }
        Commands::Verify { token } => match auth_service_lib::verify(&token) {
            Ok(claims) => println!("{}", serde_json::to_string_pretty(&claims)?),
            Err(err) => fail("Verification", err),
        },
    }

    Ok(())
}
