mod cmd;
mod console;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "relay",
    about = "Manage app versions on the Relay platform — promote to production, migrate users",
    version,
    propagate_version = true
)]
struct Cli {
    /// Project directory (default: current directory)
    #[arg(long, global = true, env = "RELAY_PROJECT_DIR")]
    project_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Promote a version to production
    #[command(disable_version_flag = true)]
    Promote {
        /// Version to promote (e.g. 1.0.0)
        version: Option<String>,
    },

    /// Migrate users from one version of your app to another
    Migrate {
        /// The version to migrate users from
        from_version: Option<String>,
        /// The version to migrate users to
        to_version: Option<String>,
        /// Percent of users to migrate (e.g. 15%)
        #[arg(default_value = relay_core::migrate::DEFAULT_PERCENT)]
        percent: String,
        /// Migrate only this user
        #[arg(long)]
        user: Option<String>,
        /// Update migration code with code from the working directory
        #[arg(long)]
        update_migrations: bool,
    },

    /// Link this directory to an app on the platform
    Link {
        /// App id shown in the platform dashboard
        app_id: u64,
    },
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_target(false)
        .init();

    let project_dir = cli.project_dir.unwrap_or_else(|| {
        std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
    });

    let result = match cli.command {
        Commands::Promote { version } => cmd::promote::run(&project_dir, version.as_deref()),
        Commands::Migrate {
            from_version,
            to_version,
            percent,
            user,
            update_migrations,
        } => cmd::migrate::run(
            &project_dir,
            from_version.as_deref(),
            to_version.as_deref(),
            &percent,
            user,
            update_migrations,
        ),
        Commands::Link { app_id } => cmd::link::run(&project_dir, app_id),
    };

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
