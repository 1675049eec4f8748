//! Admin commands run against the bookstore database.

use clap::{Parser, Subcommand};
use quire_app::database::{self, Db};

mod db;
mod user;

#[derive(Debug, Parser)]
#[command(name = "quire-app", about = "Quire bookstore admin CLI", long_about = None)]
pub(crate) struct Cli {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true, global = true)]
    database_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Schema management
    Db(db::DbCommand),

    /// Account management
    User(user::UserCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        let url = self
            .database_url
            .ok_or_else(|| "DATABASE_URL or --database-url is required".to_string())?;

        // One connection is plenty for a single admin command.
        let pool = database::connect(&url, 1)
            .await
            .map_err(|error| format!("failed to connect to database: {error}"))?;

        match self.command {
            Commands::Db(command) => db::run(command, &pool).await,
            Commands::User(command) => user::run(command, Db::new(pool)).await,
        }
    }
}
