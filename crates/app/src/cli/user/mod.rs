use clap::{Args, Subcommand};
use quire_app::database::Db;

mod create;
mod promote;

#[derive(Debug, Args)]
pub(crate) struct UserCommand {
    #[command(subcommand)]
    command: UserSubcommand,
}

#[derive(Debug, Subcommand)]
enum UserSubcommand {
    /// Register an account
    Create(create::CreateUserArgs),

    /// Change an existing account's role
    Promote(promote::PromoteUserArgs),
}

pub(crate) async fn run(command: UserCommand, db: Db) -> Result<(), String> {
    match command.command {
        UserSubcommand::Create(args) => create::run(args, db).await,
        UserSubcommand::Promote(args) => promote::run(args, db).await,
    }
}
