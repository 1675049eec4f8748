use clap::Args;
use quire::users::Role;
use quire_app::{
    database::Db,
    domain::users::{PgUsersService, UsersService},
};

#[derive(Debug, Args)]
pub(crate) struct PromoteUserArgs {
    /// Email of the registered user
    #[arg(long)]
    email: String,

    /// Role to grant
    #[arg(long, default_value = "admin")]
    role: Role,
}

pub(crate) async fn run(args: PromoteUserArgs, db: Db) -> Result<(), String> {
    let service = PgUsersService::new(db);

    let user = service
        .set_role(&args.email, args.role)
        .await
        .map_err(|error| format!("failed to update role: {error}"))?;

    println!("user_uuid: {}", user.uuid);
    println!("role: {}", user.role);

    Ok(())
}
