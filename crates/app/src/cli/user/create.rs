use clap::Args;
use quire::users::Role;
use quire_app::{
    database::Db,
    domain::users::{PgUsersService, UsersService, data::NewUser, records::UserUuid},
};

#[derive(Debug, Args)]
pub(crate) struct CreateUserArgs {
    /// Display name
    #[arg(long)]
    username: String,

    /// Login email
    #[arg(long)]
    email: String,

    /// Login password
    #[arg(long, env = "QUIRE_USER_PASSWORD", hide_env_values = true)]
    password: String,

    /// Role to register with
    #[arg(long, default_value = "customer")]
    role: Role,
}

pub(crate) async fn run(args: CreateUserArgs, db: Db) -> Result<(), String> {
    let service = PgUsersService::new(db);

    let user = service
        .register_user(NewUser {
            uuid: UserUuid::new(),
            username: args.username,
            email: args.email,
            password: args.password,
            role: args.role,
        })
        .await
        .map_err(|error| format!("failed to create user: {error}"))?;

    println!("user_uuid: {}", user.uuid);
    println!("email: {}", user.email);
    println!("role: {}", user.role);

    Ok(())
}
