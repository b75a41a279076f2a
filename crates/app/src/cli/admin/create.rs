use clap::Args;
use gazalla_app::{
    auth::digest_password,
    domain::users::{
        data::NewUser,
        models::{Role, UserUuid},
    },
};

#[derive(Debug, Args)]
pub(crate) struct CreateAdminArgs {
    /// Display name
    #[arg(long, default_value = "Administrator")]
    name: String,

    /// Login email
    #[arg(long)]
    email: String,

    /// Login password
    #[arg(long, env = "ADMIN_PASSWORD", hide_env_values = true)]
    password: String,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: CreateAdminArgs) -> Result<(), String> {
    if args.password.is_empty() {
        return Err("password cannot be empty".to_string());
    }

    let context = super::super::connect(&args.database_url).await?;
    let uuid = UserUuid::new();

    let user = context
        .users
        .create_user(NewUser {
            uuid,
            name: args.name,
            email: args.email,
            password_digest: digest_password(uuid, &args.password),
            role: Role::Admin,
        })
        .await
        .map_err(|error| format!("failed to create admin: {error}"))?;

    println!("user_uuid: {}", user.uuid);
    println!("email: {}", user.email);
    println!("role: {}", user.role);

    Ok(())
}
