use clap::Args;
use gazalla_app::{
    auth::digest_password,
    domain::users::{
        UsersServiceError,
        data::NewUser,
        models::{Role, UserUuid},
    },
    domain::products::data::sample_products,
};

#[derive(Debug, Args)]
pub(crate) struct SeedArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Also create an admin account with this email
    #[arg(long, requires = "admin_password")]
    admin_email: Option<String>,

    /// Password for the seeded admin account
    #[arg(long, env = "ADMIN_PASSWORD", hide_env_values = true)]
    admin_password: Option<String>,
}

pub(crate) async fn run(args: SeedArgs) -> Result<(), String> {
    let context = super::connect(&args.database_url).await?;

    let products = context
        .products
        .replace_products(sample_products())
        .await
        .map_err(|error| format!("failed to seed products: {error}"))?;

    println!("seeded {} products", products.len());

    let (Some(email), Some(password)) = (args.admin_email, args.admin_password) else {
        return Ok(());
    };

    let uuid = UserUuid::new();

    let result = context
        .users
        .create_user(NewUser {
            uuid,
            name: "Administrator".to_string(),
            email,
            password_digest: digest_password(uuid, &password),
            role: Role::Admin,
        })
        .await;

    match result {
        Ok(user) => println!("admin_uuid: {}", user.uuid),
        Err(UsersServiceError::AlreadyExists) => println!("admin already exists, skipped"),
        Err(error) => return Err(format!("failed to create admin: {error}")),
    }

    Ok(())
}
