use clap::{Parser, Subcommand};
use gazalla_app::context::AppContext;

mod admin;
mod db;
mod products;
mod seed;

#[derive(Debug, Parser)]
#[command(name = "gazalla-app", about = "Gazalla shop administration", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Replace the catalog with the starter products
    Seed(seed::SeedArgs),
    Admin(admin::AdminCommand),
    Products(products::ProductsCommand),
    Db(db::DbCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Seed(args) => seed::run(args).await,
            Commands::Admin(command) => admin::run(command).await,
            Commands::Products(command) => products::run(command).await,
            Commands::Db(command) => db::run(command).await,
        }
    }
}

/// Connects and migrates, mapping failures to printable messages.
pub(crate) async fn connect(database_url: &str) -> Result<AppContext, String> {
    AppContext::from_database_url(database_url, "")
        .await
        .map_err(|error| format!("failed to open database: {error}"))
}
