use clap::{Args, Subcommand};

mod migrate;
mod status;

#[derive(Debug, Args)]
pub(crate) struct DbCommand {
    #[command(subcommand)]
    command: DbSubcommand,
}

#[derive(Debug, Subcommand)]
enum DbSubcommand {
    /// Apply pending migrations
    Migrate(migrate::MigrateArgs),

    /// Report which backend the app would use
    Status(status::StatusArgs),
}

pub(crate) async fn run(command: DbCommand) -> Result<(), String> {
    match command.command {
        DbSubcommand::Migrate(args) => migrate::run(args).await,
        DbSubcommand::Status(args) => status::run(args).await,
    }
}
