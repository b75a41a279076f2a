use clap::Args;
use gazalla_app::context::AppContext;

#[derive(Debug, Args)]
pub(crate) struct StatusArgs {
    /// PostgreSQL connection string; the in-memory backend is reported when omitted
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: Option<String>,
}

pub(crate) async fn run(args: StatusArgs) -> Result<(), String> {
    let context = AppContext::connect(args.database_url.as_deref(), "").await;
    let status = context.database_status().await;

    let rendered = serde_json::to_string_pretty(&status)
        .map_err(|error| format!("failed to render status: {error}"))?;

    println!("{rendered}");

    Ok(())
}
