//! Account Config

use clap::Args;
use gazalla_app::auth::DEFAULT_ADMIN_SIGNUP_KEY;

/// Account settings.
#[derive(Debug, Args)]
pub struct AuthConfig {
    /// Key that grants the admin role at signup
    #[arg(
        long,
        env = "ADMIN_SIGNUP_KEY",
        hide_env_values = true,
        default_value = DEFAULT_ADMIN_SIGNUP_KEY
    )]
    pub admin_signup_key: String,
}
