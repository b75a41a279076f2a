//! Database Status Handler

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use gazalla_app::context::{ConnectionState, DatabaseStatus};

use crate::extensions::*;

/// Which storage backend is serving requests.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DatabaseStatusResponse {
    pub is_available: bool,
    pub is_connected: bool,

    /// `connected` or `disconnected`
    pub connection_state: String,

    /// Whether the in-memory fallback is in use
    pub using_fallback: bool,

    pub message: String,
}

impl From<DatabaseStatus> for DatabaseStatusResponse {
    fn from(status: DatabaseStatus) -> Self {
        let connection_state = match status.connection_state {
            ConnectionState::Connected => "connected",
            ConnectionState::Disconnected => "disconnected",
        };

        DatabaseStatusResponse {
            is_available: status.is_available,
            is_connected: status.is_connected,
            connection_state: connection_state.to_string(),
            using_fallback: status.using_fallback,
            message: status.message,
        }
    }
}

/// Database Status Handler
#[endpoint(tags("health"), summary = "Database status")]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<DatabaseStatusResponse>, StatusError> {
    let state = depot.state_or_500()?;

    Ok(Json(state.app.database_status().await.into()))
}
