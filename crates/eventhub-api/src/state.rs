use std::sync::Arc;

use tracing::error;

use eventhub_db::Database;

use crate::services::{
    AdminService, EventService, ParticipantService, RegistrationService, ServiceError,
};
use crate::token::TokenIssuer;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub db: Database,
    pub tokens: TokenIssuer,
}

impl AppStateInner {
    pub fn new(db: Database, tokens: TokenIssuer) -> AppState {
        Arc::new(Self { db, tokens })
    }

    pub fn admins(&self) -> AdminService<'_> {
        AdminService::new(&self.db, &self.tokens)
    }

    pub fn participants(&self) -> ParticipantService<'_> {
        ParticipantService::new(&self.db, &self.tokens)
    }

    pub fn events(&self) -> EventService<'_> {
        EventService::new(&self.db)
    }

    pub fn registrations(&self) -> RegistrationService<'_> {
        RegistrationService::new(&self.db)
    }
}

/// Run a service call off the async runtime; rusqlite blocks.
pub async fn blocking<F, T>(state: &AppState, f: F) -> Result<T, ServiceError>
where
    F: FnOnce(&AppStateInner) -> Result<T, ServiceError> + Send + 'static,
    T: Send + 'static,
{
    let state = state.clone();
    tokio::task::spawn_blocking(move || f(&state))
        .await
        .map_err(|e| {
            error!("spawn_blocking join error: {}", e);
            ServiceError::Unexpected("An unexpected error occurred.".into())
        })?
}
