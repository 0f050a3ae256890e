pub mod auth;
pub mod error;
pub mod events;
pub mod middleware;
pub mod participants;
pub mod password;
pub mod registrations;
pub mod routes;
pub mod services;
pub mod state;
pub mod token;

pub use routes::router;
pub use state::{AppState, AppStateInner};
