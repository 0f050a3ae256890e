//! HTTP client for the EventHub API, with a file-backed login session.

mod auth;
mod client;
mod error;
mod events;
mod participants;
mod registrations;
pub mod session;

pub use client::{ApiClient, DEFAULT_TIMEOUT};
pub use error::ClientError;
pub use session::{Profile, Session, SessionStore};
