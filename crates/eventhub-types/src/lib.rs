pub mod api;
pub mod models;

pub use models::{Role, CONFIRMED};
