use axum::{
    Router, middleware,
    routing::{delete, get, post},
};

use crate::middleware::require_auth;
use crate::state::AppState;
use crate::{auth, events, participants, registrations};

/// Full HTTP surface: `/health` plus everything under `/api`.
///
/// Cross-cutting layers (CORS, tracing) are added by the binary.
pub fn router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/Participants/SignUp", post(participants::sign_up))
        .route("/Participants/Login", post(participants::login));

    let protected_routes = Router::new()
        .route("/Events/All", get(events::list_events))
        .route("/Events/create", post(events::create_event))
        .route(
            "/Events/{id}",
            get(events::get_event)
                .patch(events::update_event)
                .delete(events::delete_event),
        )
        .route("/Events/{id}/capacity", get(events::capacity))
        .route(
            "/Registrations/event/{id}/register",
            post(registrations::register),
        )
        .route(
            "/Registrations/event/{id}/registrations",
            get(registrations::list_for_event),
        )
        .route(
            "/Registrations/registration/{id}",
            delete(registrations::delete_registration),
        )
        .route("/Participants/All", get(participants::list_participants))
        .route("/Participants/{id}", get(participants::get_participant))
        .route(
            "/Participants/{id}/upcoming-events",
            get(participants::upcoming_events),
        )
        .route(
            "/Participants/{id}/previous-events",
            get(participants::previous_events),
        )
        .layer(middleware::from_fn_with_state(state.clone(), require_auth));

    let api = Router::new().merge(public_routes).merge(protected_routes);

    Router::new()
        .route("/health", get(health))
        .nest("/api", api)
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}
