use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts},
    middleware::Next,
    response::Response,
};
use tracing::debug;

use eventhub_types::Role;
use eventhub_types::api::Claims;

use crate::error::ApiError;
use crate::state::AppState;

/// Extract and validate the bearer token, then stash its claims in the
/// request extensions for the role extractors below.
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(ApiError::unauthorized)?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(ApiError::unauthorized)?;

    let claims = state.tokens.verify(token).map_err(|e| {
        debug!("Rejected bearer token: {}", e);
        ApiError::unauthorized()
    })?;

    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}

fn claims_from(parts: &Parts) -> Result<Claims, ApiError> {
    parts
        .extensions
        .get::<Claims>()
        .cloned()
        .ok_or_else(ApiError::unauthorized)
}

/// Any authenticated caller, admin or participant.
#[derive(Debug, Clone)]
pub struct Member(pub Claims);

impl Member {
    pub fn is_admin(&self) -> bool {
        self.0.role == Role::Admin
    }

    /// Participants may only act on their own record; admins on any.
    pub fn ensure_self_or_admin(&self, participant_id: i64) -> Result<(), ApiError> {
        if self.is_admin() || self.0.sub == participant_id {
            Ok(())
        } else {
            Err(ApiError::forbidden())
        }
    }
}

impl<S> FromRequestParts<S> for Member
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        claims_from(parts).map(Member)
    }
}

/// Authenticated caller holding the Admin role.
#[derive(Debug, Clone)]
pub struct AdminOnly(pub Claims);

impl<S> FromRequestParts<S> for AdminOnly
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let claims = claims_from(parts)?;
        if claims.role != Role::Admin {
            return Err(ApiError::forbidden());
        }
        Ok(AdminOnly(claims))
    }
}
