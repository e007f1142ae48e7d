//! Actor identity, read from headers set by the authentication layer in
//! front of this service.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use school_core_api::{ActorRef, ApiError};
use uuid::Uuid;

use crate::error::HttpError;

pub const ACTOR_ID_HEADER: &str = "x-actor-id";
pub const ACTOR_NAME_HEADER: &str = "x-actor-name";
pub const ACTOR_EMAIL_HEADER: &str = "x-actor-email";
pub const ACTOR_ROLE_HEADER: &str = "x-actor-role";

/// Extractor for the acting user. Rejects with `401` when the identity
/// headers are missing or malformed.
#[derive(Debug, Clone)]
pub struct Actor(pub ActorRef);

impl<S> FromRequestParts<S> for Actor
where
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        actor_from_headers(&parts.headers).map(Actor).map_err(HttpError)
    }
}

fn header<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

pub fn actor_from_headers(headers: &HeaderMap) -> Result<ActorRef, ApiError> {
    let id = header(headers, ACTOR_ID_HEADER)
        .ok_or_else(|| ApiError::Unauthorized(format!("missing {ACTOR_ID_HEADER} header")))?;
    let id = Uuid::parse_str(id)
        .map_err(|_| ApiError::Unauthorized(format!("invalid {ACTOR_ID_HEADER} header")))?;
    let name = header(headers, ACTOR_NAME_HEADER)
        .ok_or_else(|| ApiError::Unauthorized(format!("missing {ACTOR_NAME_HEADER} header")))?;

    let mut actor = ActorRef::new(id, name);
    if let Some(email) = header(headers, ACTOR_EMAIL_HEADER) {
        actor = actor.with_email(email);
    }
    if let Some(role) = header(headers, ACTOR_ROLE_HEADER) {
        actor = actor.with_role(role);
    }
    Ok(actor)
}
