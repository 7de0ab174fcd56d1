use async_trait::async_trait;
use axum::{extract::FromRequestParts, http::request::Parts, http::StatusCode};
use uuid::Uuid;

use super::error::{AppError, CtxError};

/// Per-request context. Handlers get one per inbound call; background work
/// (migrations, fixtures) builds its own.
#[derive(Clone, Debug)]
pub struct Ctx {
    req_id: Uuid,
}

impl Ctx {
    pub fn new(req_id: Uuid) -> Self {
        Self { req_id }
    }

    pub fn req_id(&self) -> Uuid {
        self.req_id
    }

    pub fn to_ctx_error(&self, error: AppError) -> CtxError {
        CtxError {
            req_id: self.req_id,
            error,
        }
    }
}

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for Ctx {
    type Rejection = StatusCode;

    async fn from_request_parts(_parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Ctx::new(Uuid::new_v4()))
    }
}
