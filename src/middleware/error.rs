use std::fmt;

use axum::{http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};
use tracing::error;
use uuid::Uuid;

use crate::middleware::ctx::Ctx;

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct CtxError {
    pub error: AppError,
    pub req_id: Uuid,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AppError {
    Generic { description: String },
    Validation { description: String },
    EntityFailIdNotFound { ident: String },
    InvalidReference { ident: String },
    LikesNotFound { ident: String },
    AlreadyExists { ident: String },
    Serde { source: String },
    SurrealDb { source: String },
}

/// CtxError carries the req_id to report to the client and implements IntoResponse.
pub type CtxResult<T> = core::result::Result<T, CtxError>;
/// Any error for storing before composing a response.
/// For errors that either don't affect the response, or are built before attaching the req_id.
pub type AppResult<T> = core::result::Result<T, AppError>;

impl std::error::Error for AppError {}

// for slightly less verbose error mappings
impl CtxError {
    pub fn from<T: Into<AppError>>(ctx: &Ctx) -> impl FnOnce(T) -> CtxError + '_ {
        |err| CtxError {
            req_id: ctx.req_id(),
            error: err.into(),
        }
    }
}

impl From<surrealdb::Error> for CtxError {
    fn from(value: surrealdb::Error) -> Self {
        CtxError {
            req_id: Uuid::new_v4(),
            error: value.into(),
        }
    }
}

impl From<AppError> for CtxError {
    fn from(value: AppError) -> Self {
        CtxError {
            req_id: Uuid::new_v4(),
            error: value,
        }
    }
}

const INTERNAL: &str = "Internal error";

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Generic { description } => write!(f, "{description}"),
            Self::Validation { description } => write!(f, "{description}"),
            Self::EntityFailIdNotFound { ident } => write!(f, "Record id= {ident} not found"),
            Self::InvalidReference { ident } => {
                write!(f, "Reference {ident} does not resolve")
            }
            Self::LikesNotFound { ident } => write!(f, "No likes found for {ident}"),
            Self::AlreadyExists { ident } => write!(f, "{ident} already exists"),
            Self::Serde { source } => write!(f, "Serde error - {source}"),
            Self::SurrealDb { .. } => write!(f, "{INTERNAL}"),
        }
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ErrorResponseBody {
    error: String,
    req_id: String,
}

impl ErrorResponseBody {
    pub fn new(error: String, req_id: Option<String>) -> Self {
        ErrorResponseBody {
            error,
            req_id: req_id.unwrap_or_else(|| Uuid::new_v4().to_string()),
        }
    }

    pub fn get_err(&self) -> String {
        self.error.clone()
    }
}

impl From<ErrorResponseBody> for String {
    fn from(value: ErrorResponseBody) -> Self {
        serde_json::to_string(&value).unwrap()
    }
}

// REST error response
impl IntoResponse for CtxError {
    fn into_response(self) -> axum::response::Response {
        error!("->> {:<12} - into_response - {self:?}", "ERROR");
        let status_code = match self.error {
            AppError::EntityFailIdNotFound { .. }
            | AppError::InvalidReference { .. }
            | AppError::LikesNotFound { .. } => StatusCode::NOT_FOUND,
            AppError::AlreadyExists { .. } => StatusCode::CONFLICT,
            AppError::Generic { .. }
            | AppError::Validation { .. }
            | AppError::Serde { .. } => StatusCode::BAD_REQUEST,
            AppError::SurrealDb { .. } => StatusCode::SERVICE_UNAVAILABLE,
        };
        let err = self.error.clone();
        let body_str: String =
            ErrorResponseBody::new(self.error.to_string(), Some(self.req_id.to_string())).into();
        let mut response = (status_code, body_str).into_response();
        // Insert the real Error into the response - for the logger
        response.extensions_mut().insert(err);
        response
    }
}

// External Errors
impl From<serde_json::Error> for AppError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serde {
            source: value.to_string(),
        }
    }
}

impl From<surrealdb::Error> for AppError {
    fn from(value: surrealdb::Error) -> Self {
        Self::SurrealDb {
            source: value.to_string(),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(value: validator::ValidationErrors) -> Self {
        Self::Validation {
            description: value
                .field_errors()
                .into_iter()
                .flat_map(|(_, errs)| errs.iter())
                .map(|err| match &err.message {
                    Some(msg) => msg.to_string(),
                    None => err.code.to_string(),
                })
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}

impl From<validator::ValidationErrors> for CtxError {
    fn from(value: validator::ValidationErrors) -> Self {
        AppError::from(value).into()
    }
}

impl From<CtxError> for AppError {
    fn from(value: CtxError) -> Self {
        value.error
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_kinds_map_to_404() {
        for error in [
            AppError::EntityFailIdNotFound {
                ident: "user:none".to_string(),
            },
            AppError::InvalidReference {
                ident: "review:none".to_string(),
            },
            AppError::LikesNotFound {
                ident: "user:none".to_string(),
            },
        ] {
            let response = CtxError {
                error,
                req_id: Uuid::new_v4(),
            }
            .into_response();
            assert_eq!(response.status(), StatusCode::NOT_FOUND);
        }
    }

    #[test]
    fn conflict_and_store_kinds_keep_their_own_codes() {
        let conflict = <CtxError as From<AppError>>::from(AppError::AlreadyExists {
            ident: "movie_type".to_string(),
        })
        .into_response();
        assert_eq!(conflict.status(), StatusCode::CONFLICT);

        let unavailable = <CtxError as From<AppError>>::from(AppError::SurrealDb {
            source: "connection reset".to_string(),
        })
        .into_response();
        assert_eq!(unavailable.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
