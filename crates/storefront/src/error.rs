//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures errors to Sentry before
//! responding to the client. All route handlers should return `Result<T, AppError>`.
//!
//! Error responses are JSON: `{"message": ...}` for most errors and
//! `{"errors": {field: message}}` for form validation failures.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::catalog::CatalogError;
use crate::checkout::{CheckoutError, SubmissionError};
use crate::services::auth::AuthError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Catalog lookup failed.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Checkout attempt failed.
    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),

    /// Authentication operation failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Request conflicts with current state.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Whether this error indicates a fault on our side or upstream.
    const fn is_server_error(&self) -> bool {
        match self {
            Self::Catalog(err) => !matches!(err, CatalogError::NotFound(_)),
            Self::Checkout(CheckoutError::Submission(SubmissionError::Transport(_)))
            | Self::Internal(_) => true,
            _ => false,
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            Self::Catalog(CatalogError::NotFound(_)) | Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Catalog(CatalogError::Io(_) | CatalogError::Parse(_)) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::Catalog(_) => StatusCode::BAD_GATEWAY,
            Self::Checkout(err) => match err {
                CheckoutError::EmptyCart => StatusCode::BAD_REQUEST,
                CheckoutError::InFlight => StatusCode::CONFLICT,
                CheckoutError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
                CheckoutError::Submission(_) => StatusCode::BAD_GATEWAY,
            },
            Self::Auth(AuthError::Form(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Auth(AuthError::InvalidCredentials) => StatusCode::UNAUTHORIZED,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Conflict(_) => StatusCode::CONFLICT,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
        if self.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = self.status();

        // Don't expose internal error details to clients
        let body = match &self {
            Self::Checkout(CheckoutError::Validation(errors)) => json!({ "errors": errors }),
            Self::Auth(AuthError::Form(errors)) => json!({ "errors": errors }),
            Self::Checkout(CheckoutError::Submission(err)) => {
                let message = match err {
                    SubmissionError::Rejected { message, .. } => message.clone(),
                    SubmissionError::Transport(_) => "Payment service unavailable".to_string(),
                };
                json!({ "message": message, "retryable": true })
            }
            Self::Checkout(err) => json!({ "message": err.to_string() }),
            Self::Auth(err) => json!({ "message": err.to_string() }),
            Self::Catalog(CatalogError::NotFound(slug)) => {
                json!({ "message": format!("Game not found: {slug}") })
            }
            Self::Catalog(_) if status == StatusCode::BAD_GATEWAY => {
                json!({ "message": "Catalog service unavailable" })
            }
            Self::Catalog(_) | Self::Internal(_) => json!({ "message": "Internal server error" }),
            Self::NotFound(msg) | Self::BadRequest(msg) | Self::Conflict(msg) => {
                json!({ "message": msg })
            }
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Set the Sentry user context for the signed-in shopper.
///
/// Call this after successful authentication to associate errors with users.
pub fn set_sentry_user(email: &str) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            email: Some(email.to_string()),
            ..Default::default()
        }));
    });
}

/// Clear the Sentry user context.
///
/// Call this on logout to stop associating errors with the user.
pub fn clear_sentry_user() {
    sentry::configure_scope(|scope| {
        scope.set_user(None);
    });
}

/// Add a breadcrumb for shopper actions.
///
/// Breadcrumbs appear in Sentry error reports to show the trail of actions
/// leading up to an error.
///
/// # Example
///
/// ```rust,ignore
/// add_breadcrumb("cart", "Added to cart", Some(&[("game_id", "7")]));
/// ```
pub fn add_breadcrumb(category: &str, message: &str, data: Option<&[(&str, &str)]>) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    if let Some(pairs) = data {
        for (key, value) in pairs {
            breadcrumb.data.insert(
                (*key).to_string(),
                serde_json::Value::String((*value).to_string()),
            );
        }
    }

    sentry::add_breadcrumb(breadcrumb);
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::body::to_bytes;
    use game_store_core::{CheckoutForm, checkout::validate};

    use super::*;

    fn get_status(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    async fn body_json(err: AppError) -> serde_json::Value {
        let bytes = to_bytes(err.into_response().into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("game-123".to_string());
        assert_eq!(err.to_string(), "Not found: game-123");

        let err = AppError::BadRequest("invalid input".to_string());
        assert_eq!(err.to_string(), "Bad request: invalid input");
    }

    #[test]
    fn test_app_error_status_codes() {
        assert_eq!(
            get_status(AppError::NotFound("test".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::Catalog(CatalogError::NotFound("x".to_string()))),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::Catalog(CatalogError::Status(503))),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            get_status(AppError::Checkout(CheckoutError::EmptyCart)),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::Checkout(CheckoutError::InFlight)),
            StatusCode::CONFLICT
        );
        assert_eq!(
            get_status(AppError::Auth(AuthError::InvalidCredentials)),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            get_status(AppError::Internal("test".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn test_validation_errors_body() {
        let errors = validate(&CheckoutForm::default()).unwrap_err();
        let err = AppError::Checkout(CheckoutError::Validation(errors));
        assert_eq!(get_status_ref(&err), StatusCode::UNPROCESSABLE_ENTITY);

        let body = body_json(err).await;
        assert_eq!(body["errors"]["cvc"], "CVC must be 3 digits.");
        assert_eq!(body["errors"].as_object().unwrap().len(), 6);
    }

    #[tokio::test]
    async fn test_rejection_is_retryable_bad_gateway() {
        let err = AppError::Checkout(CheckoutError::Submission(SubmissionError::Rejected {
            status: 500,
            message: "Payment failed".to_string(),
        }));
        assert_eq!(get_status_ref(&err), StatusCode::BAD_GATEWAY);

        let body = body_json(err).await;
        assert_eq!(body, json!({"message": "Payment failed", "retryable": true}));
    }

    #[tokio::test]
    async fn test_internal_details_hidden() {
        let body = body_json(AppError::Internal("disk on fire".to_string())).await;
        assert_eq!(body["message"], "Internal server error");
    }

    fn get_status_ref(err: &AppError) -> StatusCode {
        err.status()
    }
}
