use crate::config::ConfigError;
use crate::telemetry::TelemetryError;
use crate::workflows::intake::{CheckoutError, FieldError};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Server(axum::Error),
    Form(serde_json::Error),
    Field(FieldError),
    Checkout(CheckoutError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Server(err) => write!(f, "server error: {}", err),
            AppError::Form(err) => write!(f, "unreadable intake form: {}", err),
            AppError::Field(err) => write!(f, "field update rejected: {}", err),
            AppError::Checkout(err) => write!(f, "checkout failed: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Server(err) => Some(err),
            AppError::Form(err) => Some(err),
            AppError::Field(err) => Some(err),
            AppError::Checkout(err) => Some(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Form(_) | AppError::Field(_) => StatusCode::BAD_REQUEST,
            AppError::Checkout(err) if err.is_form_problem() => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Checkout(_) => StatusCode::BAD_GATEWAY,
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Server(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = match &self {
            AppError::Checkout(err) if !err.is_form_problem() => json!({
                "error": "Checkout could not be initialized. Please try again later.",
                "details": err.to_string(),
            }),
            _ => json!({ "error": self.to_string() }),
        };
        (status, Json(body)).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<axum::Error> for AppError {
    fn from(value: axum::Error) -> Self {
        Self::Server(value)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(value: serde_json::Error) -> Self {
        Self::Form(value)
    }
}

impl From<FieldError> for AppError {
    fn from(value: FieldError) -> Self {
        Self::Field(value)
    }
}

impl From<CheckoutError> for AppError {
    fn from(value: CheckoutError) -> Self {
        Self::Checkout(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::intake::GatewayError;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body readable");
        serde_json::from_slice(&bytes).expect("json body")
    }

    #[tokio::test]
    async fn checkout_errors_map_to_distinct_statuses() {
        let incomplete = AppError::from(CheckoutError::ScheduleIncomplete).into_response();
        assert_eq!(incomplete.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = body_json(incomplete).await;
        assert!(body.get("details").is_none());

        let gateway = AppError::from(CheckoutError::Gateway(GatewayError::Unavailable(
            "timeout".to_string(),
        )))
        .into_response();
        assert_eq!(gateway.status(), StatusCode::BAD_GATEWAY);
        let body = body_json(gateway).await;
        assert_eq!(
            body["error"],
            "Checkout could not be initialized. Please try again later."
        );
        assert!(body["details"].as_str().unwrap_or_default().contains("timeout"));
    }

    #[test]
    fn field_errors_are_client_errors() {
        let response =
            AppError::from(FieldError::UnknownField("favoriteColor".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
