use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use chrono::{Local, NaiveDateTime};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use traffic_intake::error::AppError;
use traffic_intake::workflows::intake::{
    intake_router, FieldUpdate, FormState, IntakeEstimate, IntakeService, IntakeStep,
    PaymentInitiator, WizardController,
};

/// Single string-keyed edit applied to a posted snapshot.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct FieldEditRequest {
    #[serde(default)]
    pub(crate) form: FormState,
    pub(crate) field: String,
    #[serde(default)]
    pub(crate) value: String,
    #[serde(default)]
    pub(crate) now: Option<NaiveDateTime>,
}

pub(crate) fn with_intake_routes<P>(service: Arc<IntakeService<P>>) -> axum::Router
where
    P: PaymentInitiator + 'static,
{
    intake_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/intake/field",
            axum::routing::post(field_edit_endpoint),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

/// Applies one raw form-widget edit the same way the wizard does and re-estimates.
pub(crate) async fn field_edit_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<FieldEditRequest>,
) -> Result<Json<IntakeEstimate>, AppError> {
    let FieldEditRequest {
        form,
        field,
        value,
        now,
    } = payload;

    let update = FieldUpdate::from_raw(&field, &value)?;
    let mut wizard = WizardController::resume(state.validator, IntakeStep::CustomerInfo, form);
    wizard.update_field(update);

    let now = now.unwrap_or_else(|| Local::now().naive_local());
    Ok(Json(IntakeEstimate::evaluate(
        wizard.state(),
        &state.validator,
        now,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::SandboxCheckoutGateway;
    use axum::body::Body;
    use axum::http::Request;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use std::sync::atomic::AtomicBool;
    use tower::ServiceExt;
    use traffic_intake::workflows::intake::{CheckoutRedirects, StepValidator};

    fn app_state(ready: bool) -> AppState {
        AppState {
            readiness: Arc::new(AtomicBool::new(ready)),
            metrics: Arc::new(PrometheusBuilder::new().build_recorder().handle()),
            validator: StepValidator::strict(),
        }
    }

    fn app(ready: bool) -> axum::Router {
        let service = Arc::new(IntakeService::new(
            Arc::new(SandboxCheckoutGateway::default()),
            StepValidator::strict(),
            CheckoutRedirects::default(),
        ));
        with_intake_routes(service).layer(Extension(app_state(ready)))
    }

    async fn read_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body readable");
        serde_json::from_slice(&bytes).expect("json body")
    }

    fn field_request(body: serde_json::Value) -> Request<Body> {
        Request::post("/api/v1/intake/field")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&body).expect("serializes")))
            .expect("request builds")
    }

    #[tokio::test]
    async fn readiness_reflects_startup_flag() {
        let response = app(false)
            .oneshot(Request::get("/ready").body(Body::empty()).expect("request"))
            .await
            .expect("route executes");
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let response = app(true)
            .oneshot(Request::get("/ready").body(Body::empty()).expect("request"))
            .await
            .expect("route executes");
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn healthcheck_is_always_ok() {
        let Json(body) = healthcheck().await;
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn field_edit_formats_phone_and_reestimates() {
        let response = app(true)
            .oneshot(field_request(json!({
                "form": { "catalogQuantities": { "Drums": 2 } },
                "field": "phone",
                "value": "303555121299",
                "now": "2025-06-02T10:00:00"
            })))
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        assert_eq!(body["form"]["phone"], "(303) 555-1212");
        assert_eq!(body["summary"]["equipmentCost"], "20.00");
    }

    #[tokio::test]
    async fn field_edit_rejects_unknown_fields() {
        let response = app(true)
            .oneshot(field_request(json!({
                "field": "favoriteColor",
                "value": "teal"
            })))
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = read_json(response).await;
        assert!(body["error"]
            .as_str()
            .unwrap_or_default()
            .contains("favoriteColor"));
    }

    #[tokio::test]
    async fn intake_routes_are_mounted() {
        let response = app(true)
            .oneshot(
                Request::get("/api/v1/intake/catalog")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("route executes");
        assert_eq!(response.status(), StatusCode::OK);
    }
}
