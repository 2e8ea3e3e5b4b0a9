use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

use super::catalog::{self, CatalogEntry, CATALOG_VERSION};
use super::checkout::{CheckoutRedirects, PaymentInitiator};
use super::domain::FormState;
use super::reference::{
    TrafficConfigurationOption, WorkTypeGroup, SERVICE_CATEGORIES, TRAFFIC_CONFIGURATION_OPTIONS,
    WORK_TYPE_GROUPS,
};
use super::service::{IntakeService, WizardEvent};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EstimatePayload {
    pub form: FormState,
    pub now: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReplayPayload {
    pub events: Vec<WizardEvent>,
    pub now: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CheckoutPayload {
    pub form: FormState,
    /// Site origin the provider redirects back to; the service default applies when absent.
    pub origin: Option<String>,
    pub now: Option<NaiveDateTime>,
}

/// Option lists and priced catalog the intake screens render from.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogView {
    pub version: &'static str,
    pub service_categories: &'static [&'static str],
    pub work_type_groups: &'static [WorkTypeGroup],
    pub traffic_configurations: &'static [TrafficConfigurationOption],
    pub entries: &'static [CatalogEntry],
}

impl CatalogView {
    pub fn current() -> Self {
        Self {
            version: CATALOG_VERSION,
            service_categories: &SERVICE_CATEGORIES,
            work_type_groups: &WORK_TYPE_GROUPS,
            traffic_configurations: &TRAFFIC_CONFIGURATION_OPTIONS,
            entries: catalog::entries(),
        }
    }
}

/// Router builder exposing the estimate, replay and checkout endpoints.
pub fn intake_router<P>(service: Arc<IntakeService<P>>) -> Router
where
    P: PaymentInitiator + 'static,
{
    Router::new()
        .route("/api/v1/intake/catalog", get(catalog_handler))
        .route("/api/v1/intake/estimate", post(estimate_handler::<P>))
        .route("/api/v1/intake/replay", post(replay_handler::<P>))
        .route("/api/v1/intake/checkout", post(checkout_handler::<P>))
        .with_state(service)
}

fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

pub(crate) async fn catalog_handler() -> Response {
    (StatusCode::OK, axum::Json(CatalogView::current())).into_response()
}

pub(crate) async fn estimate_handler<P>(
    State(service): State<Arc<IntakeService<P>>>,
    axum::Json(payload): axum::Json<EstimatePayload>,
) -> Response
where
    P: PaymentInitiator + 'static,
{
    let now = payload.now.unwrap_or_else(local_now);
    let estimate = service.estimate(&payload.form, now);
    (StatusCode::OK, axum::Json(estimate)).into_response()
}

pub(crate) async fn replay_handler<P>(
    State(service): State<Arc<IntakeService<P>>>,
    axum::Json(payload): axum::Json<ReplayPayload>,
) -> Response
where
    P: PaymentInitiator + 'static,
{
    let now = payload.now.unwrap_or_else(local_now);
    let outcome = service.replay(payload.events, now);
    (StatusCode::OK, axum::Json(outcome)).into_response()
}

pub(crate) async fn checkout_handler<P>(
    State(service): State<Arc<IntakeService<P>>>,
    axum::Json(payload): axum::Json<CheckoutPayload>,
) -> Response
where
    P: PaymentInitiator + 'static,
{
    let now = payload.now.unwrap_or_else(local_now);
    let redirects = payload
        .origin
        .as_deref()
        .filter(|origin| !origin.trim().is_empty())
        .map(CheckoutRedirects::for_origin);

    match service.checkout(&payload.form, redirects.as_ref(), now) {
        Ok(receipt) => (StatusCode::OK, axum::Json(receipt)).into_response(),
        Err(error) => AppError::from(error).into_response(),
    }
}
