use chrono::{NaiveDate, NaiveDateTime};
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use traffic_intake::error::AppError;
use traffic_intake::workflows::intake::{
    CheckoutRequest, CheckoutSession, FormState, GatewayError, PaymentInitiator, StepValidator,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) validator: StepValidator,
}

const SANDBOX_CHECKOUT_HOST: &str = "https://checkout.sandbox.invalid/pay";

/// Payment provider stand-in used until a real processor is wired in. Sessions are
/// numbered per gateway and every request is kept for inspection.
#[derive(Default)]
pub(crate) struct SandboxCheckoutGateway {
    sequence: AtomicU64,
    requests: Mutex<Vec<CheckoutRequest>>,
}

impl SandboxCheckoutGateway {
    pub(crate) fn requests(&self) -> Vec<CheckoutRequest> {
        self.requests
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

impl PaymentInitiator for SandboxCheckoutGateway {
    fn initiate(&self, request: &CheckoutRequest) -> Result<CheckoutSession, GatewayError> {
        if request.currency != "usd" {
            return Err(GatewayError::Rejected(format!(
                "unsupported currency '{}'",
                request.currency
            )));
        }

        let mut guard = self
            .requests
            .lock()
            .map_err(|_| GatewayError::Unavailable("sandbox ledger poisoned".to_string()))?;
        guard.push(request.clone());

        let id = self.sequence.fetch_add(1, Ordering::Relaxed) + 1;
        let session_id = format!("cs_test_{id:06}");
        Ok(CheckoutSession {
            redirect_url: format!("{SANDBOX_CHECKOUT_HOST}/{session_id}"),
            session_id,
        })
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

/// Accepts `YYYY-MM-DDTHH:MM[:SS]`, the space-separated form, or a bare date (midnight).
pub(crate) fn parse_datetime(raw: &str) -> Result<NaiveDateTime, String> {
    let trimmed = raw.trim();
    for format in [
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
    ] {
        if let Ok(value) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(value);
        }
    }

    parse_date(trimmed)
        .map(|date| date.and_time(chrono::NaiveTime::MIN))
        .map_err(|_| format!("failed to parse '{raw}' as YYYY-MM-DDTHH:MM[:SS]"))
}

pub(crate) fn load_form(path: &Path) -> Result<FormState, AppError> {
    let raw = std::fs::read_to_string(path)?;
    let form = serde_json::from_str(&raw)?;
    Ok(form)
}
