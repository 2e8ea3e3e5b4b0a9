//! Deposit checkout: request assembly and the payment provider seam.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::domain::{FormState, IntakeStep};
use super::pricing::FinancialSummary;
use super::validation::{is_within_24_hours, StepValidator};

pub const CHECKOUT_CURRENCY: &str = "usd";
pub const DEPOSIT_PRODUCT_NAME: &str = "Traffic Control Deposit";
pub const DEPOSIT_PRODUCT_DESCRIPTION: &str = "Non-refundable mobilization & equipment deposit";
pub const CHECKOUT_SOURCE: &str = "maxflow-intake-form";
pub const DEPOSIT_TYPE: &str = "traffic-control";
/// Substituted by the payment provider with the created session id.
pub const SESSION_ID_PLACEHOLDER: &str = "{CHECKOUT_SESSION_ID}";
pub const DEFAULT_CHECKOUT_ORIGIN: &str = "https://maxflow-intake-form-and-payment.vercel.app";

/// Where the provider sends the customer after paying or backing out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRedirects {
    pub success_url: String,
    pub cancel_url: String,
}

impl CheckoutRedirects {
    pub fn for_origin(origin: &str) -> Self {
        let origin = origin.trim().trim_end_matches('/');
        Self {
            success_url: format!("{origin}/?session_id={SESSION_ID_PLACEHOLDER}"),
            cancel_url: format!("{origin}/"),
        }
    }
}

impl Default for CheckoutRedirects {
    fn default() -> Self {
        Self::for_origin(DEFAULT_CHECKOUT_ORIGIN)
    }
}

/// Payload handed to the payment provider for a single deposit line item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    pub amount_in_smallest_currency_unit: u64,
    pub currency: String,
    pub customer_email: Option<String>,
    pub success_redirect: String,
    pub cancel_redirect: String,
    pub product_name: String,
    pub product_description: String,
    pub metadata: BTreeMap<String, String>,
}

/// Hosted checkout created by the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSession {
    pub session_id: String,
    pub redirect_url: String,
}

/// Outbound payment provider (Stripe or a stand-in).
pub trait PaymentInitiator: Send + Sync {
    fn initiate(&self, request: &CheckoutRequest) -> Result<CheckoutSession, GatewayError>;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GatewayError {
    #[error("payment provider unreachable: {0}")]
    Unavailable(String),
    #[error("payment provider misconfigured: {0}")]
    Misconfigured(String),
    #[error("payment provider rejected the session: {0}")]
    Rejected(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CheckoutError {
    #[error("schedule step is incomplete; checkout is not available yet")]
    ScheduleIncomplete,
    #[error("deposit amount is zero; nothing to collect")]
    ZeroDeposit,
    #[error("success redirect must carry the {SESSION_ID_PLACEHOLDER} placeholder")]
    MissingSessionPlaceholder,
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

impl CheckoutError {
    /// Failures caused by the form rather than the provider.
    pub fn is_form_problem(&self) -> bool {
        !matches!(self, CheckoutError::Gateway(_))
    }
}

/// Builds the deposit request for a snapshot that has cleared the Schedule step.
pub fn build_checkout_request(
    state: &FormState,
    summary: &FinancialSummary,
    redirects: &CheckoutRedirects,
    validator: &StepValidator,
    now: NaiveDateTime,
) -> Result<CheckoutRequest, CheckoutError> {
    if !validator.is_step_valid(IntakeStep::Schedule, state, now) {
        return Err(CheckoutError::ScheduleIncomplete);
    }
    if summary.deposit_amount.is_zero() {
        return Err(CheckoutError::ZeroDeposit);
    }
    if !redirects.success_url.contains(SESSION_ID_PLACEHOLDER) {
        return Err(CheckoutError::MissingSessionPlaceholder);
    }

    let within_24_hours = is_within_24_hours(state.start_date, now);
    let mut metadata = BTreeMap::new();
    metadata.insert("companyName".to_string(), state.company_name.clone());
    metadata.insert("contactName".to_string(), state.contact_name.clone());
    metadata.insert(
        "startDate".to_string(),
        state
            .start_date
            .map(|date| date.format("%Y-%m-%d").to_string())
            .unwrap_or_default(),
    );
    metadata.insert("is24hRequest".to_string(), within_24_hours.to_string());
    metadata.insert("source".to_string(), CHECKOUT_SOURCE.to_string());
    metadata.insert("deposit_type".to_string(), DEPOSIT_TYPE.to_string());

    let email = state.email.trim();

    Ok(CheckoutRequest {
        amount_in_smallest_currency_unit: summary.deposit_in_cents(),
        currency: CHECKOUT_CURRENCY.to_string(),
        customer_email: (!email.is_empty()).then(|| email.to_string()),
        success_redirect: redirects.success_url.clone(),
        cancel_redirect: redirects.cancel_url.clone(),
        product_name: DEPOSIT_PRODUCT_NAME.to_string(),
        product_description: DEPOSIT_PRODUCT_DESCRIPTION.to_string(),
        metadata,
    })
}
