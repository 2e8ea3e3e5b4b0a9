use std::sync::Arc;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::checkout::{
    build_checkout_request, CheckoutError, CheckoutRedirects, PaymentInitiator,
};
use super::domain::{FormState, IntakeStep};
use super::estimate::IntakeEstimate;
use super::pricing::{self, Money};
use super::validation::StepValidator;
use super::wizard::{derive_state, FieldUpdate, Selection, WizardController};

/// Single interaction replayed through a fresh wizard session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WizardEvent {
    Update { update: FieldUpdate },
    RawUpdate { field: String, value: String },
    Toggle { selection: Selection, item: String },
    CatalogQuantity { item: String, quantity: i64 },
    Advance,
    Retreat,
}

/// A continue action that validation refused.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockedAdvance {
    pub event_index: usize,
    pub step: IntakeStep,
}

/// A string-keyed update that could not be interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RejectedUpdate {
    pub event_index: usize,
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplayOutcome {
    pub step: IntakeStep,
    pub step_label: &'static str,
    pub blocked: Vec<BlockedAdvance>,
    pub rejected: Vec<RejectedUpdate>,
    pub estimate: IntakeEstimate,
}

/// Hosted checkout ready for the customer's browser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutReceipt {
    pub session_id: String,
    pub url: String,
    pub amount: Money,
    pub amount_in_cents: u64,
}

/// Composes the wizard, estimate and the payment provider behind one entry point.
pub struct IntakeService<P> {
    validator: StepValidator,
    gateway: Arc<P>,
    redirects: CheckoutRedirects,
}

impl<P> IntakeService<P>
where
    P: PaymentInitiator + 'static,
{
    pub fn new(gateway: Arc<P>, validator: StepValidator, redirects: CheckoutRedirects) -> Self {
        Self {
            validator,
            gateway,
            redirects,
        }
    }

    pub fn validator(&self) -> StepValidator {
        self.validator
    }

    pub fn redirects(&self) -> &CheckoutRedirects {
        &self.redirects
    }

    pub fn estimate(&self, form: &FormState, now: NaiveDateTime) -> IntakeEstimate {
        IntakeEstimate::evaluate(form, &self.validator, now)
    }

    /// Runs the events in order. Refused navigation and unreadable updates are recorded
    /// and skipped; the replay itself never fails.
    pub fn replay(&self, events: Vec<WizardEvent>, now: NaiveDateTime) -> ReplayOutcome {
        let mut wizard = WizardController::new(self.validator);
        let mut blocked = Vec::new();
        let mut rejected = Vec::new();

        for (event_index, event) in events.into_iter().enumerate() {
            match event {
                WizardEvent::Update { update } => {
                    wizard.update_field(update);
                }
                WizardEvent::RawUpdate { field, value } => {
                    match FieldUpdate::from_raw(&field, &value) {
                        Ok(update) => {
                            wizard.update_field(update);
                        }
                        Err(error) => rejected.push(RejectedUpdate {
                            event_index,
                            error: error.to_string(),
                        }),
                    }
                }
                WizardEvent::Toggle { selection, item } => {
                    wizard.toggle(selection, &item);
                }
                WizardEvent::CatalogQuantity { item, quantity } => {
                    wizard.update_catalog_quantity(&item, quantity);
                }
                WizardEvent::Advance => {
                    let step = wizard.step();
                    if !wizard.advance_if_valid(now) {
                        blocked.push(BlockedAdvance { event_index, step });
                    }
                }
                WizardEvent::Retreat => {
                    wizard.retreat();
                }
            }
        }

        let step = wizard.step();
        let estimate = IntakeEstimate::evaluate(wizard.state(), &self.validator, now);

        ReplayOutcome {
            step,
            step_label: step.label(),
            blocked,
            rejected,
            estimate,
        }
    }

    /// Opens a deposit checkout for a snapshot that has cleared the Schedule step.
    pub fn checkout(
        &self,
        form: &FormState,
        redirects: Option<&CheckoutRedirects>,
        now: NaiveDateTime,
    ) -> Result<CheckoutReceipt, CheckoutError> {
        let form = derive_state(form, self.validator.is_bypassed());
        let summary = pricing::calculate(&form);
        let redirects = redirects.unwrap_or(&self.redirects);

        let request = build_checkout_request(&form, &summary, redirects, &self.validator, now)?;
        let session = self.gateway.initiate(&request).map_err(|error| {
            warn!(%error, "payment provider refused deposit checkout");
            error
        })?;

        info!(
            session_id = %session.session_id,
            amount_cents = request.amount_in_smallest_currency_unit,
            company = %form.company_name,
            "deposit checkout session created"
        );

        Ok(CheckoutReceipt {
            session_id: session.session_id,
            url: session.redirect_url,
            amount: summary.deposit_amount,
            amount_in_cents: request.amount_in_smallest_currency_unit,
        })
    }
}
