use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;

use super::domain::{FormState, IntakeStep, YesNo};

const REQUIRED_PHONE_DIGITS: usize = 10;

/// Gatekeeper for the "continue" action on each intake step.
///
/// `bypass` is the demo/test mode switch; when set every predicate passes without looking
/// at the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StepValidator {
    bypass: bool,
}

/// Whether a single step currently allows forward navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StepValidity {
    pub step: IntakeStep,
    pub label: &'static str,
    pub valid: bool,
}

impl StepValidator {
    pub fn strict() -> Self {
        Self { bypass: false }
    }

    pub fn bypassed() -> Self {
        Self { bypass: true }
    }

    pub fn with_bypass(bypass: bool) -> Self {
        Self { bypass }
    }

    pub fn is_bypassed(&self) -> bool {
        self.bypass
    }

    /// `now` is the caller's local wall-clock time; the 24-hour window is evaluated
    /// against it on every call.
    pub fn is_step_valid(&self, step: IntakeStep, state: &FormState, now: NaiveDateTime) -> bool {
        if self.bypass {
            return true;
        }

        match step {
            IntakeStep::CustomerInfo => customer_info_complete(state),
            IntakeStep::TrafficNeeds => traffic_documents_complete(state),
            IntakeStep::RoadwayClass => state.roadway_class.is_some(),
            IntakeStep::Schedule => schedule_acknowledged(state, now),
            IntakeStep::JobLocation
            | IntakeStep::WorkCategory
            | IntakeStep::WorkType
            | IntakeStep::SignsCatalog
            | IntakeStep::ThankYou => true,
        }
    }

    pub fn report(&self, state: &FormState, now: NaiveDateTime) -> Vec<StepValidity> {
        IntakeStep::ALL
            .iter()
            .map(|&step| StepValidity {
                step,
                label: step.label(),
                valid: self.is_step_valid(step, state, now),
            })
            .collect()
    }
}

/// True when the start date, taken as local midnight, is less than a day away.
/// Dates already in the past count as within the window.
pub fn is_within_24_hours(start_date: Option<NaiveDate>, now: NaiveDateTime) -> bool {
    match start_date {
        Some(date) => date.and_time(NaiveTime::MIN) - now < Duration::hours(24),
        None => false,
    }
}

fn customer_info_complete(state: &FormState) -> bool {
    state.client_status.is_some()
        && !state.company_name.trim().is_empty()
        && !state.contact_name.trim().is_empty()
        && state.phone_digits().len() == REQUIRED_PHONE_DIGITS
        && !state.email.trim().is_empty()
        && state.sms_consent.is_some()
}

fn traffic_documents_complete(state: &FormState) -> bool {
    let permit_ok = match state.has_permit {
        Some(YesNo::No) => true,
        Some(YesNo::Yes) => state.has_permit_document(),
        None => false,
    };

    let tcp_ok = match state.has_tcp {
        Some(YesNo::No) => state.tcp_type.is_some(),
        Some(YesNo::Yes) => state.has_tcp_document(),
        None => false,
    };

    permit_ok && tcp_ok && !state.configuration.is_empty()
}

fn schedule_acknowledged(state: &FormState, now: NaiveDateTime) -> bool {
    state.billing_terms_accepted
        && state.scheduling_notice_accepted
        && state.start_date.is_some()
        && (!is_within_24_hours(state.start_date, now) || state.double_charge_accepted)
}
