//! Step navigation plus the field-update reducer that keeps staffing rules enforced.

mod update;

pub use update::{format_phone_number, parse_integer_input, FieldError, FieldUpdate, Selection};

use chrono::NaiveDateTime;
use tracing::{debug, info};

use super::domain::{FormState, IntakeStep, MIN_SHIFT_HOURS};
use super::pricing::{self, FinancialSummary};
use super::rules::{apply_labor_requirements, derive_labor_requirements, RuleResult};
use super::validation::StepValidator;
use update::clamp_count;

/// Post-update pass run after every edit.
///
/// Shift hours are floored at [`MIN_SHIFT_HOURS`]. The staffing rules are forced onto the
/// labor selections unless the customer has accepted the labor policy in a strict session;
/// once accepted the selections are left as entered. An intersection always carries at
/// least one UTC and one flagger on top of whatever the individual rules demand.
pub fn derive_state(snapshot: &FormState, validation_bypassed: bool) -> FormState {
    let mut next = snapshot.clone();
    next.flagger_hours = next.flagger_hours.max(MIN_SHIFT_HOURS);
    next.utc_hours = next.utc_hours.max(MIN_SHIFT_HOURS);

    if next.labor_policy_accepted && !validation_bypassed {
        return next;
    }

    if next.is_intersection {
        next.needs_utc = true;
        next.num_utc = next.num_utc.max(1);
        next.needs_flaggers = true;
        next.num_flaggers = next.num_flaggers.max(1);
    }

    let requirements = derive_labor_requirements(&next);
    apply_labor_requirements(&mut next, &requirements);
    next
}

/// Owns the current step and form snapshot for one intake session.
#[derive(Debug, Clone)]
pub struct WizardController {
    step: IntakeStep,
    state: FormState,
    validator: StepValidator,
}

impl WizardController {
    pub fn new(validator: StepValidator) -> Self {
        Self::resume(validator, IntakeStep::CustomerInfo, FormState::default())
    }

    /// Pick a session back up from a stored snapshot. The snapshot is normalized first.
    pub fn resume(validator: StepValidator, step: IntakeStep, state: FormState) -> Self {
        let state = derive_state(&state, validator.is_bypassed());
        Self {
            step,
            state,
            validator,
        }
    }

    pub fn step(&self) -> IntakeStep {
        self.step
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn validator(&self) -> StepValidator {
        self.validator
    }

    /// Moves forward one step without consulting validation; stays put on the last step.
    pub fn advance(&mut self) -> IntakeStep {
        if let Some(next) = self.step.next() {
            self.step = next;
        }
        self.step
    }

    /// Moves back one step. The first step and the confirmation screen have no way back.
    pub fn retreat(&mut self) -> IntakeStep {
        if self.step.is_terminal() {
            return self.step;
        }
        if let Some(previous) = self.step.previous() {
            self.step = previous;
        }
        self.step
    }

    pub fn can_advance(&self, now: NaiveDateTime) -> bool {
        !self.step.is_terminal() && self.validator.is_step_valid(self.step, &self.state, now)
    }

    pub fn advance_if_valid(&mut self, now: NaiveDateTime) -> bool {
        if !self.can_advance(now) {
            debug!(step = ?self.step, "continue blocked by step validation");
            return false;
        }
        self.advance();
        true
    }

    pub fn update_field(&mut self, update: FieldUpdate) -> &FormState {
        let mut next = self.state.clone();
        update.apply(&mut next);
        self.commit(next)
    }

    /// Sets a catalog quantity, clamping negatives to zero. Zero removes the line.
    pub fn update_catalog_quantity(&mut self, item: &str, quantity: i64) -> &FormState {
        let mut next = self.state.clone();
        match clamp_count(quantity) {
            0 => {
                next.catalog_quantities.remove(item);
            }
            quantity => {
                next.catalog_quantities.insert(item.to_string(), quantity);
            }
        }
        self.commit(next)
    }

    pub fn toggle(&mut self, selection: Selection, item: &str) -> &FormState {
        let update = FieldUpdate::toggle(&self.state, selection, item);
        self.update_field(update)
    }

    pub fn labor_requirements(&self) -> RuleResult {
        derive_labor_requirements(&self.state)
    }

    pub fn financial_summary(&self) -> FinancialSummary {
        pricing::calculate(&self.state)
    }

    /// Called once the payment provider reports success.
    pub fn complete_checkout(&mut self) {
        info!(
            company = %self.state.company_name,
            "intake completed after successful checkout"
        );
        self.step = IntakeStep::ThankYou;
    }

    pub fn into_state(self) -> FormState {
        self.state
    }

    fn commit(&mut self, next: FormState) -> &FormState {
        self.state = derive_state(&next, self.validator.is_bypassed());
        &self.state
    }
}
