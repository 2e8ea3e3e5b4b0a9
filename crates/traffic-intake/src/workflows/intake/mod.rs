//! Multi-step intake for traffic-control service requests.
//!
//! Everything downstream of the wizard is a pure function of a [`FormState`] snapshot:
//! the rule engine derives mandatory staffing, pricing turns quantities and labor into a
//! deposit, and the step validator gates forward navigation. [`WizardController`] is the
//! only owner of mutable state.

pub mod catalog;
pub mod checkout;
pub mod domain;
pub mod estimate;
pub mod pricing;
pub mod reference;
pub mod router;
pub mod rules;
pub mod service;
pub mod validation;
pub mod wizard;

#[cfg(test)]
mod tests;

pub use catalog::{CatalogEntry, CatalogTier, RateCard, CATALOG_VERSION};
pub use checkout::{
    build_checkout_request, CheckoutError, CheckoutRedirects, CheckoutRequest, CheckoutSession,
    GatewayError, PaymentInitiator,
};
pub use domain::{
    ClientStatus, FormState, GeoPoint, IntakeStep, RoadwayClass, TcpType, WorkHours, YesNo,
    YesNoUnsure, DEFAULT_SHIFT_HOURS, MIN_SHIFT_HOURS,
};
pub use estimate::{EquipmentLine, IntakeEstimate, SummaryDisplay};
pub use pricing::{calculate, FinancialSummary, Money, OvertimeNotice};
pub use router::intake_router;
pub use rules::{apply_labor_requirements, derive_labor_requirements, LaborRule, RuleResult};
pub use service::{CheckoutReceipt, IntakeService, ReplayOutcome, WizardEvent};
pub use validation::{is_within_24_hours, StepValidator, StepValidity};
pub use wizard::{derive_state, FieldError, FieldUpdate, Selection, WizardController};
