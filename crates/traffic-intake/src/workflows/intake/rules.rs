use serde::Serialize;
use tracing::debug;

use super::domain::{FormState, RoadwayClass};

/// Staffing rule that can make flaggers or a UTC mandatory for a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LaborRule {
    OneLaneOperation,
    SignalizedIntersection,
    UnsignalizedIntersection,
    ResidentialOneLane,
}

impl LaborRule {
    pub fn description(self) -> &'static str {
        match self {
            LaborRule::OneLaneOperation => {
                "alternating one-way flagging needs a flagger at each end of the work zone"
            }
            LaborRule::SignalizedIntersection => {
                "signalized intersection traffic requires a UTC per MUTCD"
            }
            LaborRule::UnsignalizedIntersection => {
                "unsignalized intersection requires three flaggers"
            }
            LaborRule::ResidentialOneLane => {
                "one-lane operation on a residential road requires three flaggers"
            }
        }
    }
}

/// Staffing the job must carry regardless of what the customer selected.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleResult {
    pub flaggers_required: bool,
    #[serde(rename = "utcRequired")]
    pub utc_required: bool,
    pub min_flaggers: u32,
    #[serde(rename = "minUTC")]
    pub min_utc: u32,
    pub triggered: Vec<LaborRule>,
}

impl RuleResult {
    fn require_flaggers(&mut self, rule: LaborRule, minimum: u32) {
        self.flaggers_required = true;
        self.min_flaggers = self.min_flaggers.max(minimum);
        self.triggered.push(rule);
    }

    fn require_utc(&mut self, rule: LaborRule, minimum: u32) {
        self.utc_required = true;
        self.min_utc = self.min_utc.max(minimum);
        self.triggered.push(rule);
    }

    pub fn is_empty(&self) -> bool {
        self.triggered.is_empty()
    }
}

pub fn derive_labor_requirements(state: &FormState) -> RuleResult {
    let mut result = RuleResult::default();
    let one_lane = state.is_one_lane_operation();

    if one_lane {
        result.require_flaggers(LaborRule::OneLaneOperation, 2);
    }

    if state.is_intersection && state.has_traffic_signal {
        result.require_utc(LaborRule::SignalizedIntersection, 1);
    }

    if state.is_intersection && !state.has_traffic_signal {
        result.require_flaggers(LaborRule::UnsignalizedIntersection, 3);
    }

    if one_lane && state.roadway_class == Some(RoadwayClass::Residential) {
        result.require_flaggers(LaborRule::ResidentialOneLane, 3);
    }

    result
}

/// Raise the staffing selections to the required minimums. Never lowers a count.
pub fn apply_labor_requirements(state: &mut FormState, requirements: &RuleResult) {
    if requirements.flaggers_required {
        if !state.needs_flaggers || state.num_flaggers < requirements.min_flaggers {
            debug!(
                selected = state.num_flaggers,
                minimum = requirements.min_flaggers,
                "raising flagger headcount to required minimum"
            );
        }
        state.needs_flaggers = true;
        state.num_flaggers = state.num_flaggers.max(requirements.min_flaggers);
    }

    if requirements.utc_required {
        if !state.needs_utc || state.num_utc < requirements.min_utc {
            debug!(
                selected = state.num_utc,
                minimum = requirements.min_utc,
                "raising UTC headcount to required minimum"
            );
        }
        state.needs_utc = true;
        state.num_utc = state.num_utc.max(requirements.min_utc);
    }
}
