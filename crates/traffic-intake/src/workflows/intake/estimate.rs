use chrono::NaiveDateTime;
use serde::Serialize;

use super::catalog::{self, CatalogTier};
use super::domain::FormState;
use super::pricing::{self, FinancialSummary, Money, OvertimeNotice};
use super::rules::{derive_labor_requirements, RuleResult};
use super::validation::{is_within_24_hours, StepValidator, StepValidity};
use super::wizard::derive_state;

/// Money figures rendered the way the summary panel shows them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryDisplay {
    pub equipment_cost: String,
    pub labor_cost: String,
    pub deposit_amount: String,
    pub equipment_balance: String,
}

impl SummaryDisplay {
    fn from_summary(summary: &FinancialSummary) -> Self {
        Self {
            equipment_cost: summary.equipment_cost.to_string(),
            labor_cost: summary.labor_cost.to_string(),
            deposit_amount: summary.deposit_amount.to_string(),
            equipment_balance: summary.equipment_balance().to_string(),
        }
    }
}

/// One selected catalog item with its daily pricing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentLine {
    pub item: &'static str,
    pub tier: CatalogTier,
    pub tier_label: &'static str,
    pub quantity: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub daily_rate: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_total: Option<Money>,
}

impl EquipmentLine {
    pub fn is_quote_only(&self) -> bool {
        self.daily_rate.is_none()
    }
}

/// Everything the intake screens derive from one snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IntakeEstimate {
    pub form: FormState,
    pub labor_requirements: RuleResult,
    pub summary: FinancialSummary,
    pub display: SummaryDisplay,
    pub equipment_lines: Vec<EquipmentLine>,
    pub within_24_hours: bool,
    pub overtime: OvertimeNotice,
    pub overtime_label: &'static str,
    pub steps: Vec<StepValidity>,
}

impl IntakeEstimate {
    /// The snapshot goes through the same reducer the wizard uses before anything is priced.
    pub fn evaluate(form: &FormState, validator: &StepValidator, now: NaiveDateTime) -> Self {
        let form = derive_state(form, validator.is_bypassed());
        let summary = pricing::calculate(&form);
        let overtime = OvertimeNotice::assess(&form);

        Self {
            labor_requirements: derive_labor_requirements(&form),
            display: SummaryDisplay::from_summary(&summary),
            equipment_lines: equipment_lines(&form),
            within_24_hours: is_within_24_hours(form.start_date, now),
            overtime_label: overtime.label(),
            overtime,
            steps: validator.report(&form, now),
            summary,
            form,
        }
    }

    pub fn lines_in(&self, tier: CatalogTier) -> impl Iterator<Item = &EquipmentLine> {
        self.equipment_lines
            .iter()
            .filter(move |line| line.tier == tier)
    }
}

/// Lines in catalog order, skipping unknown items and zero quantities.
pub fn equipment_lines(form: &FormState) -> Vec<EquipmentLine> {
    catalog::entries()
        .iter()
        .filter_map(|entry| {
            let quantity = form.catalog_quantity(entry.name);
            if quantity == 0 {
                return None;
            }

            let daily_rate = entry.rates.map(|rates| rates.daily_rate());
            Some(EquipmentLine {
                item: entry.name,
                tier: entry.tier,
                tier_label: entry.tier.label(),
                quantity,
                daily_rate,
                line_total: daily_rate.map(|rate| rate * u64::from(quantity)),
            })
        })
        .collect()
}
