//! Estimate arithmetic: catalog quantities and labor selections in, itemized totals out.

mod money;
mod overtime;

pub use money::Money;
pub use overtime::{OvertimeNotice, STANDARD_SHIFT_HOURS};

use serde::Serialize;

use super::catalog::{self, CatalogTier};
use super::domain::FormState;

pub const FLAGGER_HOURLY_RATE: Money = Money::from_dollars(65);
pub const UTC_HOURLY_RATE: Money = Money::from_dollars(165);
/// Share of the equipment cost collected upfront; labor is always collected in full.
pub const EQUIPMENT_DEPOSIT_PERCENT: u64 = 50;

/// Itemized estimate derived from a single form snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialSummary {
    pub panel_a_total: u64,
    pub panel_b_total: u64,
    pub panel_c_total: u64,
    pub equipment_cost: Money,
    pub labor_cost: Money,
    pub deposit_amount: Money,
    pub flagger_hours_total: u64,
    #[serde(rename = "utcHoursTotal")]
    pub utc_hours_total: u64,
    /// Selected items that have no list price and are quoted per project.
    pub quote_required_items: Vec<String>,
}

impl FinancialSummary {
    pub fn deposit_in_cents(&self) -> u64 {
        self.deposit_amount.cents()
    }

    /// Equipment share invoiced after the job completes.
    pub fn equipment_balance(&self) -> Money {
        self.equipment_cost
            .saturating_sub(self.equipment_cost.percent(EQUIPMENT_DEPOSIT_PERCENT))
    }
}

/// Pure and repeatable: the same snapshot always yields the same summary.
pub fn calculate(state: &FormState) -> FinancialSummary {
    let mut summary = FinancialSummary::default();

    for (item, &quantity) in &state.catalog_quantities {
        let Some(entry) = catalog::lookup(item) else {
            continue;
        };
        let quantity = u64::from(quantity);

        match entry.tier {
            CatalogTier::PanelA => {
                summary.panel_a_total = summary.panel_a_total.saturating_add(quantity)
            }
            CatalogTier::PanelB => {
                summary.panel_b_total = summary.panel_b_total.saturating_add(quantity)
            }
            CatalogTier::PanelC => {
                summary.panel_c_total = summary.panel_c_total.saturating_add(quantity)
            }
            CatalogTier::ChannelizingDevice
            | CatalogTier::AdvancedDevice
            | CatalogTier::ImpactProtection => {}
        }

        match entry.rates {
            Some(rates) => {
                summary.equipment_cost = summary.equipment_cost + rates.daily_rate() * quantity;
            }
            None if quantity > 0 => summary.quote_required_items.push(entry.name.to_string()),
            None => {}
        }
    }

    if state.needs_flaggers {
        summary.flagger_hours_total =
            u64::from(state.num_flaggers).saturating_mul(u64::from(state.flagger_hours));
    }
    if state.needs_utc {
        summary.utc_hours_total =
            u64::from(state.num_utc).saturating_mul(u64::from(state.utc_hours));
    }

    summary.labor_cost = FLAGGER_HOURLY_RATE * summary.flagger_hours_total
        + UTC_HOURLY_RATE * summary.utc_hours_total;
    summary.deposit_amount =
        summary.equipment_cost.percent(EQUIPMENT_DEPOSIT_PERCENT) + summary.labor_cost;

    summary
}
