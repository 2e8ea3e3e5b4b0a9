use chrono::{Datelike, Weekday};
use serde::Serialize;

use super::super::domain::FormState;

pub const STANDARD_SHIFT_HOURS: u32 = 8;

/// Disclosure shown next to the labor summary when overtime rates will apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OvertimeNotice {
    pub weekend_start: bool,
    pub extended_flagger_shift: bool,
    pub extended_utc_shift: bool,
}

impl OvertimeNotice {
    pub fn assess(state: &FormState) -> Self {
        let weekend_start = state
            .start_date
            .map(|date| matches!(date.weekday(), Weekday::Sat | Weekday::Sun))
            .unwrap_or(false);

        Self {
            weekend_start,
            extended_flagger_shift: state.flagger_hours > STANDARD_SHIFT_HOURS,
            extended_utc_shift: state.utc_hours > STANDARD_SHIFT_HOURS,
        }
    }

    pub fn applies(&self) -> bool {
        self.weekend_start || self.extended_flagger_shift || self.extended_utc_shift
    }

    pub fn label(&self) -> &'static str {
        if self.applies() {
            "Overtime Rates Detected"
        } else {
            "Standard Rates Apply"
        }
    }
}
