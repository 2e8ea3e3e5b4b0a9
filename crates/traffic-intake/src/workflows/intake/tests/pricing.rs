use super::common::*;
use crate::workflows::intake::catalog::{
    self, CatalogTier, ARROW_BOARD, DRUMS, MESSAGE_BOARD, TRAFFIC_CONES,
    TRUCK_MOUNTED_ATTENUATOR,
};
use crate::workflows::intake::domain::FormState;
use crate::workflows::intake::pricing::{calculate, Money, OvertimeNotice};

#[test]
fn ten_drums_without_labor_deposit_half_the_equipment() {
    let state = FormState {
        catalog_quantities: quantities(&[(DRUMS, 10)]),
        ..FormState::default()
    };

    let summary = calculate(&state);
    assert_eq!(summary.equipment_cost, Money::from_dollars(100));
    assert_eq!(summary.labor_cost, Money::ZERO);
    assert_eq!(summary.deposit_amount.to_decimal_string(), "50.00");
    assert_eq!(summary.deposit_in_cents(), 5_000);
    assert_eq!(summary.equipment_balance(), Money::from_dollars(50));
}

#[test]
fn panel_totals_count_units_per_tier() {
    let state = FormState {
        catalog_quantities: quantities(&[
            ("Work Zone Ahead", 2),
            ("Sidewalk Closed", 1),
            ("Road Work Ahead (RWA)", 4),
            ("Reduced Speed Ahead", 3),
            (TRAFFIC_CONES, 20),
        ]),
        ..FormState::default()
    };

    let summary = calculate(&state);
    assert_eq!(summary.panel_a_total, 3);
    assert_eq!(summary.panel_b_total, 4);
    assert_eq!(summary.panel_c_total, 3);
    // 3 x $10 + 4 x $12 + 3 x $15 + 20 x $5
    assert_eq!(summary.equipment_cost, Money::from_dollars(223));
}

#[test]
fn labor_counts_only_when_requested() {
    let state = FormState {
        num_flaggers: 2,
        flagger_hours: 10,
        num_utc: 1,
        utc_hours: 6,
        ..FormState::default()
    };
    let idle = calculate(&state);
    assert_eq!(idle.labor_cost, Money::ZERO);
    assert_eq!(idle.flagger_hours_total, 0);

    let staffed = calculate(&FormState {
        needs_flaggers: true,
        needs_utc: true,
        ..state
    });
    assert_eq!(staffed.flagger_hours_total, 20);
    assert_eq!(staffed.utc_hours_total, 6);
    // 20 x $65 + 6 x $165
    assert_eq!(staffed.labor_cost, Money::from_dollars(2_290));
    assert_eq!(staffed.deposit_amount, Money::from_dollars(2_290));
}

#[test]
fn deposit_combines_full_labor_and_half_equipment() {
    let state = FormState {
        catalog_quantities: quantities(&[(ARROW_BOARD, 1), (MESSAGE_BOARD, 1)]),
        needs_flaggers: true,
        num_flaggers: 2,
        flagger_hours: 8,
        ..FormState::default()
    };

    let summary = calculate(&state);
    assert_eq!(summary.equipment_cost, Money::from_dollars(295));
    assert_eq!(summary.labor_cost, Money::from_dollars(1_040));
    assert_eq!(summary.deposit_amount, Money::from_cents(118_750));
    assert_eq!(summary.deposit_amount.to_string(), "$1,187.50");
}

#[test]
fn unknown_items_and_quote_only_items_add_nothing() {
    let state = FormState {
        catalog_quantities: quantities(&[
            ("Hovercraft Escort", 4),
            (TRUCK_MOUNTED_ATTENUATOR, 1),
        ]),
        ..FormState::default()
    };

    let summary = calculate(&state);
    assert_eq!(summary.equipment_cost, Money::ZERO);
    assert_eq!(summary.deposit_amount, Money::ZERO);
    assert_eq!(
        summary.quote_required_items,
        vec![TRUCK_MOUNTED_ATTENUATOR.to_string()]
    );
}

#[test]
fn catalog_names_are_unique_and_panels_are_complete() {
    let entries = catalog::entries();
    let mut names: Vec<_> = entries.iter().map(|entry| entry.name).collect();
    names.sort_unstable();
    names.dedup();
    assert_eq!(names.len(), entries.len());

    assert_eq!(catalog::entries_in(CatalogTier::PanelA).count(), 15);
    assert_eq!(catalog::entries_in(CatalogTier::PanelB).count(), 21);
    assert_eq!(catalog::entries_in(CatalogTier::PanelC).count(), 8);
    assert!(catalog::entries_in(CatalogTier::PanelC).all(|entry| entry.tier.is_sign_panel()));
    assert!(catalog::lookup(TRUCK_MOUNTED_ATTENUATOR)
        .map(|entry| entry.is_quote_only())
        .unwrap_or(false));
}

#[test]
fn overtime_notice_flags_weekends_and_long_shifts() {
    let weekday = FormState {
        start_date: Some(date(2025, 6, 10)),
        ..FormState::default()
    };
    let notice = OvertimeNotice::assess(&weekday);
    assert!(!notice.applies());
    assert_eq!(notice.label(), "Standard Rates Apply");

    let saturday = FormState {
        start_date: Some(date(2025, 6, 14)),
        ..FormState::default()
    };
    assert!(OvertimeNotice::assess(&saturday).weekend_start);

    let long_shift = FormState {
        utc_hours: 10,
        ..FormState::default()
    };
    let notice = OvertimeNotice::assess(&long_shift);
    assert!(notice.extended_utc_shift);
    assert_eq!(notice.label(), "Overtime Rates Detected");
}
