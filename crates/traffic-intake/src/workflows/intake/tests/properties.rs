use proptest::prelude::*;

use super::common::*;
use crate::workflows::intake::catalog;
use crate::workflows::intake::domain::{FormState, RoadwayClass};
use crate::workflows::intake::pricing::calculate;
use crate::workflows::intake::wizard::derive_state;

fn catalog_item() -> impl Strategy<Value = &'static str> {
    (0..catalog::entries().len()).prop_map(|index| catalog::entries()[index].name)
}

fn roadway() -> impl Strategy<Value = Option<RoadwayClass>> {
    prop_oneof![
        Just(None),
        Just(Some(RoadwayClass::Residential)),
        Just(Some(RoadwayClass::CityLocal)),
        Just(Some(RoadwayClass::StateHighway)),
    ]
}

proptest! {
    #[test]
    fn pricing_is_repeatable(
        items in proptest::collection::btree_map(catalog_item(), 0u32..500, 0..12),
        flaggers in 0u32..10,
        hours in 4u32..24,
    ) {
        let state = FormState {
            catalog_quantities: items
                .into_iter()
                .map(|(item, quantity)| (item.to_string(), quantity))
                .collect(),
            needs_flaggers: true,
            num_flaggers: flaggers,
            flagger_hours: hours,
            ..FormState::default()
        };
        prop_assert_eq!(calculate(&state), calculate(&state));
    }

    #[test]
    fn equipment_cost_never_drops_when_quantity_grows(
        item in catalog_item(),
        base in 0u32..1_000,
        extra in 0u32..1_000,
    ) {
        let smaller = FormState {
            catalog_quantities: quantities(&[(item, base)]),
            ..FormState::default()
        };
        let larger = FormState {
            catalog_quantities: quantities(&[(item, base + extra)]),
            ..FormState::default()
        };
        prop_assert!(calculate(&smaller).equipment_cost <= calculate(&larger).equipment_cost);
    }

    #[test]
    fn labor_cost_never_drops_when_staffing_grows(
        flaggers in 0u32..20,
        hours in 4u32..24,
        more_flaggers in 0u32..5,
        more_hours in 0u32..5,
    ) {
        let base = FormState {
            needs_flaggers: true,
            num_flaggers: flaggers,
            flagger_hours: hours,
            ..FormState::default()
        };
        let grown = FormState {
            num_flaggers: flaggers + more_flaggers,
            flagger_hours: hours + more_hours,
            ..base.clone()
        };
        prop_assert!(calculate(&base).labor_cost <= calculate(&grown).labor_cost);
    }

    #[test]
    fn forcing_holds_unless_policy_accepted(
        is_intersection in any::<bool>(),
        has_signal in any::<bool>(),
        one_lane in any::<bool>(),
        roadway_class in roadway(),
        num_flaggers in 0u32..6,
        num_utc in 0u32..3,
        policy_accepted in any::<bool>(),
        bypass in any::<bool>(),
    ) {
        let configuration = if one_lane {
            set_of(&[flagging_option().as_str()])
        } else {
            set_of(&[shoulder_option().as_str()])
        };
        let state = FormState {
            is_intersection,
            has_traffic_signal: has_signal,
            configuration,
            roadway_class,
            num_flaggers,
            num_utc,
            labor_policy_accepted: policy_accepted,
            flagger_hours: 0,
            ..FormState::default()
        };

        let derived = derive_state(&state, bypass);
        prop_assert!(derived.flagger_hours >= 4);
        prop_assert_eq!(derive_state(&derived, bypass), derived.clone());

        if !policy_accepted || bypass {
            if is_intersection {
                prop_assert!(derived.needs_utc && derived.num_utc >= 1);
                prop_assert!(derived.needs_flaggers && derived.num_flaggers >= 1);
            }
            if is_intersection && has_signal {
                prop_assert!(derived.needs_utc && derived.num_utc >= 1);
            }
            if is_intersection && !has_signal {
                prop_assert!(derived.needs_flaggers && derived.num_flaggers >= 3);
            }
            if one_lane {
                prop_assert!(derived.needs_flaggers && derived.num_flaggers >= 2);
            }
            prop_assert!(derived.num_flaggers >= num_flaggers);
        } else {
            prop_assert_eq!(derived.num_flaggers, num_flaggers);
            prop_assert_eq!(derived.num_utc, num_utc);
        }
    }
}
