//! Fixed option lists offered by the intake screens.

use serde::Serialize;

/// Substring identifying the alternating one-way flagging configuration.
pub const FLAGGING_OPERATION_MARKER: &str = "Option 3";

pub const SERVICE_CATEGORIES: [&str; 2] = ["Traffic Control", "Thermoplastic Pavement Marking"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WorkTypeGroup {
    pub title: &'static str,
    pub items: &'static [&'static str],
}

pub const WORK_TYPE_GROUPS: [WorkTypeGroup; 4] = [
    WorkTypeGroup {
        title: "Underground Work",
        items: &["Pothole", "Coring / Drilling"],
    },
    WorkTypeGroup {
        title: "Concrete / Asphalt / Paving",
        items: &["Concrete Cutting", "Milling", "Asphalt Cutting", "Paving"],
    },
    WorkTypeGroup {
        title: "Striping & Thermoplastic",
        items: &["Install Striping", "Remove Striping", "Thermoplastic"],
    },
    WorkTypeGroup {
        title: "Other",
        items: &["Other"],
    },
];

/// One of the four traffic conditions a job can be configured with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TrafficConfigurationOption {
    pub label: &'static str,
    pub summary: &'static str,
}

pub const TRAFFIC_CONFIGURATION_OPTIONS: [TrafficConfigurationOption; 4] = [
    TrafficConfigurationOption {
        label: "Option 1 — Stationary Single Lane Closure",
        summary: "Closes one specific lane on a multilane highway for a fixed work area.",
    },
    TrafficConfigurationOption {
        label: "Option 2 — Shoulder Closure",
        summary: "Work is performed on the shoulder; traffic stays in its travel lanes.",
    },
    TrafficConfigurationOption {
        label: "Option 3 — Flagging Operation (Alternating One-Way)",
        summary: "One lane of a two-lane road is closed and both directions take turns using the open lane.",
    },
    TrafficConfigurationOption {
        label: "Option 4 — Mobile or Moving Closure",
        summary: "Work moves continuously or intermittently along the roadway behind shadow vehicles.",
    },
];

pub fn flagging_operation() -> &'static TrafficConfigurationOption {
    &TRAFFIC_CONFIGURATION_OPTIONS[2]
}
