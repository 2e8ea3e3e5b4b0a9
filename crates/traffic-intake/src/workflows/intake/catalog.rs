//! Versioned sign and device taxonomy.
//!
//! Every orderable item appears exactly once with its pricing tier and rental rates, so
//! panel membership and unit pricing come from the same row.

use serde::Serialize;

use super::pricing::Money;

pub const CATALOG_VERSION: &str = "2025.1";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogTier {
    PanelA,
    PanelB,
    PanelC,
    ChannelizingDevice,
    AdvancedDevice,
    ImpactProtection,
}

impl CatalogTier {
    pub fn label(self) -> &'static str {
        match self {
            CatalogTier::PanelA => "Panel A — Small / Sidewalk / Local Signs",
            CatalogTier::PanelB => "Panel B — Standard Work Zone Signs",
            CatalogTier::PanelC => "Panel C — Large / Special Warning Signs",
            CatalogTier::ChannelizingDevice => "Channelizing Devices",
            CatalogTier::AdvancedDevice => "Advanced Traffic Devices",
            CatalogTier::ImpactProtection => "Impact Protection",
        }
    }

    pub fn is_sign_panel(self) -> bool {
        matches!(
            self,
            CatalogTier::PanelA | CatalogTier::PanelB | CatalogTier::PanelC
        )
    }
}

/// Rental rates in whole dollars per unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RateCard {
    pub daily: u64,
    pub weekly: u64,
    pub monthly: u64,
}

impl RateCard {
    const fn new(daily: u64, weekly: u64, monthly: u64) -> Self {
        Self {
            daily,
            weekly,
            monthly,
        }
    }

    pub fn daily_rate(&self) -> Money {
        Money::from_dollars(self.daily)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CatalogEntry {
    pub name: &'static str,
    pub tier: CatalogTier,
    /// `None` marks items priced per project by quote.
    pub rates: Option<RateCard>,
}

impl CatalogEntry {
    pub fn is_quote_only(&self) -> bool {
        self.rates.is_none()
    }
}

const PANEL_A: RateCard = RateCard::new(10, 30, 90);
const PANEL_B: RateCard = RateCard::new(12, 36, 108);
const PANEL_C: RateCard = RateCard::new(15, 45, 135);

const fn priced(name: &'static str, tier: CatalogTier, rates: RateCard) -> CatalogEntry {
    CatalogEntry {
        name,
        tier,
        rates: Some(rates),
    }
}

pub const TRAFFIC_CONES: &str = "Traffic Cones (36” MUTCD)";
pub const DRUMS: &str = "Drums";
pub const LIT_DRUMS: &str = "Drums with Warning Light";
pub const VERTICAL_PANELS: &str = "Vertical Panels (VP)";
pub const LIT_VERTICAL_PANELS: &str = "Vertical Panels with Light";
pub const ARROW_BOARD: &str = "Arrow Board";
pub const MESSAGE_BOARD: &str = "VMS / Portable Message Board";
pub const TRUCK_MOUNTED_ATTENUATOR: &str = "TMA";

static CATALOG: [CatalogEntry; 52] = [
    priced("Work Zone Ahead", CatalogTier::PanelA, PANEL_A),
    priced("End Road Work", CatalogTier::PanelA, PANEL_A),
    priced("Detour Left", CatalogTier::PanelA, PANEL_A),
    priced("Detour Right", CatalogTier::PanelA, PANEL_A),
    priced("Detour Straight", CatalogTier::PanelA, PANEL_A),
    priced("End Detour", CatalogTier::PanelA, PANEL_A),
    priced("No Parking (Construction)", CatalogTier::PanelA, PANEL_A),
    priced("Keep Left", CatalogTier::PanelA, PANEL_A),
    priced("Keep Right", CatalogTier::PanelA, PANEL_A),
    priced("No Left Turn", CatalogTier::PanelA, PANEL_A),
    priced("No Right Turn", CatalogTier::PanelA, PANEL_A),
    priced("Sidewalk Closed", CatalogTier::PanelA, PANEL_A),
    priced("Sidewalk Closed – Use Other Side", CatalogTier::PanelA, PANEL_A),
    priced("Sidewalk Crossover (Left / Right)", CatalogTier::PanelA, PANEL_A),
    priced(
        "Blank Type I Barricade (Pedestrian Control)",
        CatalogTier::PanelA,
        PANEL_A,
    ),
    priced("Road Work Ahead (RWA)", CatalogTier::PanelB, PANEL_B),
    priced("One Lane Road Ahead (OLR)", CatalogTier::PanelB, PANEL_B),
    priced("Flagger Ahead", CatalogTier::PanelB, PANEL_B),
    priced("Be Prepared to Stop", CatalogTier::PanelB, PANEL_B),
    priced("Left Lane Closed", CatalogTier::PanelB, PANEL_B),
    priced("Right Lane Closed", CatalogTier::PanelB, PANEL_B),
    priced("Shoulder Work Ahead", CatalogTier::PanelB, PANEL_B),
    priced("Utility Work Ahead", CatalogTier::PanelB, PANEL_B),
    priced("Uneven Lanes", CatalogTier::PanelB, PANEL_B),
    priced("Rough Road", CatalogTier::PanelB, PANEL_B),
    priced("Loose Gravel", CatalogTier::PanelB, PANEL_B),
    priced("Dip / Bump Ahead", CatalogTier::PanelB, PANEL_B),
    priced("Road Closed", CatalogTier::PanelB, PANEL_B),
    priced("Road Closed Ahead", CatalogTier::PanelB, PANEL_B),
    priced("Road Closed Thru Traffic", CatalogTier::PanelB, PANEL_B),
    priced("Road Closed with Detour", CatalogTier::PanelB, PANEL_B),
    priced("Detour Ahead", CatalogTier::PanelB, PANEL_B),
    priced("Two-Way Traffic Ahead", CatalogTier::PanelB, PANEL_B),
    priced("Trucks Entering Highway", CatalogTier::PanelB, PANEL_B),
    priced("Survey Crew Ahead", CatalogTier::PanelB, PANEL_B),
    priced("Left Turn Lane Closed", CatalogTier::PanelB, PANEL_B),
    priced("Reduced Speed Ahead", CatalogTier::PanelC, PANEL_C),
    priced("Begin Double Fine Zone", CatalogTier::PanelC, PANEL_C),
    priced("End Double Fine Zone", CatalogTier::PanelC, PANEL_C),
    priced("Road Closed (Type III Barricade)", CatalogTier::PanelC, PANEL_C),
    priced("Detour Route Marker – Left", CatalogTier::PanelC, PANEL_C),
    priced("Detour Route Marker – Right", CatalogTier::PanelC, PANEL_C),
    priced(
        "Detour Route Marker – Both Directions",
        CatalogTier::PanelC,
        PANEL_C,
    ),
    priced("Type III Blank Barricade", CatalogTier::PanelC, PANEL_C),
    priced(
        TRAFFIC_CONES,
        CatalogTier::ChannelizingDevice,
        RateCard::new(5, 15, 35),
    ),
    priced(
        DRUMS,
        CatalogTier::ChannelizingDevice,
        RateCard::new(10, 30, 90),
    ),
    priced(
        LIT_DRUMS,
        CatalogTier::ChannelizingDevice,
        RateCard::new(15, 45, 135),
    ),
    priced(
        VERTICAL_PANELS,
        CatalogTier::ChannelizingDevice,
        RateCard::new(8, 24, 72),
    ),
    priced(
        LIT_VERTICAL_PANELS,
        CatalogTier::ChannelizingDevice,
        RateCard::new(15, 45, 135),
    ),
    priced(
        ARROW_BOARD,
        CatalogTier::AdvancedDevice,
        RateCard::new(70, 210, 700),
    ),
    priced(
        MESSAGE_BOARD,
        CatalogTier::AdvancedDevice,
        RateCard::new(225, 675, 2100),
    ),
    CatalogEntry {
        name: TRUCK_MOUNTED_ATTENUATOR,
        tier: CatalogTier::ImpactProtection,
        rates: None,
    },
];

pub fn entries() -> &'static [CatalogEntry] {
    &CATALOG
}

pub fn lookup(name: &str) -> Option<&'static CatalogEntry> {
    CATALOG.iter().find(|entry| entry.name == name)
}

pub fn entries_in(tier: CatalogTier) -> impl Iterator<Item = &'static CatalogEntry> {
    CATALOG.iter().filter(move |entry| entry.tier == tier)
}
