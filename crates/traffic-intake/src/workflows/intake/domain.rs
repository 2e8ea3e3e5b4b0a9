use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use super::reference::FLAGGING_OPERATION_MARKER;

/// Floor applied to every per-day labor shift.
pub const MIN_SHIFT_HOURS: u32 = 4;
/// Shift length a fresh intake starts with.
pub const DEFAULT_SHIFT_HOURS: u32 = 8;

/// Fixed linear sequence of intake screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntakeStep {
    CustomerInfo,
    JobLocation,
    WorkCategory,
    WorkType,
    TrafficNeeds,
    RoadwayClass,
    SignsCatalog,
    Schedule,
    ThankYou,
}

impl IntakeStep {
    pub const ALL: [IntakeStep; 9] = [
        IntakeStep::CustomerInfo,
        IntakeStep::JobLocation,
        IntakeStep::WorkCategory,
        IntakeStep::WorkType,
        IntakeStep::TrafficNeeds,
        IntakeStep::RoadwayClass,
        IntakeStep::SignsCatalog,
        IntakeStep::Schedule,
        IntakeStep::ThankYou,
    ];

    pub fn ordinal(self) -> usize {
        self as usize
    }

    pub fn from_ordinal(ordinal: usize) -> Option<Self> {
        Self::ALL.get(ordinal).copied()
    }

    pub fn next(self) -> Option<Self> {
        Self::from_ordinal(self.ordinal() + 1)
    }

    pub fn previous(self) -> Option<Self> {
        self.ordinal().checked_sub(1).and_then(Self::from_ordinal)
    }

    pub fn is_terminal(self) -> bool {
        self == IntakeStep::ThankYou
    }

    pub fn label(self) -> &'static str {
        match self {
            IntakeStep::CustomerInfo => "Customer Information",
            IntakeStep::JobLocation => "Job Location",
            IntakeStep::WorkCategory => "Service Category",
            IntakeStep::WorkType => "Work Types",
            IntakeStep::TrafficNeeds => "Traffic Need",
            IntakeStep::RoadwayClass => "Roadway Classification",
            IntakeStep::SignsCatalog => "Signs Catalog",
            IntakeStep::Schedule => "Schedule Request",
            IntakeStep::ThankYou => "Request Received",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum YesNo {
    Yes,
    No,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum YesNoUnsure {
    Yes,
    No,
    Unsure,
}

/// Whether the customer has booked with the company before.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClientStatus {
    New,
    Returning,
}

/// Turnaround requested when the customer still needs a Traffic Control Plan drawn up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TcpType {
    Regular,
    Rush,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoadwayClass {
    #[serde(rename = "Residential")]
    Residential,
    #[serde(rename = "City / Local Road")]
    CityLocal,
    #[serde(rename = "State Highway")]
    StateHighway,
}

impl RoadwayClass {
    pub fn label(self) -> &'static str {
        match self {
            RoadwayClass::Residential => "Residential",
            RoadwayClass::CityLocal => "City / Local Road",
            RoadwayClass::StateHighway => "State Highway",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WorkHours {
    Day,
    Night,
    Mixed,
    Flex,
}

/// Coordinates captured from the job-site pin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

/// Complete snapshot of everything the customer has entered so far.
///
/// Every field has a default so partial JSON payloads still describe a whole intake.
/// Counts are unsigned and hours are kept at or above [`MIN_SHIFT_HOURS`] by the wizard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormState {
    pub client_status: Option<ClientStatus>,
    pub company_name: String,
    pub contact_name: String,
    pub phone: String,
    pub email: String,
    pub purchase_order: String,
    pub sms_consent: Option<YesNo>,

    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub location: Option<GeoPoint>,
    pub on_site_first_name: String,
    pub on_site_last_name: String,
    pub on_site_phone: String,
    pub is_public_right_of_way: Option<YesNoUnsure>,

    pub service_categories: BTreeSet<String>,
    pub work_types: BTreeSet<String>,
    pub impacts_traffic: Option<YesNoUnsure>,
    pub impacts_pedestrians: Option<YesNoUnsure>,
    pub configuration: BTreeSet<String>,

    #[serde(rename = "hasTCP")]
    pub has_tcp: Option<YesNo>,
    pub tcp_type: Option<TcpType>,
    pub has_permit: Option<YesNo>,
    pub permit_file_name: Option<String>,
    #[serde(rename = "tcpFileName")]
    pub tcp_file_name: Option<String>,

    pub roadway_class: Option<RoadwayClass>,
    pub is_intersection: bool,
    pub has_traffic_signal: bool,

    pub needs_flaggers: bool,
    pub num_flaggers: u32,
    pub flagger_hours: u32,
    #[serde(rename = "needsUTC")]
    pub needs_utc: bool,
    #[serde(rename = "numUTC")]
    pub num_utc: u32,
    pub utc_hours: u32,
    pub labor_policy_accepted: bool,

    pub catalog_quantities: BTreeMap<String, u32>,

    #[serde(deserialize_with = "deserialize_optional_date")]
    pub start_date: Option<NaiveDate>,
    pub duration: String,
    pub work_hours: Option<WorkHours>,
    pub scheduling_notice_accepted: bool,
    pub billing_terms_accepted: bool,
    pub double_charge_accepted: bool,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            client_status: None,
            company_name: String::new(),
            contact_name: String::new(),
            phone: String::new(),
            email: String::new(),
            purchase_order: String::new(),
            sms_consent: None,
            address: String::new(),
            city: String::new(),
            state: String::new(),
            zip_code: String::new(),
            location: None,
            on_site_first_name: String::new(),
            on_site_last_name: String::new(),
            on_site_phone: String::new(),
            is_public_right_of_way: None,
            service_categories: BTreeSet::new(),
            work_types: BTreeSet::new(),
            impacts_traffic: None,
            impacts_pedestrians: None,
            configuration: BTreeSet::new(),
            has_tcp: None,
            tcp_type: None,
            has_permit: None,
            permit_file_name: None,
            tcp_file_name: None,
            roadway_class: None,
            is_intersection: false,
            has_traffic_signal: false,
            needs_flaggers: false,
            num_flaggers: 0,
            flagger_hours: DEFAULT_SHIFT_HOURS,
            needs_utc: false,
            num_utc: 0,
            utc_hours: DEFAULT_SHIFT_HOURS,
            labor_policy_accepted: false,
            catalog_quantities: BTreeMap::new(),
            start_date: None,
            duration: String::new(),
            work_hours: None,
            scheduling_notice_accepted: false,
            billing_terms_accepted: false,
            double_charge_accepted: false,
        }
    }
}

impl FormState {
    /// Alternating one-way flagging was picked as one of the traffic configurations.
    pub fn is_one_lane_operation(&self) -> bool {
        self.configuration
            .iter()
            .any(|option| option.contains(FLAGGING_OPERATION_MARKER))
    }

    pub fn catalog_quantity(&self, item: &str) -> u32 {
        self.catalog_quantities.get(item).copied().unwrap_or(0)
    }

    pub fn phone_digits(&self) -> String {
        digits_only(&self.phone)
    }

    pub fn has_permit_document(&self) -> bool {
        is_present(self.permit_file_name.as_deref())
    }

    pub fn has_tcp_document(&self) -> bool {
        is_present(self.tcp_file_name.as_deref())
    }
}

pub(crate) fn digits_only(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

fn is_present(name: Option<&str>) -> bool {
    name.map(|value| !value.trim().is_empty()).unwrap_or(false)
}

/// Accepts `YYYY-MM-DD`, treating a blank string or `null` as "not chosen yet".
pub(crate) fn deserialize_optional_date<'de, D>(
    deserializer: D,
) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .map(Some)
            .map_err(|err| {
                serde::de::Error::custom(format!(
                    "failed to parse '{value}' as YYYY-MM-DD ({err})"
                ))
            }),
    }
}
