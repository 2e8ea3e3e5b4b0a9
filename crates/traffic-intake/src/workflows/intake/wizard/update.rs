use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::super::domain::{
    deserialize_optional_date, digits_only, ClientStatus, FormState, GeoPoint, RoadwayClass,
    TcpType, WorkHours, YesNo, YesNoUnsure, MIN_SHIFT_HOURS,
};

/// Replace-semantics change to a single form field.
///
/// Wire form is `{"field": "<camelCase name>", "value": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "camelCase")]
pub enum FieldUpdate {
    ClientStatus(Option<ClientStatus>),
    CompanyName(String),
    ContactName(String),
    Phone(String),
    Email(String),
    PurchaseOrder(String),
    SmsConsent(Option<YesNo>),

    Address(String),
    City(String),
    State(String),
    ZipCode(String),
    Location(Option<GeoPoint>),
    OnSiteFirstName(String),
    OnSiteLastName(String),
    OnSitePhone(String),
    IsPublicRightOfWay(Option<YesNoUnsure>),

    ServiceCategories(BTreeSet<String>),
    WorkTypes(BTreeSet<String>),
    ImpactsTraffic(Option<YesNoUnsure>),
    ImpactsPedestrians(Option<YesNoUnsure>),
    Configuration(BTreeSet<String>),

    #[serde(rename = "hasTCP")]
    HasTcp(Option<YesNo>),
    TcpType(Option<TcpType>),
    HasPermit(Option<YesNo>),
    PermitFileName(Option<String>),
    TcpFileName(Option<String>),

    RoadwayClass(Option<RoadwayClass>),
    IsIntersection(bool),
    HasTrafficSignal(bool),

    NeedsFlaggers(bool),
    NumFlaggers(i64),
    FlaggerHours(i64),
    #[serde(rename = "needsUTC")]
    NeedsUtc(bool),
    #[serde(rename = "numUTC")]
    NumUtc(i64),
    UtcHours(i64),
    LaborPolicyAccepted(bool),

    #[serde(deserialize_with = "deserialize_optional_date")]
    StartDate(Option<NaiveDate>),
    Duration(String),
    WorkHours(Option<WorkHours>),
    SchedulingNoticeAccepted(bool),
    BillingTermsAccepted(bool),
    DoubleChargeAccepted(bool),
}

/// Multi-select groups whose members are toggled on and off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Selection {
    ServiceCategories,
    WorkTypes,
    Configuration,
}

/// Failure to interpret a string-keyed update coming from a transport layer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    #[error("unknown intake field '{0}'")]
    UnknownField(String),
    #[error("field '{field}' does not accept '{value}'")]
    InvalidValue { field: String, value: String },
    #[error("field '{0}' holds a collection; toggle its members or update catalog quantities instead")]
    NotScalar(String),
}

impl FieldUpdate {
    /// Interpret a text input the way the form widgets do: numeric text that does not
    /// parse counts as 0 before clamping, blank choices mean "not answered".
    pub fn from_raw(field: &str, raw: &str) -> Result<Self, FieldError> {
        let update = match field {
            "clientStatus" => FieldUpdate::ClientStatus(parse_choice(field, raw)?),
            "companyName" => FieldUpdate::CompanyName(raw.to_string()),
            "contactName" => FieldUpdate::ContactName(raw.to_string()),
            "phone" => FieldUpdate::Phone(raw.to_string()),
            "email" => FieldUpdate::Email(raw.to_string()),
            "purchaseOrder" => FieldUpdate::PurchaseOrder(raw.to_string()),
            "smsConsent" => FieldUpdate::SmsConsent(parse_choice(field, raw)?),
            "address" => FieldUpdate::Address(raw.to_string()),
            "city" => FieldUpdate::City(raw.to_string()),
            "state" => FieldUpdate::State(raw.to_string()),
            "zipCode" => FieldUpdate::ZipCode(raw.to_string()),
            "onSiteFirstName" => FieldUpdate::OnSiteFirstName(raw.to_string()),
            "onSiteLastName" => FieldUpdate::OnSiteLastName(raw.to_string()),
            "onSitePhone" => FieldUpdate::OnSitePhone(raw.to_string()),
            "isPublicRightOfWay" => FieldUpdate::IsPublicRightOfWay(parse_choice(field, raw)?),
            "impactsTraffic" => FieldUpdate::ImpactsTraffic(parse_choice(field, raw)?),
            "impactsPedestrians" => FieldUpdate::ImpactsPedestrians(parse_choice(field, raw)?),
            "hasTCP" => FieldUpdate::HasTcp(parse_choice(field, raw)?),
            "tcpType" => FieldUpdate::TcpType(parse_choice(field, raw)?),
            "hasPermit" => FieldUpdate::HasPermit(parse_choice(field, raw)?),
            "permitFileName" => FieldUpdate::PermitFileName(non_blank(raw)),
            "tcpFileName" => FieldUpdate::TcpFileName(non_blank(raw)),
            "roadwayClass" => FieldUpdate::RoadwayClass(parse_choice(field, raw)?),
            "isIntersection" => FieldUpdate::IsIntersection(parse_flag(field, raw)?),
            "hasTrafficSignal" => FieldUpdate::HasTrafficSignal(parse_flag(field, raw)?),
            "needsFlaggers" => FieldUpdate::NeedsFlaggers(parse_flag(field, raw)?),
            "numFlaggers" => FieldUpdate::NumFlaggers(parse_integer_input(raw)),
            "flaggerHours" => FieldUpdate::FlaggerHours(parse_integer_input(raw)),
            "needsUTC" => FieldUpdate::NeedsUtc(parse_flag(field, raw)?),
            "numUTC" => FieldUpdate::NumUtc(parse_integer_input(raw)),
            "utcHours" => FieldUpdate::UtcHours(parse_integer_input(raw)),
            "laborPolicyAccepted" => FieldUpdate::LaborPolicyAccepted(parse_flag(field, raw)?),
            "startDate" => FieldUpdate::StartDate(parse_date(field, raw)?),
            "duration" => FieldUpdate::Duration(raw.to_string()),
            "workHours" => FieldUpdate::WorkHours(parse_choice(field, raw)?),
            "schedulingNoticeAccepted" => {
                FieldUpdate::SchedulingNoticeAccepted(parse_flag(field, raw)?)
            }
            "billingTermsAccepted" => FieldUpdate::BillingTermsAccepted(parse_flag(field, raw)?),
            "doubleChargeAccepted" => FieldUpdate::DoubleChargeAccepted(parse_flag(field, raw)?),
            "serviceCategories" | "workTypes" | "configuration" | "catalogQuantities"
            | "location" => return Err(FieldError::NotScalar(field.to_string())),
            other => return Err(FieldError::UnknownField(other.to_string())),
        };

        Ok(update)
    }

    /// Update that flips `item` in or out of a multi-select group.
    pub fn toggle(state: &FormState, selection: Selection, item: &str) -> Self {
        let current = match selection {
            Selection::ServiceCategories => &state.service_categories,
            Selection::WorkTypes => &state.work_types,
            Selection::Configuration => &state.configuration,
        };

        let mut next = current.clone();
        if !next.remove(item) {
            next.insert(item.to_string());
        }

        match selection {
            Selection::ServiceCategories => FieldUpdate::ServiceCategories(next),
            Selection::WorkTypes => FieldUpdate::WorkTypes(next),
            Selection::Configuration => FieldUpdate::Configuration(next),
        }
    }

    pub(crate) fn apply(self, state: &mut FormState) {
        match self {
            FieldUpdate::ClientStatus(value) => state.client_status = value,
            FieldUpdate::CompanyName(value) => state.company_name = value,
            FieldUpdate::ContactName(value) => state.contact_name = value,
            FieldUpdate::Phone(value) => state.phone = format_phone_number(&value),
            FieldUpdate::Email(value) => state.email = value,
            FieldUpdate::PurchaseOrder(value) => state.purchase_order = value,
            FieldUpdate::SmsConsent(value) => state.sms_consent = value,
            FieldUpdate::Address(value) => state.address = value,
            FieldUpdate::City(value) => state.city = value,
            FieldUpdate::State(value) => state.state = value,
            FieldUpdate::ZipCode(value) => state.zip_code = value,
            FieldUpdate::Location(value) => state.location = value,
            FieldUpdate::OnSiteFirstName(value) => state.on_site_first_name = value,
            FieldUpdate::OnSiteLastName(value) => state.on_site_last_name = value,
            FieldUpdate::OnSitePhone(value) => state.on_site_phone = format_phone_number(&value),
            FieldUpdate::IsPublicRightOfWay(value) => state.is_public_right_of_way = value,
            FieldUpdate::ServiceCategories(value) => state.service_categories = value,
            FieldUpdate::WorkTypes(value) => state.work_types = value,
            FieldUpdate::ImpactsTraffic(value) => state.impacts_traffic = value,
            FieldUpdate::ImpactsPedestrians(value) => state.impacts_pedestrians = value,
            FieldUpdate::Configuration(value) => state.configuration = value,
            FieldUpdate::HasTcp(value) => state.has_tcp = value,
            FieldUpdate::TcpType(value) => state.tcp_type = value,
            FieldUpdate::HasPermit(value) => state.has_permit = value,
            FieldUpdate::PermitFileName(value) => state.permit_file_name = value,
            FieldUpdate::TcpFileName(value) => state.tcp_file_name = value,
            FieldUpdate::RoadwayClass(value) => state.roadway_class = value,
            FieldUpdate::IsIntersection(true) => {
                state.is_intersection = true;
                state.needs_utc = true;
                state.num_utc = state.num_utc.max(1);
                state.needs_flaggers = true;
                state.num_flaggers = state.num_flaggers.max(1);
            }
            FieldUpdate::IsIntersection(false) => {
                state.is_intersection = false;
                state.needs_flaggers = true;
                state.num_flaggers = state.num_flaggers.max(2);
            }
            FieldUpdate::HasTrafficSignal(value) => state.has_traffic_signal = value,
            FieldUpdate::NeedsFlaggers(false) if state.is_intersection => {
                debug!("ignoring flagger opt-out while the job is at an intersection");
            }
            FieldUpdate::NeedsFlaggers(value) => state.needs_flaggers = value,
            FieldUpdate::NumFlaggers(value) => state.num_flaggers = clamp_count(value),
            FieldUpdate::FlaggerHours(value) => state.flagger_hours = clamp_hours(value),
            FieldUpdate::NeedsUtc(false) if state.is_intersection => {
                debug!("ignoring UTC opt-out while the job is at an intersection");
            }
            FieldUpdate::NeedsUtc(value) => state.needs_utc = value,
            FieldUpdate::NumUtc(value) => state.num_utc = clamp_count(value),
            FieldUpdate::UtcHours(value) => state.utc_hours = clamp_hours(value),
            FieldUpdate::LaborPolicyAccepted(value) => state.labor_policy_accepted = value,
            FieldUpdate::StartDate(value) => state.start_date = value,
            FieldUpdate::Duration(value) => state.duration = value,
            FieldUpdate::WorkHours(value) => state.work_hours = value,
            FieldUpdate::SchedulingNoticeAccepted(value) => {
                state.scheduling_notice_accepted = value
            }
            FieldUpdate::BillingTermsAccepted(value) => state.billing_terms_accepted = value,
            FieldUpdate::DoubleChargeAccepted(value) => state.double_charge_accepted = value,
        }
    }
}

/// Leading-integer parse: `"12abc"` is 12, anything without leading digits is 0.
pub fn parse_integer_input(raw: &str) -> i64 {
    let trimmed = raw.trim();
    let (negative, unsigned) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };

    let digits: String = unsigned.chars().take_while(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return 0;
    }

    let magnitude = digits.parse::<i64>().unwrap_or(i64::MAX);
    if negative {
        -magnitude
    } else {
        magnitude
    }
}

pub(crate) fn clamp_count(value: i64) -> u32 {
    u32::try_from(value.max(0)).unwrap_or(u32::MAX)
}

pub(crate) fn clamp_hours(value: i64) -> u32 {
    clamp_count(value).max(MIN_SHIFT_HOURS)
}

/// `(303) 555-1212` style rendering of at most ten digits, built up as the user types.
pub fn format_phone_number(raw: &str) -> String {
    let digits: String = digits_only(raw).chars().take(10).collect();
    match digits.len() {
        0..=3 => digits,
        4..=6 => format!("({}) {}", &digits[..3], &digits[3..]),
        _ => format!("({}) {}-{}", &digits[..3], &digits[3..6], &digits[6..]),
    }
}

fn non_blank(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn invalid(field: &str, raw: &str) -> FieldError {
    FieldError::InvalidValue {
        field: field.to_string(),
        value: raw.to_string(),
    }
}

fn parse_flag(field: &str, raw: &str) -> Result<bool, FieldError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" | "on" => Ok(true),
        "false" | "no" | "0" | "off" | "" => Ok(false),
        _ => Err(invalid(field, raw)),
    }
}

fn parse_choice<T: DeserializeOwned>(field: &str, raw: &str) -> Result<Option<T>, FieldError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    serde_json::from_value(serde_json::Value::String(trimmed.to_string()))
        .map(Some)
        .map_err(|_| invalid(field, raw))
}

fn parse_date(field: &str, raw: &str) -> Result<Option<NaiveDate>, FieldError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| invalid(field, raw))
}
