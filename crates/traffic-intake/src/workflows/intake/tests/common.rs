use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{NaiveDate, NaiveDateTime};
use serde_json::Value;

use crate::workflows::intake::catalog::DRUMS;
use crate::workflows::intake::checkout::{
    CheckoutRedirects, CheckoutRequest, CheckoutSession, GatewayError, PaymentInitiator,
};
use crate::workflows::intake::domain::{
    ClientStatus, FormState, RoadwayClass, TcpType, YesNo,
};
use crate::workflows::intake::reference::{flagging_operation, TRAFFIC_CONFIGURATION_OPTIONS};
use crate::workflows::intake::service::IntakeService;
use crate::workflows::intake::validation::StepValidator;

pub(super) const ORIGIN: &str = "https://intake.example.com";

pub(super) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

/// Monday morning, well ahead of the default start date.
pub(super) fn now() -> NaiveDateTime {
    date(2025, 6, 2).and_hms_opt(10, 0, 0).expect("valid time")
}

pub(super) fn flagging_option() -> String {
    flagging_operation().label.to_string()
}

pub(super) fn shoulder_option() -> String {
    TRAFFIC_CONFIGURATION_OPTIONS[1].label.to_string()
}

pub(super) fn set_of(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|item| item.to_string()).collect()
}

pub(super) fn quantities(items: &[(&str, u32)]) -> BTreeMap<String, u32> {
    items
        .iter()
        .map(|(item, quantity)| (item.to_string(), *quantity))
        .collect()
}

/// Form that clears every step with a ten-drum order and no labor.
pub(super) fn complete_form() -> FormState {
    FormState {
        client_status: Some(ClientStatus::New),
        company_name: "Front Range Paving".to_string(),
        contact_name: "Jordan Pike".to_string(),
        phone: "(303) 555-1212".to_string(),
        email: "jordan@frontrange.example".to_string(),
        sms_consent: Some(YesNo::Yes),
        address: "1200 Federal Blvd".to_string(),
        city: "Denver".to_string(),
        state: "CO".to_string(),
        zip_code: "80204".to_string(),
        service_categories: set_of(&["Traffic Control"]),
        work_types: set_of(&["Milling"]),
        configuration: set_of(&[shoulder_option().as_str()]),
        has_permit: Some(YesNo::No),
        has_tcp: Some(YesNo::No),
        tcp_type: Some(TcpType::Regular),
        roadway_class: Some(RoadwayClass::CityLocal),
        catalog_quantities: quantities(&[(DRUMS, 10)]),
        start_date: Some(date(2025, 6, 10)),
        duration: "3 days".to_string(),
        scheduling_notice_accepted: true,
        billing_terms_accepted: true,
        ..FormState::default()
    }
}

/// Gateway stand-in that records every request and hands out sequential sessions.
#[derive(Default)]
pub(super) struct RecordingGateway {
    requests: Mutex<Vec<CheckoutRequest>>,
}

impl RecordingGateway {
    pub(super) fn requests(&self) -> Vec<CheckoutRequest> {
        self.requests.lock().expect("gateway mutex").clone()
    }
}

impl PaymentInitiator for RecordingGateway {
    fn initiate(&self, request: &CheckoutRequest) -> Result<CheckoutSession, GatewayError> {
        let mut requests = self.requests.lock().expect("gateway mutex");
        requests.push(request.clone());
        let session_id = format!("cs_test_{:06}", requests.len());
        Ok(CheckoutSession {
            redirect_url: format!("https://checkout.example.com/pay/{session_id}"),
            session_id,
        })
    }
}

pub(super) struct UnreachableGateway;

impl PaymentInitiator for UnreachableGateway {
    fn initiate(&self, _request: &CheckoutRequest) -> Result<CheckoutSession, GatewayError> {
        Err(GatewayError::Unavailable("connection refused".to_string()))
    }
}

pub(super) fn strict_service<P: PaymentInitiator + 'static>(gateway: Arc<P>) -> IntakeService<P> {
    IntakeService::new(
        gateway,
        StepValidator::strict(),
        CheckoutRedirects::for_origin(ORIGIN),
    )
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    serde_json::from_slice(&body).expect("json body")
}
