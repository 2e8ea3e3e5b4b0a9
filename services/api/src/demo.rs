use crate::infra::{load_form, SandboxCheckoutGateway};
use chrono::{Local, NaiveDateTime};
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;
use traffic_intake::config::AppConfig;
use traffic_intake::error::AppError;
use traffic_intake::telemetry::{self, LogSink};
use traffic_intake::workflows::intake::catalog::{
    ARROW_BOARD, DRUMS, MESSAGE_BOARD, TRAFFIC_CONES, TRUCK_MOUNTED_ATTENUATOR,
};
use traffic_intake::workflows::intake::reference::flagging_operation;
use traffic_intake::workflows::intake::{
    CatalogTier, ClientStatus, FieldUpdate, IntakeEstimate, IntakeService, RoadwayClass,
    Selection, StepValidator, TcpType, WizardController, WorkHours, YesNo,
};

#[derive(Args, Debug)]
pub(crate) struct EstimateArgs {
    /// Path to a saved intake form (camelCase JSON)
    #[arg(long)]
    pub(crate) form: PathBuf,
    /// Local wall-clock time to evaluate against (defaults to now)
    #[arg(long, value_parser = crate::infra::parse_datetime)]
    pub(crate) now: Option<NaiveDateTime>,
    /// Print the full estimate as JSON instead of the job summary
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Local wall-clock time the scripted session runs at (defaults to now)
    #[arg(long, value_parser = crate::infra::parse_datetime)]
    pub(crate) now: Option<NaiveDateTime>,
    /// Skip step validation the way the demo/test mode switch does
    #[arg(long)]
    pub(crate) bypass: bool,
}

fn init_cli_telemetry() -> Result<AppConfig, AppError> {
    let config = AppConfig::load()?;
    telemetry::init_with_sink(&config.telemetry, LogSink::Stderr)?;
    Ok(config)
}

pub(crate) fn run_estimate(args: EstimateArgs) -> Result<(), AppError> {
    let EstimateArgs { form, now, json } = args;

    let config = init_cli_telemetry()?;
    let now = now.unwrap_or_else(|| Local::now().naive_local());
    let state = load_form(&form)?;
    let estimate = IntakeEstimate::evaluate(&state, &config.intake.validator(), now);

    if json {
        println!("{}", serde_json::to_string_pretty(&estimate)?);
    } else {
        render_job_summary(&estimate);
    }

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs { now, bypass } = args;

    let config = init_cli_telemetry()?;
    let now = now.unwrap_or_else(|| Local::now().naive_local());
    let validator = if bypass {
        StepValidator::bypassed()
    } else {
        config.intake.validator()
    };

    println!("Traffic control intake demo");
    let mut wizard = WizardController::new(validator);

    for update in [
        FieldUpdate::ClientStatus(Some(ClientStatus::New)),
        FieldUpdate::CompanyName("Front Range Paving".to_string()),
        FieldUpdate::ContactName("Jordan Pike".to_string()),
        FieldUpdate::Phone("3035551212".to_string()),
        FieldUpdate::Email("jordan@frontrange.example".to_string()),
        FieldUpdate::SmsConsent(Some(YesNo::Yes)),
    ] {
        wizard.update_field(update);
    }
    continue_step(&mut wizard, now);

    wizard.update_field(FieldUpdate::Address("1200 Federal Blvd".to_string()));
    wizard.update_field(FieldUpdate::City("Denver".to_string()));
    wizard.update_field(FieldUpdate::State("CO".to_string()));
    wizard.update_field(FieldUpdate::ZipCode("80204".to_string()));
    continue_step(&mut wizard, now);

    wizard.toggle(Selection::ServiceCategories, "Traffic Control");
    continue_step(&mut wizard, now);

    wizard.toggle(Selection::WorkTypes, "Milling");
    wizard.toggle(Selection::WorkTypes, "Paving");
    continue_step(&mut wizard, now);

    wizard.update_field(FieldUpdate::HasPermit(Some(YesNo::No)));
    wizard.update_field(FieldUpdate::HasTcp(Some(YesNo::No)));
    wizard.update_field(FieldUpdate::TcpType(Some(TcpType::Regular)));
    wizard.toggle(Selection::Configuration, flagging_operation().label);
    continue_step(&mut wizard, now);

    wizard.update_field(FieldUpdate::RoadwayClass(Some(RoadwayClass::Residential)));
    let requirements = wizard.labor_requirements();
    if requirements.is_empty() {
        println!("  No mandatory staffing for this layout");
    }
    for rule in &requirements.triggered {
        println!("  Staffing rule: {}", rule.description());
    }
    println!(
        "  Flaggers now {} (minimum {}), UTC now {} (minimum {})",
        wizard.state().num_flaggers,
        requirements.min_flaggers,
        wizard.state().num_utc,
        requirements.min_utc
    );
    continue_step(&mut wizard, now);

    wizard.update_catalog_quantity("Road Work Ahead (RWA)", 2);
    wizard.update_catalog_quantity("One Lane Road Ahead (OLR)", 2);
    wizard.update_catalog_quantity("Flagger Ahead", 2);
    wizard.update_catalog_quantity(TRAFFIC_CONES, 30);
    wizard.update_catalog_quantity(DRUMS, 6);
    wizard.update_catalog_quantity(ARROW_BOARD, 1);
    wizard.update_catalog_quantity(MESSAGE_BOARD, 1);
    wizard.update_catalog_quantity(TRUCK_MOUNTED_ATTENUATOR, 1);
    continue_step(&mut wizard, now);

    let start = (now + chrono::Duration::days(7)).date();
    wizard.update_field(FieldUpdate::StartDate(Some(start)));
    wizard.update_field(FieldUpdate::Duration("2 days".to_string()));
    wizard.update_field(FieldUpdate::WorkHours(Some(WorkHours::Day)));
    wizard.update_field(FieldUpdate::BillingTermsAccepted(true));
    wizard.update_field(FieldUpdate::SchedulingNoticeAccepted(true));

    let estimate = IntakeEstimate::evaluate(wizard.state(), &validator, now);
    render_job_summary(&estimate);

    if !wizard.can_advance(now) {
        println!("\nSchedule step incomplete; checkout not offered");
        return Ok(());
    }

    let gateway = Arc::new(SandboxCheckoutGateway::default());
    let service = IntakeService::new(gateway.clone(), validator, config.intake.redirects());
    match service.checkout(wizard.state(), None, now) {
        Ok(receipt) => {
            println!(
                "\nCheckout session {} for {} -> {}",
                receipt.session_id, receipt.amount, receipt.url
            );
            wizard.complete_checkout();
            println!("Wizard finished on: {}", wizard.step().label());
        }
        Err(err) => println!("\nCheckout could not be initialized: {err}"),
    }

    for request in gateway.requests() {
        match serde_json::to_string_pretty(&request.metadata) {
            Ok(json) => println!("Checkout metadata:\n{json}"),
            Err(err) => println!("Checkout metadata unavailable: {err}"),
        }
    }

    Ok(())
}

fn continue_step(wizard: &mut WizardController, now: NaiveDateTime) {
    let from = wizard.step();
    if wizard.advance_if_valid(now) {
        println!("- {} complete", from.label());
    } else {
        println!("- {} still incomplete; staying put", from.label());
    }
}

pub(crate) fn render_job_summary(estimate: &IntakeEstimate) {
    let form = &estimate.form;
    let summary = &estimate.summary;

    println!("\nJob summary");
    if !form.company_name.is_empty() {
        println!("Customer: {} ({})", form.company_name, form.contact_name);
    }
    if !form.address.is_empty() {
        println!(
            "Location: {}, {} {} {}",
            form.address, form.city, form.state, form.zip_code
        );
    }
    match form.start_date {
        Some(date) => println!(
            "Start: {} | duration {}{}",
            date.format("%Y-%m-%d"),
            if form.duration.is_empty() {
                "not given"
            } else {
                form.duration.as_str()
            },
            if estimate.within_24_hours {
                " | within 24 hours (double charge applies)"
            } else {
                ""
            }
        ),
        None => println!("Start: not scheduled"),
    }

    println!("\n1. Total devices");
    println!("  Panel A: {}", summary.panel_a_total);
    println!("  Panel B: {}", summary.panel_b_total);
    println!("  Panel C: {}", summary.panel_c_total);

    println!("\n2. Total equipment");
    let mut listed = false;
    for line in estimate
        .equipment_lines
        .iter()
        .filter(|line| !line.tier.is_sign_panel())
    {
        listed = true;
        match line.line_total {
            Some(total) => println!("  {}: {} ({total}/day)", line.item, line.quantity),
            None => println!("  {}: {} (quoted per project)", line.item, line.quantity),
        }
    }
    if !listed {
        println!("  none selected");
    }
    let signs: Vec<_> = [CatalogTier::PanelA, CatalogTier::PanelB, CatalogTier::PanelC]
        .into_iter()
        .flat_map(|tier| estimate.lines_in(tier))
        .collect();
    if !signs.is_empty() {
        println!("  Signs:");
        for line in signs {
            println!("    - {} x{}", line.item, line.quantity);
        }
    }

    println!("\n3. Labor summary");
    if form.needs_flaggers {
        println!(
            "  Flaggers: qty {} | {} hrs | total {} hrs",
            form.num_flaggers, form.flagger_hours, summary.flagger_hours_total
        );
    }
    if form.needs_utc {
        println!(
            "  UTC: qty {} | {} hrs | total {} hrs",
            form.num_utc, form.utc_hours, summary.utc_hours_total
        );
    }
    println!("  TCS: hours billed post-job");
    println!("  {}", estimate.overtime_label);

    println!("\nBilling summary");
    println!("  Equipment & devices: {} (50% upfront)", estimate.display.equipment_cost);
    println!("  Labor (flagger + UTC): {} (100% upfront)", estimate.display.labor_cost);
    println!(
        "  Balance invoiced after completion: {}",
        estimate.display.equipment_balance
    );
    println!("  Total estimated deposit: {}", estimate.display.deposit_amount);
    if !summary.quote_required_items.is_empty() {
        println!(
            "  Quote required for: {}",
            summary.quote_required_items.join(", ")
        );
    }

    let incomplete: Vec<_> = estimate
        .steps
        .iter()
        .filter(|entry| !entry.valid)
        .map(|entry| entry.label)
        .collect();
    if incomplete.is_empty() {
        println!("\nAll intake steps complete");
    } else {
        println!("\nIncomplete steps: {}", incomplete.join(", "));
    }
}
