use crate::demo::{run_demo, run_estimate, DemoArgs, EstimateArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use traffic_intake::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Traffic Intake",
    about = "Serve and exercise the traffic-control intake engine from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Price a saved intake form and print the job summary
    Estimate(EstimateArgs),
    /// Walk a scripted intake session through the wizard and a sandbox checkout
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Estimate(args) => run_estimate(args),
        Command::Demo(args) => run_demo(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_serve() {
        let cli = Cli::try_parse_from(["traffic-intake"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn estimate_requires_a_form_path() {
        assert!(Cli::try_parse_from(["traffic-intake", "estimate"]).is_err());

        let cli = Cli::try_parse_from([
            "traffic-intake",
            "estimate",
            "--form",
            "job.json",
            "--now",
            "2025-06-02T23:30:00",
        ])
        .expect("parses");
        match cli.command {
            Some(Command::Estimate(args)) => {
                assert_eq!(args.form.to_string_lossy(), "job.json");
                assert!(args.now.is_some());
            }
            other => panic!("expected estimate command, got {other:?}"),
        }
    }
}
