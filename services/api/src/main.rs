use traffic_intake_api::run;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("traffic intake error: {err}");
        std::process::exit(1);
    }
}
