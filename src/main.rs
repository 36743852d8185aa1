use backend_smoke::{
    config::{AppConfig, Args},
    report::ConsoleReporter,
    verifier::Verifier,
};
use clap::Parser;
use log::info;
use std::sync::Arc;

#[tokio::main]
async fn main() {
    let args = Args::parse();
    let config = AppConfig::build(Some(args)).unwrap_or_else(|err| {
        eprintln!("Configuration error: {err:?}");
        std::process::exit(2);
    });

    config.init_logging();
    info!("🚀 Running backend smoke tests against {}", config.base_url);

    let verifier = Verifier::new(&config, Arc::new(ConsoleReporter)).unwrap_or_else(|err| {
        eprintln!("Startup error: {err:?}");
        std::process::exit(2);
    });

    std::process::exit(verifier.run().await);
}
