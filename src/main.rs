use studio_signin::configuration::get_configuration;
use studio_signin::startup::Application;
use studio_signin::telemetry::get_subscriber;
use studio_signin::telemetry::init_subscriber;

/// Initialise telemetry, load config, and start the server
#[tokio::main] // requires tokio features: macros, rt-multi-thread
async fn main() -> Result<(), anyhow::Error> {
    let subscriber = get_subscriber("studio-signin", "info", std::io::stdout);
    init_subscriber(subscriber)?;

    let cfg = get_configuration()?;
    tracing::info!(
        presign_endpoint = %cfg.presign_endpoint.url,
        "starting on {}:{}",
        cfg.application.host,
        cfg.application.port
    );

    let app = Application::build(cfg).await?;
    app.run_until_stopped().await?;

    Ok(())
}
