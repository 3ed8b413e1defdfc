use std::net::TcpListener;

use actix_web::cookie::Key;
use actix_web::dev::Server;
use actix_web::web;
use actix_web::App;
use actix_web::HttpServer;
use actix_web_flash_messages::storage::CookieMessageStore;
use actix_web_flash_messages::FlashMessagesFramework;
use secrecy::ExposeSecret;
use secrecy::Secret;
use tracing_actix_web::TracingLogger;

use crate::configuration::Settings;
use crate::presign_client::PresignClient;
use crate::routes::health_check;
use crate::routes::signin;
use crate::routes::signin_form;

/// Wrapper for actix's `Server` with access to the bound port. Not to be
/// confused with actix's `App`!
pub struct Application {
    /// Left private; use `port` to access
    port: u16,
    server: Server,
}

impl Application {
    /// Bind the listener, build the presign client, and wire up the server.
    /// Nothing is served until `run_until_stopped` is awaited.
    pub async fn build(cfg: Settings) -> Result<Self, anyhow::Error> {
        let addr = format!("{}:{}", cfg.application.host, cfg.application.port);
        let listener = TcpListener::bind(addr)?;

        // with port 0, the OS assigns a random free port; this is what tests
        // need to know
        let port = listener.local_addr()?.port();

        let presign_client = cfg.presign_endpoint.client()?;

        let server = run(listener, presign_client, cfg.application.hmac_secret)?;

        Ok(Self { port, server })
    }

    pub fn port(&self) -> u16 { self.port }

    /// Because this consumes `self`, this should be the final function call (or
    /// passed to `tokio::spawn`)
    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> { self.server.await }
}

/// The server is not responsible for binding to an address, it only listens to
/// an already bound address.
///
/// Declares all endpoints:
/// - `GET /`: sign-in form
/// - `POST /`: sign-in
/// - `GET /health_check`
pub fn run(
    listener: TcpListener,
    presign_client: PresignClient,
    hmac_secret: Secret<String>,
) -> Result<Server, anyhow::Error> {
    // `Key::from` panics on short keys
    let secret_key = Key::try_from(hmac_secret.expose_secret().as_bytes())
        .map_err(|e| anyhow::anyhow!("hmac_secret must be at least 64 bytes: {e:?}"))?;

    // validation messages survive the redirect back to the form in a signed
    // cookie; no server side session store is needed
    let cookie_store = CookieMessageStore::builder(secret_key).build();
    let msg_framework = FlashMessagesFramework::builder(cookie_store).build();

    // `Data` is an `Arc`; every worker gets a clone of the same client (and thus
    // the same connection pool)
    let presign_client = web::Data::new(presign_client);

    // the closure is run once per worker, hence the clones
    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .wrap(msg_framework.clone())
            .route("/", web::get().to(signin_form))
            .route("/", web::post().to(signin))
            .route("/health_check", web::get().to(health_check))
            .app_data(presign_client.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
