use once_cell::sync::Lazy;
use studio_signin::configuration::get_configuration;
use studio_signin::startup::Application;
use studio_signin::telemetry::get_subscriber;
use studio_signin::telemetry::init_subscriber;
use wiremock::MockServer;

/// Init the tracing subscriber once only, however many tests run.
///
/// To opt in to verbose logging, use the env var `TEST_LOG`:
///
/// ```sh
///      TEST_LOG=true cargo test [test_name] | bunyan
/// ```
static TRACING: Lazy<()> = Lazy::new(|| {
    // `std::io::stdout` and `std::io::sink` are different types, hence the two
    // arms
    match std::env::var("TEST_LOG") {
        Ok(_) => {
            let subscriber = get_subscriber("test", "debug", std::io::stdout);
            init_subscriber(subscriber).expect("init subscriber");
        }
        Err(_) => {
            let subscriber = get_subscriber("test", "debug", std::io::sink);
            init_subscriber(subscriber).expect("init subscriber");
        }
    };
});

/// Path the mock presign endpoint is mounted on
pub const PRESIGN_PATH: &str = "/presign";

pub struct TestApp {
    pub addr: String,
    /// Stands in for the presign endpoint
    pub presign_server: MockServer,
    /// Does not follow redirects, and keeps cookies (for flash messages)
    pub api_client: reqwest::Client,
}

impl TestApp {
    pub async fn get_signin(&self) -> reqwest::Response {
        self.api_client
            .get(format!("{}/", self.addr))
            .send()
            .await
            .expect("execute request")
    }

    pub async fn get_signin_html(&self) -> String {
        self.get_signin().await.text().await.unwrap()
    }

    /// Submit the sign-in form, i.e. `email=...` urlencoded
    pub async fn post_signin(
        &self,
        email: &str,
    ) -> reqwest::Response {
        self.api_client
            .post(format!("{}/", self.addr))
            .form(&[("email", email)])
            .send()
            .await
            .expect("execute request")
    }
}

/// Spawn the app on a random port, pointed at a fresh `MockServer`.
///
/// Returns the address to which the server was bound, in the form
/// `http://127.0.0.1:{port}`; the `http://` prefix is what clients need.
pub async fn spawn_app() -> TestApp {
    Lazy::force(&TRACING);

    let presign_server = MockServer::start().await;

    let cfg = {
        let mut cfg = get_configuration().expect("read configuration");
        // port 0: the OS picks a free port, which is then read back from
        // `Application::port`
        cfg.application.port = 0;
        cfg.presign_endpoint.url = format!("{}{PRESIGN_PATH}", presign_server.uri());
        cfg.presign_endpoint.timeout_milliseconds = 500;
        cfg
    };

    let app = Application::build(cfg).await.expect("build app");
    let addr = format!("http://127.0.0.1:{}", app.port());
    tokio::spawn(app.run_until_stopped());

    let api_client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .cookie_store(true)
        .build()
        .unwrap();

    TestApp {
        addr,
        presign_server,
        api_client,
    }
}

pub fn check_redirect(
    resp: &reqwest::Response,
    location: &str,
) {
    assert_eq!(resp.status().as_u16(), 303);
    assert_eq!(resp.headers().get("Location").unwrap(), location);
}
