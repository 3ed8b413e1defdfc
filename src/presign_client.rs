use std::time::Duration;

use reqwest::Client;
use reqwest::Response;
use serde::Serialize;

use crate::domain::ErrorBody;
use crate::domain::SigninEmail;
use crate::domain::SigninPayload;
use crate::domain::SubmissionResult;

/// Message used when the presign endpoint could not be reached at all
pub const UNREACHABLE_MSG: &str = "Could not reach the sign-in service";

/// Client for the remote endpoint that exchanges a registered email for a
/// presigned url.
///
/// The underlying `reqwest::Client` holds a connection pool; build one
/// `PresignClient` at startup and share it (via `web::Data`) rather than one
/// per request.
pub struct PresignClient {
    http_client: Client,
    url: String,
}

#[derive(Serialize)]
struct PostEmailBody<'a> {
    email: &'a str,
}

impl PresignClient {
    pub fn new(
        url: String,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let http_client = Client::builder().timeout(timeout).build()?;
        Ok(Self { http_client, url })
    }

    /// `POST {"email": ...}` to the presign endpoint, once.
    ///
    /// Never fails: every outcome is folded into a `SubmissionResult`.
    ///
    /// - 2xx: `data` is the body, if it parses as a `SigninPayload`
    /// - other status: `message` is the body's `message`, if any
    /// - no response (connect/dns failure, timeout): status 0 with
    ///   `UNREACHABLE_MSG`
    #[tracing::instrument(
        name = "Requesting presigned url",
        skip(self, email),
        fields(
            email = %email,
            status = tracing::field::Empty,
        )
    )]
    pub async fn post_email(
        &self,
        email: &SigninEmail,
    ) -> SubmissionResult {
        let resp = self
            .http_client
            .post(&self.url)
            .json(&PostEmailBody {
                email: email.as_ref(),
            })
            .send()
            .await;

        let result = match resp {
            Ok(resp) => read_response(resp).await,
            Err(e) => no_response(e),
        };

        tracing::Span::current().record("status", result.status());
        result
    }
}

async fn read_response(resp: Response) -> SubmissionResult {
    let status = resp.status();

    // a body we can't read is as good as no response
    let body = match resp.bytes().await {
        Ok(body) => body,
        Err(e) => return no_response(e),
    };

    if status.is_success() {
        let data = serde_json::from_slice::<SigninPayload>(&body).ok();
        if data.is_none() {
            tracing::warn!("presign endpoint returned {status} with an unparseable body");
        }
        SubmissionResult::success(status.as_u16(), data)
    } else {
        let message = serde_json::from_slice::<ErrorBody>(&body)
            .ok()
            .and_then(|b| b.message);
        tracing::info!(
            error.message = message.as_deref().unwrap_or_default(),
            "presign endpoint refused with {status}"
        );
        SubmissionResult::failure(status.as_u16(), message)
    }
}

fn no_response(e: reqwest::Error) -> SubmissionResult {
    tracing::warn!(
        error.cause_chain = ?e,
        error.message = %e,
        "presign endpoint could not be reached"
    );
    SubmissionResult::failure(
        SubmissionResult::NO_RESPONSE,
        Some(UNREACHABLE_MSG.to_string()),
    )
}
