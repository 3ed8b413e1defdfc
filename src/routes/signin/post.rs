use std::fmt::Debug;

use actix_web::error::InternalError;
use actix_web::web;
use actix_web::HttpResponse;
use actix_web_flash_messages::FlashMessage;
use serde::Deserialize;

use super::respond;
use crate::domain::SigninEmail;
use crate::domain::SigninState;
use crate::domain::INVALID_EMAIL_MSG;
use crate::presign_client::PresignClient;
use crate::routes::error_chain_fmt;
use crate::utils::redirect;

#[derive(Deserialize)]
pub struct SigninFormData {
    email: String,
}

#[derive(thiserror::Error)]
pub enum SigninError {
    // this error string is displayed in the browser, below the form
    #[error("{}", INVALID_EMAIL_MSG)]
    ValidationError(#[source] anyhow::Error),
    // only logged; the page shows `message` alone
    #[error("Sign-in failed with status {status}: {message}")]
    SubmissionError { status: u16, message: String },
}

impl Debug for SigninError {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

/// `POST /`
///
/// Validate the submitted email and, if it looks ok, exchange it for a
/// presigned url at the presign endpoint.
///
/// - invalid email: nothing is sent; `303` back to `GET /`, which shows the
///   validation message
/// - endpoint answered 200 with a url: `303` to that url
/// - anything else: the endpoint's message, in place of the form
///
/// # Request example
///
/// ```sh
///     curl -v --data 'email=jane.doe%40email.com' http://127.0.0.1:8000/
/// ```
#[tracing::instrument(
    name = "Signing in",
    skip(form, presign_client),
    fields(
        email = %form.email,
        outcome = tracing::field::Empty,
    )
)]
pub async fn signin(
    form: web::Form<SigninFormData>,
    presign_client: web::Data<PresignClient>,
) -> Result<HttpResponse, InternalError<SigninError>> {
    let email = SigninEmail::parse(form.0.email).map_err(|e| {
        let err = SigninError::ValidationError(anyhow::anyhow!(e));
        FlashMessage::error(err.to_string()).send();
        tracing::Span::current().record("outcome", "invalid");
        InternalError::from_response(err, redirect("/"))
    })?;

    let result = presign_client.post_email(&email).await;
    let state = SigninState::after_submission(&result);
    let resp = respond(&state);

    match state {
        SigninState::Failed { status, message } => {
            tracing::Span::current().record("outcome", "failed");
            Err(InternalError::from_response(
                SigninError::SubmissionError { status, message },
                resp,
            ))
        }
        _ => {
            tracing::Span::current().record("outcome", "redirecting");
            Ok(resp)
        }
    }
}
