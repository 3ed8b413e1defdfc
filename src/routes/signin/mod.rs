mod get;
mod post;

use actix_web::http::header::ContentType;
use actix_web::http::StatusCode;
use actix_web::HttpResponse;
pub use get::signin_form;
pub use post::signin;

use crate::domain::SigninState;
use crate::utils::redirect;

/// Turn the outcome of a sign-in request into what the browser gets:
///
/// - `Idle`: the form, with the validation message (if any) below it
/// - `Redirecting`: `303` to the presigned url
/// - `Failed`: the error message in place of the form, with a link back to it
fn respond(state: &SigninState) -> HttpResponse {
    match state {
        SigninState::Idle { validation_error } => HttpResponse::Ok()
            .content_type(ContentType::html())
            .body(form_page(validation_error.as_deref())),

        // answers the form's POST, so the browser follows with a GET and the
        // POST never lands in its history
        SigninState::Redirecting { presigned } => redirect(presigned),

        SigninState::Failed { status, message } => HttpResponse::build(failure_status(*status))
            .content_type(ContentType::html())
            .body(failure_page(message)),
    }
}

/// Pass the presign endpoint's status through if it is an error status;
/// anything else (no response, 2xx without a url) is a bad gateway
fn failure_status(status: u16) -> StatusCode {
    StatusCode::from_u16(status)
        .ok()
        .filter(|s| s.is_client_error() || s.is_server_error())
        .unwrap_or(StatusCode::BAD_GATEWAY)
}

fn form_page(validation_error: Option<&str>) -> String {
    let validation_error = match validation_error {
        Some(msg) => format!(
            r#"<h4 class="error">{}</h4>"#,
            htmlescape::encode_minimal(msg)
        ),
        None => String::new(),
    };

    // the email field is always empty: after a rejected attempt the message is
    // shown, after a submitted one the browser has navigated away
    format!(
        r#"<!doctype html>
<html lang="en">
  <head>
    <meta http-equiv="content-type" content="text/html; charset=utf-8" />
    <title>Sign in</title>
  </head>
  <body>
    <form action="/" method="post">
      <input type="text" placeholder="jane.doe@email.com" name="email" />
      <button type="submit">Go!</button>
    </form>
    {validation_error}
  </body>
</html>
"#
    )
}

fn failure_page(message: &str) -> String {
    format!(
        r#"<!doctype html>
<html lang="en">
  <head>
    <meta http-equiv="content-type" content="text/html; charset=utf-8" />
    <title>Sign in</title>
  </head>
  <body>
    <h3 class="error">{}</h3>
    <p><a href="/">Try again</a></p>
  </body>
</html>
"#,
        htmlescape::encode_minimal(message)
    )
}
