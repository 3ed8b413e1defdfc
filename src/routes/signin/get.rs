use actix_web::HttpResponse;
use actix_web_flash_messages::IncomingFlashMessages;
use actix_web_flash_messages::Level;

use super::respond;
use crate::domain::SigninState;

/// `GET /`
///
/// The sign-in form. A rejected `POST /` redirects back here with the
/// validation message stored in a flash cookie; the message is shown once,
/// and is gone on the next load (i.e. it is cleared by the next attempt, not
/// by typing).
pub async fn signin_form(flash_messages: IncomingFlashMessages) -> HttpResponse {
    // at most one message is ever sent per redirect
    let validation_error = flash_messages
        .iter()
        .filter(|m| m.level() == Level::Error)
        .map(|m| m.content().to_string())
        .last();

    respond(&SigninState::Idle { validation_error })
}
