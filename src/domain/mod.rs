mod signin_email;
mod signin_state;
mod submission;
// allow external `use` statements to skip `signin_email` etc
pub use signin_email::is_valid_email;
pub use signin_email::SigninEmail;
pub use signin_email::MAX_EMAIL_LEN;
pub use signin_state::SigninState;
pub use signin_state::GENERIC_FAILURE_MSG;
pub use signin_state::INVALID_EMAIL_MSG;
pub use signin_state::UNEXPECTED_RESPONSE_MSG;
pub use submission::ErrorBody;
pub use submission::SigninPayload;
pub use submission::SubmissionResult;
