use super::SubmissionResult;

/// Shown under the form when `is_valid_email` rejects the input
pub const INVALID_EMAIL_MSG: &str = "Not a valid email my friend...";
/// Shown when the presign endpoint failed without saying why
pub const GENERIC_FAILURE_MSG: &str = "Something went wrong, please try again later";
/// Shown when the presign endpoint answered 200 but without a usable url
pub const UNEXPECTED_RESPONSE_MSG: &str = "The sign-in service returned an unexpected response";

/// What the sign-in page shows after a request. Replaces the
/// loading/error/validation flags of a typical form with one value per
/// outcome.
//
// Idle -> Validating -> Idle (with validation error)
//                    -> Submitting -> Redirecting
//                                  -> Failed
//
// Validating and Submitting only exist for the duration of a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SigninState {
    /// Form shown, with the message from the previous attempt if it was
    /// rejected locally
    Idle { validation_error: Option<String> },
    /// Terminal: send the browser to the presigned url
    Redirecting { presigned: String },
    /// Terminal: show `message` instead of the form
    Failed { status: u16, message: String },
}

impl SigninState {
    /// `Submitting -> Redirecting | Failed`
    ///
    /// Any status other than 200 fails, whatever the body contained. A 200
    /// without a non-empty `presigned` url fails too, rather than redirecting
    /// nowhere.
    pub fn after_submission(result: &SubmissionResult) -> Self {
        if !result.is_ok() {
            let message = result
                .message()
                .filter(|m| !m.is_empty())
                .unwrap_or(GENERIC_FAILURE_MSG)
                .to_string();
            return Self::Failed {
                status: result.status(),
                message,
            };
        }

        match result
            .data()
            .and_then(|d| d.presigned.as_deref())
            .filter(|url| !url.is_empty())
        {
            Some(url) => Self::Redirecting {
                presigned: url.to_string(),
            },
            None => Self::Failed {
                status: result.status(),
                message: UNEXPECTED_RESPONSE_MSG.to_string(),
            },
        }
    }
}
