use serde::Deserialize;
use serde::Serialize;

/// Body returned by the presign endpoint on success. Only `presigned` is
/// used; the reference backend also sends `"message": "ok"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SigninPayload {
    #[serde(default)]
    pub presigned: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Body returned by the presign endpoint on failure
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub message: Option<String>,
}

/// Normalised outcome of a single call to the presign endpoint.
///
/// A result is either a success (`data` may be set, `message` never is) or a
/// failure (`message` may be set, `data` never is). The fields are private so
/// that both can never be set at once; use `success` and `failure`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionResult {
    status: u16,
    data: Option<SigninPayload>,
    message: Option<String>,
}

impl SubmissionResult {
    /// Status used when no response was received at all
    pub const NO_RESPONSE: u16 = 0;

    pub fn success(
        status: u16,
        data: Option<SigninPayload>,
    ) -> Self {
        Self {
            status,
            data,
            message: None,
        }
    }

    pub fn failure(
        status: u16,
        message: Option<String>,
    ) -> Self {
        Self {
            status,
            data: None,
            message,
        }
    }

    pub fn status(&self) -> u16 { self.status }

    pub fn data(&self) -> Option<&SigninPayload> { self.data.as_ref() }

    pub fn message(&self) -> Option<&str> { self.message.as_deref() }

    /// 200 is the only status treated as success; other 2xx codes are not
    pub fn is_ok(&self) -> bool { self.status == 200 }
}
