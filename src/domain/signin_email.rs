use once_cell::sync::Lazy;
use regex::Regex;

/// Longest address the sign-in service accepts, in UTF-16 code units (so an
/// emoji counts twice).
pub const MAX_EMAIL_LEN: usize = 35;

// the regex crate's `\s` and `.` are not the browser's: JS whitespace includes
// U+FEFF and excludes U+0085, and JS `.` also stops at \r, U+2028 and U+2029.
// Both are spelled out so that the same inputs are accepted as in the browser
const JS_WHITESPACE: &str =
    r"\t\n\x0B\x0C\r \xA0\x{1680}\x{2000}-\x{200A}\x{2028}\x{2029}\x{202F}\x{205F}\x{3000}\x{FEFF}";
const JS_ANY: &str = r"[^\n\r\x{2028}\x{2029}]";

// local part: dot-separated runs of "safe" chars, or any char followed by a
// quoted string. domain: bracketed IPv4 literal, or hostname ending in an
// alphabetic label of at least 2 chars
static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    let pattern = r#"^(([^<>()\[\]\\.,;:{ws}@"]+(\.[^<>()\[\]\\.,;:{ws}@"]+)*)|{any}("{any}+"))@((\[[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\])|(([a-zA-Z\-0-9]+\.)+[a-zA-Z]{2,}))$"#
        .replace("{ws}", JS_WHITESPACE)
        .replace("{any}", JS_ANY);
    Regex::new(&pattern).expect("email pattern is a valid regex")
});

/// Returns `true` if `email` looks like an email address the sign-in service
/// will accept.
///
/// The pattern is matched case-insensitively (against the lower-cased input),
/// then the length of the original input is checked. Whitespace is never
/// trimmed, so `" jane@foo.com"` is rejected.
pub fn is_valid_email(email: &str) -> bool {
    if !EMAIL_PATTERN.is_match(&email.to_lowercase()) {
        return false;
    }
    // lower-casing may change the length of non-ascii input, so the bound is
    // applied to the original string
    utf16_len(email) <= MAX_EMAIL_LEN
}

fn utf16_len(s: &str) -> usize { s.encode_utf16().count() }

/// An email address that passed `is_valid_email`. Only ever constructed with
/// `SigninEmail::parse`; the field is private so the check cannot be skipped.
#[derive(Debug, Clone)]
pub struct SigninEmail(String);

impl SigninEmail {
    pub fn parse(email: String) -> Result<Self, String> {
        is_valid_email(&email)
            .then_some(Self(email.clone()))
            .ok_or(format!("Invalid email: {email:?}"))
    }
}

impl AsRef<str> for SigninEmail {
    fn as_ref(&self) -> &str { &self.0 }
}

impl std::fmt::Display for SigninEmail {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
