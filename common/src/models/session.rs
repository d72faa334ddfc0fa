// common/src/models/session.rs
use serde::{Deserialize, Serialize};

/// Cookie name shared between the backend, the gateway, and the browser
pub const SESSION_COOKIE_NAME: &str = "HOMEPORT_SESSION";

/// Cookie lifetime in seconds (7 days), fixed at issuance
pub const SESSION_COOKIE_MAX_AGE: i64 = 604_800;

// Upper bound on a plausible session token; anything longer is rejected
const MAX_TOKEN_LEN: usize = 4096;

/// Post-login payload telling the client where to navigate next.
/// Never contains the session token itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedirectState {
    pub authenticated: bool,
    pub redirect: String,
}

/// Scan an ordered sequence of `Set-Cookie` header values for the
/// backend's session cookie and return its value up to (not including)
/// the first `;`. An entry with an empty value counts as absent.
///
/// Callers normalise the header into a sequence before calling this,
/// so a single-valued and a multi-valued response take the same path.
pub fn extract_session_token<'a, I>(set_cookie_values: I) -> Option<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut token = None;

    for value in set_cookie_values {
        let rest = match value
            .strip_prefix(SESSION_COOKIE_NAME)
            .and_then(|r| r.strip_prefix('='))
        {
            Some(rest) => rest,
            None => continue,
        };

        let candidate = match rest.find(';') {
            Some(end) => &rest[..end],
            None => rest,
        };

        if !candidate.is_empty() {
            token = Some(candidate.to_string());
        }
    }

    token
}

/// Shape-check an inbound session cookie value. Fails closed: empty,
/// oversized, or non-cookie-octet values are rejected. Whether the
/// token is actually live is the backend's business, not ours.
pub fn validate_token(value: &str) -> bool {
    if value.is_empty() || value.len() > MAX_TOKEN_LEN {
        return false;
    }

    value.bytes().all(is_cookie_octet)
}

// RFC 6265 cookie-octet: printable US-ASCII minus space, `"`, `,`, `;`, `\`
fn is_cookie_octet(b: u8) -> bool {
    matches!(b, 0x21 | 0x23..=0x2B | 0x2D..=0x3A | 0x3C..=0x5B | 0x5D..=0x7E)
}

/// Compute the post-login RedirectState from the extracted token and
/// the `redirect` query parameter of the login request. Pure, no I/O.
pub fn redirect_state(token: &str, requested_redirect: Option<&str>) -> RedirectState {
    RedirectState {
        authenticated: validate_token(token),
        redirect: sanitise_redirect(requested_redirect),
    }
}

// Only local absolute paths survive; absolute URLs, protocol-relative
// `//` forms, and backslash variants all collapse to `/` so the login
// response can never be used as an open redirector.
fn sanitise_redirect(requested: Option<&str>) -> String {
    match requested {
        Some(path)
            if path.starts_with('/') && !path.starts_with("//") && !path.contains('\\') =>
        {
            path.to_string()
        }
        _ => "/".to_string(),
    }
}
