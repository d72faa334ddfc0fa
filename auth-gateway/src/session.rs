// auth-gateway/src/session.rs
use actix_web::cookie::time::Duration as CookieDuration;
use actix_web::cookie::{Cookie, SameSite};
use common::models::session::{SESSION_COOKIE_MAX_AGE, SESSION_COOKIE_NAME};

/// Build the gateway's session cookie carrying the backend-issued
/// token. Not script-readable, restricted to same-site lax navigation,
/// and the 7-day lifetime is computed fresh at every issuance. The
/// attribute set is a fixed part of the contract with the browser and
/// never varies per request.
pub fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE_NAME, token)
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(CookieDuration::seconds(SESSION_COOKIE_MAX_AGE))
        .finish()
}
