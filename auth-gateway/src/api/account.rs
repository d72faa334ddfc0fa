// auth-gateway/src/api/account.rs
use actix_web::http::header::CONTENT_TYPE;
use actix_web::http::StatusCode;
use actix_web::{get, post, web, HttpRequest, HttpResponse};
use serde::Deserialize;
use serde_json::json;

use common::models::session::{extract_session_token, redirect_state};

use crate::backend::BackendClient;
use crate::error::GatewayError;
use crate::session::session_cookie;
use crate::utils::apps::sanitise_app_id;

#[derive(Debug, Deserialize)]
pub struct LoginQuery {
    redirect: Option<String>,
}

/// The credential-bridging handshake. Forwards the login body verbatim
/// to the backend, mirrors backend HTTP errors exactly, extracts the
/// backend-issued session token from the Set-Cookie header(s), and on
/// success issues the gateway's own session cookie with the redirect
/// state as the response body.
///
/// Exactly one outbound call, no retries; every failure branch is
/// terminal for the request.
#[post("/account/login")]
pub async fn login(
    req: HttpRequest,
    body: web::Bytes,
    query: web::Query<LoginQuery>,
    backend: web::Data<BackendClient>,
) -> Result<HttpResponse, GatewayError> {
    let content_type = req
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("application/json")
        .to_string();

    // Transport failures (no HTTP response at all) surface as the
    // generic 500 through the error boundary
    let response = backend.login(&content_type, body).await?;

    if !response.status().is_success() {
        // Passthrough: the client sees exactly what the backend said
        let status = StatusCode::from_u16(response.status().as_u16())
            .unwrap_or(StatusCode::BAD_GATEWAY);
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        let body = response.bytes().await?;

        return Err(GatewayError::Backend {
            status,
            content_type,
            body,
        });
    }

    // Set-Cookie may arrive as one value or several; get_all normalises
    // both shapes into one ordered sequence before parsing
    let set_cookie_values: Vec<&str> = response
        .headers()
        .get_all(reqwest::header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .collect();

    let token = match extract_session_token(set_cookie_values) {
        Some(token) => token,
        // The backend reports bad credentials as an HTTP error, handled
        // above, so a 2xx without a session cookie should never happen
        None => return Err(GatewayError::MissingCredential),
    };

    let state = redirect_state(&token, query.redirect.as_deref());

    tracing::info!("Login bridged, session cookie issued");

    Ok(HttpResponse::Ok()
        .cookie(session_cookie(token))
        .json(state))
}

/// Get the account wallpaper (public, intentionally ungated).
#[get("/account/wallpaper")]
pub async fn wallpaper(
    backend: web::Data<BackendClient>,
) -> Result<HttpResponse, GatewayError> {
    let response = backend.account_wallpaper().await?.error_for_status()?;

    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    let body = response.bytes().await?;

    let mut builder = HttpResponse::Ok();
    if let Some(content_type) = content_type {
        builder.content_type(content_type.as_str());
    }

    Ok(builder.body(body))
}

#[derive(Debug, Deserialize)]
pub struct AppQuery {
    app: String,
}

/// Get basic info for an app (public, intentionally ungated). The id
/// is sanitised before it leaves the process.
#[get("/apps")]
pub async fn app_info(
    query: web::Query<AppQuery>,
    backend: web::Data<BackendClient>,
) -> Result<HttpResponse, GatewayError> {
    let app_id = sanitise_app_id(&query.app);
    if app_id.is_empty() {
        return Ok(HttpResponse::BadRequest().json(json!({
            "error": "Invalid app id"
        })));
    }

    let response = backend.app_info(&app_id).await?.error_for_status()?;
    let body = response.bytes().await?;

    Ok(HttpResponse::Ok()
        .content_type("application/json")
        .body(body))
}
