// auth-gateway/src/backend.rs
use actix_web::web::Bytes;
use reqwest::header::CONTENT_TYPE;
use reqwest::{redirect, Client, Response};

/// Outbound client for the backend RPC service. Holds the one
/// `reqwest::Client` and the immutable backend host, both fixed at
/// startup; this is the only component that performs network I/O.
pub struct BackendClient {
    http: Client,
    host: String,
}

impl BackendClient {
    pub fn new(host: String) -> Self {
        // Redirects are never followed and no cookie jar is installed:
        // backend responses must be mirrored as-is and Set-Cookie must
        // stay visible to the extraction logic.
        let http = Client::builder()
            .redirect(redirect::Policy::none())
            .build()
            .expect("Failed to build backend HTTP client");

        Self { http, host }
    }

    /// Forward a login request body verbatim to the backend login
    /// endpoint. The credential is never parsed, stored, or logged.
    pub async fn login(
        &self,
        content_type: &str,
        body: Bytes,
    ) -> Result<Response, reqwest::Error> {
        self.http
            .post(format!("http://{}/rpc/user.login", self.host))
            .header(CONTENT_TYPE, content_type)
            .body(body)
            .send()
            .await
    }

    /// Fetch the current account wallpaper (public endpoint).
    pub async fn account_wallpaper(&self) -> Result<Response, reqwest::Error> {
        self.http
            .get(format!("http://{}/rpc/account.wallpaper", self.host))
            .send()
            .await
    }

    /// Fetch basic info for an app by its (already sanitised) id.
    pub async fn app_info(&self, app_id: &str) -> Result<Response, reqwest::Error> {
        self.http
            .get(format!("http://{}/rpc/apps.info", self.host))
            .query(&[("app", app_id)])
            .send()
            .await
    }

    /// Open a wallpaper file stream. The returned response owns the
    /// connection; dropping it releases the connection on every exit
    /// path, including client disconnect.
    pub async fn wallpaper_file(&self, filename: &str) -> Result<Response, reqwest::Error> {
        self.http
            .get(format!("http://{}/wallpapers/{}", self.host, filename))
            .send()
            .await
    }
}
