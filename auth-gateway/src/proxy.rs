// auth-gateway/src/proxy.rs
use actix_web::{web, HttpResponse};

use crate::backend::BackendClient;
use crate::error::GatewayError;

// Configure the wallpaper streaming route. The inline path regex is
// the only admission gate: anything that is not digits-dot-word never
// reaches the handler and falls through to ordinary 404 handling, so
// traversal shapes cannot touch the backend.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource(r"/wallpapers/{filename:\d+\.\w+}")
            .route(web::get().to(wallpaper_file)),
    );
}

// Streams a protected wallpaper from the backend to the client without
// buffering. The reqwest response is owned by the streamed body, so
// the outbound connection lives exactly as long as the stream and is
// released on completion, error, or client disconnect alike; a slow
// client slows the backend read through ordinary poll backpressure.
async fn wallpaper_file(
    path: web::Path<(String,)>,
    backend: web::Data<BackendClient>,
) -> Result<HttpResponse, GatewayError> {
    let filename = &path.0;

    let response = backend.wallpaper_file(filename).await?.error_for_status()?;

    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    let content_length = response.content_length();

    tracing::debug!("Streaming wallpaper {}", filename);

    let mut builder = HttpResponse::Ok();
    if let Some(content_type) = &content_type {
        builder.content_type(content_type.as_str());
    }
    if let Some(length) = content_length {
        builder.no_chunking(length);
    }

    Ok(builder.streaming(response.bytes_stream()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{test, App, HttpServer};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    const WALLPAPER_BYTES: &[u8] = b"\x89PNG fake wallpaper payload";

    async fn spawn_backend(hits: Arc<AtomicUsize>) -> String {
        let server = HttpServer::new(move || {
            let hits = hits.clone();
            App::new().route(
                "/wallpapers/{filename}",
                web::get().to(move |_path: web::Path<(String,)>| {
                    hits.fetch_add(1, Ordering::SeqCst);
                    async {
                        HttpResponse::Ok()
                            .content_type("image/png")
                            .body(WALLPAPER_BYTES)
                    }
                }),
            )
        })
        .bind(("127.0.0.1", 0))
        .expect("bind mock backend");

        let addr = server.addrs()[0];
        actix_web::rt::spawn(server.run());

        addr.to_string()
    }

    #[actix_web::test]
    async fn test_matching_filename_streams_bytes() {
        let hits = Arc::new(AtomicUsize::new(0));
        let backend_host = spawn_backend(hits.clone()).await;

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(BackendClient::new(backend_host)))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::get().uri("/wallpapers/42.jpg").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers().get("content-type").unwrap(),
            "image/png"
        );

        let body = test::read_body(resp).await;
        assert_eq!(&body[..], WALLPAPER_BYTES);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[actix_web::test]
    async fn test_non_matching_filenames_never_reach_the_backend() {
        let hits = Arc::new(AtomicUsize::new(0));
        let backend_host = spawn_backend(hits.clone()).await;

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(BackendClient::new(backend_host)))
                .configure(configure),
        )
        .await;

        for path in [
            "/wallpapers/..%2Fetc%2Fpasswd",
            "/wallpapers/notafile",
            "/wallpapers/42",
            "/wallpapers/.jpg",
            "/wallpapers/abc.jpg",
        ] {
            let req = test::TestRequest::get().uri(path).to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::NOT_FOUND, "path {}", path);
        }

        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }
}
