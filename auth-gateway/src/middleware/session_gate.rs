// auth-gateway/src/middleware/session_gate.rs
use std::task::{Context, Poll};

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::Error;
use futures_util::future::{ready, LocalBoxFuture, Ready};

use common::models::session::{validate_token, SESSION_COOKIE_NAME};

use crate::error::GatewayError;

/// Route-scoped gate in front of the application shell. Validation
/// fails closed: a missing, empty, or malformed session cookie
/// short-circuits with `GatewayError::Validation`, which the uniform
/// error boundary renders as a structured 401. A valid cookie forwards
/// the request to the inner service untouched.
///
/// The public routes (account wallpaper, app info, static assets) are
/// registered without this wrap on purpose.
pub struct SessionGate;

impl<S, B> Transform<S, ServiceRequest> for SessionGate
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = SessionGateMiddleware<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SessionGateMiddleware { service }))
    }
}

pub struct SessionGateMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for SessionGateMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<ServiceResponse<B>, Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let valid = req
            .cookie(SESSION_COOKIE_NAME)
            .map(|cookie| validate_token(cookie.value()))
            .unwrap_or(false);

        if !valid {
            tracing::warn!("Rejected unauthenticated request to {}", req.path());

            return Box::pin(async { Err(GatewayError::Validation.into()) });
        }

        let fut = self.service.call(req);
        Box::pin(async move { fut.await })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::cookie::Cookie;
    use actix_web::http::StatusCode;
    use actix_web::{test, web, App, HttpResponse};

    macro_rules! gated_app {
        () => {
            test::init_service(App::new().service(
                web::resource("/").wrap(SessionGate).route(
                    web::get().to(|| async { HttpResponse::Ok().body("shell") }),
                ),
            ))
        };
    }

    #[actix_web::test]
    async fn test_missing_cookie_is_rejected() {
        let app = gated_app!().await;

        let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_malformed_cookie_is_rejected() {
        let app = gated_app!().await;

        let req = test::TestRequest::get()
            .uri("/")
            .cookie(Cookie::new(SESSION_COOKIE_NAME, "bad token"))
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_valid_cookie_passes_through() {
        let app = gated_app!().await;

        let req = test::TestRequest::get()
            .uri("/")
            .cookie(Cookie::new(SESSION_COOKIE_NAME, "abc123"))
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body = test::read_body(resp).await;
        assert_eq!(&body[..], b"shell");
    }
}
