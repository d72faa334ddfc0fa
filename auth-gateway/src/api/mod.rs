// auth-gateway/src/api/mod.rs
pub mod account;

pub fn configure(cfg: &mut actix_web::web::ServiceConfig) {
    cfg.service(
        actix_web::web::scope("/v1")
            .service(account::login)
            .service(account::wallpaper)
            .service(account::app_info),
    );
}
