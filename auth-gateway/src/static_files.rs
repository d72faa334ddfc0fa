// auth-gateway/src/static_files.rs
use actix_files::{Files, NamedFile};
use actix_web::{web, Result};
use common::{Config, StaticFilesConfig};
use std::path::{Path, PathBuf};

use crate::middleware::session_gate::SessionGate;

// Serve the application shell. Only reachable through SessionGate, so
// a request that lands here already carries a valid session cookie.
async fn shell(config: web::Data<Config>) -> Result<NamedFile> {
    let index = Path::new(&config.static_files.path).join(&config.static_files.index);
    Ok(NamedFile::open(index)?)
}

async fn favicon_png(config: web::Data<Config>) -> Result<NamedFile> {
    Ok(NamedFile::open(
        Path::new(&config.static_files.path).join("favicon.png"),
    )?)
}

async fn favicon_ico(config: web::Data<Config>) -> Result<NamedFile> {
    Ok(NamedFile::open(
        Path::new(&config.static_files.path).join("favicon.ico"),
    )?)
}

// Configure the asset mounts and the gated shell. There is no SPA
// catch-all: the shell is auth-gated and must not leak through a
// default service, so unmatched paths get ordinary 404s.
pub fn configure(cfg: &mut web::ServiceConfig, config: &StaticFilesConfig) {
    let root = PathBuf::from(&config.path);

    cfg.service(
        web::resource("/")
            .wrap(SessionGate)
            .route(web::get().to(shell)),
    )
    .service(Files::new("/js", root.join("js")).prefer_utf8(true))
    .service(Files::new("/css", root.join("css")).prefer_utf8(true))
    .service(Files::new("/img", root.join("img")))
    .service(web::resource("/favicon.png").route(web::get().to(favicon_png)))
    .service(web::resource("/favicon.ico").route(web::get().to(favicon_ico)));
}
