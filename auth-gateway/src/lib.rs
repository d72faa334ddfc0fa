// auth-gateway/src/lib.rs
pub mod api;
pub mod backend;
pub mod error;
pub mod middleware;
pub mod proxy;
pub mod session;
pub mod static_files;
pub mod utils;

use actix_web::{dev::Server, web, App, HttpServer};
use common::Config;
use std::net::SocketAddr;

use crate::backend::BackendClient;

/// Build and bind the gateway server. Returns the running server
/// future together with the bound address so callers binding to an
/// OS-assigned port can discover where it landed.
pub fn run(config: Config) -> std::io::Result<(Server, SocketAddr)> {
    // The backend host is fixed for the life of the process
    let backend = web::Data::new(BackendClient::new(config.backend_host.clone()));

    let gateway_addr = config.gateway_addr.clone();
    let static_config = config.static_files.clone();
    let config_data = web::Data::new(config);

    let server = HttpServer::new(move || {
        let static_config = static_config.clone();
        App::new()
            .app_data(config_data.clone())
            .app_data(backend.clone())
            .configure(api::configure)
            .configure(proxy::configure)
            .configure(move |cfg| static_files::configure(cfg, &static_config))
    })
    .bind(&gateway_addr)?;

    let addr = server.addrs()[0];

    Ok((server.run(), addr))
}
