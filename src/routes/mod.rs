use actix_web::web;

use crate::services::clientes::PageLimits;

pub mod clientes;
pub mod error;

/// Mounts the `/api/clientes` resource together with its extractor settings.
///
/// `/search` is registered ahead of `/{id}` so it is never read as an id.
pub fn configure(limits: PageLimits) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        cfg.configure(error::extractor_configs)
            .app_data(web::Data::new(limits))
            .service(
                web::scope("/api/clientes")
                    .service(clientes::list_clientes)
                    .service(clientes::create_cliente)
                    .service(clientes::search_clientes)
                    .service(clientes::get_cliente)
                    .service(clientes::update_cliente)
                    .service(clientes::delete_cliente),
            );
    }
}
